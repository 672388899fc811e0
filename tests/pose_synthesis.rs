mod common;

use common::{a_match, document_with_poses, StubEngine, IDENTITY_ROWS};
use modalmatch::{load_documents, synthesize, DetectError, PoseTable};
use nalgebra::{Matrix3, Vector3};

fn mug_table() -> PoseTable {
    let mut engine = StubEngine::default();
    let mut table = PoseTable::default();
    load_documents(
        &[document_with_poses(
            "mug",
            vec![IDENTITY_ROWS, IDENTITY_ROWS],
            vec![[0.0, 0.0, 1.0], [0.0, 1.0, 0.0]],
        )],
        &mut engine,
        &mut table,
    )
    .unwrap();
    table
}

#[test]
fn identity_rotation_negates_y_and_z() {
    let table = mug_table();

    let pose = synthesize(&a_match("mug", 0, 95.0), &table).unwrap();
    assert_eq!(pose.object_id, "mug");
    assert_eq!(pose.rotation, Matrix3::identity());
    assert_eq!(pose.translation, Vector3::new(0.0, 0.0, -1.0));

    let pose = synthesize(&a_match("mug", 1, 95.0), &table).unwrap();
    assert_eq!(pose.translation, Vector3::new(0.0, -1.0, 0.0));
}

#[test]
fn x_component_passes_through_unchanged() {
    let mut engine = StubEngine::default();
    let mut table = PoseTable::default();
    load_documents(
        &[document_with_poses("mug", vec![IDENTITY_ROWS], vec![[4.5, 0.0, 0.0]])],
        &mut engine,
        &mut table,
    )
    .unwrap();

    let pose = synthesize(&a_match("mug", 0, 95.0), &table).unwrap();
    assert_eq!(pose.translation, Vector3::new(4.5, 0.0, 0.0));
}

#[test]
fn rotation_is_applied_before_the_sign_flip() {
    // 90 degrees about Z: R * [1, 2, 3] = [-2, 1, 3], then flip y/z.
    let rotation = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
    let mut engine = StubEngine::default();
    let mut table = PoseTable::default();
    load_documents(
        &[document_with_poses("mug", vec![rotation], vec![[1.0, 2.0, 3.0]])],
        &mut engine,
        &mut table,
    )
    .unwrap();

    let pose = synthesize(&a_match("mug", 0, 95.0), &table).unwrap();
    assert_eq!(pose.translation, Vector3::new(-2.0, -1.0, -3.0));
    // The reported rotation is the stored reference, untouched.
    assert_eq!(pose.rotation, Matrix3::from_fn(|r, c| rotation[r][c]));
}

#[test]
fn synthesis_is_deterministic() {
    let table = mug_table();
    let first = synthesize(&a_match("mug", 0, 95.0), &table).unwrap();
    let second = synthesize(&a_match("mug", 0, 95.0), &table).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unknown_pose_entry_is_an_invariant_violation() {
    let table = mug_table();

    let err = synthesize(&a_match("bowl", 0, 95.0), &table).unwrap_err();
    assert_eq!(
        err,
        DetectError::PoseLookup {
            class_id: "bowl".to_string(),
            template_index: 0,
        }
    );

    let err = synthesize(&a_match("mug", 2, 95.0), &table).unwrap_err();
    assert_eq!(
        err,
        DetectError::PoseLookup {
            class_id: "mug".to_string(),
            template_index: 2,
        }
    );
}
