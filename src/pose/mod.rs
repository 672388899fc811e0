//! Pose synthesis from raw matches.
//!
//! A match carries only a class id and template index; the pose table holds
//! the reference rotation and translation recorded when that template was
//! built. Synthesis rotates the reference translation into place and applies
//! the fixed sign correction expected by downstream consumers.

use nalgebra::{Matrix3, Vector3};

use crate::engine::Match;
use crate::model::PoseTable;
use crate::util::DetectError;

/// One oriented pose estimate.
///
/// Results are implicitly ranked by the order the engine reported their
/// matches; the detector never re-sorts them.
#[derive(Clone, Debug, PartialEq)]
pub struct PoseResult {
    pub object_id: String,
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

/// Converts a raw match into a pose estimate using the loaded pose table.
///
/// Computes `T' = R * T`, then negates the Y and Z components of `T'`. The
/// sign flip converts the template-local pose convention into the consumer's
/// camera convention and is a fixed contract, not something to re-derive.
pub fn synthesize(m: &Match, table: &PoseTable) -> Result<PoseResult, DetectError> {
    let (rotation, reference) =
        table
            .get(&m.class_id, m.template_index)
            .ok_or_else(|| DetectError::PoseLookup {
                class_id: m.class_id.clone(),
                template_index: m.template_index,
            })?;

    let mut translation = rotation * reference;
    translation.y = -translation.y;
    translation.z = -translation.z;

    Ok(PoseResult {
        object_id: m.class_id.clone(),
        rotation: *rotation,
        translation,
    })
}
