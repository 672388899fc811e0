//! Model-store documents and the loader that populates an engine.
//!
//! Each document carries a class identifier, an opaque template blob and
//! two parallel pose attachments. Loading registers the blob's templates
//! with the engine in blob order and appends the pose arrays in that same
//! order, so template index `i` in the engine is always entry `i` in the
//! pose table. That alignment is the load-bearing invariant the rest of the
//! crate builds on; it is validated per document before anything from the
//! document is registered.

use std::collections::HashMap;

use nalgebra::{Matrix3, Vector3};
use serde::Deserialize;
use serde_json::Value;

use crate::engine::{MultiModalTemplate, TemplateEngine};
use crate::trace::{trace_event, trace_span};
use crate::util::LoadError;

/// One document pulled from the model store at configuration time.
#[derive(Clone, Debug, Deserialize)]
pub struct ModelDocument {
    /// Class identifier.
    pub object_id: String,
    /// Opaque blob holding one or more synthetic templates.
    #[serde(default)]
    pub detector: Option<Value>,
    /// Per-template rotations as row-major 3x3 arrays, index-aligned with
    /// the blob.
    #[serde(rename = "Rs", default)]
    pub rotations: Option<Value>,
    /// Per-template translations as 3-element arrays, index-aligned with
    /// the blob.
    #[serde(rename = "Ts", default)]
    pub translations: Option<Value>,
}

#[derive(Deserialize)]
struct DetectorBlob {
    templates: Vec<MultiModalTemplate>,
}

/// Per-class rotation/translation references, index-aligned with the
/// engine's template registration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseRefs {
    pub rotations: Vec<Matrix3<f64>>,
    pub translations: Vec<Vector3<f64>>,
}

/// Pose references for every loaded class, keyed by class id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoseTable {
    classes: HashMap<String, PoseRefs>,
}

impl PoseTable {
    /// Looks up the rotation/translation pair for a template.
    pub fn get(
        &self,
        class_id: &str,
        template_index: usize,
    ) -> Option<(&Matrix3<f64>, &Vector3<f64>)> {
        let refs = self.classes.get(class_id)?;
        Some((
            refs.rotations.get(template_index)?,
            refs.translations.get(template_index)?,
        ))
    }

    /// Number of pose entries stored for a class.
    pub fn class_len(&self, class_id: &str) -> usize {
        self.classes
            .get(class_id)
            .map_or(0, |refs| refs.rotations.len())
    }

    /// Number of classes with pose data.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Iterates over `(class_id, pose refs)` pairs in arbitrary order.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &PoseRefs)> {
        self.classes.iter().map(|(id, refs)| (id.as_str(), refs))
    }
}

/// Loads every document into `engine` and `table`.
///
/// A document whose class id was already loaded extends that class:
/// template indices continue contiguously and the pose arrays are appended.
/// Any failure aborts the load; a document's templates are only registered
/// after all three of its attachments have parsed and their counts agree.
pub fn load_documents<E: TemplateEngine>(
    documents: &[ModelDocument],
    engine: &mut E,
    table: &mut PoseTable,
) -> Result<(), LoadError> {
    let _span = trace_span!("load_models", documents = documents.len()).entered();

    for document in documents {
        let blob: DetectorBlob = parse_attachment(document, &document.detector, "detector")?;
        let rotations: Vec<[[f64; 3]; 3]> =
            parse_attachment(document, &document.rotations, "Rs")?;
        let translations: Vec<[f64; 3]> =
            parse_attachment(document, &document.translations, "Ts")?;

        if rotations.len() != blob.templates.len() || translations.len() != blob.templates.len() {
            return Err(LoadError::PoseCountMismatch {
                object_id: document.object_id.clone(),
                templates: blob.templates.len(),
                rotations: rotations.len(),
                translations: translations.len(),
            });
        }

        for template in blob.templates {
            engine.register_template(&document.object_id, template);
        }
        let refs = table.classes.entry(document.object_id.clone()).or_default();
        refs.rotations
            .extend(rotations.iter().map(|rows| Matrix3::from_fn(|r, c| rows[r][c])));
        refs.translations
            .extend(translations.iter().map(|t| Vector3::new(t[0], t[1], t[2])));

        trace_event!(
            "model_loaded",
            class = document.object_id.as_str(),
            templates = engine.template_count(&document.object_id),
        );
    }

    Ok(())
}

fn parse_attachment<T: serde::de::DeserializeOwned>(
    document: &ModelDocument,
    value: &Option<Value>,
    attachment: &'static str,
) -> Result<T, LoadError> {
    let value = value.as_ref().ok_or_else(|| LoadError::MissingAttachment {
        object_id: document.object_id.clone(),
        attachment,
    })?;
    serde_json::from_value(value.clone()).map_err(|err| LoadError::MalformedAttachment {
        object_id: document.object_id.clone(),
        attachment,
        reason: err.to_string(),
    })
}
