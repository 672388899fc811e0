//! Shared fixtures: a scriptable in-memory engine and model-document
//! builders.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashMap;

use modalmatch::{FrameSources, Match, ModelDocument, MultiModalTemplate, TemplateEngine};
use serde_json::{json, Value};

/// In-memory engine that records registrations and replays a canned match
/// list, filtered by the threshold it receives.
#[derive(Default)]
pub struct StubEngine {
    classes: HashMap<String, Vec<MultiModalTemplate>>,
    pub canned_matches: Vec<Match>,
    pub match_calls: Cell<usize>,
    pub seen_color: Cell<Option<(usize, usize)>>,
    pub seen_depth: Cell<Option<(usize, usize)>>,
}

impl StubEngine {
    pub fn with_matches(canned_matches: Vec<Match>) -> Self {
        Self {
            canned_matches,
            ..Self::default()
        }
    }
}

impl TemplateEngine for StubEngine {
    fn register_template(&mut self, class_id: &str, template: MultiModalTemplate) -> usize {
        let templates = self.classes.entry(class_id.to_string()).or_default();
        templates.push(template);
        templates.len() - 1
    }

    fn find_matches(&self, sources: FrameSources<'_>, threshold_percent: f32) -> Vec<Match> {
        self.match_calls.set(self.match_calls.get() + 1);
        self.seen_color
            .set(Some((sources.color.width(), sources.color.height())));
        self.seen_depth
            .set(Some((sources.depth.width(), sources.depth.height())));
        self.canned_matches
            .iter()
            .filter(|m| m.similarity >= threshold_percent)
            .cloned()
            .collect()
    }

    fn class_count(&self) -> usize {
        self.classes.len()
    }

    fn template_count(&self, class_id: &str) -> usize {
        self.classes.get(class_id).map_or(0, Vec::len)
    }

    fn templates(&self, class_id: &str, template_index: usize) -> Option<&MultiModalTemplate> {
        self.classes.get(class_id)?.get(template_index)
    }

    fn modality_count(&self) -> usize {
        2
    }

    fn sampling_step(&self) -> i32 {
        4
    }
}

pub const IDENTITY_ROWS: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Two-modality template blob entry with one feature point per modality;
/// the second modality's point sits 8 pixels to the right.
pub fn template_json(x: i32, y: i32) -> Value {
    json!({
        "modalities": [
            { "features": [ { "x": x, "y": y } ] },
            { "features": [ { "x": x + 8, "y": y } ] }
        ]
    })
}

/// A document with explicit pose attachments, one template per pose entry.
pub fn document_with_poses(
    object_id: &str,
    rotations: Vec<[[f64; 3]; 3]>,
    translations: Vec<[f64; 3]>,
) -> ModelDocument {
    let templates: Vec<Value> = (0..rotations.len().max(translations.len()))
        .map(|i| template_json(i as i32, 0))
        .collect();
    serde_json::from_value(json!({
        "object_id": object_id,
        "detector": { "templates": templates },
        "Rs": rotations,
        "Ts": translations,
    }))
    .unwrap()
}

/// A document with `n` templates, identity rotations and translations
/// `[i, 0, 0]`.
pub fn document(object_id: &str, n: usize) -> ModelDocument {
    document_with_poses(
        object_id,
        vec![IDENTITY_ROWS; n],
        (0..n).map(|i| [i as f64, 0.0, 0.0]).collect(),
    )
}

pub fn a_match(class_id: &str, template_index: usize, similarity: f32) -> Match {
    Match {
        class_id: class_id.to_string(),
        template_index,
        x: 0,
        y: 0,
        similarity,
    }
}
