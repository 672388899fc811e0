//! The opaque multi-modal matching engine and its data model.
//!
//! Matching itself lives behind the [`TemplateEngine`] trait with exactly
//! the capabilities this crate consumes: register a template under a class
//! id, match against a color+depth pair, and introspect what is registered.
//! The engine's internal template representation and matching algorithm are
//! its own business; this crate only relies on template indices being
//! assigned contiguously per class in registration order.

use serde::{Deserialize, Serialize};

use crate::frame::{ColorImage, DepthImage};

/// One feature point in one modality, in template-local pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub x: i32,
    pub y: i32,
}

/// Feature set for a single modality of a template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalityTemplate {
    pub features: Vec<Feature>,
}

/// A synthetic multi-modal template: one feature set per modality
/// (e.g. color gradients and depth surface normals).
///
/// Immutable once registered with an engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiModalTemplate {
    pub modalities: Vec<ModalityTemplate>,
}

/// Borrowed color+depth pair handed to the engine for one match call.
#[derive(Clone, Copy)]
pub struct FrameSources<'a> {
    pub color: &'a ColorImage,
    pub depth: &'a DepthImage,
}

/// One candidate object occurrence reported by the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    /// Class the matched template was registered under.
    pub class_id: String,
    /// Index of the matched template within its class.
    pub template_index: usize,
    /// X offset of the match in the processed color image.
    pub x: i32,
    /// Y offset of the match in the processed color image.
    pub y: i32,
    /// Similarity score, as a percentage.
    pub similarity: f32,
}

/// Capability set of the injected multi-modal matcher.
pub trait TemplateEngine {
    /// Registers a template under `class_id` and returns the index assigned
    /// to it. Indices are contiguous from zero within each class.
    fn register_template(&mut self, class_id: &str, template: MultiModalTemplate) -> usize;

    /// Matches every registered template against a color+depth pair and
    /// reports candidates scoring at or above `threshold_percent`.
    ///
    /// The returned order is the engine's ranking; callers preserve it.
    fn find_matches(&self, sources: FrameSources<'_>, threshold_percent: f32) -> Vec<Match>;

    /// Number of distinct classes with at least one registered template.
    fn class_count(&self) -> usize;

    /// Number of templates registered under `class_id`.
    fn template_count(&self, class_id: &str) -> usize;

    /// Returns a registered template, or `None` when the class or index is
    /// unknown.
    fn templates(&self, class_id: &str, template_index: usize) -> Option<&MultiModalTemplate>;

    /// Number of modalities the engine matches against.
    fn modality_count(&self) -> usize;

    /// Feature sampling step `T` of the engine; the debug renderer draws
    /// markers of radius `T / 2`.
    fn sampling_step(&self) -> i32;
}
