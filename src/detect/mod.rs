//! Per-frame detection orchestration.
//!
//! A [`Detector`] owns the injected engine and the pose table. Both are
//! populated once from model-store documents and read-only afterwards; each
//! [`Detector::process_frame`] call is one atomic, synchronous cycle:
//! preprocess, match, synthesize, optional debug render.

use serde::Deserialize;

use crate::engine::{FrameSources, TemplateEngine};
use crate::frame::{ColorImage, Frame};
use crate::model::{load_documents, ModelDocument, PoseTable};
use crate::pose::{synthesize, PoseResult};
use crate::trace::{trace_event, trace_span};
use crate::util::{DetectError, LoadError};
use crate::viz::draw_matched_features;

/// Color images taller than this are downsampled once before matching.
///
/// Bounds matcher cost on high-resolution sensors. Depth is never resized.
pub const MAX_COLOR_HEIGHT: usize = 960;

/// Detection parameters.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Minimum similarity for a reported match, as a percentage.
    pub threshold: f32,
    /// Render matched feature points into an overlay buffer each cycle.
    pub visualize: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: 93.0,
            visualize: false,
        }
    }
}

/// Matches loaded multi-modal templates against frames and reports one
/// oriented pose per match.
pub struct Detector<E> {
    engine: E,
    poses: PoseTable,
    config: DetectorConfig,
    overlay: Option<ColorImage>,
}

impl<E: TemplateEngine> Detector<E> {
    /// Builds a detector by loading every document into `engine`.
    ///
    /// Any load failure aborts construction and drops the partially
    /// populated engine with it; no usable half-loaded state escapes.
    pub fn from_documents(
        documents: &[ModelDocument],
        mut engine: E,
        config: DetectorConfig,
    ) -> Result<Self, LoadError> {
        let mut poses = PoseTable::default();
        load_documents(documents, &mut engine, &mut poses)?;
        Ok(Self {
            engine,
            poses,
            config,
            overlay: None,
        })
    }

    /// Returns the injected engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the loaded pose table.
    pub fn pose_table(&self) -> &PoseTable {
        &self.poses
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Runs one detection cycle against a frame.
    ///
    /// Returns pose estimates in engine match order. An empty result is a
    /// normal outcome: nothing registered, or nothing scored above the
    /// threshold. With zero registered classes the engine is never invoked.
    pub fn process_frame(&mut self, frame: Frame<'_>) -> Result<Vec<PoseResult>, DetectError> {
        let _span = trace_span!(
            "detection_cycle",
            width = frame.color.width(),
            height = frame.color.height(),
        )
        .entered();
        self.overlay = None;

        let downsampled;
        let color = if frame.color.height() > MAX_COLOR_HEIGHT {
            downsampled = frame.color.halve();
            &downsampled
        } else {
            frame.color
        };

        if self.engine.class_count() == 0 {
            trace_event!("empty_registry");
            return Ok(Vec::new());
        }

        let sources = FrameSources {
            color,
            depth: frame.depth,
        };
        let matches = self.engine.find_matches(sources, self.config.threshold);
        trace_event!("matches", count = matches.len());

        let mut display = if self.config.visualize {
            Some(color.clone())
        } else {
            None
        };
        let modality_count = self.engine.modality_count();
        let step = self.engine.sampling_step();

        let mut results = Vec::with_capacity(matches.len());
        for m in &matches {
            if let Some(canvas) = display.as_mut() {
                // Best-effort side channel: an unknown template skips its
                // markers rather than failing the cycle.
                if let Some(template) = self.engine.templates(&m.class_id, m.template_index) {
                    draw_matched_features(template, modality_count, canvas, (m.x, m.y), step);
                }
            }
            results.push(synthesize(m, &self.poses)?);
        }

        self.overlay = display;
        Ok(results)
    }

    /// Debug overlay from the most recent cycle.
    ///
    /// Present only when `visualize` is set and the last cycle got past the
    /// empty-registry guard. Identical frame content to what the engine
    /// matched against, with markers drawn on top.
    pub fn overlay(&self) -> Option<&ColorImage> {
        self.overlay.as_ref()
    }
}
