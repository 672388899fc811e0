//! ModalMatch turns multi-modal template matches into oriented pose
//! estimates.
//!
//! The crate loads per-class template sets and pose references from a model
//! store, registers them with an injected matching engine, and runs a
//! synchronous per-frame detection cycle that reports one rigid pose per
//! match. Matching itself is delegated to the engine behind the
//! [`TemplateEngine`] trait; this crate owns the model plumbing, frame
//! preprocessing, pose synthesis and optional debug rendering.

pub mod detect;
pub mod engine;
pub mod frame;
pub mod model;
pub mod pose;
mod trace;
pub mod util;
pub mod viz;

pub use detect::{Detector, DetectorConfig, MAX_COLOR_HEIGHT};
pub use engine::{
    Feature, FrameSources, Match, ModalityTemplate, MultiModalTemplate, TemplateEngine,
};
pub use frame::{ColorImage, DepthImage, Frame};
pub use model::{load_documents, ModelDocument, PoseRefs, PoseTable};
pub use pose::{synthesize, PoseResult};
pub use util::{DetectError, FrameError, LoadError};
