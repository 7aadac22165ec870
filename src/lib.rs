//! Facial compatibility scoring.
//!
//! [`scoring::score`] is the core: two [`features::FacialFeatureSet`]s in, a
//! [`scoring::CompatibilityResult`] out. The remaining modules load detector
//! output, keep a local history, and fetch an optional generated reading.

pub mod config;
pub mod features;
pub mod history;
pub mod logging;
pub mod narrative;
pub mod output;
pub mod scoring;

pub use features::FacialFeatureSet;
pub use scoring::{score, CompatibilityResult};
