pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{load_detection, parse_detection};
pub use types::{
    FaceBoundingBox, FaceLandmark, FaceRecord, FacialFeatureSet, LandmarkKind,
    NormalizedFeatures, NEUTRAL_ANGLE, NEUTRAL_PROBABILITY,
};
pub use validation::validate_face;
