use serde::{Deserialize, Serialize};

/// Neutral value substituted for an unmeasured probability.
pub const NEUTRAL_PROBABILITY: f64 = 0.5;

/// Neutral value substituted for an unmeasured head angle.
pub const NEUTRAL_ANGLE: f64 = 0.0;

/// Measured attributes of one photographed face, as handed to the scorer.
///
/// Optional measurements may be absent; the scorer treats them as neutral
/// (see [`FacialFeatureSet::normalize`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacialFeatureSet {
    pub bounding_box_width: u32,
    pub bounding_box_height: u32,
    #[serde(default)]
    pub smile_probability: Option<f64>,
    #[serde(default)]
    pub left_eye_open_probability: Option<f64>,
    #[serde(default)]
    pub right_eye_open_probability: Option<f64>,
    #[serde(default)]
    pub head_yaw_degrees: Option<f64>,
    #[serde(default)]
    pub head_pitch_degrees: Option<f64>,
}

/// A feature set with every optional measurement filled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedFeatures {
    pub width: f64,
    pub height: f64,
    pub smile: f64,
    pub left_eye_open: f64,
    pub right_eye_open: f64,
    pub yaw: f64,
    pub pitch: f64,
}

impl FacialFeatureSet {
    /// Feature set with only the bounding box measured.
    pub fn from_box(width: u32, height: u32) -> Self {
        Self {
            bounding_box_width: width,
            bounding_box_height: height,
            smile_probability: None,
            left_eye_open_probability: None,
            right_eye_open_probability: None,
            head_yaw_degrees: None,
            head_pitch_degrees: None,
        }
    }

    /// Substitute neutral defaults for anything that was not measured.
    pub fn normalize(&self) -> NormalizedFeatures {
        NormalizedFeatures {
            width: f64::from(self.bounding_box_width),
            height: f64::from(self.bounding_box_height),
            smile: self.smile_probability.unwrap_or(NEUTRAL_PROBABILITY),
            left_eye_open: self.left_eye_open_probability.unwrap_or(NEUTRAL_PROBABILITY),
            right_eye_open: self.right_eye_open_probability.unwrap_or(NEUTRAL_PROBABILITY),
            yaw: self.head_yaw_degrees.unwrap_or(NEUTRAL_ANGLE),
            pitch: self.head_pitch_degrees.unwrap_or(NEUTRAL_ANGLE),
        }
    }
}

impl NormalizedFeatures {
    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Height over width, the proportion compared against the golden ratio.
    pub fn face_ratio(&self) -> f64 {
        self.height / self.width
    }

    pub fn eye_openness(&self) -> f64 {
        (self.left_eye_open + self.right_eye_open) / 2.0
    }
}

/// Pixel-space rectangle around a detected face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBoundingBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl FaceBoundingBox {
    pub fn width(&self) -> i64 {
        i64::from(self.right) - i64::from(self.left)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.bottom) - i64::from(self.top)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkKind {
    LeftEye,
    RightEye,
    NoseTip,
    LeftMouth,
    RightMouth,
    LeftCheek,
    RightCheek,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceLandmark {
    pub kind: LandmarkKind,
    pub x: f64,
    pub y: f64,
}

/// One face as written by the external detector.
///
/// Euler angles follow the detector's convention: X is pitch (tilt),
/// Y is yaw (turn), Z is roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FaceRecord {
    pub bounding_box: FaceBoundingBox,
    #[serde(default)]
    pub landmarks: Vec<FaceLandmark>,
    #[serde(default)]
    pub smiling_probability: Option<f64>,
    #[serde(default)]
    pub left_eye_open_probability: Option<f64>,
    #[serde(default)]
    pub right_eye_open_probability: Option<f64>,
    #[serde(default)]
    pub head_euler_angle_x: Option<f64>,
    #[serde(default)]
    pub head_euler_angle_y: Option<f64>,
    #[serde(default)]
    pub head_euler_angle_z: Option<f64>,
}

impl FaceRecord {
    /// Project the detector record onto the fields the scorer reads.
    ///
    /// Callers are expected to have run [`super::validate_face`] first; a
    /// degenerate box saturates to zero rather than wrapping.
    pub fn to_feature_set(&self) -> FacialFeatureSet {
        let to_px = |v: i64| u32::try_from(v.max(0)).unwrap_or(u32::MAX);
        FacialFeatureSet {
            bounding_box_width: to_px(self.bounding_box.width()),
            bounding_box_height: to_px(self.bounding_box.height()),
            smile_probability: self.smiling_probability,
            left_eye_open_probability: self.left_eye_open_probability,
            right_eye_open_probability: self.right_eye_open_probability,
            head_yaw_degrees: self.head_euler_angle_y,
            head_pitch_degrees: self.head_euler_angle_x,
        }
    }
}
