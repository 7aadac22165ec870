//! Per-category formulas.
//!
//! Each function returns the raw value on a 0-100 scale before clamping;
//! [`clamp_category`] brings it into the reported range. Clamping happens
//! after any bonus is added.

use crate::features::NormalizedFeatures;

pub const CATEGORY_FLOOR: f64 = 65.0;
pub const CATEGORY_CEILING: f64 = 100.0;

/// Flat bonus when both faces are actually smiling.
pub const SMILE_BONUS: f64 = 10.0;

/// A smile probability must exceed this for the bonus to apply.
pub const SMILING_THRESHOLD: f64 = 0.5;

/// Combined |yaw| + |pitch| in degrees at which symmetry bottoms out.
pub const SYMMETRY_ANGLE_CAP: f64 = 60.0;

pub const GOLDEN_RATIO: f64 = 1.618;

pub fn clamp_category(raw: f64) -> f64 {
    raw.clamp(CATEGORY_FLOOR, CATEGORY_CEILING)
}

/// Closer width/height ratios score higher; the penalty caps at a
/// difference of 1.
pub fn face_shape(a: &NormalizedFeatures, b: &NormalizedFeatures) -> f64 {
    let difference = (a.aspect_ratio() - b.aspect_ratio()).abs();
    (1.0 - difference.min(1.0)) * 100.0
}

pub fn smile(a: &NormalizedFeatures, b: &NormalizedFeatures) -> f64 {
    let base = (1.0 - (a.smile - b.smile).abs()) * 100.0;
    let bonus = if a.smile > SMILING_THRESHOLD && b.smile > SMILING_THRESHOLD {
        SMILE_BONUS
    } else {
        0.0
    };
    base + bonus
}

pub fn eyes(a: &NormalizedFeatures, b: &NormalizedFeatures) -> f64 {
    (1.0 - (a.eye_openness() - b.eye_openness()).abs()) * 100.0
}

/// How squarely one face looks at the camera, in [0, 1].
pub fn pose_symmetry(face: &NormalizedFeatures) -> f64 {
    let tilt = face.yaw.abs() + face.pitch.abs();
    1.0 - (tilt / SYMMETRY_ANGLE_CAP).min(1.0)
}

pub fn symmetry(a: &NormalizedFeatures, b: &NormalizedFeatures) -> f64 {
    (pose_symmetry(a) + pose_symmetry(b)) / 2.0 * 100.0
}

/// Closeness of one face's height/width to the golden ratio, in [0, 1].
pub fn golden_ratio_alignment(face: &NormalizedFeatures) -> f64 {
    let deviation = (face.face_ratio() - GOLDEN_RATIO).abs() / GOLDEN_RATIO;
    1.0 - deviation.min(1.0)
}

pub fn harmony(a: &NormalizedFeatures, b: &NormalizedFeatures) -> f64 {
    (golden_ratio_alignment(a) + golden_ratio_alignment(b)) / 2.0 * 100.0
}
