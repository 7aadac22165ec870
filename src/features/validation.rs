use super::types::FaceRecord;

/// Validate a detector record before it reaches the scorer.
/// Returns all validation errors at once (not just the first).
pub fn validate_face(record: &FaceRecord) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let width = record.bounding_box.width();
    let height = record.bounding_box.height();
    if width <= 0 {
        errors.push(format!("bounding_box: width must be positive, got {}", width));
    }
    if height <= 0 {
        errors.push(format!("bounding_box: height must be positive, got {}", height));
    }
    if width > i64::from(u32::MAX) || height > i64::from(u32::MAX) {
        errors.push("bounding_box: dimensions out of range".to_string());
    }

    let probabilities = [
        ("smiling_probability", record.smiling_probability),
        ("left_eye_open_probability", record.left_eye_open_probability),
        ("right_eye_open_probability", record.right_eye_open_probability),
    ];
    for (name, value) in probabilities {
        if let Some(p) = value {
            if !(0.0..=1.0).contains(&p) {
                errors.push(format!("{}: must be within [0, 1], got {}", name, p));
            }
        }
    }

    let angles = [
        ("head_euler_angle_x", record.head_euler_angle_x),
        ("head_euler_angle_y", record.head_euler_angle_y),
        ("head_euler_angle_z", record.head_euler_angle_z),
    ];
    for (name, value) in angles {
        if let Some(a) = value {
            if !a.is_finite() {
                errors.push(format!("{}: must be a finite number", name));
            }
        }
    }

    for (i, landmark) in record.landmarks.iter().enumerate() {
        if !landmark.x.is_finite() || !landmark.y.is_finite() {
            errors.push(format!("landmarks[{}]: coordinates must be finite", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FaceBoundingBox, FaceLandmark, LandmarkKind};

    fn valid_record() -> FaceRecord {
        FaceRecord {
            bounding_box: FaceBoundingBox {
                left: 10,
                top: 10,
                right: 210,
                bottom: 330,
            },
            landmarks: vec![],
            smiling_probability: Some(0.7),
            left_eye_open_probability: Some(0.9),
            right_eye_open_probability: Some(0.95),
            head_euler_angle_x: Some(3.0),
            head_euler_angle_y: Some(-8.0),
            head_euler_angle_z: None,
        }
    }

    #[test]
    fn test_valid_record() {
        assert!(validate_face(&valid_record()).is_ok());
    }

    #[test]
    fn test_zero_width_box() {
        let mut record = valid_record();
        record.bounding_box.right = record.bounding_box.left;
        let errors = validate_face(&record).unwrap_err();
        assert!(errors[0].contains("width"));
    }

    #[test]
    fn test_probability_out_of_range() {
        let mut record = valid_record();
        record.smiling_probability = Some(1.5);
        let errors = validate_face(&record).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("smiling_probability"));
    }

    #[test]
    fn test_nan_probability_rejected() {
        let mut record = valid_record();
        record.left_eye_open_probability = Some(f64::NAN);
        assert!(validate_face(&record).is_err());
    }

    #[test]
    fn test_non_finite_angle_and_landmark() {
        let mut record = valid_record();
        record.head_euler_angle_z = Some(f64::INFINITY);
        record.landmarks.push(FaceLandmark {
            kind: LandmarkKind::RightCheek,
            x: f64::NAN,
            y: 1.0,
        });
        let errors = validate_face(&record).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[1].contains("landmarks[0]"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut record = valid_record();
        record.bounding_box.bottom = 0; // Error 1
        record.smiling_probability = Some(-0.1); // Error 2
        record.right_eye_open_probability = Some(2.0); // Error 3
        let errors = validate_face(&record).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
