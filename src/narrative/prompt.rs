use crate::features::FaceRecord;
use crate::scoring::CompatibilityResult;

/// Build the chat prompt for a reading of `result`.
///
/// `faces` adds a short measurement summary per person when the detector
/// records are at hand; scores alone are enough for a reading.
pub fn build_prompt(result: &CompatibilityResult, faces: &[&FaceRecord], language: &str) -> String {
    let scores = result
        .category_scores
        .iter()
        .map(|c| format!("- {}: {:.0}", c.category, c.score))
        .collect::<Vec<_>>()
        .join("\n");

    let face_section = if faces.is_empty() {
        String::new()
    } else {
        let summaries = faces
            .iter()
            .enumerate()
            .map(|(i, face)| format_face(&format!("Person {}", i + 1), face))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("FACIAL DATA:\n\n{}\n\n", summaries)
    };

    format!(
        "You are FateSync, a fun and mystical compatibility reader for an entertainment app.\n\
         Two people were scored {overall}/100 (\"{label}\").\n\n\
         CATEGORY SCORES:\n{scores}\n\n\
         {face_section}\
         Write 2-3 short paragraphs of playful, positive compatibility reading that \
         reflects these scores. Use romantic and light-hearted language. \
         Respond with plain text only, no markdown.\n\
         Write the reading in the language with code \"{language}\".\n\
         Remember: this is for entertainment only.",
        overall = result.overall_score,
        label = result.label,
    )
}

fn format_percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}%", v * 100.0))
        .unwrap_or_else(|| "unknown".to_string())
}

fn format_degrees(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}°", v))
        .unwrap_or_else(|| "unknown".to_string())
}

fn format_face(name: &str, face: &FaceRecord) -> String {
    format!(
        "{name}:\n\
         - Smile probability: {smile}\n\
         - Left eye open: {left}\n\
         - Right eye open: {right}\n\
         - Head tilt (X): {x}\n\
         - Head turn (Y): {y}\n\
         - Head rotation (Z): {z}\n\
         - Face bounds: {w}x{h}\n\
         - Landmarks detected: {landmarks}",
        smile = format_percent(face.smiling_probability),
        left = format_percent(face.left_eye_open_probability),
        right = format_percent(face.right_eye_open_probability),
        x = format_degrees(face.head_euler_angle_x),
        y = format_degrees(face.head_euler_angle_y),
        z = format_degrees(face.head_euler_angle_z),
        w = face.bounding_box.width(),
        h = face.bounding_box.height(),
        landmarks = face.landmarks.len(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FaceBoundingBox, FacialFeatureSet};
    use crate::scoring::score;

    fn sample_result() -> CompatibilityResult {
        let face = FacialFeatureSet::from_box(200, 200);
        score(&face, &face)
    }

    fn sample_record() -> FaceRecord {
        FaceRecord {
            bounding_box: FaceBoundingBox {
                left: 0,
                top: 0,
                right: 180,
                bottom: 240,
            },
            landmarks: vec![],
            smiling_probability: Some(0.875),
            left_eye_open_probability: None,
            right_eye_open_probability: Some(1.0),
            head_euler_angle_x: Some(-3.25),
            head_euler_angle_y: None,
            head_euler_angle_z: Some(1.0),
        }
    }

    #[test]
    fn test_prompt_contains_scores() {
        let result = sample_result();
        let prompt = build_prompt(&result, &[], "en");
        assert!(prompt.contains(&format!("{}/100", result.overall_score)));
        assert!(prompt.contains(&result.label));
        assert!(prompt.contains("- Face Shape: 100"));
        assert!(prompt.contains("- Harmony: 65"));
        assert!(prompt.contains("code \"en\""));
        assert!(!prompt.contains("FACIAL DATA"));
    }

    #[test]
    fn test_prompt_with_faces() {
        let result = sample_result();
        let record = sample_record();
        let prompt = build_prompt(&result, &[&record, &record], "ko");
        assert!(prompt.contains("FACIAL DATA"));
        assert!(prompt.contains("Person 1:"));
        assert!(prompt.contains("Person 2:"));
        assert!(prompt.contains("code \"ko\""));
    }

    #[test]
    fn test_format_face_unknown_values() {
        let text = format_face("Person 1", &sample_record());
        assert!(text.contains("Smile probability: 87.5%"));
        assert!(text.contains("Left eye open: unknown"));
        assert!(text.contains("Right eye open: 100.0%"));
        assert!(text.contains("Head tilt (X): -3.2°") || text.contains("Head tilt (X): -3.3°"));
        assert!(text.contains("Head turn (Y): unknown"));
        assert!(text.contains("Face bounds: 180x240"));
        assert!(text.contains("Landmarks detected: 0"));
    }
}
