use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::types::FaceRecord;
use super::validation::validate_face;

/// A detector output file holds either one face or every face it found.
#[derive(Deserialize)]
#[serde(untagged)]
enum DetectionFile {
    Many(Vec<FaceRecord>),
    One(Box<FaceRecord>),
}

/// Load the first detected face from a detector output file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read or is not valid JSON
/// - The file contains no faces
/// - The first face fails validation
pub fn load_detection(path: &Path) -> Result<FaceRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read detection file at {}", path.display()))?;
    parse_detection(&content).with_context(|| format!("Invalid detection file {}", path.display()))
}

/// Parse detector output. See [`load_detection`].
pub fn parse_detection(content: &str) -> Result<FaceRecord> {
    let file: DetectionFile =
        serde_json::from_str(content).context("Failed to parse face detection JSON")?;

    let record = match file {
        DetectionFile::One(record) => *record,
        DetectionFile::Many(records) => {
            let count = records.len();
            let first = records
                .into_iter()
                .next()
                .ok_or_else(|| anyhow::anyhow!("Could not detect a face"))?;
            if count > 1 {
                tracing::debug!(count, "multiple faces detected, using the first");
            }
            first
        }
    };

    if let Err(errors) = validate_face(&record) {
        anyhow::bail!("Invalid face record: {}", errors.join("; "));
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FACE: &str = r#"{"bounding_box": {"left": 0, "top": 0, "right": 100, "bottom": 150}, "smiling_probability": 0.6}"#;

    #[test]
    fn test_parse_single_face() {
        let record = parse_detection(FACE).unwrap();
        assert_eq!(record.bounding_box.height(), 150);
    }

    #[test]
    fn test_parse_array_uses_first_face() {
        let second = FACE.replace("0.6", "0.1");
        let json = format!("[{}, {}]", FACE, second);
        let record = parse_detection(&json).unwrap();
        assert_eq!(record.smiling_probability, Some(0.6));
    }

    #[test]
    fn test_parse_empty_array_is_no_face() {
        let err = parse_detection("[]").unwrap_err();
        assert!(err.to_string().contains("Could not detect a face"));
    }

    #[test]
    fn test_parse_rejects_invalid_face() {
        let json = FACE.replace("0.6", "1.6");
        let err = parse_detection(&json).unwrap_err();
        assert!(err.to_string().contains("smiling_probability"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_detection("not json").is_err());
    }

    #[test]
    fn test_load_detection_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FACE.as_bytes()).unwrap();
        let record = load_detection(file.path()).unwrap();
        assert_eq!(record.bounding_box.width(), 100);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_detection(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read detection file"));
    }
}
