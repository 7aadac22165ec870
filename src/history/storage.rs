use super::types::{HistoryState, HISTORY_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// ~/.config/fate-sync/history.json
pub fn get_history_path() -> PathBuf {
    crate::config::get_config_dir().join("history.json")
}

/// Where history lives: the configured path with a leading `~/` expanded,
/// or the default location when none is configured.
pub fn resolve_history_path(configured: Option<&Path>) -> PathBuf {
    match configured {
        Some(path) => expand_home(path),
        None => get_history_path(),
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// Read saved results. No file yet means no results; a file written by a
/// different format version is rejected rather than guessed at.
pub fn load_history(path: &Path) -> Result<HistoryState> {
    if !path.exists() {
        return Ok(HistoryState::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open history file at {}", path.display()))?;

    let state: HistoryState = serde_json::from_reader(file).context("Failed to load history")?;

    if state.version != HISTORY_VERSION {
        anyhow::bail!("Unsupported history version: {}", state.version);
    }

    Ok(state)
}

/// Write every saved result, creating the directory on first use.
/// Readers see either the previous file or the new one, never a partial write.
pub fn save_history(path: &Path, state: &HistoryState) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, state).context("Failed to serialize history")?;

    file.commit().context("Failed to save history")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FacialFeatureSet;
    use crate::history::HistoryEntry;
    use crate::scoring::score;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_history(&dir.path().join("history.json")).unwrap();
        assert_eq!(state.version, 1);
        assert!(state.entries.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let face = FacialFeatureSet::from_box(120, 180);
        let result = score(&face, &face);
        let mut state = HistoryState::new();
        state.insert(HistoryEntry::from_result(&result, Some("A bright match".to_string())));

        save_history(&path, &state).unwrap();
        let loaded = load_history(&path).unwrap();

        assert_eq!(loaded.entries.len(), 1);
        let saved = &loaded.entries[0];
        let original = &state.entries[0];
        assert_eq!(saved.id, original.id);
        assert_eq!(saved.overall_score, original.overall_score);
        assert_eq!(saved.created_at, original.created_at);
        assert_eq!(saved.narrative.as_deref(), Some("A bright match"));
        // Only clamped scores are persisted
        assert_eq!(saved.category_scores[0].score, result.category_scores[0].score);
        assert_eq!(saved.category_scores[0].raw, 0.0);
    }

    #[test]
    fn test_unsupported_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, r#"{"version": 7, "entries": []}"#).unwrap();
        let err = load_history(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported history version"));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{").unwrap();
        assert!(load_history(&path).is_err());
    }

    #[test]
    fn test_resolve_history_path_expands_home() {
        let configured = PathBuf::from("~/.config/fate-sync/history.json");
        let resolved = resolve_history_path(Some(&configured));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolved, home.join(".config/fate-sync/history.json"));
            assert!(!resolved.starts_with("~"));
        }
    }

    #[test]
    fn test_resolve_history_path_keeps_other_paths() {
        let absolute = PathBuf::from("/var/lib/fate-sync/history.json");
        assert_eq!(resolve_history_path(Some(&absolute)), absolute);
        let relative = PathBuf::from("data/~history.json");
        assert_eq!(resolve_history_path(Some(&relative)), relative);
        assert_eq!(resolve_history_path(None), get_history_path());
    }
}
