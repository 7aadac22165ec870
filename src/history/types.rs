use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{CategoryScore, CompatibilityResult};

pub const HISTORY_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryState {
    pub version: u32,
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
}

/// A saved result. Inputs are not stored, only what was derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub overall_score: u8,
    pub label: String,
    #[serde(default)]
    pub category_scores: Vec<CategoryScore>,
    #[serde(default)]
    pub narrative: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Build an entry for a fresh result with a new random id
    pub fn from_result(result: &CompatibilityResult, narrative: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            overall_score: result.overall_score,
            label: result.label.clone(),
            category_scores: result.category_scores.clone(),
            narrative,
            created_at: Utc::now(),
        }
    }

    /// First segment of the id, enough to pick an entry on the command line
    pub fn short_id(&self) -> &str {
        self.id.split('-').next().unwrap_or(&self.id)
    }

    /// Format the time since this entry was saved, "3h ago" style
    pub fn format_age(&self) -> String {
        let duration = Utc::now() - self.created_at;
        let days = duration.num_days();
        let weeks = days / 7;

        if weeks >= 1 {
            format!("{}w ago", weeks)
        } else if days >= 1 {
            format!("{}d ago", days)
        } else if duration.num_hours() >= 1 {
            format!("{}h ago", duration.num_hours())
        } else if duration.num_minutes() >= 1 {
            format!("{}m ago", duration.num_minutes())
        } else {
            "just now".to_string()
        }
    }
}

impl Default for HistoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryState {
    pub fn new() -> Self {
        Self {
            version: HISTORY_VERSION,
            entries: Vec::new(),
        }
    }

    /// Insert an entry, replacing any existing entry with the same id
    pub fn insert(&mut self, entry: HistoryEntry) {
        self.entries.retain(|e| e.id != entry.id);
        self.entries.push(entry);
    }

    /// Find an entry by full id or unique id prefix
    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        if let Some(entry) = self.entries.iter().find(|e| e.id == id) {
            return Some(entry);
        }
        let mut matches = self.entries.iter().filter(|e| e.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(entry), None) if !id.is_empty() => Some(entry),
            _ => None,
        }
    }

    /// All entries, newest first
    pub fn list(&self) -> Vec<&HistoryEntry> {
        let mut entries: Vec<&HistoryEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries
    }

    /// Remove an entry by full id or unique prefix.
    /// Returns true if an entry was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(full_id) = self.get(id).map(|e| e.id.clone()) else {
            return false;
        };
        let before = self.entries.len();
        self.entries.retain(|e| e.id != full_id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Keep only the newest `max_entries` entries
    pub fn prune(&mut self, max_entries: usize) {
        if self.entries.len() <= max_entries {
            return;
        }
        self.entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.entries.truncate(max_entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
