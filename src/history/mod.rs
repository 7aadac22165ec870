pub mod storage;
pub mod types;

pub use storage::{get_history_path, load_history, resolve_history_path, save_history};
pub use types::{HistoryEntry, HistoryState, HISTORY_VERSION};
