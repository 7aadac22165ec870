pub mod formatter;

pub use formatter::{
    format_history_detail, format_history_table, format_json, format_result, score_bar,
    should_use_colors,
};
