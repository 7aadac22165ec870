use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::history::HistoryEntry;
use crate::narrative::{Narrative, NarrativeSource};
use crate::scoring::{CategoryScore, CompatibilityResult};

const NAME_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 30;
const MIN_BAR_WIDTH: usize = 10;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Bar width that fits next to the category name and score
fn bar_width(term_width: Option<usize>) -> usize {
    match term_width {
        // name + space + bar + space + "100"
        Some(w) => w
            .saturating_sub(NAME_WIDTH + 5)
            .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH),
        None => MAX_BAR_WIDTH,
    }
}

/// Render a 0-100 score as a fixed-width bar
pub fn score_bar(score: f64, width: usize) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

fn format_category_row(category: &CategoryScore, width: usize, use_colors: bool) -> String {
    let name = format!("{:<w$}", category.category.name(), w = NAME_WIDTH);
    let bar = score_bar(category.score, width);
    let score = format!("{:>3.0}", category.score);

    if use_colors {
        let bar = if category.score >= 90.0 {
            bar.magenta().to_string()
        } else if category.score >= 75.0 {
            bar.green().to_string()
        } else {
            bar.yellow().to_string()
        };
        format!("{} {} {}", name.cyan(), bar, score.bold())
    } else {
        format!("{} {} {}", name, bar, score)
    }
}

/// Format a result: headline, category rows, detail lines, then the reading
pub fn format_result(
    result: &CompatibilityResult,
    narrative: Option<&Narrative>,
    use_colors: bool,
) -> String {
    let width = bar_width(get_terminal_width());
    let mut lines = Vec::new();

    let headline = format!("{}% {}", result.overall_score, result.label);
    if use_colors {
        lines.push(headline.bold().magenta().to_string());
    } else {
        lines.push(headline);
    }
    lines.push(String::new());

    for category in &result.category_scores {
        lines.push(format_category_row(category, width, use_colors));
    }
    lines.push(String::new());

    for detail in &result.category_details {
        if use_colors {
            lines.push(format!("  {}", detail.dimmed()));
        } else {
            lines.push(format!("  {}", detail));
        }
    }

    if let Some(narrative) = narrative {
        lines.push(String::new());
        lines.push(narrative.text.clone());
        if narrative.source == NarrativeSource::Fallback {
            let note = "(offline reading)";
            if use_colors {
                lines.push(note.dimmed().to_string());
            } else {
                lines.push(note.to_string());
            }
        }
    }

    lines.join("\n")
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    result: &'a CompatibilityResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    narrative: Option<&'a Narrative>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
}

/// Format a result as pretty JSON for scripting
pub fn format_json(
    result: &CompatibilityResult,
    narrative: Option<&Narrative>,
    id: Option<&str>,
) -> Result<String> {
    serde_json::to_string_pretty(&JsonOutput {
        result,
        narrative,
        id,
    })
    .context("Failed to serialize result")
}

/// Format saved results one per line: index, id, score, label, age
pub fn format_history_table(entries: &[&HistoryEntry], use_colors: bool) -> String {
    if entries.is_empty() {
        return "No saved results.".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>3}%", entry.overall_score);
            let label = format!("{:<22}", entry.label);
            let age = entry.format_age();

            if use_colors {
                format!(
                    "{} {}  {}  {}  {}",
                    index_str.dimmed(),
                    entry.short_id().yellow(),
                    score_str.bold(),
                    label,
                    age.dimmed()
                )
            } else {
                format!(
                    "{} {}  {}  {}  {}",
                    index_str,
                    entry.short_id(),
                    score_str,
                    label,
                    age
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format one saved result in full
pub fn format_history_detail(entry: &HistoryEntry, use_colors: bool) -> String {
    let width = bar_width(get_terminal_width());
    let headline = format!("{}% {}", entry.overall_score, entry.label);
    let headline = if use_colors {
        headline.bold().magenta().to_string()
    } else {
        headline
    };
    let mut lines = vec![
        headline,
        format!("  Id: {}", entry.id),
        format!(
            "  Saved: {} ({})",
            entry.created_at.format("%Y-%m-%d %H:%M UTC"),
            entry.format_age()
        ),
        String::new(),
    ];

    for category in &entry.category_scores {
        lines.push(format_category_row(category, width, use_colors));
    }

    if let Some(narrative) = &entry.narrative {
        lines.push(String::new());
        lines.push(narrative.clone());
    }

    lines.join("\n")
}
