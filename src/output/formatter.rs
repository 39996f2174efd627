use std::collections::BTreeSet;
use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::scoring::ScoreRow;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Order rows for display: by position of their parent in `parent_order`,
/// rows with an unlisted or unknown parent last, then by key.
///
/// Rows are borrowed, never modified.
pub fn display_order<'a>(rows: &'a [ScoreRow], parent_order: &[String]) -> Vec<&'a ScoreRow> {
    let bucket = |row: &ScoreRow| {
        row.parent
            .as_deref()
            .and_then(|p| parent_order.iter().position(|o| o == p))
            .unwrap_or(parent_order.len())
    };

    let mut ordered: Vec<&ScoreRow> = rows.iter().collect();
    ordered.sort_by(|a, b| bucket(a).cmp(&bucket(b)).then_with(|| a.key.cmp(&b.key)));
    ordered
}

/// Format ICLR points with two decimals
pub fn format_points(points: f64) -> String {
    format!("{:.2}", points)
}

/// Color a label by its parent category
fn colorize_parent(text: &str, parent: Option<&str>) -> String {
    match parent {
        Some("AI") => text.blue().to_string(),
        Some("Systems") => text.yellow().to_string(),
        Some("Theory") => text.green().to_string(),
        Some("Interdisciplinary Areas") => text.magenta().to_string(),
        _ => text.dimmed().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format rows as a ranked table:
/// index, ICLR points, key, parent, faculty credit, publication count.
/// Points column is right-aligned, 7 chars wide. No headers.
pub fn format_scored_table(rows: &[&ScoreRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No scores for this range and baseline.".to_string();
    }

    let points_width = 7;
    let separator = "  ";
    let widest_key = rows.iter().map(|r| r.key.chars().count()).max().unwrap_or(0);

    // Index (3) + space + points + separator, then parent/count columns (~40)
    let fixed_width = 3 + 1 + points_width + separator.len() * 2 + 40;
    let key_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => widest_key.min(width - fixed_width),
        Some(_) => widest_key.min(20),
        None => widest_key,
    };

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let index_str = format!("{:>2}.", idx + 1);
            let points_str = format!("{:>width$}", format_points(row.iclr_points), width = points_width);
            let key = truncate_label(&row.key, key_width);
            let key_padded = format!("{:<width$}", key, width = key_width);
            let parent = row.parent.as_deref().unwrap_or("-");
            let counts = format!(
                "faculty {:.2}, {} pubs",
                row.faculty_count, row.publication_count
            );

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    points_str.bold(),
                    separator,
                    colorize_parent(&key_padded, row.parent.as_deref()),
                    separator,
                    colorize_parent(parent, row.parent.as_deref()),
                    separator,
                    counts.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, points_str, separator, key_padded, separator, parent, separator, counts
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format rows as tab-separated values for scripting.
/// Columns: key, area, parent, publication_count, faculty_count, iclr_points
/// (no headers, no colors; unknown area/parent are empty)
pub fn format_tsv(rows: &[&ScoreRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}\t{}\t{}\t{}\t{:.2}\t{}",
                row.key,
                row.area.as_deref().unwrap_or(""),
                row.parent.as_deref().unwrap_or(""),
                row.publication_count,
                row.faculty_count,
                format_points(row.iclr_points)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format rows as a pretty-printed JSON array, in the order given
pub fn format_json(rows: &[ScoreRow]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// One area per line, sorted
pub fn format_area_list(areas: &BTreeSet<String>) -> String {
    if areas.is_empty() {
        return "No areas available.".to_string();
    }
    areas.iter().cloned().collect::<Vec<_>>().join("\n")
}
