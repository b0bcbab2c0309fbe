// Quick look at an unfamiliar simulator log before choosing patterns

use crate::extract::COMMON_PARAMETERS;
use std::fmt::Write;

/// Tokens examined when guessing parameter names
const SUGGEST_TOKEN_LIMIT: usize = 1000;
const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct FilePreview {
    pub total_lines: usize,
    pub head: Vec<String>,
    /// (needle, number of lines containing it), only needles that occur
    pub pattern_counts: Vec<(String, usize)>,
}

/// First `lines_to_show` lines plus how often common measurement names appear
pub fn preview(text: &str, lines_to_show: usize) -> FilePreview {
    let lines: Vec<&str> = text.lines().collect();
    let lowered: Vec<String> = lines.iter().map(|l| l.to_lowercase()).collect();

    let pattern_counts = COMMON_PARAMETERS
        .iter()
        .copied()
        .chain(std::iter::once("="))
        .filter_map(|needle| {
            let count = lowered.iter().filter(|l| l.contains(needle)).count();
            (count > 0).then(|| (needle.to_string(), count))
        })
        .collect();

    FilePreview {
        total_lines: lines.len(),
        head: lines
            .iter()
            .take(lines_to_show)
            .map(|l| l.trim_end().to_string())
            .collect(),
        pattern_counts,
    }
}

/// Guess measurement names from `name=value` tokens near the top of the file
pub fn suggest_parameter_names(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for token in text.split_whitespace().take(SUGGEST_TOKEN_LIMIT) {
        let Some((name, _)) = token.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.chars().count() > 2 && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
            if names.len() == MAX_SUGGESTIONS {
                break;
            }
        }
    }

    names
}

pub fn format_preview(preview: &FilePreview) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Total lines in file: {}", preview.total_lines);
    let _ = writeln!(out, "Showing first {} lines:", preview.head.len());
    let _ = writeln!(out, "{}", "-".repeat(40));
    for (i, line) in preview.head.iter().enumerate() {
        let _ = writeln!(out, "Line {:2}: {}", i + 1, line);
    }
    let _ = writeln!(out, "{}", "-".repeat(40));

    if preview.pattern_counts.is_empty() {
        let _ = writeln!(out, "No common parameter patterns found");
    } else {
        let _ = writeln!(out, "Common parameter patterns:");
        for (needle, count) in &preview.pattern_counts {
            let _ = writeln!(out, "  '{}': found in {} lines", needle, count);
        }
    }
    let _ = writeln!(out, "{}", rule);

    out
}
