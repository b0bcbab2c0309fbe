use crate::analysis::{Analysis, Series};
use crate::report::histogram::{Histogram, HistogramSummary};
use crate::units::BaseUnit;
use std::fmt::Write;

/// Width of the longest bar, in characters
const BAR_WIDTH: usize = 40;

/// "static_power" -> "Static Power"
pub fn title_case(label: &str) -> String {
    label
        .split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Render one series as a text histogram with a legend
pub fn format_series(series: &Series, unit: BaseUnit, bins: usize) -> String {
    let mut out = String::new();
    let title = title_case(&series.label);
    let unit_label = unit.description();

    let _ = writeln!(out, "Distribution of {}", title);

    let summary = match HistogramSummary::from_values(&series.values) {
        Some(summary) => summary,
        None => {
            let _ = writeln!(out, "  no data");
            write_failed_note(&mut out, series.failed);
            return out;
        }
    };

    let _ = writeln!(out, "{} ({})", title, unit_label);

    let histogram = Histogram::from_values(&series.values, bins);
    let max_count = histogram.max_count().max(1);
    for bin in &histogram.bins {
        let len = (bin.count * BAR_WIDTH).div_ceil(max_count);
        let _ = writeln!(
            out,
            "  {:>14.4} .. {:<14.4} |{:<width$}| {}",
            bin.start,
            bin.end,
            "#".repeat(len),
            bin.count,
            width = BAR_WIDTH
        );
    }

    let _ = writeln!(
        out,
        "  Mean = {:.4} {}   Std = {:.4}   Min = {:.4}   Max = {:.4}   Count = {}",
        summary.mean, unit_label, summary.std, summary.min, summary.max, summary.count
    );
    write_failed_note(&mut out, series.failed);

    out
}

fn write_failed_note(out: &mut String, failed: usize) {
    if failed > 0 {
        let _ = writeln!(out, "  ({} failed measurement(s) skipped)", failed);
    }
}

/// Render every series of one file
pub fn format_analysis(analysis: &Analysis, bins: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", analysis.source);
    for series in &analysis.series {
        out.push('\n');
        out.push_str(&format_series(series, analysis.target, bins));
    }
    out
}
