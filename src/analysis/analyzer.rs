use crate::extract::{count_failed, scan_all, PatternSet};
use crate::units::{BaseUnit, Normalizer, UnitError};
use serde::Serialize;
use thiserror::Error;

/// How many conversions are echoed at debug level per label
const SAMPLE_CONVERSIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Cannot normalize '{label}': {source}")]
pub struct AnalysisError {
    pub label: String,
    #[source]
    pub source: UnitError,
}

/// Normalized values for one label, in order of appearance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
    /// Occurrences the simulator reported as `failed`
    #[serde(skip_serializing_if = "is_zero")]
    pub failed: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl Series {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of one extraction pass over one input text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub source: String,
    pub target: BaseUnit,
    pub series: Vec<Series>,
}

impl Analysis {
    pub fn series(&self, label: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.label == label)
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(Series::is_empty)
    }
}

/// Extract every configured label from `text` and normalize it to the
/// normalizer's target. The first unsupported prefix aborts the pass.
pub fn analyze_text(
    source: &str,
    text: &str,
    patterns: &PatternSet,
    normalizer: &Normalizer,
) -> Result<Analysis, AnalysisError> {
    let mut series = Vec::with_capacity(patterns.len());

    for measurements in scan_all(text, patterns) {
        let spec = measurements.spec();
        let label = spec.label.clone();
        let mut values = Vec::new();

        for raw in measurements {
            let normalized = normalizer.normalize(&raw).map_err(|source| AnalysisError {
                label: label.clone(),
                source,
            })?;

            if values.len() < SAMPLE_CONVERSIONS {
                log::debug!(
                    "  {} -> {:.4}{}",
                    raw.token,
                    normalized.value,
                    normalizer.target().symbol()
                );
            }
            values.push(normalized.value);
        }

        let failed = count_failed(text, spec);
        if failed > 0 {
            log::warn!("{}: skipped {} failed measurement(s) for '{}'", source, failed, label);
        }
        if values.is_empty() {
            log::warn!("{}: no values found for '{}'", source, label);
        } else {
            log::debug!("{}: extracted {} value(s) for '{}'", source, values.len(), label);
        }

        series.push(Series {
            label,
            values,
            failed,
        });
    }

    Ok(Analysis {
        source: source.to_string(),
        target: normalizer.target(),
        series,
    })
}
