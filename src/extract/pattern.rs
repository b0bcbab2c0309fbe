use crate::extract::scanner::{is_ident_char, unit_follows, GAP};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Measurement names HSPICE decks commonly report with `.measure`
pub const COMMON_PARAMETERS: [&str; 5] = ["static_power", "av_pow", "current", "voltage", "total_tp"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    #[error("Pattern label cannot be empty")]
    EmptyLabel,

    #[error("Pattern '{0}' has neither a key nor a unit suffix and would match every number")]
    Unanchored(String),

    #[error("Patterns '{0}' and '{1}' can match the same token; give them distinguishing keys or unit suffixes")]
    Ambiguous(String, String),
}

/// How to locate one category of measurement in simulator output.
///
/// A match is `<key> <number><prefix?><suffix>`, e.g. key `av_pow=` and
/// suffix `W` match `av_pow= 1.25mW`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PatternSpec {
    #[serde(skip)]
    pub label: String,

    /// Literal text that must precede the number (spaces and tabs in between are ignored)
    #[serde(default)]
    pub key: String,

    /// Unit literal that must follow the number and optional prefix
    #[serde(default, alias = "suffix")]
    pub unit: String,
}

impl PatternSpec {
    pub fn new(label: impl Into<String>, key: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            unit: unit.into(),
        }
    }

    /// `name=` key with no unit suffix, the way `.measure` results are printed
    pub fn parameter(name: &str) -> Self {
        Self::new(name, format!("{}=", name), "")
    }

    /// The key as matched against the text. Trailing spaces and tabs are
    /// dropped because the scanner already skips them before the number.
    pub fn anchor_key(&self) -> &str {
        self.key.trim_end_matches(GAP)
    }

    fn validate(&self) -> Result<(), PatternError> {
        if self.label.trim().is_empty() {
            return Err(PatternError::EmptyLabel);
        }
        if self.anchor_key().is_empty() && self.unit.is_empty() {
            return Err(PatternError::Unanchored(self.label.clone()));
        }
        Ok(())
    }

    /// True if some token could satisfy both this spec and `other`
    fn overlaps(&self, other: &PatternSpec) -> bool {
        keys_overlap(self.anchor_key(), other.anchor_key())
            && units_overlap(&self.unit, &other.unit)
    }
}

/// Two keys collide when one ends the other and the scanner's identifier
/// boundary check would not tell them apart.
fn keys_overlap(a: &str, b: &str) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return true;
    }
    if !long.ends_with(short) {
        return false;
    }
    if short.len() == long.len() {
        return true;
    }

    let starts_with_ident = short.chars().next().is_some_and(is_ident_char);
    let before = long[..long.len() - short.len()].chars().next_back();
    !(starts_with_ident && before.is_some_and(is_ident_char))
}

/// Two units collide when the longer one, read as written or with its first
/// letter taken as a prefix, also ends in the shorter one (`W` vs `mW`, `W` vs `W/s`).
/// `W` and `Wh` stay apart because a unit must end at a word boundary.
fn units_overlap(a: &str, b: &str) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return true;
    }
    if unit_follows(long, short) {
        return true;
    }
    long.chars()
        .next()
        .filter(|c| c.is_alphabetic())
        .is_some_and(|c| unit_follows(&long[c.len_utf8()..], short))
}

/// Immutable label -> pattern table handed to the extractor at call time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternSet {
    specs: BTreeMap<String, PatternSpec>,
}

impl PatternSet {
    /// Build a set, rejecting unanchored or mutually ambiguous patterns
    pub fn new<I>(specs: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = PatternSpec>,
    {
        let mut map: BTreeMap<String, PatternSpec> = BTreeMap::new();
        for spec in specs {
            spec.validate()?;
            map.insert(spec.label.clone(), spec);
        }

        let all: Vec<&PatternSpec> = map.values().collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                if a.overlaps(b) {
                    return Err(PatternError::Ambiguous(a.label.clone(), b.label.clone()));
                }
            }
        }

        Ok(Self { specs: map })
    }

    /// Built-in table of common measurement names
    pub fn common() -> Self {
        let specs = COMMON_PARAMETERS
            .iter()
            .map(|name| (name.to_string(), PatternSpec::parameter(name)))
            .collect();
        Self { specs }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PatternSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
