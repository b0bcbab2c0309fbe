use crate::extract::pattern::{PatternSet, PatternSpec};
use crate::extract::types::RawMeasurement;
use lazy_static::lazy_static;
use regex::{Match, Matches, Regex};

lazy_static! {
    /// Numeric literal: optional sign, integer or decimal, optional exponent.
    /// Examples: "3", "-0.25", ".5", "1.2345e-03", "+7E6"
    static ref NUMBER: Regex = Regex::new(
        r"[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?"
    ).unwrap();
}

pub(crate) const GAP: [char; 2] = [' ', '\t'];

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lazy, single-pass sequence of measurements for one pattern, in text order.
///
/// Once consumed it cannot be restarted; call [`scan`] again to reread.
pub struct Measurements<'a> {
    text: &'a str,
    spec: &'a PatternSpec,
    numbers: Matches<'static, 'a>,
}

impl<'a> Measurements<'a> {
    pub fn spec(&self) -> &'a PatternSpec {
        self.spec
    }

    fn accept(&self, number: Match<'a>) -> Option<RawMeasurement> {
        if !self.key_precedes(number.start()) {
            return None;
        }

        let rest = &self.text[number.end()..];
        let (prefix, prefix_len) = split_prefix(rest, &self.spec.unit)?;
        let token_end = number.end() + prefix_len;

        let mantissa = match number.as_str().parse::<f64>() {
            Ok(v) => v,
            Err(e) => {
                log::debug!("Skipping unparsable number '{}': {}", number.as_str(), e);
                return None;
            }
        };

        Some(RawMeasurement {
            mantissa,
            prefix,
            token: self.text[number.start()..token_end].to_string(),
            offset: number.start(),
        })
    }

    /// Check the key anchor (or, without a key, that the number is not the
    /// tail of an identifier such as `n12`)
    fn key_precedes(&self, start: usize) -> bool {
        let before = &self.text[..start];
        let key = self.spec.anchor_key();

        if key.is_empty() {
            return !before.chars().next_back().is_some_and(is_ident_char);
        }

        let before = before.trim_end_matches(GAP);
        if !before.ends_with(key) {
            return false;
        }

        // "power=" must not match inside "static_power="
        let key_is_ident = key.chars().next().is_some_and(is_ident_char);
        let glued = before[..before.len() - key.len()]
            .chars()
            .next_back()
            .is_some_and(is_ident_char);
        !(key_is_ident && glued)
    }
}

impl Iterator for Measurements<'_> {
    type Item = RawMeasurement;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(number) = self.numbers.next() {
            if let Some(raw) = self.accept(number) {
                return Some(raw);
            }
        }
        None
    }
}

impl std::fmt::Debug for Measurements<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Measurements")
            .field("label", &self.spec.label)
            .finish_non_exhaustive()
    }
}

/// Split the text after a number into an optional prefix and the anchor
/// suffix. Returns the prefix and how many bytes of `rest` belong to the token.
///
/// The prefix must touch the number. A prefix reading wins over a bare
/// reading when both fit.
fn split_prefix(rest: &str, unit: &str) -> Option<(Option<char>, usize)> {
    let glued = rest.chars().next().filter(|c| c.is_alphabetic());

    // Only a key anchors the value ("av_pow= 4.4mW"): the first letter is the
    // prefix candidate and whatever is glued after it is ignored
    if unit.is_empty() {
        return Some((glued, glued.map_or(0, char::len_utf8)));
    }

    if let Some(c) = glued {
        if unit_follows(&rest[c.len_utf8()..], unit) {
            return Some((Some(c), c.len_utf8()));
        }
    }
    unit_follows(rest, unit).then_some((None, 0))
}

/// True if `after` starts with `unit` (spaces or tabs allowed in front) and
/// the unit is not the start of a longer word, so "5 steps" is not "5 s"
pub(crate) fn unit_follows(after: &str, unit: &str) -> bool {
    let Some(tail) = after.trim_start_matches(GAP).strip_prefix(unit) else {
        return false;
    };
    let unit_ends_word = unit.chars().next_back().is_some_and(is_ident_char);
    !(unit_ends_word && tail.chars().next().is_some_and(is_ident_char))
}

/// Scan `text` for every occurrence of one pattern
pub fn scan<'a>(text: &'a str, spec: &'a PatternSpec) -> Measurements<'a> {
    Measurements {
        text,
        spec,
        numbers: NUMBER.find_iter(text),
    }
}

/// One lazy scan per configured label, in label order
pub fn scan_all<'a>(text: &'a str, patterns: &'a PatternSet) -> Vec<Measurements<'a>> {
    patterns.iter().map(|spec| scan(text, spec)).collect()
}

/// Count measurements the simulator reported as `failed` for this pattern
pub fn count_failed(text: &str, spec: &PatternSpec) -> usize {
    let key = spec.anchor_key();
    if key.is_empty() {
        return 0;
    }

    let key_is_ident = key.chars().next().is_some_and(is_ident_char);
    text.match_indices(key)
        .filter(|(idx, _)| {
            !(key_is_ident && text[..*idx].chars().next_back().is_some_and(is_ident_char))
        })
        .filter(|(idx, _)| {
            let after = text[idx + key.len()..].trim_start_matches(GAP);
            let word_len = after.find(|c: char| !is_ident_char(c)).unwrap_or(after.len());
            after[..word_len].eq_ignore_ascii_case("failed")
        })
        .count()
}
