use serde::Serialize;

/// One numeric occurrence found in the input text, before any scaling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawMeasurement {
    /// Numeric part as written, e.g. 3.3 for "3.3mW"
    pub mantissa: f64,
    /// Prefix character following the number, if any. Not validated yet.
    pub prefix: Option<char>,
    /// The matched number and prefix, used in error messages
    pub token: String,
    /// Byte offset of the token in the scanned text
    pub offset: usize,
}

impl RawMeasurement {
    pub fn new(mantissa: f64, prefix: Option<char>) -> Self {
        let token = match prefix {
            Some(c) => format!("{}{}", mantissa, c),
            None => mantissa.to_string(),
        };
        Self {
            mantissa,
            prefix,
            token,
            offset: 0,
        }
    }
}
