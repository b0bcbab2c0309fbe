// Locating labeled measurements in simulator text output

pub mod pattern;
pub mod scanner;
pub mod types;

pub use pattern::{PatternError, PatternSet, PatternSpec, COMMON_PARAMETERS};
pub use scanner::{count_failed, scan, scan_all, Measurements};
pub use types::RawMeasurement;
