// SI prefix table and conversion of extracted values to a common scale

pub mod error;
pub mod normalizer;
pub mod prefix;

pub use error::UnitError;
pub use normalizer::{rescale, NormalizedMeasurement, Normalizer};
pub use prefix::{BaseUnit, Prefix};
