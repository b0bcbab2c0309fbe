use crate::extract::types::RawMeasurement;
use crate::units::error::UnitError;
use crate::units::prefix::{BaseUnit, Prefix};
use serde::Serialize;

/// A measurement expressed in the run's base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedMeasurement {
    pub value: f64,
}

/// Rescale `value` from one prefix scale to another
pub fn rescale(value: f64, from: BaseUnit, to: BaseUnit) -> f64 {
    value * 10f64.powi(from.exponent() - to.exponent())
}

/// Converts raw measurements into a single target scale chosen once per run
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    target: BaseUnit,
}

impl Normalizer {
    pub fn new(target: BaseUnit) -> Self {
        Self { target }
    }

    pub fn target(&self) -> BaseUnit {
        self.target
    }

    /// Convert one measurement. An unsupported prefix fails instead of
    /// defaulting to any scale.
    pub fn normalize(&self, raw: &RawMeasurement) -> Result<NormalizedMeasurement, UnitError> {
        let source = match raw.prefix {
            None => BaseUnit::NONE,
            Some(symbol) => Prefix::from_symbol(symbol)
                .map(BaseUnit::from)
                .ok_or_else(|| UnitError::UnknownPrefix {
                    prefix: symbol,
                    token: raw.token.clone(),
                })?,
        };

        Ok(NormalizedMeasurement {
            value: rescale(raw.mantissa, source, self.target),
        })
    }
}
