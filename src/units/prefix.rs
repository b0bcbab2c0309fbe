use crate::units::error::UnitError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// SI magnitude prefix recognized in simulator output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    Kilo,
    Mega,
    Giga,
}

impl Prefix {
    pub const ALL: [Prefix; 8] = [
        Prefix::Femto,
        Prefix::Pico,
        Prefix::Nano,
        Prefix::Micro,
        Prefix::Milli,
        Prefix::Kilo,
        Prefix::Mega,
        Prefix::Giga,
    ];

    /// Look up a prefix by its symbol. Case matters: `m` is milli, `M` is mega.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'f' => Some(Prefix::Femto),
            'p' => Some(Prefix::Pico),
            'n' => Some(Prefix::Nano),
            'u' | 'µ' => Some(Prefix::Micro),
            'm' => Some(Prefix::Milli),
            'k' => Some(Prefix::Kilo),
            'M' => Some(Prefix::Mega),
            'G' => Some(Prefix::Giga),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Prefix::Femto => 'f',
            Prefix::Pico => 'p',
            Prefix::Nano => 'n',
            Prefix::Micro => 'u',
            Prefix::Milli => 'm',
            Prefix::Kilo => 'k',
            Prefix::Mega => 'M',
            Prefix::Giga => 'G',
        }
    }

    /// Power of ten this prefix scales by
    pub fn exponent(self) -> i32 {
        match self {
            Prefix::Femto => -15,
            Prefix::Pico => -12,
            Prefix::Nano => -9,
            Prefix::Micro => -6,
            Prefix::Milli => -3,
            Prefix::Kilo => 3,
            Prefix::Mega => 6,
            Prefix::Giga => 9,
        }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The common scale every value of a run is expressed in.
///
/// `BaseUnit(None)` is the unprefixed base unit itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseUnit(pub Option<Prefix>);

impl BaseUnit {
    pub const NONE: BaseUnit = BaseUnit(None);

    pub fn exponent(self) -> i32 {
        self.0.map_or(0, Prefix::exponent)
    }

    /// Symbol as written in config files and CLI flags (empty for the base unit)
    pub fn symbol(self) -> String {
        self.0.map(|p| p.symbol().to_string()).unwrap_or_default()
    }

    /// Human readable label used on histogram axes
    pub fn description(self) -> &'static str {
        match self.0 {
            Some(Prefix::Femto) => "femto",
            Some(Prefix::Pico) => "p",
            Some(Prefix::Nano) => "n",
            Some(Prefix::Micro) => "µ",
            Some(Prefix::Milli) => "m",
            Some(Prefix::Kilo) => "k",
            Some(Prefix::Mega) => "M",
            Some(Prefix::Giga) => "G",
            None => "base",
        }
    }
}

impl From<Prefix> for BaseUnit {
    fn from(prefix: Prefix) -> Self {
        BaseUnit(Some(prefix))
    }
}

impl FromStr for BaseUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "" | "1" | "none" | "base" => return Ok(BaseUnit::NONE),
            _ => {}
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Prefix::from_symbol(c)
                .map(BaseUnit::from)
                .ok_or_else(|| UnitError::InvalidTarget(s.to_string())),
            _ => Err(UnitError::InvalidTarget(s.to_string())),
        }
    }
}

impl fmt::Display for BaseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(prefix) => write!(f, "{}", prefix),
            None => write!(f, "none"),
        }
    }
}

impl Serialize for BaseUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.symbol())
    }
}

impl<'de> Deserialize<'de> for BaseUnit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
