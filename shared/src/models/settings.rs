//! Alert threshold settings

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEFAULT_EXPIRY_WARNING_DAYS: u32 = 30;
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Thresholds driving the dashboard alert lists
///
/// The backend stores these as a string key/value table, so values are
/// written as strings and read from either strings or numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    #[serde(
        rename = "DIAS_ALERTA_VENCIMENTO",
        default = "default_expiry_days",
        serialize_with = "as_string",
        deserialize_with = "number_or_string"
    )]
    pub expiry_warning_days: u32,
    #[serde(
        rename = "LIMITE_ESTOQUE_BAIXO",
        default = "default_low_stock",
        serialize_with = "as_string",
        deserialize_with = "number_or_string"
    )]
    pub low_stock_threshold: u32,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            expiry_warning_days: DEFAULT_EXPIRY_WARNING_DAYS,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

fn default_expiry_days() -> u32 {
    DEFAULT_EXPIRY_WARNING_DAYS
}

fn default_low_stock() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

fn as_string<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
