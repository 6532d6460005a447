use std::collections::HashSet;

use thiserror::Error;

use insurance_domain::{ReturnChanceTable, TraderRecord};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("return chance for trader '{trader_id}' must be within 0..=100, got {value}")]
    ReturnChanceOutOfRange { trader_id: String, value: f64 },
    #[error("return chance configured for unknown trader '{0}'")]
    UnknownTrader(String),
    #[error("trader id must not be empty")]
    EmptyTraderId,
    #[error("duplicate trader id '{0}'")]
    DuplicateTrader(String),
    #[error("{0} must not be empty")]
    EmptyPath(&'static str),
}

pub fn validate_traders(traders: &[TraderRecord]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for trader in traders {
        if trader.id.trim().is_empty() {
            return Err(ConfigError::EmptyTraderId);
        }
        if !seen.insert(trader.id.as_str()) {
            return Err(ConfigError::DuplicateTrader(trader.id.clone()));
        }
    }
    Ok(())
}

pub fn validate_return_chances(
    chances: &ReturnChanceTable,
    traders: &[TraderRecord],
) -> Result<(), ConfigError> {
    let mut trader_ids = chances.0.keys().collect::<Vec<_>>();
    trader_ids.sort();
    for trader_id in trader_ids {
        let value = chances.0[trader_id];
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(ConfigError::ReturnChanceOutOfRange {
                trader_id: trader_id.clone(),
                value,
            });
        }
        if !traders.iter().any(|trader| &trader.id == trader_id) {
            return Err(ConfigError::UnknownTrader(trader_id.clone()));
        }
    }
    Ok(())
}

pub fn validate_path(value: &str, field: &'static str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyPath(field));
    }
    Ok(())
}
