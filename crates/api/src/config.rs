// Copyright (C) 2026 BetonFlow Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engine configuration.
//!
//! The default credit limit, the emergency window, and the zone travel
//! table are deployment decisions, not engine constants; hosts load them
//! from whatever configuration source they use and pass them in here.

use betonflow_domain::{EmergencyWindow, Money, ZoneTravelModel};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The default credit limit must be strictly positive.
    #[error("Default credit limit must be strictly positive, got {centimes} centimes")]
    InvalidCreditLimit {
        /// The rejected value in centimes.
        centimes: i64,
    },

    /// The identifier retry budget must allow at least one attempt.
    #[error("Identifier retry limit must be at least 1, got {limit}")]
    InvalidRetryLimit {
        /// The rejected value.
        limit: u32,
    },
}

/// Deployment configuration of the dispatch engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Credit limit applied to clients without one of their own.
    pub default_credit_limit: Money,
    /// The plant's nightly emergency window.
    pub emergency_window: EmergencyWindow,
    /// Expected travel minutes per delivery zone.
    pub zones: ZoneTravelModel,
    /// How many identifiers to try before giving up on creation.
    pub id_retry_limit: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // 50,000.00 currency units.
            default_credit_limit: Money::from_centimes(5_000_000),
            emergency_window: EmergencyWindow::default(),
            zones: ZoneTravelModel::default(),
            id_retry_limit: 5,
        }
    }
}

impl EngineConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first invalid setting.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.default_credit_limit.centimes() <= 0 {
            return Err(ConfigError::InvalidCreditLimit {
                centimes: self.default_credit_limit.centimes(),
            });
        }
        if self.id_retry_limit == 0 {
            return Err(ConfigError::InvalidRetryLimit {
                limit: self.id_retry_limit,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_retry_budget_is_rejected() {
        let config = EngineConfig {
            id_retry_limit: 0,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidRetryLimit { limit: 0 })
        );
    }

    #[test]
    fn test_non_positive_credit_limit_is_rejected() {
        let config = EngineConfig {
            default_credit_limit: Money::ZERO,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCreditLimit { .. })
        ));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
