// 7.0 config.rs: all contest settings in one place. pricing knobs, point table,
// roster rules, budget, entry fee. tournaments each carry their own copy so an
// operator can run differently-tuned contests side by side.

use crate::pricing::PricingParams;
use crate::roster::RosterRules;
use crate::scoring::PointTable;
use crate::types::Cost;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContestConfig {
    pub pricing: PricingParams,
    pub points: PointTable,
    pub rules: RosterRules,
    // paid from the player's balance on entry, not part of the horse budget
    pub entry_fee: Cost,
    // ceiling on the summed virtual cost of an entry's picks
    pub total_budget: Cost,
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            pricing: PricingParams::default(),
            points: PointTable::default(),
            rules: RosterRules::default(),
            entry_fee: Cost::new(100),
            total_budget: Cost::new(50000),
        }
    }
}

impl ContestConfig {
    // Big-card preset: pick a stable of up to 8 from anywhere on the card
    pub fn stakes_roster() -> Self {
        let mut config = Self::default();
        config.rules = RosterRules::FixedRoster { max_horses: 8 };
        config.total_budget = Cost::new(100000);
        config
    }

    // Premium preset: steeper favorite pricing, richer placings
    pub fn high_stakes() -> Self {
        let mut config = Self::default();
        config.pricing.multiplier = Decimal::from(200000u32);
        config.points = PointTable {
            first: crate::types::Points::new(20),
            second: crate::types::Points::new(10),
            third: crate::types::Points::new(6),
        };
        config.entry_fee = Cost::new(500);
        config.total_budget = Cost::new(120000);
        config
    }

    // Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_budget.is_zero() {
            return Err(ConfigError::InvalidBudget {
                reason: "Budget must be positive".to_string(),
            });
        }

        // pricing checks: multiplier drives the whole favorite/longshot spread
        if self.pricing.multiplier <= Decimal::ZERO {
            return Err(ConfigError::InvalidPricing {
                reason: "Multiplier must be positive".to_string(),
            });
        }
        if self.pricing.base_cost.is_zero() {
            return Err(ConfigError::InvalidPricing {
                reason: "Base cost must be positive".to_string(),
            });
        }

        // a table where show outpays win is almost surely a typo
        if self.points.first < self.points.second || self.points.second < self.points.third {
            return Err(ConfigError::InvalidPoints {
                reason: "Points must not increase down the placings".to_string(),
            });
        }

        if let RosterRules::FixedRoster { max_horses } = self.rules {
            if max_horses == 0 {
                return Err(ConfigError::InvalidRules {
                    reason: "Roster must allow at least one horse".to_string(),
                });
            }
        }

        Ok(())
    }
}

// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidBudget { reason: String },
    InvalidPricing { reason: String },
    InvalidPoints { reason: String },
    InvalidRules { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_config_valid() {
        let config = ContestConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_budget.value(), 50000);
    }

    #[test]
    fn test_presets_valid() {
        assert!(ContestConfig::stakes_roster().validate().is_ok());
        assert!(ContestConfig::high_stakes().validate().is_ok());
    }

    #[test]
    fn test_roster_preset_rules() {
        let config = ContestConfig::stakes_roster();
        assert_eq!(config.rules, RosterRules::FixedRoster { max_horses: 8 });
    }

    #[test]
    fn test_invalid_budget() {
        let mut config = ContestConfig::default();
        config.total_budget = Cost::zero();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBudget { .. })
        ));
    }

    #[test]
    fn test_invalid_multiplier() {
        let mut config = ContestConfig::default();
        config.pricing.multiplier = dec!(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPricing { .. })
        ));
    }

    #[test]
    fn test_inverted_point_table() {
        let mut config = ContestConfig::default();
        config.points = PointTable {
            first: crate::types::Points::new(3),
            second: crate::types::Points::new(5),
            third: crate::types::Points::new(10),
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPoints { .. })
        ));
    }

    #[test]
    fn test_empty_roster_rules() {
        let mut config = ContestConfig::default();
        config.rules = RosterRules::FixedRoster { max_horses: 0 };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRules { .. })
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = ContestConfig::stakes_roster();
        let json = serde_json::to_string(&config).unwrap();
        let back: ContestConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rules, config.rules);
        assert_eq!(back.total_budget, config.total_budget);
    }
}
