use std::collections::HashSet;

use crate::config::AgentConfig;

const MAX_DIVERSIFICATION_BONUS: f64 = 1.15;
const DIVERSIFICATION_STEP: f64 = 0.015;

/// Saturating clamp. `min` wins over `max` when the bounds are inverted.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

pub fn diversification_bonus<S: AsRef<str>>(pairs: &[S]) -> f64 {
    let mut bases = HashSet::new();
    let mut quotes = HashSet::new();

    for pair in pairs {
        let Some((base, quote)) = pair.as_ref().split_once('/') else {
            continue;
        };
        let quote = quote.split('/').next().unwrap_or_default();
        if base.is_empty() || quote.is_empty() {
            continue;
        }
        bases.insert(base);
        quotes.insert(quote);
    }

    let depth = (bases.len() + quotes.len()) as f64;
    MAX_DIVERSIFICATION_BONUS.min(1.0 + depth * DIVERSIFICATION_STEP)
}

/// Dimensionless factors derived from an [`AgentConfig`], shared by every period of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledParameters {
    pub diversification_bonus: f64,
    pub risk_scalar: f64,
    pub leverage_scalar: f64,
    pub normalized_leverage: f64,
    pub drawdown_discipline: f64,
    pub adjusted_drift: f64,
    pub adjusted_volatility: f64,
}

impl ScaledParameters {
    pub fn from_config(config: &AgentConfig) -> Self {
        let profile = config.strategy_focus.profile();
        let modifier = config.horizon.modifier();
        let risk_level = f64::from(config.risk_level);

        let diversification_bonus = diversification_bonus(&config.pairs);
        let risk_scalar = 0.6 + (risk_level / 100.0) * 1.4;
        let leverage_scalar = 0.6 + f64::from(config.leverage) / 10.0;
        let drawdown_discipline = clamp(1.0 - config.drawdown_target / 100.0, 0.35, 0.95);

        let adjusted_drift = profile.base_drift
            * modifier.drift_multiplier
            * diversification_bonus
            * (0.85 + (risk_level / 120.0) * drawdown_discipline);

        let adjusted_volatility = profile.base_volatility
            * modifier.volatility_multiplier
            * diversification_bonus
            * risk_scalar
            * (0.85 + (1.0 - drawdown_discipline));

        Self {
            diversification_bonus,
            risk_scalar,
            leverage_scalar,
            normalized_leverage: clamp(leverage_scalar, 0.8, 2.2),
            drawdown_discipline,
            adjusted_drift,
            adjusted_volatility,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp, diversification_bonus, ScaledParameters};
    use crate::config::AgentConfig;

    const EPS: f64 = 1e-12;

    #[test]
    fn empty_pairs_give_no_bonus() {
        let pairs: [&str; 0] = [];
        assert_eq!(diversification_bonus(&pairs), 1.0);
    }

    #[test]
    fn counts_unique_bases_and_quotes() {
        let bonus = diversification_bonus(&["EUR/USD", "GBP/USD", "USD/JPY"]);

        assert!((bonus - 1.075).abs() < EPS);
    }

    #[test]
    fn bonus_saturates_at_cap() {
        let pairs = [
            "EUR/USD", "GBP/USD", "USD/JPY", "AUD/USD", "USD/CAD", "NZD/USD", "USD/CHF", "EUR/JPY",
        ];

        assert_eq!(diversification_bonus(&pairs), 1.15);
    }

    #[test]
    fn malformed_pairs_are_skipped() {
        let bonus = diversification_bonus(&["EURUSD", "/JPY", "GBP/", "", "AUD/NZD"]);

        assert!((bonus - 1.03).abs() < EPS);
    }

    #[test]
    fn clamp_saturates_both_sides() {
        assert_eq!(clamp(0.1, 0.35, 0.95), 0.35);
        assert_eq!(clamp(0.99, 0.35, 0.95), 0.95);
        assert_eq!(clamp(0.5, 0.35, 0.95), 0.5);
    }

    #[test]
    fn reference_scenario_scalars() {
        let params = ScaledParameters::from_config(&AgentConfig::default());

        assert!((params.risk_scalar - 1.188).abs() < EPS);
        assert!((params.leverage_scalar - 1.1).abs() < EPS);
        assert!((params.normalized_leverage - 1.1).abs() < EPS);
        assert!((params.drawdown_discipline - 0.92).abs() < EPS);

        let expected_drift = 0.00075 * 1.0 * 1.075 * (0.85 + (42.0 / 120.0) * 0.92);
        let expected_vol = 0.0095 * 1.0 * 1.075 * 1.188 * (0.85 + (1.0 - 0.92));
        assert!((params.adjusted_drift - expected_drift).abs() < EPS);
        assert!((params.adjusted_volatility - expected_vol).abs() < EPS);
    }

    #[test]
    fn leverage_is_clamped_into_band() {
        let low = ScaledParameters::from_config(&AgentConfig {
            leverage: 1,
            ..AgentConfig::default()
        });
        let high = ScaledParameters::from_config(&AgentConfig {
            leverage: 20,
            ..AgentConfig::default()
        });

        assert_eq!(low.normalized_leverage, 0.8);
        assert_eq!(high.normalized_leverage, 2.2);
    }

    #[test]
    fn drawdown_discipline_is_clamped() {
        let loose = ScaledParameters::from_config(&AgentConfig {
            drawdown_target: 90.0,
            ..AgentConfig::default()
        });
        let tight = ScaledParameters::from_config(&AgentConfig {
            drawdown_target: 1.0,
            ..AgentConfig::default()
        });

        assert_eq!(loose.drawdown_discipline, 0.35);
        assert_eq!(tight.drawdown_discipline, 0.95);
    }
}
