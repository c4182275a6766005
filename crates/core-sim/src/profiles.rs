use crate::config::{StrategyFocus, TradingHorizon};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyProfile {
    pub base_drift: f64,
    pub base_volatility: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizonModifier {
    pub drift_multiplier: f64,
    pub volatility_multiplier: f64,
}

impl StrategyFocus {
    pub fn profile(self) -> StrategyProfile {
        let (base_drift, base_volatility) = match self {
            Self::Trend => (0.00075, 0.0095),
            Self::MeanReversion => (0.00055, 0.0075),
            Self::Carry => (0.00065, 0.006),
            Self::VolatilityCapture => (0.00045, 0.0055),
        };

        StrategyProfile {
            base_drift,
            base_volatility,
        }
    }
}

impl TradingHorizon {
    pub fn modifier(self) -> HorizonModifier {
        let (drift_multiplier, volatility_multiplier) = match self {
            Self::Intraday => (0.65, 1.4),
            Self::Swing => (1.0, 1.0),
            Self::Position => (1.2, 0.75),
        };

        HorizonModifier {
            drift_multiplier,
            volatility_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{StrategyFocus, TradingHorizon};

    #[test]
    fn strategy_profiles_match_lookup_table() {
        let trend = StrategyFocus::Trend.profile();
        assert_eq!((trend.base_drift, trend.base_volatility), (0.00075, 0.0095));

        let carry = StrategyFocus::Carry.profile();
        assert_eq!((carry.base_drift, carry.base_volatility), (0.00065, 0.006));
    }

    #[test]
    fn lower_volatility_strategies_carry_lower_drift() {
        let mut profiles: Vec<_> = StrategyFocus::ALL
            .iter()
            .map(|focus| focus.profile())
            .collect();
        profiles.sort_by(|left, right| left.base_volatility.total_cmp(&right.base_volatility));

        assert_eq!(profiles[0], StrategyFocus::VolatilityCapture.profile());
        assert_eq!(profiles[3], StrategyFocus::Trend.profile());
    }

    #[test]
    fn horizon_modifiers_trade_drift_against_volatility() {
        let intraday = TradingHorizon::Intraday.modifier();
        let swing = TradingHorizon::Swing.modifier();
        let position = TradingHorizon::Position.modifier();

        assert_eq!(swing.drift_multiplier, 1.0);
        assert_eq!(swing.volatility_multiplier, 1.0);
        assert!(intraday.drift_multiplier < swing.drift_multiplier);
        assert!(intraday.volatility_multiplier > swing.volatility_multiplier);
        assert_eq!(position.drift_multiplier, 1.2);
        assert_eq!(position.volatility_multiplier, 0.75);
    }
}
