use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::SimError;

pub const DEFAULT_CAPITAL: f64 = 250_000.0;
pub const DEFAULT_RISK_LEVEL: u32 = 42;
pub const DEFAULT_DRAWDOWN_TARGET: f64 = 8.0;
pub const DEFAULT_LEVERAGE: u32 = 5;
pub const MAX_RISK_LEVEL: u32 = 100;

/// Instruments offered by the configurator, in display order.
pub const PAIR_UNIVERSE: [&str; 8] = [
    "EUR/USD", "GBP/USD", "USD/JPY", "AUD/USD", "USD/CAD", "NZD/USD", "USD/CHF", "EUR/JPY",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingHorizon {
    Intraday,
    Swing,
    Position,
}

impl TradingHorizon {
    pub const ALL: [Self; 3] = [Self::Intraday, Self::Swing, Self::Position];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intraday => "intraday",
            Self::Swing => "swing",
            Self::Position => "position",
        }
    }
}

impl FromStr for TradingHorizon {
    type Err = SimError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "intraday" => Ok(Self::Intraday),
            "swing" => Ok(Self::Swing),
            "position" => Ok(Self::Position),
            other => Err(SimError::invalid(
                "horizon",
                format!("`{other}` is not one of: intraday, swing, position"),
            )),
        }
    }
}

impl fmt::Display for TradingHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyFocus {
    Trend,
    MeanReversion,
    Carry,
    VolatilityCapture,
}

impl StrategyFocus {
    pub const ALL: [Self; 4] = [
        Self::Trend,
        Self::MeanReversion,
        Self::Carry,
        Self::VolatilityCapture,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trend => "trend",
            Self::MeanReversion => "meanReversion",
            Self::Carry => "carry",
            Self::VolatilityCapture => "volatilityCapture",
        }
    }
}

impl FromStr for StrategyFocus {
    type Err = SimError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "trend" => Ok(Self::Trend),
            "meanReversion" => Ok(Self::MeanReversion),
            "carry" => Ok(Self::Carry),
            "volatilityCapture" => Ok(Self::VolatilityCapture),
            other => Err(SimError::invalid(
                "strategyFocus",
                format!("`{other}` is not one of: trend, meanReversion, carry, volatilityCapture"),
            )),
        }
    }
}

impl fmt::Display for StrategyFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs for one simulated agent.
///
/// `risk_level` is a 1-100 throttle and `drawdown_target` a percentage. Pairs are
/// `BASE/QUOTE` symbols; malformed entries are tolerated and simply add no
/// diversification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    pub capital: f64,
    pub risk_level: u32,
    pub drawdown_target: f64,
    pub leverage: u32,
    pub horizon: TradingHorizon,
    pub strategy_focus: StrategyFocus,
    #[serde(default)]
    pub pairs: Vec<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            capital: DEFAULT_CAPITAL,
            risk_level: DEFAULT_RISK_LEVEL,
            drawdown_target: DEFAULT_DRAWDOWN_TARGET,
            leverage: DEFAULT_LEVERAGE,
            horizon: TradingHorizon::Swing,
            strategy_focus: StrategyFocus::Trend,
            pairs: vec![
                "EUR/USD".to_owned(),
                "USD/JPY".to_owned(),
                "GBP/USD".to_owned(),
            ],
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.capital.is_finite() || self.capital <= 0.0 {
            return Err(SimError::invalid(
                "capital",
                "must be a finite amount greater than 0",
            ));
        }
        if self.risk_level == 0 || self.risk_level > MAX_RISK_LEVEL {
            return Err(SimError::invalid(
                "riskLevel",
                format!("must be between 1 and {MAX_RISK_LEVEL}, got {}", self.risk_level),
            ));
        }
        if !self.drawdown_target.is_finite() || self.drawdown_target <= 0.0 {
            return Err(SimError::invalid(
                "drawdownTarget",
                "must be a finite percentage greater than 0",
            ));
        }
        if self.leverage == 0 {
            return Err(SimError::invalid("leverage", "must be at least 1"));
        }

        Ok(())
    }

    /// Adds the pair when absent, removes it when present.
    pub fn toggle_pair(&mut self, pair: &str) {
        if let Some(position) = self.pairs.iter().position(|existing| existing == pair) {
            self.pairs.remove(position);
        } else {
            self.pairs.push(pair.to_owned());
        }
    }
}
