mod config;
mod error;
mod generators;
mod path;
mod profiles;
mod scaling;
mod stats;

pub use config::{
    AgentConfig, StrategyFocus, TradingHorizon, DEFAULT_CAPITAL, DEFAULT_DRAWDOWN_TARGET,
    DEFAULT_LEVERAGE, DEFAULT_RISK_LEVEL, MAX_RISK_LEVEL, PAIR_UNIVERSE,
};
pub use error::SimError;
pub use generators::{RandomSource, RngSource, SeededSource};
#[cfg(any(test, feature = "test-support"))]
pub use generators::SequenceSource;
pub use path::{gaussian, EquityPoint, GeneratedPath, PathGenerator, TailRiskControl, PERIODS};
pub use profiles::{HorizonModifier, StrategyProfile};
pub use scaling::{clamp, diversification_bonus, ScaledParameters};
pub use stats::{PerformanceStats, TRADING_DAYS_PER_YEAR};
