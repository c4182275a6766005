use core_sim::{clamp, AgentConfig, PerformanceStats, SimError};
use serde::{Deserialize, Serialize};

pub const TIGHTEN_NARRATIVE: &str =
    "Risk controls tightened to respect the drawdown objective while preserving the core edge.";
pub const HEADROOM_NARRATIVE: &str =
    "Headroom available. Gradually increase risk until the drawdown budget is utilized.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narrative {
    Tighten,
    Headroom,
}

impl Narrative {
    pub fn for_drawdown(max_drawdown: f64, target_drawdown: f64) -> Self {
        if max_drawdown > target_drawdown {
            Self::Tighten
        } else {
            Self::Headroom
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Tighten => TIGHTEN_NARRATIVE,
            Self::Headroom => HEADROOM_NARRATIVE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationInsight {
    pub tuned_risk_level: u32,
    pub tuned_leverage: f64,
    pub projected_return: f64,
    pub projected_drawdown: f64,
    pub narrative: String,
}

/// Suggests a risk level and leverage that pull realized drawdown toward the target.
///
/// A path without drawdown leaves the configured values untouched. Projections scale
/// with the unrounded tuned risk level; only the reported values are rounded.
pub fn optimize(
    config: &AgentConfig,
    stats: &PerformanceStats,
) -> Result<OptimizationInsight, SimError> {
    if config.risk_level == 0 {
        return Err(SimError::invalid("riskLevel", "must be at least 1"));
    }

    let risk_level = f64::from(config.risk_level);
    let leverage = f64::from(config.leverage);
    let target_drawdown = config.drawdown_target / 100.0;
    let max_drawdown = stats.max_drawdown;

    let (tuned_risk, tuned_leverage) = if max_drawdown == 0.0 {
        (risk_level, leverage)
    } else {
        let ratio = target_drawdown / max_drawdown;
        (
            clamp(risk_level * clamp(ratio, 0.45, 1.25) * 0.96, 8.0, 92.0),
            clamp(leverage * clamp(ratio, 0.5, 1.15) * 0.94, 1.0, 15.0),
        )
    };

    let risk_ratio = tuned_risk / risk_level;
    let projected_drawdown = max_drawdown * clamp(risk_ratio, 0.5, 1.2);
    let projected_return = stats.expected_annual_return * clamp(risk_ratio, 0.6, 1.1) * 0.95;

    let narrative = Narrative::for_drawdown(max_drawdown, target_drawdown);
    tracing::debug!(
        tuned_risk,
        tuned_leverage,
        ?narrative,
        "derived optimization insight"
    );

    Ok(OptimizationInsight {
        tuned_risk_level: tuned_risk.round() as u32,
        tuned_leverage: (tuned_leverage * 10.0).round() / 10.0,
        projected_return,
        projected_drawdown: clamp(projected_drawdown, 0.02, 0.25),
        narrative: narrative.message().to_owned(),
    })
}
