use core_sim::{
    AgentConfig, EquityPoint, PathGenerator, PerformanceStats, RandomSource, ScaledParameters,
    SimError, TailRiskControl, PERIODS,
};
use serde::{Deserialize, Serialize};
use strategy::{optimize, OptimizationInsight};
use tracing::{debug, info};

use crate::events::{PipelineEvent, PipelineStage};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub expected_annual_return: f64,
    pub volatility: f64,
    pub sharpe: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub capital_efficiency: f64,
    pub equity_curve: Vec<EquityPoint>,
    pub optimization: OptimizationInsight,
}

impl SimulationResult {
    pub fn final_equity(&self) -> Option<f64> {
        self.equity_curve.last().map(|point| point.equity)
    }
}

/// Runs the five pipeline stages and keeps the stage trail of the last run.
#[derive(Debug, Default)]
pub struct SimulationEngine {
    sequence: u64,
    events: Vec<PipelineEvent>,
}

impl SimulationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[PipelineEvent] {
        &self.events
    }

    pub fn run<R: RandomSource + ?Sized>(
        &mut self,
        config: &AgentConfig,
        rng: &mut R,
    ) -> Result<SimulationResult, SimError> {
        self.events.clear();
        config.validate()?;

        let profile = config.strategy_focus.profile();
        let modifier = config.horizon.modifier();
        debug!(
            strategy = %config.strategy_focus,
            horizon = %config.horizon,
            base_drift = profile.base_drift,
            base_volatility = profile.base_volatility,
            drift_multiplier = modifier.drift_multiplier,
            volatility_multiplier = modifier.volatility_multiplier,
            "resolved strategy profile"
        );
        self.record(PipelineStage::ProfileResolved);

        let params = ScaledParameters::from_config(config);
        debug!(
            diversification_bonus = params.diversification_bonus,
            risk_scalar = params.risk_scalar,
            normalized_leverage = params.normalized_leverage,
            drawdown_discipline = params.drawdown_discipline,
            adjusted_drift = params.adjusted_drift,
            adjusted_volatility = params.adjusted_volatility,
            "scaled parameters"
        );
        self.record(PipelineStage::ParametersScaled);

        let control = TailRiskControl::new(config.risk_level, config.drawdown_target);
        let path = PathGenerator::new(params, control).run(rng, PERIODS);
        debug!(
            periods = path.period_returns.len(),
            final_equity = path.final_equity,
            max_drawdown = path.max_drawdown,
            "generated equity path"
        );
        self.record(PipelineStage::PathGenerated);

        let stats = PerformanceStats::from_path(&path, config.capital);
        self.record(PipelineStage::StatisticsAggregated);

        let optimization = optimize(config, &stats)?;
        self.record(PipelineStage::OptimizationDerived);

        info!(
            expected_annual_return = stats.expected_annual_return,
            sharpe = stats.sharpe,
            max_drawdown = stats.max_drawdown,
            tuned_risk_level = optimization.tuned_risk_level,
            "simulation completed"
        );

        Ok(SimulationResult {
            expected_annual_return: stats.expected_annual_return,
            volatility: stats.volatility,
            sharpe: stats.sharpe,
            max_drawdown: stats.max_drawdown,
            win_rate: stats.win_rate,
            profit_factor: stats.profit_factor,
            capital_efficiency: stats.capital_efficiency,
            equity_curve: path.equity_curve,
            optimization,
        })
    }

    fn record(&mut self, stage: PipelineStage) {
        self.sequence += 1;
        self.events.push(PipelineEvent::new(self.sequence, stage));
    }
}

/// Pure entry point: one config and one random source in, one result out.
pub fn simulate<R: RandomSource + ?Sized>(
    config: &AgentConfig,
    rng: &mut R,
) -> Result<SimulationResult, SimError> {
    SimulationEngine::new().run(config, rng)
}
