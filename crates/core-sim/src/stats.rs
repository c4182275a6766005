use serde::{Deserialize, Serialize};

use crate::{path::GeneratedPath, scaling::clamp};

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
    pub expected_annual_return: f64,
    pub volatility: f64,
    pub sharpe: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub capital_efficiency: f64,
}

impl PerformanceStats {
    pub fn from_path(path: &GeneratedPath, capital: f64) -> Self {
        if path.period_returns.is_empty() {
            return Self::empty(capital);
        }

        let periods = path.period_returns.len() as f64;
        let avg_return = path.period_returns.iter().sum::<f64>() / periods;
        let variance = path
            .period_returns
            .iter()
            .map(|value| (value - avg_return).powi(2))
            .sum::<f64>()
            / periods;
        let std_dev = variance.sqrt();

        let annualization_factor = TRADING_DAYS_PER_YEAR / periods;
        let expected_annual_return = path.final_equity.powf(annualization_factor) - 1.0;
        let volatility = std_dev * TRADING_DAYS_PER_YEAR.sqrt();
        let sharpe = if volatility == 0.0 {
            0.0
        } else {
            expected_annual_return / volatility
        };

        let win_rate = path.wins as f64 / periods;
        let profit_factor = if path.positive_sum == 0.0 || path.negative_sum == 0.0 {
            1.0
        } else {
            clamp(path.positive_sum / path.negative_sum, 0.4, 3.5)
        };

        let capital_efficiency = if path.max_drawdown == 0.0 {
            capital
        } else {
            capital * (expected_annual_return + 1.0) / path.max_drawdown
        };

        Self {
            expected_annual_return,
            volatility,
            sharpe,
            max_drawdown: path.max_drawdown,
            win_rate,
            profit_factor,
            capital_efficiency,
        }
    }

    fn empty(capital: f64) -> Self {
        Self {
            expected_annual_return: 0.0,
            volatility: 0.0,
            sharpe: 0.0,
            max_drawdown: 0.0,
            win_rate: 0.0,
            profit_factor: 1.0,
            capital_efficiency: capital,
        }
    }
}
