use serde::{Deserialize, Serialize};

use crate::{generators::RandomSource, scaling::ScaledParameters};

pub const PERIODS: usize = 220;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub index: usize,
    pub equity: f64,
    pub drawdown: f64,
}

/// Per-period return shaping: a tanh squash scaled by the tail buffer, floored at a hard stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailRiskControl {
    pub tail_buffer: f64,
    pub max_loss_per_period: f64,
}

impl TailRiskControl {
    pub fn new(risk_level: u32, drawdown_target: f64) -> Self {
        Self {
            tail_buffer: 0.02 + (drawdown_target / 100.0) * 0.25,
            max_loss_per_period: -0.04 - (f64::from(risk_level) / 100.0) * 0.08,
        }
    }

    pub fn apply(&self, raw_return: f64) -> f64 {
        let softened = (raw_return / self.tail_buffer).tanh() * self.tail_buffer;
        softened.max(self.max_loss_per_period)
    }
}

/// Single Box–Muller variate; the paired sine variate is not kept.
pub fn gaussian<R: RandomSource + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let u1 = nonzero(rng.next_unit());
    let u2 = nonzero(rng.next_unit());
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev + mean
}

fn nonzero(draw: f64) -> f64 {
    if draw == 0.0 {
        f64::EPSILON
    } else {
        draw
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPath {
    pub period_returns: Vec<f64>,
    pub equity_curve: Vec<EquityPoint>,
    pub final_equity: f64,
    pub max_drawdown: f64,
    pub wins: usize,
    pub positive_sum: f64,
    pub negative_sum: f64,
}

pub struct PathGenerator {
    params: ScaledParameters,
    control: TailRiskControl,
    index: usize,
    equity: f64,
    running_peak: f64,
    max_drawdown: f64,
    wins: usize,
    positive_sum: f64,
    negative_sum: f64,
}

impl PathGenerator {
    pub fn new(params: ScaledParameters, control: TailRiskControl) -> Self {
        Self {
            params,
            control,
            index: 0,
            equity: 1.0,
            running_peak: 1.0,
            max_drawdown: 0.0,
            wins: 0,
            positive_sum: 0.0,
            negative_sum: 0.0,
        }
    }

    /// Draws one raw return. Consumes exactly four uniforms: drift jitter, two for the
    /// volatility shock, one for the fat tail.
    pub fn draw_raw_return<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        let params = &self.params;
        let drift =
            params.adjusted_drift * params.normalized_leverage * (0.95 + rng.next_unit() * 0.1);
        let vol_shock = gaussian(
            rng,
            0.0,
            params.adjusted_volatility * params.normalized_leverage,
        );
        let fat_tail = (rng.next_unit() - 0.5)
            * params.adjusted_volatility
            * 1.5
            * (params.risk_scalar - 0.3);

        drift + vol_shock + fat_tail
    }

    /// Advances one period and returns the controlled return with its curve point.
    pub fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> (f64, EquityPoint) {
        let controlled = self.control.apply(self.draw_raw_return(rng));

        self.equity *= 1.0 + controlled;
        self.running_peak = self.running_peak.max(self.equity);
        let drawdown = if self.running_peak == 0.0 {
            0.0
        } else {
            (self.running_peak - self.equity) / self.running_peak
        };
        self.max_drawdown = self.max_drawdown.max(drawdown);

        if controlled >= 0.0 {
            self.wins += 1;
            self.positive_sum += controlled;
        } else {
            self.negative_sum += controlled.abs();
        }

        let point = EquityPoint {
            index: self.index,
            equity: self.equity,
            drawdown,
        };
        self.index += 1;

        (controlled, point)
    }

    pub fn run<R: RandomSource + ?Sized>(mut self, rng: &mut R, periods: usize) -> GeneratedPath {
        let mut period_returns = Vec::with_capacity(periods);
        let mut equity_curve = Vec::with_capacity(periods);

        for _ in 0..periods {
            let (controlled, point) = self.step(rng);
            period_returns.push(controlled);
            equity_curve.push(point);
        }

        GeneratedPath {
            period_returns,
            equity_curve,
            final_equity: self.equity,
            max_drawdown: self.max_drawdown,
            wins: self.wins,
            positive_sum: self.positive_sum,
            negative_sum: self.negative_sum,
        }
    }
}
