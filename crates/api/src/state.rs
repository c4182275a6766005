use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::broadcast;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StartRunError {
    RunIdOverflow,
}

#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum LabEvent {
    Connected,
    SimulationCompleted {
        run_id: u64,
        seed: u64,
        expected_annual_return: f64,
        max_drawdown: f64,
        sharpe: f64,
    },
    SimulationRejected {
        run_id: u64,
        field: String,
        reason: String,
    },
}

impl LabEvent {
    pub fn simulation_completed(
        run_id: u64,
        seed: u64,
        expected_annual_return: f64,
        max_drawdown: f64,
        sharpe: f64,
    ) -> Self {
        Self::SimulationCompleted {
            run_id,
            seed,
            expected_annual_return,
            max_drawdown,
            sharpe,
        }
    }

    pub fn simulation_rejected(
        run_id: u64,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::SimulationRejected {
            run_id,
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    next_run_id: Arc<AtomicU64>,
    events_tx: broadcast::Sender<LabEvent>,
}

impl Default for AppState {
    fn default() -> Self {
        let (events_tx, _) = broadcast::channel(256);
        Self {
            next_run_id: Arc::new(AtomicU64::new(0)),
            events_tx,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_run(&self) -> Result<u64, StartRunError> {
        let previous = self
            .next_run_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                current.checked_add(1)
            })
            .map_err(|_| StartRunError::RunIdOverflow)?;

        Ok(previous + 1)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<LabEvent> {
        self.events_tx.subscribe()
    }

    /// Returns the number of subscribers reached; zero when nobody is listening.
    pub fn publish_event(&self, event: LabEvent) -> usize {
        self.events_tx.send(event).unwrap_or(0)
    }

    #[cfg(test)]
    pub(crate) fn with_next_run_id_for_test(next_run_id: u64) -> Self {
        let (events_tx, _) = broadcast::channel(256);
        Self {
            next_run_id: Arc::new(AtomicU64::new(next_run_id)),
            events_tx,
        }
    }
}
