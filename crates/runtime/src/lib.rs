pub mod benchmark;
pub mod engine;
pub mod events;
pub mod export;
pub mod logging;
pub mod metrics;

pub use benchmark::TARGET_SIMULATIONS_PER_SEC;
pub use engine::{simulate, SimulationEngine, SimulationResult};
