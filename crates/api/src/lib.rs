pub mod routes;
pub mod state;
mod ws;

use axum::Router;

pub use routes::{SimulationRequest, SimulationResponse};
pub use state::{AppState, LabEvent};

pub fn app() -> Router {
    app_with_state(AppState::new())
}

pub fn app_with_state(state: AppState) -> Router {
    routes::router(state)
}
