use api::AppState;
use axum::{routing::get, Router};

pub fn build_app() -> Router {
    api::app_with_state(AppState::new()).route("/health", get(healthcheck))
}

async fn healthcheck() -> &'static str {
    "ok"
}
