use std::error::Error;

use axum::{
    extract::{
        rejection::{JsonDataError, JsonRejection},
        State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use core_sim::{AgentConfig, SeededSource, SimError, StrategyFocus, TradingHorizon, PAIR_UNIVERSE};
use runtime::{simulate, SimulationResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    state::{AppState, LabEvent},
    ws,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/static/styles.css", get(styles))
        .route("/static/app.js", get(script))
        .route("/config/defaults", get(config_defaults))
        .route("/simulations", post(run_simulation))
        .route("/ws/events", get(ws::events_socket))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    pub config: AgentConfig,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub run_id: u64,
    pub seed: u64,
    pub result: SimulationResult,
    pub equity_polyline: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDefaultsResponse {
    pub config: AgentConfig,
    pub pair_universe: Vec<&'static str>,
    pub horizons: Vec<&'static str>,
    pub strategies: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    InvalidConfig(SimError),
    RejectedBody {
        status: StatusCode,
        error: String,
        field: Option<String>,
    },
    RunIdOverflow,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let field = match &rejection {
            JsonRejection::JsonDataError(err) => rejected_field(err),
            _ => None,
        };

        Self::RejectedBody {
            status: rejection.status(),
            error: rejection.body_text(),
            field,
        }
    }
}

/// Names the config field a body failed to deserialize at, e.g. `config.horizon` -> `horizon`.
fn rejected_field(err: &JsonDataError) -> Option<String> {
    let mut source: Option<&(dyn Error + 'static)> = Some(err);
    while let Some(current) = source {
        if let Some(path_err) =
            current.downcast_ref::<serde_path_to_error::Error<serde_json::Error>>()
        {
            return field_from_path(&path_err.path().to_string());
        }
        source = current.source();
    }
    None
}

fn field_from_path(path: &str) -> Option<String> {
    let field = path.strip_prefix("config.").unwrap_or(path);
    let field = field.split('[').next().unwrap_or(field);
    if field.is_empty() || field == "." {
        None
    } else {
        Some(field.to_owned())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::InvalidConfig(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    error: err.to_string(),
                    field: Some(err.field().to_owned()),
                },
            ),
            Self::RejectedBody {
                status,
                error,
                field,
            } => (status, ErrorBody { error, field }),
            Self::RunIdOverflow => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "run id space exhausted".to_owned(),
                    field: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

async fn index() -> Html<&'static str> {
    Html(ui::index_html())
}

async fn styles() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], ui::styles_css())
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        ui::app_js(),
    )
}

async fn config_defaults() -> Json<ConfigDefaultsResponse> {
    Json(ConfigDefaultsResponse {
        config: AgentConfig::default(),
        pair_universe: PAIR_UNIVERSE.to_vec(),
        horizons: TradingHorizon::ALL.iter().map(|h| h.as_str()).collect(),
        strategies: StrategyFocus::ALL.iter().map(|s| s.as_str()).collect(),
    })
}

async fn run_simulation(
    State(state): State<AppState>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Result<Json<SimulationResponse>, ApiError> {
    let Json(request) = payload?;
    let run_id = state.start_run().map_err(|_| ApiError::RunIdOverflow)?;
    // Unseeded requests still get a reported seed so the run can be replayed.
    let seed = request.seed.unwrap_or_else(rand::random);

    let result = match simulate(&request.config, &mut SeededSource::new(seed)) {
        Ok(result) => result,
        Err(err) => {
            let SimError::InvalidConfig { field, reason } = &err;
            warn!(run_id, field = *field, %reason, "rejected simulation config");
            state.publish_event(LabEvent::simulation_rejected(run_id, *field, reason.clone()));
            return Err(ApiError::InvalidConfig(err));
        }
    };

    info!(run_id, seed, sharpe = result.sharpe, "simulation run finished");
    state.publish_event(LabEvent::simulation_completed(
        run_id,
        seed,
        result.expected_annual_return,
        result.max_drawdown,
        result.sharpe,
    ));

    let equity_polyline = ui::equity_polyline(&result.equity_curve);
    Ok(Json(SimulationResponse {
        run_id,
        seed,
        result,
        equity_polyline,
    }))
}
