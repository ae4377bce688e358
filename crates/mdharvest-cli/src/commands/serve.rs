use crate::cli::ServeArgs;
use crate::commands::success_payload;
use crate::config::PartialAppConfig;
use crate::error::{CliError, Result};
use crate::oracle::build_oracle;
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    response::Json,
    routing::post,
};
use mdharvest::engine::config::ExtractionConfig;
use mdharvest::engine::oracle::DisambiguationOracle;
use mdharvest::engine::progress::ProgressReporter;
use mdharvest::workflows;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

const INVALID_CONTENT_TYPE: &str = "Invalid content type. Please use 'application/json'.";
const INVALID_INPUT: &str = "Invalid input. Please provide 'text' in the request body.";

#[derive(Clone)]
pub struct AppState {
    pub extraction: Arc<ExtractionConfig>,
    pub oracle: Arc<dyn DisambiguationOracle>,
}

pub async fn run(args: ServeArgs) -> Result<()> {
    let address = parse_bind(&args.bind)?;
    let app_config =
        PartialAppConfig::load(args.config.config.as_deref())?.merge_with_cli(&args.config)?;
    let state = AppState {
        extraction: Arc::new(app_config.extraction),
        oracle: Arc::from(build_oracle(&app_config.oracle)?),
    };

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!(%address, "Serving POST /extract_md_data");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| CliError::Server(e.to_string()))
}

fn parse_bind(bind: &str) -> Result<SocketAddr> {
    bind.parse().map_err(|e| {
        CliError::Argument(format!(
            "Invalid --bind address '{}': {}. Expected HOST:PORT, e.g. 0.0.0.0:5034.",
            bind, e
        ))
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/extract_md_data", post(extract_md_data))
        .with_state(state)
}

#[instrument(skip_all, name = "extract_md_data")]
async fn extract_md_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    if !is_json(&headers) {
        warn!("Rejected request with a non-JSON content type.");
        return error_response(StatusCode::BAD_REQUEST, INVALID_CONTENT_TYPE);
    }

    let text = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|value| value.get("text").and_then(Value::as_str).map(str::to_string));
    let Some(text) = text else {
        warn!("Rejected request without a 'text' string.");
        return error_response(StatusCode::BAD_REQUEST, INVALID_INPUT);
    };

    let outcome = tokio::task::spawn_blocking(move || {
        let reporter = ProgressReporter::new();
        workflows::extract::run(&text, &state.extraction, state.oracle.as_ref(), &reporter)
            .map(|result| success_payload(&result, state.extraction.include_water_model_type))
    })
    .await;

    match outcome {
        Ok(Ok(payload)) => (StatusCode::OK, Json(payload)),
        Ok(Err(e)) => {
            error!("Extraction failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
        Err(e) => {
            error!("Extraction task did not complete: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

// Accepts `application/json` and `application/*+json`, ignoring parameters such as charset.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}
