use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Json;
use axum::Router;
use chrono::Local;

use super::templates;
use super::AppState;
use crate::best::{CollectError, ResultEnvelope};

const COLLECTED_MESSAGE: &str = "베스트글을 성공적으로 가져왔습니다";
const FETCH_FAILED_PREFIX: &str = "페이지를 가져오는 중 오류가 발생했습니다";
const PROCESSING_FAILED_PREFIX: &str = "처리 중 오류가 발생했습니다";

const FAVICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100"><rect width="100" height="100" rx="20" fill="#1f3b73"/><text x="50" y="68" font-size="56" text-anchor="middle" fill="#fff">B</text></svg>"##;

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/favicon.ico", get(favicon))
}

async fn index(State(state): State<AppState>) -> Response {
    templates::render_index(&state.config.board_url).into_response()
}

/// Fetch the board and return the extracted posts as JSON.
async fn health(State(state): State<AppState>) -> Response {
    match state.collector.collect().await {
        Ok(posts) => {
            let collected_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            Json(ResultEnvelope::success(COLLECTED_MESSAGE, collected_at, posts)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Map a failed collection to a 500 with the error envelope.
///
/// Fetch failures and everything else get different message prefixes.
fn error_response(e: CollectError) -> Response {
    let prefix = match e {
        CollectError::Fetch(_) => FETCH_FAILED_PREFIX,
        CollectError::Worker(_) => PROCESSING_FAILED_PREFIX,
    };
    let detail = format!("{:#}", anyhow::Error::new(e));
    tracing::error!("Failed to collect best posts: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ResultEnvelope::error(format!("{prefix}: {detail}"))),
    )
        .into_response()
}

async fn favicon() -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        FAVICON_SVG,
    )
        .into_response()
}
