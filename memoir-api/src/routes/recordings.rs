use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::ApiError;
use crate::{
    domain::{
        models::UserId,
        search::{EnrichedRecording, ScoredRecording},
    },
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_recordings))
        .route("/search", get(search_recordings))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchQuery {
    q: String,
    limit: Option<usize>,
}

#[instrument(name = "GET /users/:user_id/recordings", skip(app_state))]
async fn list_recordings(
    State(app_state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<EnrichedRecording>>, ApiError> {
    let recordings = app_state.search_service().list_all(&user_id).await?;

    Ok(Json(recordings))
}

#[instrument(name = "GET /users/:user_id/recordings/search", skip(app_state))]
async fn search_recordings(
    State(app_state): State<AppState>,
    Path(user_id): Path<UserId>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<ScoredRecording>>, ApiError> {
    let Query(query) =
        query.map_err(|rejection| ApiError::new(StatusCode::BAD_REQUEST, rejection.body_text()))?;

    let results = app_state
        .search_service()
        .search(&user_id, &query.q, query.limit)
        .await?;

    Ok(Json(results))
}
