// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    models::result::LeaderboardResponse,
    quiz::catalog::Catalog,
    store::ResultStore,
};

/// Lists the quiz questions in order, without their answers.
pub async fn list_questions(State(catalog): State<Arc<Catalog>>) -> impl IntoResponse {
    Json(catalog.public_questions())
}

/// Retrieves every stored result, best score first, most recent first on ties.
pub async fn get_leaderboard(
    State(store): State<Arc<dyn ResultStore>>,
) -> Result<impl IntoResponse, AppError> {
    let results = store.list_all().await.map_err(|e| {
        tracing::error!("Failed to fetch leaderboard: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(LeaderboardResponse::from_results(results)))
}
