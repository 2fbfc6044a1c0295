// src/handlers/session.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::session::{SessionView, StartQuizRequest, SubmitAnswersRequest},
    quiz::catalog::Catalog,
    sessions::{SessionHandle, SessionRegistry},
    store::ResultStore,
};

fn lookup(sessions: &SessionRegistry, id: Uuid) -> Result<SessionHandle, AppError> {
    sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
}

/// Opens a new session on the name screen.
///
/// Returns 201 Created and the session view; the `session_id` is what the
/// client sends back on every later action.
pub async fn create_session(
    State(sessions): State<SessionRegistry>,
) -> Result<impl IntoResponse, AppError> {
    let id = sessions.create();
    let handle = lookup(&sessions, id)?;
    let session = handle.lock().await;

    Ok((StatusCode::CREATED, Json(SessionView::render(id, &session))))
}

/// Returns the current screen of a session. Never has side effects.
pub async fn get_session(
    State(sessions): State<SessionRegistry>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let handle = lookup(&sessions, id)?;
    let session = handle.lock().await;

    Ok(Json(SessionView::render(id, &session)))
}

/// Records the player's name and moves the session into the quiz.
pub async fn start_quiz(
    State(sessions): State<SessionRegistry>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StartQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let handle = lookup(&sessions, id)?;
    let mut session = handle.lock().await;

    *session = session.start(&payload.name)?;

    Ok(Json(SessionView::render(id, &session)))
}

/// Submits the player's answers.
///
/// * Rejects incomplete answer sets without touching the session.
/// * Grades the answers against the catalog.
/// * Appends exactly one result row, then reports score and review.
///
/// The session lock is held across the write so two concurrent submits
/// on the same session cannot both reach the store.
pub async fn submit_answers(
    State(sessions): State<SessionRegistry>,
    State(catalog): State<Arc<Catalog>>,
    State(store): State<Arc<dyn ResultStore>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitAnswersRequest>,
) -> Result<impl IntoResponse, AppError> {
    let handle = lookup(&sessions, id)?;
    let mut session = handle.lock().await;

    let next = session
        .submit(payload.answers, &catalog, store.as_ref())
        .await
        .map_err(|e| {
            tracing::warn!("Submission for session {} rejected: {}", id, e);
            AppError::from(e)
        })?;
    *session = next;

    Ok(Json(SessionView::render(id, &session)))
}

/// Throws the session away and returns to the name screen.
pub async fn restart_quiz(
    State(sessions): State<SessionRegistry>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let handle = lookup(&sessions, id)?;
    let mut session = handle.lock().await;

    *session = session.restart();

    Ok(Json(SessionView::render(id, &session)))
}
