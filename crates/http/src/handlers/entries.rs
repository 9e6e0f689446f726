use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use habitlog_core::{Entry, FieldIssue, MAX_RECENT_LIMIT};

use crate::AppState;
use crate::api_error::ApiError;
use crate::auth::AuthSession;
use crate::extract::ValidJson;
use crate::query_types::{CreateEntryRequest, DeleteRequest, StatusQuery, UpdateEntryRequest};
use crate::response_types::{CreatedResponse, EntriesResponse, MessageResponse};

pub async fn list_for_date(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
    date: Result<Path<String>, PathRejection>,
) -> Result<Json<EntriesResponse<Entry>>, ApiError> {
    let Path(date) = date?;
    let entries = state.entry_service.list_for_date(&date).await?;
    tracing::debug!(%date, count = entries.len(), "Listed entries for date");
    Ok(Json(EntriesResponse::new(entries)))
}

pub async fn by_status(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
    completed: Result<Path<String>, PathRejection>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<Json<EntriesResponse<Entry>>, ApiError> {
    let Path(completed) = completed?;
    let Query(query) = query?;
    let completed = match completed.as_str() {
        "true" => true,
        "false" => false,
        _ => {
            return Err(ApiError::validation(vec![FieldIssue {
                field: "completed".to_owned(),
                message: "must be true or false".to_owned(),
            }]));
        },
    };
    let entries = state.entry_service.by_status(completed, query.date.as_deref()).await?;
    Ok(Json(EntriesResponse::new(entries)))
}

pub async fn recent(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
) -> Result<Json<EntriesResponse<Entry>>, ApiError> {
    let entries = state.entry_service.recent(None).await?;
    Ok(Json(EntriesResponse::new(entries)))
}

pub async fn recent_with_limit(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
    limit: Result<Path<String>, PathRejection>,
) -> Result<Json<EntriesResponse<Entry>>, ApiError> {
    let Path(raw) = limit?;
    let limit = raw.parse::<usize>().ok().filter(|n| (1..=MAX_RECENT_LIMIT).contains(n));
    let Some(limit) = limit else {
        return Err(ApiError::bad_request(format!(
            "Limit must be a number between 1 and {MAX_RECENT_LIMIT}"
        )));
    };
    let entries = state.entry_service.recent(Some(limit)).await?;
    Ok(Json(EntriesResponse::new(entries)))
}

pub async fn create(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateEntryRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = state.entry_service.create(&req.text, req.completed).await?;
    let body = CreatedResponse { success: true, message: Some("Entry created successfully"), id };
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn update(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UpdateEntryRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .entry_service
        .update(req.id, &req.text, req.completed, req.completed_at.as_deref())
        .await?;
    Ok(Json(MessageResponse::ok("Entry updated successfully")))
}

pub async fn delete(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<DeleteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.entry_service.delete(req.id).await?;
    Ok(Json(MessageResponse::ok("Entry deleted successfully")))
}
