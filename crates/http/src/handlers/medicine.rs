use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use habitlog_core::{FieldIssue, MedicineEntry, PivotPoint};

use crate::AppState;
use crate::api_error::ApiError;
use crate::auth::AuthSession;
use crate::extract::ValidJson;
use crate::query_types::{
    CreateMedicineRequest, DeleteRequest, HistogramQuery, PivotQuery, UpdateMedicineRequest,
};
use crate::response_types::{
    CreatedResponse, EntriesResponse, MessageResponse, SubstancesResponse,
};

pub async fn substances(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SubstancesResponse>, ApiError> {
    let substances = state.medicine_service.substances().await?;
    Ok(Json(SubstancesResponse { success: true, substances }))
}

pub async fn pivot(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
    query: Result<Query<PivotQuery>, QueryRejection>,
) -> Result<Json<EntriesResponse<PivotPoint>>, ApiError> {
    let Path(name) = name?;
    let Query(query) = query?;
    let days = window_param("days", query.days)?;
    let points = state.medicine_service.daily_pivot(&name, days).await?;
    Ok(Json(EntriesResponse::new(points)))
}

pub async fn histogram(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
    query: Result<Query<HistogramQuery>, QueryRejection>,
) -> Result<Json<EntriesResponse<PivotPoint>>, ApiError> {
    let Path(name) = name?;
    let Query(query) = query?;
    let hours = window_param("hours", query.hours)?;
    let points = state.medicine_service.hourly_histogram(&name, hours).await?;
    Ok(Json(EntriesResponse::new(points)))
}

pub async fn list_for_date(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
    date: Result<Path<String>, PathRejection>,
) -> Result<Json<EntriesResponse<MedicineEntry>>, ApiError> {
    let Path(date) = date?;
    let entries = state.medicine_service.list_for_date(&date).await?;
    Ok(Json(EntriesResponse::new(entries)))
}

pub async fn create(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
    date: Result<Path<String>, PathRejection>,
    ValidJson(req): ValidJson<CreateMedicineRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Path(date) = date?;
    let id = state.medicine_service.create_on_date(&date, &req.habit_name, req.dose).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { success: true, message: None, id })))
}

pub async fn update(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<UpdateMedicineRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.medicine_service.update(req.id, &req.name, req.dose, &req.created_at).await?;
    Ok(Json(MessageResponse::ok("Medicine entry updated.")))
}

pub async fn delete(
    _auth: AuthSession,
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<DeleteRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.medicine_service.delete(req.id).await?;
    Ok(Json(MessageResponse::ok("Medicine entry deleted.")))
}

fn window_param(field: &str, raw: Option<String>) -> Result<Option<u32>, ApiError> {
    raw.map(|raw| {
        raw.trim().parse::<u32>().map_err(|_| {
            ApiError::validation(vec![FieldIssue {
                field: field.to_owned(),
                message: "Expected a whole number".to_owned(),
            }])
        })
    })
    .transpose()
}
