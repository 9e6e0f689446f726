use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use habitlog_core::REFRESH_COOKIE_NAME;

use crate::AppState;
use crate::api_error::ApiError;
use crate::auth::{AuthSession, cleared_refresh_cookie, cookie_value, refresh_cookie};
use crate::response_types::{AccessTokenResponse, ProtectedResponse};

/// Start a session. There are no user credentials; any caller may start one.
pub async fn init(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let pair = state.auth_service.issue()?;
    let cookie = refresh_cookie(&pair.refresh_token, state.secure_cookies);
    Ok(([(SET_COOKIE, cookie)], Json(AccessTokenResponse { access_token: pair.access_token })))
}

pub async fn refresh(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = cookie_value(&headers, REFRESH_COOKIE_NAME);
    let access_token = state.auth_service.refresh(token)?;
    // same refresh token, renewed cookie
    let cookie = refresh_cookie(token.unwrap_or_default(), state.secure_cookies);
    Ok(([(SET_COOKIE, cookie)], Json(AccessTokenResponse { access_token })))
}

pub async fn logout(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::NO_CONTENT, [(SET_COOKIE, cleared_refresh_cookie(state.secure_cookies))])
}

pub async fn protected(AuthSession(claims): AuthSession) -> Json<ProtectedResponse> {
    Json(ProtectedResponse { message: "Protected data", session: claims.sid })
}
