//! Bearer-token extractor and refresh-cookie helpers.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use habitlog_core::{REFRESH_COOKIE_NAME, REFRESH_TOKEN_TTL_SECS};
use habitlog_service::Claims;

use crate::AppState;
use crate::api_error::ApiError;

/// Verified access-token claims. Adding this to a handler's arguments makes
/// the route protected: no token is 401, a bad or expired one is 403.
pub struct AuthSession(pub Claims);

impl FromRequestParts<Arc<AppState>> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers);
        Ok(Self(state.auth_service.verify_access(token)?))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    scheme.eq_ignore_ascii_case("bearer").then_some(token.trim())
}

/// Value of cookie `name` across every `Cookie` header.
pub(crate) fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key == name).then_some(value)
        })
}

pub(crate) fn refresh_cookie(token: &str, secure: bool) -> String {
    build_cookie(token, REFRESH_TOKEN_TTL_SECS, secure)
}

pub(crate) fn cleared_refresh_cookie(secure: bool) -> String {
    build_cookie("", 0, secure)
}

fn build_cookie(value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{REFRESH_COOKIE_NAME}={value}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("abc.def.ghi"));
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark; refreshToken=r.t.k"));
        assert_eq!(cookie_value(&headers, "refreshToken"), Some("r.t.k"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn secure_flag_is_optional() {
        assert!(!refresh_cookie("t", false).contains("Secure"));
        let cookie = refresh_cookie("t", true);
        assert!(cookie.starts_with("refreshToken=t;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.ends_with("; Secure"));
        assert!(cleared_refresh_cookie(false).contains("Max-Age=0"));
    }
}
