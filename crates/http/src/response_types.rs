//! Response types (Serialize)

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct EntriesResponse<T> {
    pub success: bool,
    pub entries: Vec<T>,
}

impl<T> EntriesResponse<T> {
    pub const fn new(entries: Vec<T>) -> Self {
        Self { success: true, entries }
    }
}

#[derive(Debug, Serialize)]
pub struct SubstancesResponse {
    pub success: bool,
    pub substances: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub const fn ok(message: &'static str) -> Self {
        Self { success: true, message }
    }
}

#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct ProtectedResponse {
    pub message: &'static str,
    pub session: String,
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}
