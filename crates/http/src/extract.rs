//! JSON body extractor that reports shape errors per field.
//!
//! The body is first read as a [`serde_json::Value`] so syntax errors and a
//! missing content type keep axum's rejection. Decoding into `T` then goes
//! through `serde_path_to_error`, which knows which field failed.

use axum::Json;
use axum::extract::{FromRequest, Request};
use habitlog_core::FieldIssue;
use serde::de::DeserializeOwned;

use crate::api_error::ApiError;

pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<serde_json::Value>::from_request(req, state).await?;
        serde_path_to_error::deserialize(value)
            .map(Self)
            .map_err(|err| ApiError::validation(vec![field_issue(&err)]))
    }
}

fn field_issue(err: &serde_path_to_error::Error<serde_json::Error>) -> FieldIssue {
    let inner = err.inner().to_string();
    let path = match err.path().to_string() {
        p if p == "." => None,
        p => Some(p),
    };

    if let Some(name) = missing_field(&inner) {
        let field = path.map_or_else(|| name.to_owned(), |p| format!("{p}.{name}"));
        return FieldIssue { field, message: "Required".to_owned() };
    }

    let message = inner
        .split_once(", expected ")
        .map_or_else(|| "Invalid value".to_owned(), |(_, expected)| format!("Expected {expected}"));
    FieldIssue { field: path.unwrap_or_else(|| "body".to_owned()), message }
}

fn missing_field(message: &str) -> Option<&str> {
    message.strip_prefix("missing field `")?.split('`').next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_types::{CreateMedicineRequest, DeleteRequest};

    fn issue_for<T: DeserializeOwned>(body: serde_json::Value) -> FieldIssue {
        match serde_path_to_error::deserialize::<_, T>(body) {
            Ok(_) => panic!("expected a decoding error"),
            Err(err) => field_issue(&err),
        }
    }

    #[test]
    fn missing_field_is_required() {
        let body = serde_json::json!({"habit_name": "Caffeine"});
        let issue = issue_for::<CreateMedicineRequest>(body);
        assert_eq!(issue.field, "dose");
        assert_eq!(issue.message, "Required");
    }

    #[test]
    fn wrong_type_names_the_field_and_expected_type() {
        let issue = issue_for::<DeleteRequest>(serde_json::json!({"id": 1.5}));
        assert_eq!(issue.field, "id");
        assert_eq!(issue.message, "Expected i64");
    }

    #[test]
    fn non_object_body_is_reported_on_body() {
        let issue = issue_for::<DeleteRequest>(serde_json::json!("just a string"));
        assert_eq!(issue.field, "body");
        assert!(issue.message.starts_with("Expected "), "{}", issue.message);
    }
}
