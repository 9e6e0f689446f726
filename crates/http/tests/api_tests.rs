//! End-to-end tests: a real server on an ephemeral port, driven by reqwest.

use std::sync::Arc;

use chrono::Utc;
use habitlog_core::{AppConfig, BucketZone};
use habitlog_http::{AppState, create_router};
use habitlog_storage::Storage;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, COOKIE, SET_COOKIE};
use serde_json::{Value, json};
use tempfile::TempDir;

const SECRET: &str = "integration-test-secret-0123456789abcdef";

struct TestApp {
    base: String,
    client: reqwest::Client,
    _temp_dir: TempDir,
}

impl TestApp {
    async fn spawn() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("api.db");
        let storage = Arc::new(Storage::new(&db_path).unwrap());
        let config = AppConfig::new(SECRET.to_owned(), db_path, BucketZone::utc()).unwrap();
        let state = Arc::new(AppState::new(storage, &config).unwrap());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_router(state)).await.unwrap();
        });

        Self { base: format!("http://{addr}"), client: reqwest::Client::new(), _temp_dir: temp_dir }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Log in and return `(access token, refresh cookie pair)`.
    async fn login(&self) -> (String, String) {
        let resp = self.client.post(self.url("/api/auth/init")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let cookie = resp.headers()[SET_COOKIE].to_str().unwrap().to_owned();
        assert!(cookie.contains("HttpOnly"));
        let pair = cookie.split(';').next().unwrap().to_owned();
        let body: Value = resp.json().await.unwrap();
        (body["accessToken"].as_str().unwrap().to_owned(), pair)
    }

    async fn token(&self) -> String {
        self.login().await.0
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn health_and_version_are_public() {
    let app = TestApp::spawn().await;
    let health = app.client.get(app.url("/health")).send().await.unwrap();
    assert_eq!(health.text().await.unwrap(), "ok");

    let version: Value =
        app.client.get(app.url("/api/version")).send().await.unwrap().json().await.unwrap();
    assert_eq!(version["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn protected_route_distinguishes_missing_and_invalid_tokens() {
    let app = TestApp::spawn().await;

    let missing = app.client.get(app.url("/api/protected")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["success"], false);

    let invalid = app
        .client
        .get(app.url("/api/protected"))
        .header(AUTHORIZATION, bearer("not.a.token"))
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::FORBIDDEN);

    let token = app.token().await;
    let ok = app
        .client
        .get(app.url("/api/protected"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let body: Value = ok.json().await.unwrap();
    assert_eq!(body["message"], "Protected data");
    assert!(body["session"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn refresh_uses_cookie() {
    let app = TestApp::spawn().await;
    let (_, cookie) = app.login().await;

    let refreshed = app
        .client
        .post(app.url("/api/auth/refresh"))
        .header(COOKIE, &cookie)
        .send()
        .await
        .unwrap();
    assert_eq!(refreshed.status(), StatusCode::OK);
    let body: Value = refreshed.json().await.unwrap();
    let access = body["accessToken"].as_str().unwrap();
    let protected = app
        .client
        .get(app.url("/api/protected"))
        .header(AUTHORIZATION, bearer(access))
        .send()
        .await
        .unwrap();
    assert_eq!(protected.status(), StatusCode::OK);

    let none = app.client.post(app.url("/api/auth/refresh")).send().await.unwrap();
    assert_eq!(none.status(), StatusCode::UNAUTHORIZED);

    let bogus = app
        .client
        .post(app.url("/api/auth/refresh"))
        .header(COOKIE, "refreshToken=forged.token.value")
        .send()
        .await
        .unwrap();
    assert_eq!(bogus.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn access_token_is_not_a_refresh_token() {
    let app = TestApp::spawn().await;
    let token = app.token().await;
    let resp = app
        .client
        .post(app.url("/api/auth/refresh"))
        .header(COOKIE, format!("refreshToken={token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn logout_clears_cookie() {
    let app = TestApp::spawn().await;
    let resp = app.client.post(app.url("/api/auth/logout")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.headers()[SET_COOKIE].to_str().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn dose_created_today_drives_pivot() {
    let app = TestApp::spawn().await;
    let token = app.token().await;
    let date = today();

    let created = app
        .client
        .post(app.url(&format!("/api/medicine/{date}/create")))
        .header(AUTHORIZATION, bearer(&token))
        .json(&json!({"habit_name": "Caffeine", "dose": 100}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();

    let pivot: Value = app
        .client
        .get(app.url("/api/medicine/caffeine/pivot"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let entries = pivot["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[9]["created_at"], date.as_str());
    assert_eq!(entries[9]["total"].as_f64(), Some(100.0));
    assert!(entries[..9].iter().all(|e| e["total"].as_f64() == Some(0.0)));

    let listed: Value = app
        .client
        .get(app.url(&format!("/api/medicine/{date}")))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["entries"][0]["id"].as_i64(), Some(id));
    assert_eq!(listed["entries"][0]["name"], "Caffeine");

    let substances: Value = app
        .client
        .get(app.url("/api/medicine/substances"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(substances["substances"], json!(["Caffeine"]));
}

#[tokio::test]
async fn pivot_and_histogram_windows_are_validated() {
    let app = TestApp::spawn().await;
    let token = app.token().await;

    let short = app
        .client
        .get(app.url("/api/medicine/Caffeine/pivot?days=3"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap();
    let body: Value = short.json().await.unwrap();
    assert_eq!(body["entries"].as_array().unwrap().len(), 4);

    let too_long = app
        .client
        .get(app.url("/api/medicine/Caffeine/pivot?days=400"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(too_long.status(), StatusCode::BAD_REQUEST);
    let body: Value = too_long.json().await.unwrap();
    assert_eq!(body["details"][0]["field"], "days");

    let not_a_number = app
        .client
        .get(app.url("/api/medicine/Caffeine/histogram?hours=abc"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(not_a_number.status(), StatusCode::BAD_REQUEST);
    let body: Value = not_a_number.json().await.unwrap();
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "hours");

    let histogram: Value = app
        .client
        .get(app.url("/api/medicine/Caffeine/histogram"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(histogram["entries"].as_array().unwrap().len(), 24);
}

#[tokio::test]
async fn invalid_medicine_input_reports_fields() {
    let app = TestApp::spawn().await;
    let token = app.token().await;

    let resp = app
        .client
        .post(app.url(&format!("/api/medicine/{}/create", today())))
        .header(AUTHORIZATION, bearer(&token))
        .json(&json!({"habit_name": "", "dose": -1}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation failed");
    let fields: Vec<&str> =
        body["details"].as_array().unwrap().iter().map(|d| d["field"].as_str().unwrap()).collect();
    assert_eq!(fields, vec!["habit_name", "dose"]);

    let bad_date = app
        .client
        .get(app.url("/api/medicine/2025-13-40"))
        .header(AUTHORIZATION, bearer(&token))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_date.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn body_shape_errors_report_the_field() {
    let app = TestApp::spawn().await;
    let token = app.token().await;

    let missing_dose = app
        .client
        .post(app.url(&format!("/api/medicine/{}/create", today())))
        .header(AUTHORIZATION, bearer(&token))
        .json(&json!({"habit_name": "Caffeine"}))
        .send()
        .await
        .unwrap();
    assert_eq!(missing_dose.status(), StatusCode::BAD_REQUEST);
    let body: Value = missing_dose.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "dose");
    assert_eq!(body["details"][0]["message"], "Required");

    let fractional_id = app
        .client
        .delete(app.url("/api/medicine/delete"))
        .header(AUTHORIZATION, bearer(&token))
        .json(&json!({"id": 1.5}))
        .send()
        .await
        .unwrap();
    assert_eq!(fractional_id.status(), StatusCode::BAD_REQUEST);
    let body: Value = fractional_id.json().await.unwrap();
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "id");
    assert!(!body["details"][0]["message"].as_str().unwrap().contains("line"));
}

#[tokio::test]
async fn missing_medicine_rows_are_404() {
    let app = TestApp::spawn().await;
    let token = app.token().await;

    let update = app
        .client
        .put(app.url("/api/medicine/update"))
        .header(AUTHORIZATION, bearer(&token))
        .json(&json!({"id": 99, "name": "Caffeine", "dose": 5, "created_at": "2025-09-14 08:00:00"}))
        .send()
        .await
        .unwrap();
    assert_eq!(update.status(), StatusCode::NOT_FOUND);

    let delete = app
        .client
        .delete(app.url("/api/medicine/delete"))
        .header(AUTHORIZATION, bearer(&token))
        .json(&json!({"id": 99}))
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    let body: Value = delete.json().await.unwrap();
    assert_eq!(body["error"], "Medicine entry not found.");
}

#[tokio::test]
async fn entry_lifecycle() {
    let app = TestApp::spawn().await;
    let token = app.token().await;
    let auth = bearer(&token);

    let created = app
        .client
        .post(app.url("/api/entries"))
        .header(AUTHORIZATION, &auth)
        .json(&json!({"text": "Walk the dog"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let id = created.json::<Value>().await.unwrap()["id"].as_i64().unwrap();

    let todays: Value = app
        .client
        .get(app.url(&format!("/api/entries/{}", today())))
        .header(AUTHORIZATION, &auth)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(todays["entries"][0]["id"].as_i64(), Some(id));
    assert_eq!(todays["entries"][0]["completed"], false);

    let updated = app
        .client
        .put(app.url("/api/entries"))
        .header(AUTHORIZATION, &auth)
        .json(&json!({"id": id, "text": "Walk the dog", "completed": true,
                      "completed_at": "2025-09-14T10:00:00Z"}))
        .send()
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);

    let done: Value = app
        .client
        .get(app.url("/api/entries/status/true"))
        .header(AUTHORIZATION, &auth)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(done["entries"].as_array().unwrap().len(), 1);

    let recent: Value = app
        .client
        .get(app.url("/api/entries/recent/5"))
        .header(AUTHORIZATION, &auth)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(recent["entries"][0]["id"].as_i64(), Some(id));

    let bad_limit = app
        .client
        .get(app.url("/api/entries/recent/0"))
        .header(AUTHORIZATION, &auth)
        .send()
        .await
        .unwrap();
    assert_eq!(bad_limit.status(), StatusCode::BAD_REQUEST);

    for expected in [StatusCode::OK, StatusCode::NOT_FOUND] {
        let resp = app
            .client
            .delete(app.url("/api/entries"))
            .header(AUTHORIZATION, &auth)
            .json(&json!({"id": id}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), expected);
    }
}

#[tokio::test]
async fn malformed_json_is_a_400_with_error_body() {
    let app = TestApp::spawn().await;
    let token = app.token().await;
    let resp = app
        .client
        .post(app.url("/api/entries"))
        .header(AUTHORIZATION, bearer(&token))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Malformed JSON body");
}
