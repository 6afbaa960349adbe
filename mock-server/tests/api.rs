use std::sync::Arc;

use axum::http::{self, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use mock_server::{app, app_with_clock, TeamMember};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

fn february_app() -> Router {
    app_with_clock(Arc::new(|| Utc.with_ymd_and_hms(2025, 2, 10, 9, 30, 0).unwrap()))
}

const MILK: &str = r#"{"userid":"123123","description":"milk 9","category":"food","sum":8}"#;

// --- about ---

#[tokio::test]
async fn about_lists_team_members() {
    let resp = app().oneshot(get("/api/about")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let team: Vec<TeamMember> = body_json(resp).await;
    assert_eq!(team.len(), 2);
    assert_eq!(team[0].first_name, "Yuval");
    assert_eq!(team[1].last_name, "Ben Gigi");
}

// --- users ---

#[tokio::test]
async fn seeded_user_has_zero_total() {
    let resp = app().oneshot(get("/api/users/123123")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert_eq!(
        &bytes[..],
        br#"{"id":"123123","first_name":"mosh","last_name":"israeli","total":0}"#
    );
}

#[tokio::test]
async fn unknown_user_returns_404() {
    let resp = app().oneshot(get("/api/users/42")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn add_user_then_lookup() {
    let app = app();
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/add",
            r#"{"id":"555","first_name":"Dana","last_name":"Levi","birthday":"1992-05-04","marital_status":"married"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = body_json(resp).await;
    assert_eq!(created["birthday"], "1992-05-04");
    assert_eq!(created["marital_status"], "married");

    let resp = app.oneshot(get("/api/users/555")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let user: Value = body_json(resp).await;
    assert_eq!(user["first_name"], "Dana");
}

#[tokio::test]
async fn add_duplicate_user_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/users/add",
            r#"{"id":"123123","first_name":"mosh","last_name":"israeli","birthday":"1990-01-01","marital_status":"single"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "User ID already exists");
}

// --- add ---

#[tokio::test]
async fn add_cost_returns_201() {
    let resp = february_app()
        .oneshot(json_request("POST", "/api/add", MILK))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let cost: Value = body_json(resp).await;
    assert_eq!(cost["description"], "milk 9");
    assert_eq!(cost["sum"], 8);
    assert_eq!(cost["date"], "2025-02-10T09:30:00Z");
    assert!(cost["_id"].is_string());
}

#[tokio::test]
async fn add_cost_for_unknown_user_returns_404() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/add",
            r#"{"userid":"nobody","description":"x","category":"food","sum":1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_cost_negative_sum_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/add",
            r#"{"userid":"123123","description":"x","category":"food","sum":-3}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Sum must be a positive number");
}

#[tokio::test]
async fn add_cost_unknown_category_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/api/add",
            r#"{"userid":"123123","description":"x","category":"travel","sum":3}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Invalid category");
}

#[tokio::test]
async fn add_cost_malformed_json_returns_400() {
    let resp = app()
        .oneshot(json_request("POST", "/api/add", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn add_cost_without_content_type_reports_missing_fields() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/add")
                .body(MILK.to_string())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn add_cost_accepts_numeric_string_sum() {
    let resp = february_app()
        .oneshot(json_request(
            "POST",
            "/api/add",
            r#"{"userid":"123123","description":"milk 9","category":"food","sum":"8"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let cost: Value = body_json(resp).await;
    assert_eq!(cost["sum"], 8);
}

#[tokio::test]
async fn add_user_empty_body_reports_missing_fields() {
    let resp = app()
        .oneshot(json_request("POST", "/api/users/add", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Missing required fields");
}

// --- report ---

#[tokio::test]
async fn report_without_costs_returns_404_message() {
    let resp = app()
        .oneshot(get("/api/report?id=123123&year=2025&month=2"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(
        body["message"],
        "No data found for the specified user and date range"
    );
}

#[tokio::test]
async fn report_missing_parameters_returns_400() {
    let resp = app().oneshot(get("/api/report?id=123123")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Missing parameters: id, year, month");
}

#[tokio::test]
async fn report_month_out_of_range_returns_400() {
    let resp = app()
        .oneshot(get("/api/report?id=123123&year=2025&month=13"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Invalid year or month");
}

#[tokio::test]
async fn report_reflects_added_cost() {
    let app = february_app();
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/add", MILK))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(get("/api/report?id=123123&year=2025&month=2"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert_eq!(
        &bytes[..],
        br#"{"userid":"123123","year":2025,"month":2,"costs":[{"food":[{"sum":8,"description":"milk 9","day":10}]},{"health":[]},{"housing":[]},{"sport":[]},{"education":[]}]}"#
    );

    let resp = app.oneshot(get("/api/users/123123")).await.unwrap();
    let user: Value = body_json(resp).await;
    assert_eq!(user["total"], 8);
}
