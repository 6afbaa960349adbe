//! In-memory stand-in for the Cost Manager service.
//!
//! Serves the same routes and error bodies as the real service so the
//! smoke runner can be exercised end to end without a database.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub mod error;
pub mod store;

pub use error::{AppError, AppResult};
pub use store::{amount, Category, Cost, MaritalStatus, Store, User};

/// Source of "now" for costs posted without a date.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
    pub clock: Clock,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamMember {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewUser {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<String>,
    pub marital_status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewCost {
    pub description: Option<String>,
    pub category: Option<String>,
    pub userid: Option<String>,
    /// Numbers or numeric strings.
    pub sum: Option<Value>,
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    pub id: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

pub fn app() -> Router {
    app_with_clock(Arc::new(Utc::now))
}

/// Router over a freshly seeded store, dating new costs with `clock`.
pub fn app_with_clock(clock: Clock) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(Store::seeded())),
        clock,
    };
    Router::new()
        .route("/api/about", get(about))
        .route("/api/users/add", post(add_user))
        .route("/api/users/{id}", get(get_user))
        .route("/api/add", post(add_cost))
        .route("/api/report", get(report))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn about() -> Json<Vec<TeamMember>> {
    Json(vec![
        TeamMember {
            first_name: "Yuval".to_string(),
            last_name: "Betito".to_string(),
        },
        TeamMember {
            first_name: "Hen".to_string(),
            last_name: "Ben Gigi".to_string(),
        },
    ])
}

async fn add_user(
    State(state): State<AppState>,
    input: Result<Json<NewUser>, JsonRejection>,
) -> AppResult<(StatusCode, Json<User>)> {
    let Json(input) = input.map_err(unreadable_body)?;
    let user = validate_user(input)?;
    let user = state.store.write().await.add_user(user)?;
    info!(id = %user.id, "user added");
    Ok((StatusCode::CREATED, Json(user)))
}

async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Value>> {
    let store = state.store.read().await;
    let user = store.user(&id).ok_or(AppError::UserNotFound)?;
    Ok(Json(json!({
        "id": user.id,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "total": amount(store.total_for(&id)),
    })))
}

async fn add_cost(
    State(state): State<AppState>,
    input: Result<Json<NewCost>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Cost>)> {
    let Json(input) = input.map_err(unreadable_body)?;
    let cost = validate_cost(input, (state.clock)())?;
    let cost = state.store.write().await.add_cost(cost)?;
    info!(userid = %cost.userid, category = cost.category.as_str(), sum = cost.sum, "cost added");
    Ok((StatusCode::CREATED, Json(cost)))
}

async fn report(
    State(state): State<AppState>,
    Query(params): Query<ReportParams>,
) -> AppResult<Json<Value>> {
    let (Some(id), Some(year), Some(month)) = (
        non_empty(params.id),
        non_empty(params.year),
        non_empty(params.month),
    ) else {
        return Err(AppError::bad_request("Missing parameters: id, year, month"));
    };
    let (Ok(year), Ok(month)) = (year.trim().parse::<i32>(), month.trim().parse::<u32>()) else {
        return Err(AppError::bad_request("Invalid year or month"));
    };
    if !(1..=12).contains(&month) {
        return Err(AppError::bad_request("Invalid year or month"));
    }
    let report = state.store.read().await.monthly_report(&id, year, month)?;
    Ok(Json(report))
}

/// A body that is absent, not JSON, or of the wrong shape carries none of
/// the required fields.
fn unreadable_body(rejection: JsonRejection) -> AppError {
    debug!(reason = %rejection.body_text(), "request body rejected");
    AppError::bad_request("Missing required fields")
}

fn coerce_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

fn validate_user(input: NewUser) -> AppResult<User> {
    let (Some(id), Some(first_name), Some(last_name), Some(birthday), Some(marital_status)) = (
        non_empty(input.id),
        non_empty(input.first_name),
        non_empty(input.last_name),
        non_empty(input.birthday),
        non_empty(input.marital_status),
    ) else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    if first_name.chars().count() < 2 || last_name.chars().count() < 2 {
        return Err(AppError::bad_request("Names must be at least 2 characters"));
    }
    let birthday = parse_date(&birthday)
        .map(|d| d.date_naive())
        .ok_or_else(|| AppError::bad_request("Invalid birthday"))?;
    let marital_status = serde_json::from_value::<MaritalStatus>(Value::String(marital_status))
        .map_err(|_| AppError::bad_request("Invalid marital status"))?;
    Ok(User {
        id,
        first_name,
        last_name,
        birthday,
        marital_status,
    })
}

fn validate_cost(input: NewCost, now: DateTime<Utc>) -> AppResult<Cost> {
    let (Some(description), Some(category), Some(userid), Some(sum)) = (
        non_empty(input.description),
        non_empty(input.category),
        non_empty(input.userid),
        input.sum,
    ) else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    let sum = coerce_amount(&sum)
        .filter(|sum| *sum > 0.0)
        .ok_or_else(|| AppError::bad_request("Sum must be a positive number"))?;
    let category = Category::parse(&category).ok_or_else(|| AppError::bad_request("Invalid category"))?;
    let date = match non_empty(input.date) {
        Some(raw) => parse_date(&raw).ok_or_else(|| AppError::bad_request("Invalid date"))?,
        None => now,
    };
    Ok(Cost {
        id: Uuid::new_v4(),
        description,
        category,
        userid,
        sum,
        date,
    })
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
