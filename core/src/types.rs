//! Payloads sent to the Cost Manager API.
//!
//! These mirror the mock-server's schema but are defined independently;
//! the runner's integration tests catch drift between the two.

use serde::{Deserialize, Serialize};

/// Cost categories accepted by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Health,
    Housing,
    Sport,
    Education,
}

/// Body of `POST /api/add`. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCost {
    pub userid: String,
    pub description: String,
    pub category: Category,
    pub sum: u64,
}

/// Query of `GET /api/report`, encoded as `id=..&year=..&month=..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportQuery {
    pub id: String,
    pub year: i32,
    pub month: u32,
}
