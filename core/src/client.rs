//! Stateless request builder for the Cost Manager API.
//!
//! # Design
//! `CostManagerClient` holds only a `base_url`. Each endpoint has a
//! `build_*` method producing an `HttpRequest`; executing it is the
//! transport's job.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{NewCost, ReportQuery};

/// Builds requests against a Cost Manager server.
#[derive(Debug, Clone)]
pub struct CostManagerClient {
    base_url: String,
}

impl CostManagerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_about(&self) -> HttpRequest {
        self.get(format!("{}/api/about", self.base_url))
    }

    pub fn build_report(&self, query: &ReportQuery) -> Result<HttpRequest, ApiError> {
        let qs = serde_urlencoded::to_string(query)?;
        Ok(self.get(format!("{}/api/report?{qs}", self.base_url)))
    }

    pub fn build_user(&self, id: &str) -> HttpRequest {
        self.get(format!("{}/api/users/{id}", self.base_url))
    }

    pub fn build_add_cost(&self, input: &NewCost) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/api/add", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    fn get(&self, url: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }
}
