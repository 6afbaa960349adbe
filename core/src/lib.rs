//! Smoke-test core for the Cost Manager API.
//!
//! # Overview
//! Builds the fixed request sequence of a [`Suite`], hands each request to
//! a caller-supplied [`Transport`], and renders the responses into a
//! plain-text transcript. The core never touches the network, so the whole
//! run is deterministic under a canned transport.
//!
//! # Design
//! - `CostManagerClient` is stateless; it holds only `base_url`.
//! - Steps run strictly in order; a failing step is written as a failure
//!   line and never aborts the run.
//! - Response records are rendered once and dropped.

pub mod client;
pub mod error;
pub mod http;
pub mod runner;
pub mod suite;
pub mod types;

pub use client::CostManagerClient;
pub use error::{ApiError, StepError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use runner::{run_suite, RunError, RunSummary};
pub use suite::{Field, Layout, Step, Suite};
pub use types::{Category, NewCost, ReportQuery};

/// Where the Cost Manager server is expected to listen.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
