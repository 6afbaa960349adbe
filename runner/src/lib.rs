//! Interactive smoke runner for the Cost Manager API.
//!
//! Wires the core's suites to a real HTTP transport and an output file.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use cost_smoke_core::{run_suite, CostManagerClient, RunSummary, Suite};

pub mod transport;

pub use transport::UreqTransport;

/// Run `suite` against `base_url`, writing the transcript to `path`.
///
/// The file is created or truncated before the first request is sent.
/// Failing steps are recorded in the file; only I/O errors on the file
/// itself are returned.
pub fn run_to_file(path: &Path, suite: Suite, base_url: &str) -> anyhow::Result<RunSummary> {
    let file = File::create(path)
        .with_context(|| format!("cannot open output file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let client = CostManagerClient::new(base_url);
    let mut transport = UreqTransport::new();

    let summary = run_suite(suite, &client, &mut transport, &mut out)
        .with_context(|| format!("smoke run into {} aborted", path.display()))?;
    out.into_inner()
        .map_err(|e| e.into_error())
        .and_then(|file| file.sync_all())
        .with_context(|| format!("cannot finish writing {}", path.display()))?;
    Ok(summary)
}
