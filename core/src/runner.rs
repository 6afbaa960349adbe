//! Sequential execution of a suite and rendering of its transcript.
//!
//! Every step is attempted regardless of how earlier steps went. A step
//! that cannot obtain a response, or whose JSON does not parse, gets a
//! failure line in the transcript and the run moves on. Only errors
//! writing the transcript itself end a run early.

use std::io::{self, Write};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::client::CostManagerClient;
use crate::error::{ApiError, StepError, TransportError};
use crate::http::{HttpResponse, Transport};
use crate::suite::{Field, Layout, Step, Suite};

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("building requests: {0}")]
    Build(#[from] ApiError),

    #[error("writing transcript: {0}")]
    Output(#[from] io::Error),
}

/// Tally of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn passed(&self) -> usize {
        self.steps - self.failed
    }
}

/// Run all steps of `suite` through `transport`, writing the transcript to `out`.
pub fn run_suite<T, W>(
    suite: Suite,
    client: &CostManagerClient,
    transport: &mut T,
    out: &mut W,
) -> Result<RunSummary, RunError>
where
    T: Transport + ?Sized,
    W: Write + ?Sized,
{
    let steps = suite.steps(client)?;
    let layout = suite.layout();
    let mut summary = RunSummary::default();

    info!(%suite, base_url = client.base_url(), "starting smoke run");
    out.write_all(layout.preamble.as_bytes())?;

    for (i, step) in steps.iter().enumerate() {
        debug!(method = %step.request.method, url = %step.request.url, "executing step");
        write_heading(out, step)?;

        let result = transport.execute(&step.request);
        if let Ok(response) = &result {
            info!(route = %step.route, status = response.status, "response received");
        }
        if let Some(err) = render_step(out, layout, step, result)? {
            warn!(route = %step.route, error = %err, "step failed");
            summary.failed += 1;
        }
        summary.steps += 1;

        let trailer = if i + 1 == steps.len() {
            layout.closing
        } else {
            layout.separator
        };
        out.write_all(trailer.as_bytes())?;
    }

    out.flush()?;
    info!(steps = summary.steps, failed = summary.failed, "smoke run finished");
    Ok(summary)
}

fn write_heading<W: Write + ?Sized>(out: &mut W, step: &Step) -> io::Result<()> {
    writeln!(out, "{}", step.title)?;
    if let Some(underline) = step.underline {
        writeln!(out, "{underline}")?;
    }
    Ok(())
}

/// Write the lines of one step; returns the error that cut it short, if any.
fn render_step<W: Write + ?Sized>(
    out: &mut W,
    layout: &Layout,
    step: &Step,
    result: Result<HttpResponse, TransportError>,
) -> io::Result<Option<StepError>> {
    let response = match result {
        Ok(response) => response,
        Err(err) => return write_failure(out, layout, step, err.into()).map(Some),
    };

    writeln!(out, "{}{}", layout.url, step.request.url)?;
    for &field in step.fields {
        let Some(label) = layout.label(field) else {
            continue;
        };
        let value = match field {
            Field::Status => response.status.to_string(),
            Field::Content => response.raw_content(),
            Field::Text => response.text(),
            Field::Json => match response.json() {
                Ok(json) => json.to_string(),
                Err(err) => return write_failure(out, layout, step, err.into()).map(Some),
            },
        };
        writeln!(out, "{label}{value}")?;
    }
    Ok(None)
}

fn write_failure<W: Write + ?Sized>(
    out: &mut W,
    layout: &Layout,
    step: &Step,
    err: StepError,
) -> io::Result<StepError> {
    writeln!(out, "{}{}: {}", layout.failure, step.route, err)?;
    Ok(err)
}
