use std::path::PathBuf;

use clap::Parser;
use cost_smoke::run_to_file;
use cost_smoke_core::{Suite, DEFAULT_BASE_URL};
use dialoguer::Input;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "cost-smoke")]
#[command(about = "Smoke test for the Cost Manager API at http://localhost:3000", long_about = None)]
struct Opts {
    /// Call sequence to run: `report` or `user-lookup`.
    #[arg(long, default_value_t = Suite::Report)]
    suite: Suite,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let opts = Opts::parse();
    let filename: String = Input::new()
        .with_prompt("Enter output filename (e.g., output.txt)")
        .interact_text()?;

    let path = PathBuf::from(filename.trim());
    let summary = run_to_file(&path, opts.suite, DEFAULT_BASE_URL)?;
    tracing::info!(
        output = %path.display(),
        passed = summary.passed(),
        failed = summary.failed,
        "transcript written"
    );
    Ok(())
}
