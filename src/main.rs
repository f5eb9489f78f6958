//! ioloader CLI entry point

use anyhow::{Context, Result};
use ioloader::config::{cli::Cli, cli_convert};
use ioloader::output::{json, text};
use ioloader::worker::Worker;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let workload = cli_convert::build_workload(&cli).context("Invalid workload")?;
    let worker = Worker::new(workload);

    println!("ioloader v{}", env!("CARGO_PKG_VERSION"));
    println!();
    text::print_configuration(worker.workload(), worker.seed());

    if cli.dry_run {
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }
    println!();

    let report = worker.run().with_context(|| {
        format!("Run against {} failed", worker.workload().target_path().display())
    })?;

    text::print_results(&report);

    if let Some(path) = &cli.json {
        json::write_json_output(path, &report)?;
        info!(path = %path.display(), "JSON report written");
    }

    Ok(())
}

/// Install the stderr log subscriber; `RUST_LOG` directives still apply
fn init_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}
