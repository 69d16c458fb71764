mod catalog;
mod cli;
mod extractor;
#[cfg(test)]
mod fixtures;
mod merge;
mod model;
mod output;
mod scanner;
mod sync;

use anyhow::Result;
use model::SyncAction;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

fn main() -> Result<()> {
    let args = cli::parse_args();
    init_tracing(args.verbose);

    let records = sync::run(&args)?;

    if let Some(report) = &args.report {
        output::write_report(&records, report, &args.report_format)?;
    }

    let count = |action: SyncAction| records.iter().filter(|r| r.action == action).count();
    println!(
        "\nCompleted: {} added, {} updated, {} skipped.",
        count(SyncAction::Added),
        count(SyncAction::Updated),
        count(SyncAction::Skipped)
    );

    Ok(())
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    // RUST_LOG, when set, takes precedence over -v.
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
