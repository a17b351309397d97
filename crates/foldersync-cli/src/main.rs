mod cli;
mod logging;
mod scheduler;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use foldersync_core::sync::{Reconciler, TracingReporter};

use cli::Cli;
use scheduler::{Scheduler, Tick};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let logfile = logging::resolve_logfile(cli.logfile.as_deref())?;
    logging::init(&logfile)?;

    if !cli.input.is_dir() {
        error!("Source folder '{}' does not exist!", cli.input.display());
        return Ok(ExitCode::FAILURE);
    }

    info!(
        "PERIODIC synchronization start: {} -> {}",
        cli.input.display(),
        cli.output.display()
    );
    info!("INTERVAL of synchronization: {} seconds", cli.time);

    let scheduler = Scheduler::new(Duration::from_secs(cli.time))?;
    let mut reporter = TracingReporter;

    loop {
        info!("START synchronization cycle.");
        match Reconciler::reconcile(&cli.input, &cli.output, &mut reporter) {
            Ok(report) => {
                if report.is_success() {
                    info!(
                        "END synchronization cycle: {} operation(s).",
                        report.total_operations()
                    );
                } else {
                    info!(
                        "END synchronization cycle: {} operation(s), {} error(s).",
                        report.total_operations(),
                        report.errors.len()
                    );
                }
            }
            // The source can vanish between cycles; the next cycle retries
            Err(err) => error!("Synchronization cycle failed: {err}"),
        }

        if scheduler.interrupted() || scheduler.wait() == Tick::Interrupted {
            break;
        }
    }

    info!("TERMINATED synchronization by user.");
    Ok(ExitCode::SUCCESS)
}
