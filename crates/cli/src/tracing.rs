use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing_log::AsTrace;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Logs go to stderr, filtered by the verbosity flags.
///
/// When a trace file is given everything, regardless of verbosity, is also written to it.
pub fn configure_tracing(trace: Option<PathBuf>, verbose: Verbosity<InfoLevel>) -> anyhow::Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(verbose.log_level_filter().as_trace());

    let trace_layer = match trace {
        Some(path) => {
            let file = File::create(&path).with_context(|| format!("Creating trace file. file: {}", path.display()))?;

            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .with_filter(LevelFilter::TRACE),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(trace_layer)
        .try_init()?;

    Ok(())
}
