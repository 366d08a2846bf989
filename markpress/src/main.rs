use anyhow::{Context, Result};
use markpress::{build_site, Config};
use std::{io::stderr, process::ExitCode};
use tracing::error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("markpress=info")),
        )
        .with(fmt::layer().with_writer(stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    // Read configuration
    let config = Config::from_env().context("failed to read configuration")?;

    build_site(&config).context("failed to build site")
}
