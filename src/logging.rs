use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable overriding the log filter (RUST_LOG also works).
pub const LOG_ENV_VAR: &str = "PAPER_GRADER_LOG";

/// Filter directive for the given verbosity.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "paper_grader=debug"
    } else {
        "paper_grader=warn"
    }
}

/// Initialize stderr logging. `--verbose` raises the level to debug.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV_VAR))
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(())
}
