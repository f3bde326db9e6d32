use tracing_subscriber::EnvFilter;

/// Default filter for a given `-v` count when `RUST_LOG` is unset.
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "filecollect=error";
    }
    match verbose {
        0 => "filecollect=warn",
        1 => "filecollect=info",
        2 => "filecollect=debug",
        _ => "filecollect=trace",
    }
}

/// Installs a stderr `tracing` subscriber. `RUST_LOG` takes precedence over
/// the verbosity flags. Calling this twice is harmless.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
