use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the `-v` derived level
pub const LOG_ENV: &str = "REPOVIEW_LOG";

/// Install the global subscriber. Logs go to stderr so they never mix with
/// rendered output or JSON on stdout.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
