/// Diagnostic logging to stderr.
///
/// `FYRANK_LOG` takes an `EnvFilter` directive (e.g. `fyrank_core=trace`) and
/// wins over the `-v` count when set.
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "FYRANK_LOG";

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

pub fn init(verbosity: u8) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
