//! Logging setup shared by the binaries.
//!
//! Output goes to stderr so it never mixes with RPC responses or converted
//! documents on stdout.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Environment variable selecting the log level.
pub const LOG_LEVEL_ENV: &str = "MANAGED_FAVS_LOG";

/// Maps a level name to a tracing level; unknown names mean `info`.
pub fn parse_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Installs the global subscriber with the level from `MANAGED_FAVS_LOG`.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let level = parse_level(&std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string()));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
