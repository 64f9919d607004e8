use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file
pub const LOG_ENV: &str = "STOQR_LOG";

const DEFAULT_DIRECTIVES: &str = "stoqr=debug,stoqr_core=debug";

/// Initialize tracing with optional file output.
///
/// Nothing is logged unless `STOQR_LOG` holds a file path; writing to the
/// terminal would corrupt the TUI. `RUST_LOG` overrides the default filter.
pub fn init() {
    let Some(log_path) = std::env::var_os(LOG_ENV) else {
        return;
    };
    if let Err(e) = init_file(Path::new(&log_path)) {
        eprintln!("Warning: logging disabled: {}", e);
    }
}

fn init_file(path: &Path) -> std::io::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter())
        .with(file_layer)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    Ok(())
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_parse() {
        assert!(EnvFilter::try_new(DEFAULT_DIRECTIVES).is_ok());
    }
}
