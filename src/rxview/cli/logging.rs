//! Logging for the binary, on stderr so table output stays clean.
//!
//! `RUST_LOG` wins when set. Otherwise verbosity picks the level for this
//! crate and everything else stays at warn.

use std::io::{self, IsTerminal};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub fn init_logging(verbosity: u8) {
    let level = level_for(verbosity).as_str().to_lowercase();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,rxview={}", level)));

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time();

    // a subscriber may already be installed when embedded
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), Level::WARN);
        assert_eq!(level_for(1), Level::DEBUG);
        assert_eq!(level_for(5), Level::TRACE);
    }
}
