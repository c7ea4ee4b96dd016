//! Tracing subscriber setup.
//!
//! `RUST_LOG` always wins over the verbosity passed in. Output goes to
//! stderr so JSON reports on stdout stay clean.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a verbosity level (`-v` count)
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global fmt subscriber.
///
/// Returns `false` when a subscriber was already installed; the existing
/// one is left in place.
pub fn init(verbosity: u8, json: bool) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "trace");
    }

    #[test]
    fn test_init_is_idempotent() {
        let _ = init(1, false);
        assert!(!init(2, true));
    }
}
