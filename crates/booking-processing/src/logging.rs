//! Subscriber setup for the `tracing` events the stages emit.

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber.
///
/// `RUST_LOG` wins over `level` when set. With `quiet`, only warnings and
/// errors are shown. Calling this more than once, or after another
/// subscriber was installed, is a no-op.
pub fn init_logging(level: &str, quiet: bool) {
    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging("debug", false);
        init_logging("info", true);
        tracing::info!("still logging");
    }
}
