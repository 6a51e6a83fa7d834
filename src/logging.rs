use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

/// Filter used by the storefront binaries when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,actix_web=info,storefront=debug";

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter` when present, so every binary logs
/// with the same layout and can be tuned the same way.
pub fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {}", e))
}
