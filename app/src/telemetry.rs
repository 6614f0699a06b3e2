/// Tracing setup for app shells
///
/// Library code only emits spans and events; the hosting shell decides
/// where they go by calling this once at startup. `RUST_LOG` overrides
/// the default filter.
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crafty_app=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
