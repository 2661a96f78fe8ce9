//! Telemetry
//!
//! Opt-in tracing subscriber wiring. Library code only emits events; nothing
//! is installed unless the embedder calls [`init`]. Log shipping to the
//! external monitoring stack happens outside the process, at the addresses
//! in [`MonitoringConfig`](crate::MonitoringConfig).

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber. `RUST_LOG` overrides `default_filter`;
/// a second call (or an already-installed subscriber) is a no-op.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
