// Logging
//
// Diagnostics go through `tracing` to stderr. User-facing console output
// goes through `MessageLog`, which also feeds the optional daily log file.

#[cfg(test)]
pub(crate) mod capture;
pub mod message_log;

pub use message_log::{daily_log_name, MessageLog};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
