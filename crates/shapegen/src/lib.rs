//! Command handlers and Go rendering behind the `interfacer` and `structer`
//! binaries.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::CliError;

/// Install the stderr log subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
