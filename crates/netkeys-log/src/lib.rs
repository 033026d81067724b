// ABOUTME: Shared logging setup for netkeys binaries.
// ABOUTME: Silent by default; verbose mode logs to stderr so stdout stays reserved for keys.

use tracing_subscriber::EnvFilter;

/// Default level when verbose logging is on and RUST_LOG is unset.
pub const VERBOSE_LEVEL: tracing::Level = tracing::Level::INFO;

/// Set up logging for a netkeys invocation.
///
/// Without `verbose` no subscriber is installed and every event is dropped.
/// With `verbose`, events go to stderr at INFO, RUST_LOG override.
pub fn init(verbose: bool) {
    if !verbose {
        return;
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(verbose_filter())
        .init();
}

fn verbose_filter() -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(VERBOSE_LEVEL.into())
        .from_env_lossy()
}
