use tokio::task::JoinHandle;
use tracing::Subscriber;
use tracing_log::LogTracer;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Compose a tracing subscriber. `default_filter` applies when RUST_LOG is
/// not set.
pub fn get_subscriber(
    default_filter: String,
) -> impl Subscriber + Send + Sync {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    Registry::default().with(env_filter).with(fmt::layer())
}

/// Register a subscriber as the global default, redirecting `log` events
/// into tracing. Must only be called once.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    LogTracer::init().expect("Failed to set logger");
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set subscriber");
}

/// Run CPU-bound work (password hashing) off the async runtime while keeping
/// the current tracing span attached.
pub fn spawn_blocking_with_tracing<F, R>(f: F) -> JoinHandle<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let current_span = tracing::Span::current();
    tokio::task::spawn_blocking(move || current_span.in_scope(f))
}
