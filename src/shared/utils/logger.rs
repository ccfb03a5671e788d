use std::str::FromStr;
use std::sync::Once;
use std::time::{Duration, Instant};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info};

static INIT: Once = Once::new();

/// Environment variable holding the maximum log level (`error` .. `trace`)
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Initialize the logging system
/// This should be called once at application startup
pub fn init_logger() {
    INIT.call_once(|| {
        let level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|raw| LevelFilter::from_str(raw.trim()).ok())
            .unwrap_or(LevelFilter::INFO);

        // Another subscriber may already be installed by the host application
        if tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init()
            .is_ok()
        {
            info!("Logging system initialized at level {}", level);
        }
    });
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        tracing::warn!($($arg)*)
    };
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// Log search operations
    pub fn search_operation(keyword: &str, module: Option<&str>, elapsed: Option<Duration>) {
        match (module, elapsed) {
            (Some(m), _) => info!("Search: {} is searching for [{}]", m, keyword),
            (None, Some(e)) => info!(
                "Search: [{}] finished in {:.2}s",
                keyword,
                e.as_secs_f64()
            ),
            (None, None) => debug!("Search: Starting [{}]", keyword),
        }
    }

    /// Log errors with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!("{}: {}", context, error);
    }

    /// Log performance metrics
    pub fn performance_metric(operation: &str, elapsed: Duration) {
        info!(
            "Performance: {} finished in {:.2}s",
            operation,
            elapsed.as_secs_f64()
        );
    }
}

/// Helper for timing operations
#[derive(Debug)]
pub struct TimedOperation {
    start: Instant,
    operation: String,
}

impl TimedOperation {
    pub fn new(operation: &str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: Instant::now(),
            operation: operation.to_string(),
        }
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
