//! Logging infrastructure - structured tracing for the library
//!
//! Uses `tracing` with a subscriber installed on demand. Hosts that load the
//! library through FFI call `ping_pong_init` once; Rust users call [`init`]
//! or install their own subscriber, in which case ours steps aside.
//!
//! Output goes to stderr (or a file) so host stdout is left alone.

use once_cell::sync::OnceCell;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

pub use tracing::{debug, error, info, trace, warn, Level};

use crate::errors::HandleError;

/// Global logging state; holds the file writer guard when logging to a file
static LOGGER: OnceCell<Option<WorkerGuard>> = OnceCell::new();

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default log level
    pub level: Level,
    /// Log file path; stderr when unset
    pub log_path: Option<PathBuf>,
    /// Enable JSON format (vs human-readable)
    pub json_format: bool,
    /// Show span events (enter/exit)
    pub show_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            log_path: None,
            json_format: false,
            show_spans: false,
        }
    }
}

impl LogConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // PINGPONG_LOG_LEVEL: trace, debug, info, warn, error
        if let Ok(level_str) = std::env::var("PINGPONG_LOG_LEVEL") {
            config.level = parse_level(&level_str).unwrap_or(Level::WARN);
        }

        if let Some(path) = std::env::var_os("PINGPONG_LOG_FILE") {
            config.log_path = Some(PathBuf::from(path));
        }

        config.json_format = std::env::var_os("PINGPONG_LOG_JSON").is_some();
        config.show_spans = std::env::var_os("PINGPONG_LOG_SPANS").is_some();

        config
    }

    /// Verbose config for debugging a host integration
    pub fn debug() -> Self {
        Self {
            level: Level::TRACE,
            show_spans: true,
            ..Self::default()
        }
    }
}

fn parse_level(s: &str) -> Option<Level> {
    match s.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Initialize logging from the environment
pub fn init() {
    init_with_config(LogConfig::from_env());
}

/// Initialize logging with custom configuration
///
/// Only the first call has any effect. If the process already has a global
/// subscriber, that one is kept.
pub fn init_with_config(config: LogConfig) {
    LOGGER.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("pingpong={}", config.level.as_str().to_lowercase()))
        });

        let (writer, guard) = match &config.log_path {
            Some(path) => {
                let directory = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("."));
                let file_name = path
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("pingpong.log"));

                let appender = tracing_appender::rolling::never(directory, file_name);
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                (BoxMakeWriter::new(non_blocking), Some(guard))
            }
            None => (BoxMakeWriter::new(std::io::stderr), None),
        };

        let span_events = if config.show_spans {
            FmtSpan::ENTER | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let layer = fmt::layer()
            .with_writer(writer)
            .with_span_events(span_events)
            .with_target(true)
            .with_line_number(cfg!(debug_assertions));

        let layer: Box<dyn Layer<Registry> + Send + Sync> = if config.json_format {
            layer.json().boxed()
        } else {
            layer.compact().boxed()
        };

        tracing_subscriber::registry()
            .with(layer)
            .with(env_filter)
            .try_init()
            .ok(); // Host may own the global subscriber already

        guard
    });
}

/// Check if logging is initialized
pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

// ============================================================================
// Boundary logging helpers
// ============================================================================

/// Log a call entering the C boundary
#[inline]
pub fn log_boundary_call(function: &'static str, handle: u64) {
    trace!(event = "boundary_call", function, handle, "boundary call");
}

/// Log a rejected handle
pub fn log_handle_fault(function: &'static str, handle: u64, err: &HandleError) {
    warn!(
        event = "handle_fault",
        function,
        handle,
        code = err.code(),
        error = %err,
        "rejected handle"
    );
}
