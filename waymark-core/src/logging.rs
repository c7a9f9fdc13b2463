//! Router event logging
//!
//! The router emits `tracing` events under the `waymark_core` target:
//! `debug` when converters are registered and routers assembled, `trace`
//! for every match, miss and reverse lookup. [`LogConfig`] turns those
//! events into formatted output.
//!
//! # Environment Variables
//!
//! | Variable             | Values                                    |
//! |----------------------|-------------------------------------------|
//! | `WAYMARK_LOG`        | `trace`, `debug`, `info`, `warn`, `error` |
//! | `WAYMARK_LOG_FORMAT` | `json`, `plain`, `pretty`, `compact`      |
//!
//! `RUST_LOG` still wins over the level when set.
//!
//! # Examples
//!
//! ```no_run
//! use waymark_core::logging::{LogConfig, LogFormat, LogLevel};
//!
//! let _guard = LogConfig::new()
//!     .level(LogLevel::Trace)
//!     .format(LogFormat::Compact)
//!     .init();
//! ```

use std::env;
use std::io;
use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, fmt::MakeWriter, layer::SubscriberExt};

/// Target prefix shared by every router event.
pub const LOG_TARGET: &str = "waymark_core";

/// A fully assembled subscriber, ready to install globally or per scope.
pub type BoxedSubscriber = Box<dyn Subscriber + Send + Sync + 'static>;

/// Most verbose router events to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Every match, miss and lookup
    Trace,
    /// Router assembly and converter registration
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse from a case-insensitive name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Line layout of each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event
    #[default]
    Json,
    Plain,
    Pretty,
    Compact,
}

impl LogFormat {
    /// Parse from a case-insensitive name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "plain" | "full" => Some(LogFormat::Plain),
            "pretty" => Some(LogFormat::Pretty),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }
}

/// Standard stream used by [`LogConfig::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
}

/// How router events are filtered and written.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Print the event target (`waymark_core::router`, ...)
    pub targets: bool,
    /// ANSI colors, ignored for JSON
    pub colors: bool,
    /// Explicit filter directives, replacing both `RUST_LOG` and `level`
    pub directives: Option<String>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `WAYMARK_LOG` and `WAYMARK_LOG_FORMAT`.
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let level = env::var("WAYMARK_LOG")
            .ok()
            .and_then(|v| LogLevel::parse(&v))
            .unwrap_or(defaults.level);

        let format = env::var("WAYMARK_LOG_FORMAT")
            .ok()
            .and_then(|v| LogFormat::parse(&v))
            .unwrap_or(defaults.format);

        Self {
            level,
            format,
            ..defaults
        }
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn targets(mut self, enable: bool) -> Self {
        self.targets = enable;
        self
    }

    pub fn colors(mut self, enable: bool) -> Self {
        self.colors = enable;
        self
    }

    /// Replace the level-derived filter, e.g. `waymark_core::router=trace`.
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    /// Directives used when neither explicit directives nor `RUST_LOG` apply.
    ///
    /// ```
    /// # use waymark_core::logging::{LogConfig, LogLevel};
    /// assert_eq!(LogConfig::new().level(LogLevel::Debug).default_directives(), "waymark_core=debug");
    /// ```
    pub fn default_directives(&self) -> String {
        format!("{}={}", LOG_TARGET, self.level.name())
    }

    fn filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.default_directives());
        match &self.directives {
            Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|_| fallback()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback()),
        }
    }

    /// Assemble a subscriber writing router events to `writer`.
    pub fn subscriber<W>(&self, writer: W) -> BoxedSubscriber
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let registry = tracing_subscriber::registry().with(self.filter());
        let layer = fmt::layer().with_writer(writer).with_target(self.targets);

        match self.format {
            LogFormat::Json => Box::new(registry.with(layer.json())),
            LogFormat::Plain => Box::new(registry.with(layer.with_ansi(self.colors))),
            LogFormat::Pretty => Box::new(registry.with(layer.pretty().with_ansi(self.colors))),
            LogFormat::Compact => Box::new(registry.with(layer.compact().with_ansi(self.colors))),
        }
    }

    /// Install the subscriber globally over a non-blocking writer.
    ///
    /// Returns the guard that flushes pending lines on drop, or `None` if
    /// a global subscriber is already installed.
    pub fn init(self) -> Option<WorkerGuard> {
        let (writer, guard) = match self.output {
            LogOutput::Stdout => tracing_appender::non_blocking(io::stdout()),
            LogOutput::Stderr => tracing_appender::non_blocking(io::stderr()),
        };

        tracing::subscriber::set_global_default(self.subscriber(writer))
            .ok()
            .map(|_| guard)
    }
}
