//! Logging config and subscriber layer construction
//!
//! Log records go to stderr by default. When the server speaks MCP over stdio, stdout carries
//! the protocol and must stay free of log output.

mod defaults;
mod format_style;
mod log_rotation_kind;
mod parsers;

pub use format_style::FormatStyle;
pub use log_rotation_kind::LogRotationKind;
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Layer as LayerTrait, Registry};

/// Logging related options
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Logging {
    /// Minimum level of emitted records
    #[serde(
        default = "defaults::log_level",
        deserialize_with = "parsers::from_str"
    )]
    #[schemars(schema_with = "super::schemas::level")]
    pub level: Level,

    /// Directory to write rolling log files into instead of stderr
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Rotation period for log files
    /// [default: daily]
    #[serde(default = "defaults::default_rotation")]
    pub rotation: LogRotationKind,

    #[serde(default)]
    pub format: FormatStyle,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            path: None,
            rotation: defaults::default_rotation(),
            format: FormatStyle::default(),
        }
    }
}

impl Logging {
    /// Filter honoring `RUST_LOG`, with the configured level as the floor
    pub fn env_filter(&self) -> Result<EnvFilter, anyhow::Error> {
        let mut env_filter = EnvFilter::from_default_env().add_directive(self.level.into());

        if self.level == Level::INFO {
            env_filter = env_filter.add_directive("rmcp=warn".parse()?);
        }
        Ok(env_filter)
    }
}

type LoggingLayerResult = (
    Box<dyn LayerTrait<Registry> + Send + Sync>,
    Option<WorkerGuard>,
);

/// Builds the formatting layer for the configured output
pub struct LoggingLayerBuilder {
    writer: Option<BoxMakeWriter>,
    ansi_enabled: bool,
}

impl Default for LoggingLayerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingLayerBuilder {
    pub fn new() -> Self {
        Self {
            writer: None,
            ansi_enabled: false,
        }
    }

    /// Replace the configured destination, mainly for capturing output in tests
    pub fn with_writer<W>(mut self, mw: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(mw));
        self
    }

    /// Colorize injected writers; configured destinations decide this themselves
    pub fn with_ansi_enabled(mut self, enabled: bool) -> Self {
        self.ansi_enabled = enabled;
        self
    }

    /// The returned guard must be held for as long as file logging should keep flushing
    pub fn build(self, logging: &Logging) -> LoggingLayerResult {
        let (writer, guard, ansi) = match self.writer {
            Some(writer) => (writer, None, self.ansi_enabled),
            None => Self::build_writer(logging),
        };

        let layer = tracing_subscriber::fmt::layer();
        let formatted = match logging.format {
            FormatStyle::Full => layer
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(false)
                .boxed(),
            FormatStyle::Compact => layer
                .compact()
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(false)
                .boxed(),
            FormatStyle::Json => layer
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .boxed(),
            FormatStyle::Pretty => layer
                .pretty()
                .with_writer(writer)
                .with_ansi(ansi)
                .with_target(false)
                .boxed(),
        };

        (formatted, guard)
    }

    fn build_writer(logging: &Logging) -> (BoxMakeWriter, Option<WorkerGuard>, bool) {
        let Some(path) = logging.path.as_ref() else {
            return (BoxMakeWriter::new(std::io::stderr), None, true);
        };

        let appender = std::fs::create_dir_all(path)
            .map_err(|e| e.to_string())
            .and_then(|()| {
                RollingFileAppender::builder()
                    .rotation(logging.rotation.clone().into())
                    .filename_prefix("otp_mcp")
                    .filename_suffix("log")
                    .build(path)
                    .map_err(|e| e.to_string())
            });

        match appender {
            Ok(appender) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                (BoxMakeWriter::new(non_blocking), Some(guard), false)
            }
            Err(e) => {
                eprintln!("Failed to set up log file in {}: {e}", path.display());
                eprintln!("Falling back to stderr");
                (BoxMakeWriter::new(std::io::stderr), None, true)
            }
        }
    }
}
