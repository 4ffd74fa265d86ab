//! Tracing setup for the presence migration tools.
//!
//! Output is steered by environment variables:
//! - `RUST_LOG` / `LOG_LEVEL` - filter directives (`LOG_LEVEL` is the fallback, default `info`)
//! - `LOG_OUTPUT` - `console`, `file` or `both`
//! - `LOG_FORMAT` - `human`, `compact` or `json`
//! - `LOG_FILE_PATH` - destination for file output

use std::{
    env,
    path::{Path, PathBuf},
};

use presence_core::error::{PresenceError, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    Console,
    File,
    Both,
}

impl LogOutput {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "file" => LogOutput::File,
            "both" => LogOutput::Both,
            _ => LogOutput::Console,
        }
    }

    fn console(self) -> bool {
        matches!(self, LogOutput::Console | LogOutput::Both)
    }

    fn file(self) -> bool {
        matches!(self, LogOutput::File | LogOutput::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Human,
    Compact,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Human,
        }
    }
}

/// Logging settings read from the environment.
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub level: String,
    pub output: LogOutput,
    pub format: LogFormat,
    pub file_path: PathBuf,
}

impl LogSettings {
    pub fn from_env() -> Self {
        let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let output = LogOutput::parse(&env::var("LOG_OUTPUT").unwrap_or_default());
        let format = LogFormat::parse(&env::var("LOG_FORMAT").unwrap_or_default());
        let file_path = env::var("LOG_FILE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join("presence-migrate.log"));

        Self {
            level,
            output,
            format,
            file_path,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }
}

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

fn format_layer<S, W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer<S>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer().with_writer(writer).with_ansi(ansi);
    match format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
        LogFormat::Human => layer.pretty().boxed(),
    }
}

/// Installs the global subscriber from `LOG_*` variables.
///
/// The returned guard flushes the file writer when dropped, so the caller keeps it
/// alive for the lifetime of the process.
pub fn init_subscriber() -> Result<Option<WorkerGuard>> {
    init_from_settings(&LogSettings::from_env())
}

pub fn init_from_settings(settings: &LogSettings) -> Result<Option<WorkerGuard>> {
    let mut layers: Vec<BoxedLayer<_>> = Vec::new();
    let mut guard = None;

    if settings.output.console() {
        layers.push(format_layer(settings.format, std::io::stderr, true));
    }
    if settings.output.file() {
        let (dir, file_name) = split_log_path(&settings.file_path);
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        guard = Some(file_guard);
        layers.push(format_layer(settings.format, writer, false));
    }

    tracing_subscriber::registry()
        .with(settings.filter())
        .with(layers)
        .try_init()
        .map_err(|e| PresenceError::Internal(format!("Failed to initialize tracing: {}", e)))?;

    Ok(guard)
}

/// Console-only subscriber with `default_filter` unless `RUST_LOG` is set.
pub fn init_with_defaults(default_filter: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let format = LogFormat::parse(&env::var("LOG_FORMAT").unwrap_or_default());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(format_layer(format, std::io::stderr, true))
        .try_init()
        .map_err(|e| PresenceError::Internal(format!("Failed to initialize tracing: {}", e)))
}

fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(env::temp_dir);
    let file_name = path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("presence-migrate.log"));
    (dir, file_name)
}
