// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logging setup.
//!
//! Two sinks share one line pattern: stdout (level highlighted) and a
//! size-rolled file with a fixed window of compressed archives. The root
//! filter defaults to `trace` and can be re-read from a filter file on a
//! fixed interval without restarting.

pub mod format;
pub mod request_id;
pub mod rolling;

pub use format::PatternFormatter;
pub use request_id::{RequestId, RequestIdLayer, REQUEST_ID_FIELD};
pub use rolling::{FixedWindowRoller, RollingFileWriter};

use anyhow::Context as _;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};
use tracing_subscriber::{EnvFilter, Registry};

/// Handle used to swap the active filter at runtime.
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Output encoding for both sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable line pattern.
    #[default]
    Pattern,
    /// Flattened JSON, one object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pattern" | "text" => Ok(LogFormat::Pattern),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format {:?}", other)),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Initial filter directive (`trace`, `info,rocket_container=debug`, ...)
    pub level: String,
    pub format: LogFormat,
    /// Directory holding the active log file and its archives
    pub directory: PathBuf,
    pub file_name: String,
    /// Size in bytes that triggers a roll
    pub file_size_limit: u64,
    /// Number of archives kept
    pub file_window: u32,
    /// Index of the newest archive
    pub file_base_index: u32,
    /// Optional file whose contents replace the filter directive
    pub filter_file: Option<PathBuf>,
    /// How often `filter_file` is re-read
    pub refresh_interval: Duration,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "trace".to_string(),
            format: LogFormat::Pattern,
            directory: PathBuf::from("log"),
            file_name: "rocket-container.log".to_string(),
            file_size_limit: 10 * 1024 * 1024,
            file_window: 20,
            file_base_index: 0,
            filter_file: None,
            refresh_interval: Duration::from_secs(60),
        }
    }
}

/// Keeps the file sink flushing; dropping it stops the background writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    filter: FilterHandle,
    directive: String,
}

impl LoggingGuard {
    pub fn filter_handle(&self) -> FilterHandle {
        self.filter.clone()
    }

    /// Filter directive installed at startup.
    pub fn directive(&self) -> &str {
        &self.directive
    }
}

/// Directive to start with: the filter file's when it has one, else the
/// configured level. The second value describes a filter file read failure.
fn initial_directive(config: &LogConfig) -> (String, Option<String>) {
    let Some(path) = &config.filter_file else {
        return (config.level.clone(), None);
    };

    match read_filter_directive(path) {
        Ok(Some(directive)) => (directive, None),
        Ok(None) => (config.level.clone(), None),
        Err(err) => (
            config.level.clone(),
            Some(format!("{}: {}", path.display(), err)),
        ),
    }
}

/// Install the global subscriber. Call once, at startup.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<LoggingGuard> {
    let (directive, read_failure) = initial_directive(config);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter {:?}", directive))?;
    let (filter, handle) = reload::Layer::new(filter);

    let roller = FixedWindowRoller::new(
        &config.directory,
        &config.file_name,
        config.file_base_index,
        config.file_window,
    );
    let file = RollingFileWriter::new(
        &config.directory,
        &config.file_name,
        config.file_size_limit,
        roller,
    )
    .with_context(|| format!("Failed to open log file in {}", config.directory.display()))?;
    let (file_writer, file_guard) = tracing_appender::non_blocking(file);

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(RequestIdLayer);

    match config.format {
        LogFormat::Pattern => registry
            .with(
                fmt::layer()
                    .event_format(PatternFormatter::new(true))
                    .with_writer(std::io::stdout),
            )
            .with(
                fmt::layer()
                    .event_format(PatternFormatter::new(false))
                    .with_writer(file_writer),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_thread_names(true)
                    .with_writer(std::io::stdout),
            )
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_thread_names(true)
                    .with_writer(file_writer),
            )
            .try_init()?,
    }

    if let Some(failure) = read_failure {
        tracing::warn!(
            error = %failure,
            level = %config.level,
            "Log filter file unreadable, using configured level"
        );
    }

    Ok(LoggingGuard {
        _file_guard: file_guard,
        filter: handle,
        directive,
    })
}

/// Re-read `path` every `interval` and apply its directive when it differs
/// from the one last installed, starting from `installed`.
pub fn spawn_filter_refresh(
    handle: FilterHandle,
    path: PathBuf,
    interval: Duration,
    installed: String,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval.max(Duration::from_secs(1)));
        let mut current = Some(installed);

        loop {
            ticker.tick().await;
            match refresh_filter(&handle, &path, &mut current) {
                Ok(true) => tracing::info!(path = %path.display(), "Log filter reloaded"),
                Ok(false) => {}
                Err(err) => tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Log filter refresh failed"
                ),
            }
        }
    })
}

/// Apply the directive in `path` if it differs from `current`.
///
/// Returns whether the active filter changed.
pub fn refresh_filter(
    handle: &FilterHandle,
    path: &Path,
    current: &mut Option<String>,
) -> anyhow::Result<bool> {
    let Some(directive) = read_filter_directive(path)? else {
        return Ok(false);
    };
    if current.as_deref() == Some(directive.as_str()) {
        return Ok(false);
    }

    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter {:?}", directive))?;
    handle.reload(filter)?;
    *current = Some(directive);
    Ok(true)
}

/// Filter directive from a file: non-empty, non-`#` lines joined with `,`.
fn read_filter_directive(path: &Path) -> std::io::Result<Option<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_filter_directive(&contents))
}

fn parse_filter_directive(contents: &str) -> Option<String> {
    let directive = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join(",");

    (!directive.is_empty()).then_some(directive)
}

/// Parse a byte quantity such as `10 MB`, `512kb`, `1 GiB` or `1048576`.
///
/// Units are binary (`1 KB` = 1024 bytes).
pub fn parse_byte_size(value: &str) -> Result<u64, String> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);

    let number: u64 = number
        .parse()
        .map_err(|_| format!("{:?} does not start with a number", value))?;

    let multiplier: u64 = match unit.trim().to_ascii_lowercase().as_str() {
        "" | "b" => 1,
        "k" | "kb" | "kib" => 1 << 10,
        "m" | "mb" | "mib" => 1 << 20,
        "g" | "gb" | "gib" => 1 << 30,
        "t" | "tb" | "tib" => 1 << 40,
        other => return Err(format!("unknown size unit {:?}", other)),
    };

    number
        .checked_mul(multiplier)
        .filter(|bytes| *bytes > 0)
        .ok_or_else(|| format!("{:?} is out of range", value))
}
