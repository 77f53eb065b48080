//! Logging system configuration and initialization
//!
//! Builds a `tracing` dispatcher with:
//! - Console output to stderr (stdout carries launcher feedback)
//! - Optional file output, plain or JSON, rotated daily and pruned to a
//!   fixed number of files at startup
//! - `RUST_LOG` override through `EnvFilter`
//! - KST (Korea Standard Time) timestamps
//!
//! Nothing is installed globally. The caller owns the returned
//! [`LoggingHandle`] and scopes its dispatcher to the work it runs.

use anyhow::{Context, Result};
use chrono::{FixedOffset, Utc};
use std::path::{Path, PathBuf};
use tracing::{Dispatch, debug, warn};
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
};

pub use crate::infrastructure::config::LoggingConfig;

const KST_OFFSET_SECONDS: i32 = 9 * 3600;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Custom time formatter for KST (Korea Standard Time, UTC+9)
struct KstTimeFormatter;

impl FormatTime for KstTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        let kst_offset = FixedOffset::east_opt(KST_OFFSET_SECONDS).ok_or(std::fmt::Error)?;
        let kst_time = Utc::now().with_timezone(&kst_offset);
        write!(w, "{}", kst_time.format("%Y-%m-%d %H:%M:%S%.3f %Z"))
    }
}

/// Logging capability handed to the code that should log
pub struct LoggingHandle {
    dispatch: Dispatch,
    log_dir: Option<PathBuf>,
    // Flushes the file writer on drop
    _guard: Option<WorkerGuard>,
}

impl LoggingHandle {
    /// A handle that discards everything
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
            log_dir: None,
            _guard: None,
        }
    }

    pub const fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Directory holding the log files, when file output is enabled
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }

    /// Run `f` with this handle as the active dispatcher
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    // Suppress HTTP client internals unless TRACE is requested
    if !config.level.to_lowercase().contains("trace") {
        for directive in ["reqwest=info", "hyper=warn", "hyper_util=warn", "html5ever=warn", "selectors=warn"] {
            filter = filter.add_directive(directive.parse()?);
        }
    }
    Ok(filter)
}

/// Log files written by this app in `log_dir`, newest first
///
/// Rotated file names embed the date, so name order is age order.
fn existing_log_files(log_dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(log_dir)? {
        let path = entry?.path();
        let is_ours = path.is_file()
            && path.file_name().and_then(|n| n.to_str()).is_some_and(|name| {
                name.starts_with(prefix) && name.ends_with(LOG_FILE_SUFFIX)
            });
        if is_ours {
            files.push(path);
        }
    }
    files.sort_unstable_by(|a, b| b.cmp(a));
    Ok(files)
}

/// Remove all but the newest `max_files` log files, returning how many went
fn cleanup_old_logs(log_dir: &Path, config: &LoggingConfig) -> Result<usize> {
    let log_files = existing_log_files(log_dir, &config.file_prefix)?;
    let mut removed = 0;

    for path in log_files.iter().skip(config.max_files.max(1)) {
        if let Err(e) = std::fs::remove_file(path) {
            warn!("Failed to remove old log file {}: {}", path.display(), e);
        } else {
            removed += 1;
        }
    }
    Ok(removed)
}

/// Build the dispatcher described by `config`
///
/// With neither console nor file output enabled the returned handle is
/// [`LoggingHandle::disabled`].
pub fn build_dispatch(config: &LoggingConfig) -> Result<LoggingHandle> {
    let env_filter = build_env_filter(config)?;
    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;
    let mut log_dir = None;
    let mut removed_logs = 0;

    if config.file_output {
        let dir = config.resolved_log_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

        // One process runs per keystroke, so the appender never sees a
        // rollover; pruning happens here instead
        let file_appender = Builder::new()
            .rotation(Rotation::DAILY)
            .filename_prefix(&config.file_prefix)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(config.max_files.max(1))
            .build(&dir)
            .with_context(|| format!("Failed to open log file in {}", dir.display()))?;
        removed_logs = cleanup_old_logs(&dir, config)?;

        let (file_writer, file_guard) = non_blocking(file_appender);
        guard = Some(file_guard);
        log_dir = Some(dir);

        let file_layer: BoxedLayer = if config.json_format {
            fmt::Layer::new()
                .json()
                .with_writer(file_writer)
                .with_timer(KstTimeFormatter)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .boxed()
        } else {
            fmt::Layer::new()
                .with_writer(file_writer)
                .with_timer(KstTimeFormatter)
                .with_target(false)
                .with_ansi(false)
                .boxed()
        };
        layers.push(file_layer);
    }

    if config.console_output {
        layers.push(
            fmt::Layer::new()
                .with_writer(std::io::stderr)
                .with_timer(KstTimeFormatter)
                .with_target(false)
                .boxed(),
        );
    }

    if layers.is_empty() {
        return Ok(LoggingHandle::disabled());
    }

    let subscriber = Registry::default().with(layers).with(env_filter);
    let handle = LoggingHandle {
        dispatch: Dispatch::new(subscriber),
        log_dir,
        _guard: guard,
    };

    if removed_logs > 0 {
        handle.scope(|| debug!("Removed {} old log files (keeping {})", removed_logs, config.max_files));
    }
    Ok(handle)
}
