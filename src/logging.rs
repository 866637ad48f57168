//! Tracing setup for the command line tool.
//!
//! Output goes to the console, to a rolling file managed by
//! `tracing-appender`, or to both. Old files are pruned at startup.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RotationPeriod {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl std::str::FromStr for RotationPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minutely" | "minute" => Ok(RotationPeriod::Minutely),
            "hourly" | "hour" => Ok(RotationPeriod::Hourly),
            "daily" | "day" => Ok(RotationPeriod::Daily),
            "never" | "none" => Ok(RotationPeriod::Never),
            _ => Err(format!(
                "Invalid rotation period '{}'. Valid options: minutely, hourly, daily, never",
                s
            )),
        }
    }
}

impl From<RotationPeriod> for Rotation {
    fn from(period: RotationPeriod) -> Self {
        match period {
            RotationPeriod::Minutely => Rotation::MINUTELY,
            RotationPeriod::Hourly => Rotation::HOURLY,
            RotationPeriod::Daily => Rotation::DAILY,
            RotationPeriod::Never => Rotation::NEVER,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_prefix: String,
    pub rotation: RotationPeriod,
    /// Files kept in `log_dir`; 0 keeps everything.
    pub max_log_files: usize,
    /// Also print to stdout while writing files.
    pub console: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("."),
            log_prefix: "aprilaire".to_string(),
            rotation: RotationPeriod::Daily,
            max_log_files: 7,
            console: false,
        }
    }
}

/// Keep alive until exit, dropping it flushes buffered file output.
pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn setup_console_logging() -> LogGuard {
    tracing_subscriber::fmt().with_env_filter(env_filter()).init();

    LogGuard { _guard: None }
}

fn file_writer(config: &LogConfig) -> std::io::Result<(NonBlocking, WorkerGuard)> {
    if config.max_log_files > 0 {
        cleanup_old_logs(&config.log_dir, &config.log_prefix, config.max_log_files)?;
    }

    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.into())
        .filename_prefix(&config.log_prefix)
        .filename_suffix("log")
        .max_log_files(config.max_log_files)
        .build(&config.log_dir)
        .map_err(std::io::Error::other)?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Logs to rolling files under `config.log_dir`, and to stdout as well when
/// `config.console` is set.
pub fn setup_file_logging(config: &LogConfig) -> std::io::Result<LogGuard> {
    let (writer, guard) = file_writer(config)?;

    let file_layer = Layer::default()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let console_layer = config.console.then(|| {
        Layer::default()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
    });

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .with(console_layer)
        .init();

    Ok(LogGuard {
        _guard: Some(guard),
    })
}

/// Removes the oldest `<prefix>*.log` files beyond `max_files`.
fn cleanup_old_logs(log_dir: &Path, prefix: &str, max_files: usize) -> std::io::Result<()> {
    if !log_dir.exists() {
        return Ok(());
    }

    let mut log_files: Vec<_> = std::fs::read_dir(log_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(prefix) && name.ends_with(".log"))
        })
        .filter_map(|entry| {
            let modified = entry.metadata().and_then(|m| m.modified()).ok()?;
            Some((entry.path(), modified))
        })
        .collect();

    log_files.sort_by(|a, b| b.1.cmp(&a.1));

    for (path, _) in log_files.into_iter().skip(max_files) {
        if let Err(e) = std::fs::remove_file(&path) {
            eprintln!("Warning: failed to remove old log file {:?}: {}", path, e);
        }
    }

    Ok(())
}
