//! Host configuration: built-in defaults, then an optional RON file, then flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use console_logging::{LogDestination, LogSettings};
use log::LevelFilter;
use scrape_console_client::{ClientError, ClientSettings, DEFAULT_BACKEND_URL};
use serde::Deserialize;
use thiserror::Error;

const SETTINGS_FILENAME: &str = "scrape_console.ron";

#[derive(Debug, Default, Parser)]
#[command(name = "scrape_console", about = "Terminal console for the scrape backend")]
pub struct CliArgs {
    /// Base URL of the scrape backend.
    #[arg(long)]
    pub backend: Option<String>,
    /// Settings file (RON). Defaults to ./scrape_console.ron when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub connect_timeout_secs: Option<u64>,
    /// Upper bound for a single request; unbounded unless set.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
    /// Log destination: terminal, file or both.
    #[arg(long)]
    pub log: Option<String>,
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
    /// Also write the rendered panels to this HTML file after every change.
    #[arg(long)]
    pub html_snapshot: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
struct FileSettings {
    backend: Option<String>,
    connect_timeout_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    log: Option<String>,
    log_file: Option<PathBuf>,
    verbose: bool,
    html_snapshot: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unknown log destination {0:?} (expected terminal, file or both)")]
    LogDestination(String),
    #[error("invalid backend url: {0}")]
    Backend(#[from] ClientError),
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub client: ClientSettings,
    pub log: LogSettings,
    pub html_snapshot: Option<PathBuf>,
    /// Settings file that contributed to this configuration, if any.
    pub source: Option<PathBuf>,
}

impl AppSettings {
    /// Prefix for download links shown to the user.
    pub fn link_base(&self) -> String {
        self.client.base_url.as_str().trim_end_matches('/').to_string()
    }
}

pub fn load(args: &CliArgs) -> Result<AppSettings, SettingsError> {
    let (file, source) = match &args.config {
        Some(path) => (read_file(path)?, Some(path.clone())),
        None => {
            let path = PathBuf::from(SETTINGS_FILENAME);
            if path.is_file() {
                (read_file(&path)?, Some(path))
            } else {
                (FileSettings::default(), None)
            }
        }
    };
    let mut settings = merge(file, args)?;
    settings.source = source;
    Ok(settings)
}

fn read_file(path: &Path) -> Result<FileSettings, SettingsError> {
    let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn merge(file: FileSettings, args: &CliArgs) -> Result<AppSettings, SettingsError> {
    let backend = args
        .backend
        .clone()
        .or(file.backend)
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
    let mut client = ClientSettings::parse(&backend)?;
    if let Some(secs) = args.connect_timeout_secs.or(file.connect_timeout_secs) {
        client.connect_timeout = Duration::from_secs(secs);
    }
    client.request_timeout = args
        .request_timeout_secs
        .or(file.request_timeout_secs)
        .map(Duration::from_secs);

    // The terminal carries the console itself, so logs go to a file unless asked otherwise.
    let destination = match args.log.as_deref().or(file.log.as_deref()) {
        Some(name) => LogDestination::parse(name)
            .ok_or_else(|| SettingsError::LogDestination(name.to_string()))?,
        None => LogDestination::File,
    };
    let mut log = LogSettings {
        destination,
        level: if args.verbose || file.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        ..LogSettings::default()
    };
    if let Some(path) = args.log_file.clone().or(file.log_file) {
        log.file = path;
    }

    Ok(AppSettings {
        client,
        log,
        html_snapshot: args.html_snapshot.clone().or(file.html_snapshot),
        source: None,
    })
}
