use crate::PathField;

pub const STATUS_IDLE: &str = "Idle";
pub const STATUS_RUNNING: &str = "Running...";
pub const STATUS_COMPLETE: &str = "Complete";
pub const STATUS_FAILED: &str = "Failed";

pub const NO_RUNS_TEXT: &str = "No runs yet.";
pub const RUNNING_TEXT: &str = "Scraper is running. Please wait.";
pub const DEFAULTS_UNAVAILABLE_TEXT: &str = "Could not load defaults.";
pub const DIALOG_UNAVAILABLE_TEXT: &str = "Could not open dialog.";
pub const RUN_COMPLETED_TEXT: &str = "Scrape completed successfully.";
pub const NETWORK_ERROR_TEXT: &str = "Run failed: network error.";
pub const UNKNOWN_ERROR_TEXT: &str = "Unknown error.";
pub const NO_HISTORY_TEXT: &str = "No history yet.";
pub const HISTORY_UNAVAILABLE_TEXT: &str = "Could not load history.";
pub const UNKNOWN_STATUS: &str = "unknown";

pub const DOWNLOAD_OUTPUT_LABEL: &str = "Download Output";
pub const DOWNLOAD_INVALID_LABEL: &str = "Download Invalid";

/// Visual state of the status pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Working,
    Success,
    Error,
}

impl StatusTone {
    /// CSS class carried by the pill in the HTML rendering.
    pub fn css_class(self) -> &'static str {
        match self {
            StatusTone::Working => "working",
            StatusTone::Success => "success",
            StatusTone::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPill {
    pub text: String,
    pub tone: Option<StatusTone>,
}

impl StatusPill {
    pub fn idle() -> Self {
        Self::new(STATUS_IDLE, None)
    }

    pub fn new(text: impl Into<String>, tone: Option<StatusTone>) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

impl Default for StatusPill {
    fn default() -> Self {
        Self::idle()
    }
}

/// Content of the result panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultPanel {
    #[default]
    NoRuns,
    Running,
    DefaultsUnavailable,
    DialogUnavailable,
    /// Backend reported a failure. `stderr` is shown below the message when present.
    RunFailed {
        message: String,
        stderr: Option<String>,
    },
    NetworkError,
    Completed {
        output: String,
        invalid: String,
    },
}

impl ResultPanel {
    /// First line of the panel as plain text.
    pub fn headline(&self) -> String {
        match self {
            ResultPanel::NoRuns => NO_RUNS_TEXT.to_string(),
            ResultPanel::Running => RUNNING_TEXT.to_string(),
            ResultPanel::DefaultsUnavailable => DEFAULTS_UNAVAILABLE_TEXT.to_string(),
            ResultPanel::DialogUnavailable => DIALOG_UNAVAILABLE_TEXT.to_string(),
            ResultPanel::RunFailed { message, .. } => format!("Run failed: {message}"),
            ResultPanel::NetworkError => NETWORK_ERROR_TEXT.to_string(),
            ResultPanel::Completed { .. } => RUN_COMPLETED_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub timestamp: String,
    pub status: String,
    pub input: String,
    pub output: String,
    pub invalid: String,
}

/// Content of the history panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HistoryPanel {
    #[default]
    Empty,
    Unavailable,
    Entries(Vec<HistoryRowView>),
}

impl HistoryPanel {
    pub fn entry_count(&self) -> usize {
        match self {
            HistoryPanel::Entries(rows) => rows.len(),
            HistoryPanel::Empty | HistoryPanel::Unavailable => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormView {
    pub input: String,
    pub output: String,
    pub invalid: String,
    pub enabled: bool,
}

impl FormView {
    pub fn value(&self, field: PathField) -> &str {
        match field {
            PathField::Input => &self.input,
            PathField::Output => &self.output,
            PathField::Invalid => &self.invalid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub status: StatusPill,
    pub form: FormView,
    pub result: ResultPanel,
    pub history: HistoryPanel,
}
