//! Scrape console core: pure controller state machine, view-model and HTML fragments.
mod effect;
pub mod html;
mod msg;
mod state;
mod update;
mod view_model;
mod wire;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, PathField, RequestId};
pub use update::update;
pub use view_model::{
    AppViewModel, FormView, HistoryPanel, HistoryRowView, ResultPanel, StatusPill, StatusTone,
    DEFAULTS_UNAVAILABLE_TEXT, DIALOG_UNAVAILABLE_TEXT, DOWNLOAD_INVALID_LABEL,
    DOWNLOAD_OUTPUT_LABEL, HISTORY_UNAVAILABLE_TEXT, NETWORK_ERROR_TEXT, NO_HISTORY_TEXT,
    NO_RUNS_TEXT, RUNNING_TEXT, RUN_COMPLETED_TEXT, STATUS_COMPLETE, STATUS_FAILED, STATUS_IDLE,
    STATUS_RUNNING, UNKNOWN_ERROR_TEXT, UNKNOWN_STATUS,
};
pub use wire::{
    DefaultsResponse, HistoryEntry, PickResponse, RequestFailed, RunReply, RunRequest, RunResult,
};
