use std::fmt;

use crate::view_model::{AppViewModel, FormView, HistoryPanel, ResultPanel, StatusPill};

/// Token attached to every backend request. Responses are only applied when
/// they carry the latest token issued for their channel.
pub type RequestId = u64;

/// One of the three path inputs of the run form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathField {
    Input,
    Output,
    Invalid,
}

impl PathField {
    pub const ALL: [PathField; 3] = [PathField::Input, PathField::Output, PathField::Invalid];

    /// Backend endpoint that opens the picker dialog for this field, relative
    /// to the backend base URL.
    pub fn pick_endpoint(self) -> &'static str {
        match self {
            PathField::Input => "pick-input",
            PathField::Output => "pick-output",
            PathField::Invalid => "pick-invalid",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PathField::Input => "Input folder",
            PathField::Output => "Output CSV",
            PathField::Invalid => "Invalid links CSV",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "input" | "in" => Some(PathField::Input),
            "output" | "out" => Some(PathField::Output),
            "invalid" => Some(PathField::Invalid),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            PathField::Input => 0,
            PathField::Output => 1,
            PathField::Invalid => 2,
        }
    }
}

impl fmt::Display for PathField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathField::Input => "input",
            PathField::Output => "output",
            PathField::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

/// Request streams whose responses are sequenced independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Channel {
    Defaults,
    History,
    Pick(PathField),
    Run,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct InFlight {
    defaults: Option<RequestId>,
    history: Option<RequestId>,
    pick: [Option<RequestId>; 3],
    run: Option<RequestId>,
}

impl InFlight {
    fn slot(&mut self, channel: Channel) -> &mut Option<RequestId> {
        match channel {
            Channel::Defaults => &mut self.defaults,
            Channel::History => &mut self.history,
            Channel::Pick(field) => &mut self.pick[field.index()],
            Channel::Run => &mut self.run,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    fields: [String; 3],
    form_enabled: bool,
    status: StatusPill,
    result: ResultPanel,
    history: HistoryPanel,
    last_request: RequestId,
    in_flight: InFlight,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            fields: Default::default(),
            form_enabled: true,
            status: StatusPill::idle(),
            result: ResultPanel::NoRuns,
            history: HistoryPanel::Empty,
            last_request: 0,
            in_flight: InFlight::default(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let [input, output, invalid] = self.fields.clone();
        AppViewModel {
            status: self.status.clone(),
            form: FormView {
                input,
                output,
                invalid,
                enabled: self.form_enabled,
            },
            result: self.result.clone(),
            history: self.history.clone(),
        }
    }

    pub fn field(&self, field: PathField) -> &str {
        &self.fields[field.index()]
    }

    pub fn form_enabled(&self) -> bool {
        self.form_enabled
    }

    /// Whether any request is still waiting for the response `update` will apply.
    pub fn has_pending_requests(&self) -> bool {
        self.in_flight != InFlight::default()
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_field(&mut self, field: PathField, value: impl Into<String>) {
        let value = value.into();
        let slot = &mut self.fields[field.index()];
        if *slot != value {
            *slot = value;
            self.dirty = true;
        }
    }

    pub(crate) fn clear_fields(&mut self) {
        for field in PathField::ALL {
            self.set_field(field, String::new());
        }
    }

    pub(crate) fn set_form_enabled(&mut self, enabled: bool) {
        if self.form_enabled != enabled {
            self.form_enabled = enabled;
            self.dirty = true;
        }
    }

    pub(crate) fn set_status(&mut self, status: StatusPill) {
        if self.status != status {
            self.status = status;
            self.dirty = true;
        }
    }

    pub(crate) fn set_result(&mut self, result: ResultPanel) {
        if self.result != result {
            self.result = result;
            self.dirty = true;
        }
    }

    pub(crate) fn set_history(&mut self, history: HistoryPanel) {
        if self.history != history {
            self.history = history;
            self.dirty = true;
        }
    }

    /// Allocates a token for `channel`, superseding any request still in flight there.
    pub(crate) fn issue_request(&mut self, channel: Channel) -> RequestId {
        self.last_request += 1;
        let id = self.last_request;
        *self.in_flight.slot(channel) = Some(id);
        id
    }

    /// Accepts a response for `channel` if `id` is the latest token issued for it.
    /// An accepted token is retired so a duplicate delivery is ignored.
    pub(crate) fn accept_response(&mut self, channel: Channel, id: RequestId) -> bool {
        let slot = self.in_flight.slot(channel);
        if *slot == Some(id) {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn forget_request(&mut self, channel: Channel) {
        *self.in_flight.slot(channel) = None;
    }
}
