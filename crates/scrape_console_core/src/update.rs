use crate::state::Channel;
use crate::view_model::{
    HistoryRowView, StatusTone, STATUS_COMPLETE, STATUS_FAILED, STATUS_RUNNING,
    UNKNOWN_ERROR_TEXT, UNKNOWN_STATUS,
};
use crate::{
    AppState, DefaultsResponse, Effect, HistoryEntry, HistoryPanel, Msg, PathField, ResultPanel,
    RunReply, RunRequest, StatusPill,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            let defaults = state.issue_request(Channel::Defaults);
            let history = state.issue_request(Channel::History);
            vec![
                Effect::LoadDefaults { request: defaults },
                Effect::LoadHistory { request: history },
            ]
        }
        Msg::FieldEdited { field, value } => {
            if state.form_enabled() {
                state.set_field(field, value);
            }
            Vec::new()
        }
        Msg::LoadDefaultsClicked => {
            if !state.form_enabled() {
                return (state, Vec::new());
            }
            let request = state.issue_request(Channel::Defaults);
            vec![Effect::LoadDefaults { request }]
        }
        Msg::DefaultsLoaded { request, result } => {
            if state.accept_response(Channel::Defaults, request) {
                match result {
                    Ok(defaults) => apply_defaults(&mut state, defaults),
                    Err(_) => state.set_result(ResultPanel::DefaultsUnavailable),
                }
            }
            Vec::new()
        }
        Msg::ResetClicked => {
            if state.form_enabled() {
                state.clear_fields();
                state.set_result(ResultPanel::NoRuns);
                state.set_status(StatusPill::idle());
                // Answers to earlier loads must not refill a cleared form.
                state.forget_request(Channel::Defaults);
                for field in PathField::ALL {
                    state.forget_request(Channel::Pick(field));
                }
            }
            Vec::new()
        }
        Msg::PickClicked(field) => {
            if !state.form_enabled() {
                return (state, Vec::new());
            }
            let request = state.issue_request(Channel::Pick(field));
            vec![Effect::PickPath { request, field }]
        }
        Msg::PathPicked {
            request,
            field,
            result,
        } => {
            if state.accept_response(Channel::Pick(field), request) {
                match result {
                    Ok(picked) => {
                        if let Some(path) = picked.chosen_path() {
                            state.set_field(field, path);
                        }
                    }
                    Err(_) => state.set_result(ResultPanel::DialogUnavailable),
                }
            }
            Vec::new()
        }
        Msg::RefreshHistoryClicked => {
            let request = state.issue_request(Channel::History);
            vec![Effect::LoadHistory { request }]
        }
        Msg::HistoryLoaded { request, result } => {
            if state.accept_response(Channel::History, request) {
                let panel = match result {
                    Ok(entries) if entries.is_empty() => HistoryPanel::Empty,
                    Ok(entries) => {
                        HistoryPanel::Entries(entries.into_iter().map(history_row).collect())
                    }
                    Err(_) => HistoryPanel::Unavailable,
                };
                state.set_history(panel);
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            if !state.form_enabled() {
                return (state, Vec::new());
            }
            state.set_status(StatusPill::new(STATUS_RUNNING, Some(StatusTone::Working)));
            state.set_form_enabled(false);
            state.set_result(ResultPanel::Running);
            let body = RunRequest::trimmed(
                state.field(PathField::Input),
                state.field(PathField::Output),
                state.field(PathField::Invalid),
            );
            let request = state.issue_request(Channel::Run);
            vec![Effect::SubmitRun { request, body }]
        }
        Msg::RunFinished { request, result } => {
            if !state.accept_response(Channel::Run, request) {
                return (state, Vec::new());
            }
            let effects = match result {
                Ok(reply) if reply.succeeded() => {
                    state.set_status(StatusPill::new(STATUS_COMPLETE, Some(StatusTone::Success)));
                    state.set_result(completed_panel(reply));
                    let request = state.issue_request(Channel::History);
                    vec![Effect::LoadHistory { request }]
                }
                Ok(reply) => {
                    state.set_status(StatusPill::new(STATUS_FAILED, Some(StatusTone::Error)));
                    state.set_result(failed_panel(reply));
                    Vec::new()
                }
                Err(_) => {
                    state.set_status(StatusPill::new(STATUS_FAILED, Some(StatusTone::Error)));
                    state.set_result(ResultPanel::NetworkError);
                    Vec::new()
                }
            };
            state.set_form_enabled(true);
            effects
        }
    };

    (state, effects)
}

fn apply_defaults(state: &mut AppState, defaults: DefaultsResponse) {
    state.set_field(PathField::Input, defaults.input.unwrap_or_default());
    state.set_field(PathField::Output, defaults.output.unwrap_or_default());
    state.set_field(PathField::Invalid, defaults.invalid.unwrap_or_default());
}

fn history_row(entry: HistoryEntry) -> HistoryRowView {
    HistoryRowView {
        timestamp: entry.timestamp,
        status: non_empty(entry.status).unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        input: entry.input,
        output: entry.output,
        invalid: entry.invalid,
    }
}

fn completed_panel(reply: RunReply) -> ResultPanel {
    ResultPanel::Completed {
        output: reply.result.output.unwrap_or_default(),
        invalid: reply.result.invalid.unwrap_or_default(),
    }
}

fn failed_panel(reply: RunReply) -> ResultPanel {
    ResultPanel::RunFailed {
        message: non_empty(reply.result.error).unwrap_or_else(|| UNKNOWN_ERROR_TEXT.to_string()),
        stderr: non_empty(reply.result.stderr),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
