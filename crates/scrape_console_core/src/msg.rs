use crate::{
    DefaultsResponse, HistoryEntry, PathField, PickResponse, RequestFailed, RequestId, RunReply,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Console came up; load defaults and history like a fresh page load.
    Started,
    /// User edited one of the three path inputs.
    FieldEdited { field: PathField, value: String },
    /// User clicked "Load defaults".
    LoadDefaultsClicked,
    /// Backend answered `GET /defaults`.
    DefaultsLoaded {
        request: RequestId,
        result: Result<DefaultsResponse, RequestFailed>,
    },
    /// User clicked "Reset".
    ResetClicked,
    /// User asked for a picker dialog for one field.
    PickClicked(PathField),
    /// Backend answered one of the `GET /pick-*` endpoints.
    PathPicked {
        request: RequestId,
        field: PathField,
        result: Result<PickResponse, RequestFailed>,
    },
    /// User clicked "Refresh history".
    RefreshHistoryClicked,
    /// Backend answered `GET /history`. A non-array body arrives as an empty list.
    HistoryLoaded {
        request: RequestId,
        result: Result<Vec<HistoryEntry>, RequestFailed>,
    },
    /// User submitted the form.
    SubmitClicked,
    /// Backend answered `POST /run`.
    RunFinished {
        request: RequestId,
        result: Result<RunReply, RequestFailed>,
    },
}
