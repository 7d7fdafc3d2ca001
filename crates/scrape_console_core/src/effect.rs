use crate::{PathField, RequestId, RunRequest};

/// Backend work requested by `update`. Each request carries the token its
/// response must echo back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadDefaults { request: RequestId },
    LoadHistory { request: RequestId },
    PickPath { request: RequestId, field: PathField },
    SubmitRun { request: RequestId, body: RunRequest },
}

impl Effect {
    pub fn request_id(&self) -> RequestId {
        match self {
            Effect::LoadDefaults { request }
            | Effect::LoadHistory { request }
            | Effect::PickPath { request, .. }
            | Effect::SubmitRun { request, .. } => *request,
        }
    }
}
