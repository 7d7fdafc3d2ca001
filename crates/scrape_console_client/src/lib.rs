//! Scrape console client: backend HTTP calls and their background execution.
mod backend;
mod handle;
mod types;

pub use backend::{BackendClient, ClientSettings, ReqwestBackend, DEFAULT_BACKEND_URL};
pub use handle::{ChannelEventSink, ClientHandle, EventSink};
pub use types::{ClientError, ClientEvent, FailureKind};
