use std::io;
use std::sync::{mpsc, Arc};

use console_logging::{console_debug, console_info, console_warn};
use scrape_console_client::{ClientError, ClientEvent, ClientHandle, EventSink, ReqwestBackend};
use scrape_console_core::{Effect, Msg, RequestFailed};

use super::app::AppEvent;

/// Destination for the effects `update` returns.
pub trait EffectQueue {
    fn enqueue(&self, effects: Vec<Effect>);
}

/// Executes core effects against the backend and feeds the answers back as messages.
pub struct EffectRunner {
    client: ClientHandle,
}

impl EffectRunner {
    pub fn new(backend: ReqwestBackend, events: mpsc::Sender<AppEvent>) -> io::Result<Self> {
        let sink = Arc::new(MsgSink { events });
        let client = ClientHandle::new(Arc::new(backend), sink)?;
        Ok(Self { client })
    }
}

impl EffectQueue for EffectRunner {
    fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            console_debug!("Effect request={}: {:?}", effect.request_id(), effect);
            match effect {
                Effect::LoadDefaults { request } => self.client.load_defaults(request),
                Effect::LoadHistory { request } => self.client.load_history(request),
                Effect::PickPath { request, field } => self.client.pick(request, field),
                Effect::SubmitRun { request, body } => {
                    console_info!("Submitting run request={}", request);
                    self.client.run(request, body);
                }
            }
        }
    }
}

struct MsgSink {
    events: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.events.send(AppEvent::Ui(map_event(event)));
    }
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::Defaults { request, result } => Msg::DefaultsLoaded {
            request,
            result: result.map_err(|err| failed("defaults", request, err)),
        },
        ClientEvent::History { request, result } => Msg::HistoryLoaded {
            request,
            result: result.map_err(|err| failed("history", request, err)),
        },
        ClientEvent::Picked {
            request,
            field,
            result,
        } => Msg::PathPicked {
            request,
            field,
            result: result.map_err(|err| failed(field.pick_endpoint(), request, err)),
        },
        ClientEvent::RunCompleted { request, result } => {
            if let Ok(reply) = &result {
                console_info!(
                    "Run request={} finished http_ok={} ok={}",
                    request,
                    reply.http_ok,
                    reply.result.ok
                );
            }
            Msg::RunFinished {
                request,
                result: result.map_err(|err| failed("run", request, err)),
            }
        }
    }
}

fn failed(what: &str, request: u64, err: ClientError) -> RequestFailed {
    console_warn!("{} request={} failed: {}", what, request, err);
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrape_console_client::FailureKind;
    use scrape_console_core::{PathField, PickResponse};

    #[test]
    fn client_failures_become_request_failures() {
        let msg = map_event(ClientEvent::Defaults {
            request: 7,
            result: Err(ClientError {
                kind: FailureKind::Decode,
                message: "expected value".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Msg::DefaultsLoaded {
                request: 7,
                result: Err(RequestFailed::new("malformed response: expected value")),
            }
        );
    }

    #[test]
    fn picked_events_keep_their_field() {
        let msg = map_event(ClientEvent::Picked {
            request: 3,
            field: PathField::Invalid,
            result: Ok(PickResponse {
                ok: true,
                path: Some("/x.csv".to_string()),
            }),
        });
        assert!(matches!(
            msg,
            Msg::PathPicked {
                request: 3,
                field: PathField::Invalid,
                result: Ok(_),
            }
        ));
    }
}
