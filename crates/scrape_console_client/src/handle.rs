use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use console_logging::console_debug;
use scrape_console_core::{PathField, RequestId, RunRequest};

use crate::{BackendClient, ClientEvent};

/// Receives completed requests, on a runtime worker thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

enum ClientCommand {
    Defaults { request: RequestId },
    History { request: RequestId },
    Pick { request: RequestId, field: PathField },
    Run { request: RequestId, body: RunRequest },
}

/// Runs backend requests concurrently on a private tokio runtime.
///
/// Requests are fire-and-forget: every command produces exactly one
/// [`ClientEvent`] on the sink. Dropping the handle stops the runtime and
/// abandons requests still in flight.
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    pub fn new(backend: Arc<dyn BackendClient>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>();
        let (ready_tx, ready_rx) = mpsc::channel::<io::Result<()>>();

        thread::Builder::new()
            .name("scrape-console-client".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Runtime::new() {
                    Ok(runtime) => {
                        let _ = ready_tx.send(Ok(()));
                        runtime
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };
                while let Ok(command) = cmd_rx.recv() {
                    let backend = backend.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        let event = handle_command(backend.as_ref(), command).await;
                        sink.emit(event);
                    });
                }
                console_debug!("client command channel closed");
            })?;

        ready_rx
            .recv()
            .map_err(|_| io::Error::other("client thread exited during startup"))??;
        Ok(Self { cmd_tx })
    }

    pub fn load_defaults(&self, request: RequestId) {
        self.send(ClientCommand::Defaults { request });
    }

    pub fn load_history(&self, request: RequestId) {
        self.send(ClientCommand::History { request });
    }

    pub fn pick(&self, request: RequestId, field: PathField) {
        self.send(ClientCommand::Pick { request, field });
    }

    pub fn run(&self, request: RequestId, body: RunRequest) {
        self.send(ClientCommand::Run { request, body });
    }

    fn send(&self, command: ClientCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(backend: &dyn BackendClient, command: ClientCommand) -> ClientEvent {
    match command {
        ClientCommand::Defaults { request } => ClientEvent::Defaults {
            request,
            result: backend.defaults().await,
        },
        ClientCommand::History { request } => ClientEvent::History {
            request,
            result: backend.history().await,
        },
        ClientCommand::Pick { request, field } => ClientEvent::Picked {
            request,
            field,
            result: backend.pick(field).await,
        },
        ClientCommand::Run { request, body } => ClientEvent::RunCompleted {
            request,
            result: backend.run(&body).await,
        },
    }
}
