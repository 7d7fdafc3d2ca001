use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use console_logging::{console_error, console_info, LogSettings};
use scrape_console_client::ReqwestBackend;
use scrape_console_core::{update, AppState, AppViewModel, Msg};

use super::effects::{EffectQueue, EffectRunner};
use super::settings::{self, CliArgs};
use super::ui;
use super::ui::commands::Command;

/// Everything the event loop reacts to: user commands and backend answers.
pub enum AppEvent {
    Ui(Msg),
    Show,
    Help,
    Invalid(String),
    Quit,
    /// Stdin reached EOF; the loop ends once outstanding requests are answered.
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let settings = settings::load(&args)?;
    if !console_logging::initialize(&settings.log) {
        eprintln!("{}", logging_disabled_notice(&settings.log));
    }
    if let Some(source) = &settings.source {
        console_info!("Loaded settings from {:?}", source);
    }
    console_info!("Backend at {}", settings.client.base_url);

    let link_base = settings.link_base();
    let backend = ReqwestBackend::new(settings.client.clone())?;
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner =
        EffectRunner::new(backend, event_tx.clone()).context("starting the backend client")?;

    spawn_input_reader(event_tx);

    let mut handler =
        AppEventHandler::new(runner, io::stdout(), link_base, settings.html_snapshot);
    handler.start();

    while let Ok(event) = event_rx.recv() {
        if handler.handle(event).is_break() {
            break;
        }
    }

    console_info!("Console closed");
    Ok(())
}

fn logging_disabled_notice(log: &LogSettings) -> String {
    format!(
        "Warning: logging is disabled because {:?} could not be opened; \
         use --log-file to pick another file or --log terminal",
        log.file
    )
}

/// Reads commands from stdin until EOF.
fn spawn_input_reader(events: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    console_error!("Failed to read input: {}", err);
                    break;
                }
            };
            let event = match ui::commands::parse(&line) {
                Ok(Some(Command::Ui(msg))) => AppEvent::Ui(msg),
                Ok(Some(Command::Show)) => AppEvent::Show,
                Ok(Some(Command::Help)) => AppEvent::Help,
                Ok(Some(Command::Quit)) => AppEvent::Quit,
                Ok(None) => continue,
                Err(err) => AppEvent::Invalid(err.to_string()),
            };
            if events.send(event).is_err() {
                return;
            }
        }
        let _ = events.send(AppEvent::InputClosed);
    });
}

struct AppEventHandler<Q, W> {
    state: AppState,
    runner: Q,
    out: W,
    link_base: String,
    html_snapshot: Option<PathBuf>,
    input_closed: bool,
}

impl<Q: EffectQueue, W: Write> AppEventHandler<Q, W> {
    fn new(runner: Q, out: W, link_base: String, html_snapshot: Option<PathBuf>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            out,
            link_base,
            html_snapshot,
            input_closed: false,
        }
    }

    /// Prints the help and the initial view, then loads defaults and history.
    fn start(&mut self) {
        self.print(ui::commands::HELP);
        if !self.dispatch_msg(Msg::Started) {
            self.present();
        }
    }

    fn handle(&mut self, event: AppEvent) -> ControlFlow<()> {
        match event {
            AppEvent::Ui(msg) => {
                self.dispatch_msg(msg);
            }
            AppEvent::Show => self.present(),
            AppEvent::Help => self.print(ui::commands::HELP),
            AppEvent::Invalid(reason) => self.print(&reason),
            AppEvent::Quit => return ControlFlow::Break(()),
            AppEvent::InputClosed => {
                console_info!("Input closed");
                self.input_closed = true;
            }
        }
        if self.input_closed && !self.state.has_pending_requests() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Applies `msg` and presents the view if it changed. Returns whether it was presented.
    fn dispatch_msg(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;

        self.runner.enqueue(effects);
        if was_dirty {
            self.present();
        }
        was_dirty
    }

    fn present(&mut self) {
        let view = self.state.view();
        let text = ui::render::render(&view, &self.link_base);
        self.print(&text);
        self.write_snapshot(&view);
    }

    fn print(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            console_error!("Failed to write to the console: {}", err);
        }
    }

    fn write_snapshot(&self, view: &AppViewModel) {
        let Some(path) = &self.html_snapshot else {
            return;
        };
        let page = ui::snapshot::render_page(view, &self.link_base);
        if let Err(err) = ui::snapshot::write_atomically(path, &page) {
            console_error!("Failed to write HTML snapshot {:?}: {}", path, err);
        }
    }
}
