use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use medboard_core::{update, AppState, Msg};
use medboard_engine::{Channel, EngineConfig, EngineHandle};
use url::Url;

use super::effects::EffectRunner;
use super::input::{self, InputEvent};
use super::logging::{self, LogDestination};
use super::render::Renderer;

struct AppSettings {
    gateway_base: Url,
    api_base: Url,
    operator: Option<(String, String)>,
}

impl AppSettings {
    fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let api_base = std::env::var("MEDBOARD_API_URL")
            .map_err(|_| "MEDBOARD_API_URL must be set to the backend base URL")?;
        let gateway_base = std::env::var("MEDBOARD_GATEWAY_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
        let operator = match (
            std::env::var("MEDBOARD_OPERATOR_EMAIL").ok(),
            std::env::var("MEDBOARD_OPERATOR_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => Some((email, password)),
            (None, None) => None,
            _ => return Err("operator email and password must be set together".into()),
        };
        Ok(Self {
            gateway_base: Url::parse(&gateway_base)?,
            api_base: Url::parse(&api_base)?,
            operator,
        })
    }
}

pub fn run_app() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::initialize(LogDestination::File);

    let settings = AppSettings::from_env()?;
    let config = EngineConfig::new(&settings.gateway_base, &settings.api_base)?;
    let engine = EngineHandle::new(config)?;

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine, msg_tx.clone());

    // Explicit operator session, established before any submission.
    if let Some((email, password)) = &settings.operator {
        runner.login(email.clone(), password.clone());
    }

    // Mount: the two standing feeds. Progress streams are opened per
    // submission by the state machine's effects.
    runner.open_stream(Channel::Log);
    runner.open_stream(Channel::Response);

    let line_rx = spawn_stdin_reader();
    spawn_tick(msg_tx);

    let mut state = AppState::new();
    let mut renderer = Renderer::new();
    renderer.banner();

    'main: loop {
        let mut worked = false;

        while let Ok(msg) = msg_rx.try_recv() {
            worked = true;
            state = dispatch(state, msg, &runner, &mut renderer);
        }

        loop {
            match line_rx.try_recv() {
                Ok(line) => {
                    worked = true;
                    match input::parse_line(&line) {
                        InputEvent::Quit => break 'main,
                        InputEvent::Help => renderer.banner(),
                        InputEvent::Unknown(text) => {
                            println!("unknown command: {text} (try `help`)");
                        }
                        InputEvent::Dispatch(msgs) => {
                            for msg in msgs {
                                state = dispatch(state, msg, &runner, &mut renderer);
                            }
                        }
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                // Stdin closed: treat like `quit`.
                Err(mpsc::TryRecvError::Disconnected) => break 'main,
            }
        }

        if !worked {
            thread::sleep(Duration::from_millis(20));
        }
    }

    // Unmount: close both standing subscriptions deterministically, then
    // stop the engine.
    runner.close_stream(Channel::Log);
    runner.close_stream(Channel::Response);
    runner.shutdown();
    Ok(())
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner, renderer: &mut Renderer) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);
    if state.consume_dirty() {
        renderer.render(&state.view());
    }
    state
}

fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    if line_tx.send(line.clone()).is_err() {
                        break;
                    }
                }
            }
        }
    });
    line_rx
}

// Background tick to coalesce rendering and keep the loop responsive.
fn spawn_tick(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let interval = Duration::from_millis(75);
        while msg_tx.send(Msg::Tick).is_ok() {
            thread::sleep(interval);
        }
    });
}
