use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use medboard_core::{ChannelKind, Effect, FormKind, Msg, SubmitOutcome};
use medboard_engine::{Ack, Channel, EngineEvent, EngineHandle, SubmitError, SubmitJob};
use medboard_logging::{board_info, board_warn};

/// Bridges the pure state machine and the IO engine: effects become engine
/// commands, engine events become messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn login(&self, email: impl Into<String>, password: impl Into<String>) {
        self.engine.login(email, password);
    }

    pub fn open_stream(&self, channel: Channel) {
        self.engine.open_stream(channel);
    }

    pub fn close_stream(&self, channel: Channel) {
        self.engine.close_stream(channel);
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitProcess { url } => {
                    board_info!("SubmitProcess url_len={}", url.len());
                    self.engine.submit_process(url);
                }
                Effect::SubmitResearch { tld, questions } => {
                    board_info!("SubmitResearch question_count={}", questions.len());
                    self.engine.submit_research(tld, questions);
                }
                Effect::OpenProgressStream { form } => {
                    self.engine.open_stream(progress_channel(form));
                }
                Effect::CloseProgressStream { form } => {
                    self.engine.close_stream(progress_channel(form));
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn progress_channel(form: FormKind) -> Channel {
    match form {
        FormKind::Process => Channel::ProcessProgress,
        FormKind::Research => Channel::ResearchProgress,
    }
}

fn map_channel(channel: Channel) -> ChannelKind {
    match channel {
        Channel::Log => ChannelKind::Log,
        Channel::Response => ChannelKind::Response,
        Channel::ProcessProgress => ChannelKind::ProcessProgress,
        Channel::ResearchProgress => ChannelKind::ResearchProgress,
    }
}

fn map_submit_result(result: Result<Ack, SubmitError>) -> SubmitOutcome {
    match result {
        Ok(ack) => SubmitOutcome::Accepted { ack: ack.message },
        Err(err) => SubmitOutcome::Failed {
            error: err.to_string(),
        },
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Stream { channel, data } => Msg::StreamMessage {
            channel: map_channel(channel),
            raw: data,
        },
        EngineEvent::StreamClosed { channel, error } => {
            if let Some(error) = error {
                board_warn!("stream {channel:?} failed: {error}");
            }
            Msg::StreamClosed {
                channel: map_channel(channel),
            }
        }
        EngineEvent::LoginCompleted { result } => Msg::LoginSettled {
            outcome: match result {
                Ok(_) => SubmitOutcome::Accepted {
                    ack: "authenticated".to_string(),
                },
                Err(err) => SubmitOutcome::Failed {
                    error: err.to_string(),
                },
            },
        },
        EngineEvent::SubmitCompleted { job, result } => {
            let outcome = map_submit_result(result);
            match job {
                SubmitJob::Process => Msg::ProcessSettled { outcome },
                SubmitJob::Research => Msg::ResearchSettled { outcome },
            }
        }
    }
}
