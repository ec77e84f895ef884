use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use medboard_logging::board_warn;
use reqwest::Url;

use crate::submit::{GatewayClient, Submitter};
use crate::subscription::{ChannelEventSink, Subscription};
use crate::types::{Channel, EngineEvent, Session, SubmitError, SubmitFailure, SubmitJob};

/// Resolved endpoint set plus client timeouts.
///
/// The generic activity feed goes through the gateway's relay; the response
/// and progress channels are read from the backend directly.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    log_url: Url,
    response_url: Url,
    process_progress_url: Url,
    research_progress_url: Url,
    login_url: Url,
    process_url: Url,
    query_url: Url,
}

impl EngineConfig {
    pub fn new(gateway_base: &Url, api_base: &Url) -> Result<Self, url::ParseError> {
        let mut response_url = join(api_base, "stream/")?;
        response_url.set_query(Some("channel=response_channel"));
        Ok(Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            log_url: join(gateway_base, "api/logging")?,
            response_url,
            process_progress_url: join(api_base, "progress_stream/")?,
            research_progress_url: join(api_base, "query_progress_stream/")?,
            login_url: join(gateway_base, "api/login")?,
            process_url: join(gateway_base, "api/process")?,
            query_url: join(gateway_base, "api/query")?,
        })
    }

    pub fn stream_url(&self, channel: Channel) -> &Url {
        match channel {
            Channel::Log => &self.log_url,
            Channel::Response => &self.response_url,
            Channel::ProcessProgress => &self.process_progress_url,
            Channel::ResearchProgress => &self.research_progress_url,
        }
    }

    pub(crate) fn login_url(&self) -> &Url {
        &self.login_url
    }

    pub(crate) fn process_url(&self) -> &Url {
        &self.process_url
    }

    pub(crate) fn query_url(&self) -> &Url {
        &self.query_url
    }
}

fn join(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let mut with_slash = base.path().to_string();
        with_slash.push('/');
        base.set_path(&with_slash);
    }
    base.join(path)
}

enum EngineCommand {
    Login { email: String, password: String },
    SubmitProcess { url: String },
    SubmitResearch { tld: String, questions: Vec<String> },
    OpenStream { channel: Channel },
    CloseStream { channel: Channel },
    Shutdown,
}

/// Command/event pump owning the IO runtime.
///
/// Commands go in from the app thread; events come back out through
/// `try_recv`. Cloneable so one clone can pump events while another issues
/// commands; receiving is serialized through a mutex.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, SubmitError> {
        let submitter: Arc<dyn Submitter> = Arc::new(GatewayClient::new(&config)?);
        // Streams are long-lived: a connect timeout only, never a request
        // deadline that would kill an idle subscription.
        let stream_client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|err| SubmitError::new(SubmitFailure::Network, err.to_string()))?;

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let _guard = runtime.enter();
            run_commands(&runtime, &config, submitter, stream_client, cmd_rx, event_tx);
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn login(&self, email: impl Into<String>, password: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Login {
            email: email.into(),
            password: password.into(),
        });
    }

    pub fn submit_process(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::SubmitProcess { url: url.into() });
    }

    pub fn submit_research(&self, tld: impl Into<String>, questions: Vec<String>) {
        let _ = self.cmd_tx.send(EngineCommand::SubmitResearch {
            tld: tld.into(),
            questions,
        });
    }

    pub fn open_stream(&self, channel: Channel) {
        let _ = self.cmd_tx.send(EngineCommand::OpenStream { channel });
    }

    pub fn close_stream(&self, channel: Channel) {
        let _ = self.cmd_tx.send(EngineCommand::CloseStream { channel });
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().expect("lock events").try_recv().ok()
    }
}

fn run_commands(
    runtime: &tokio::runtime::Runtime,
    config: &EngineConfig,
    submitter: Arc<dyn Submitter>,
    stream_client: reqwest::Client,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut streams: HashMap<Channel, Subscription> = HashMap::new();
    let session: Arc<Mutex<Option<Session>>> = Arc::new(Mutex::new(None));

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::Login { email, password } => {
                let submitter = submitter.clone();
                let event_tx = event_tx.clone();
                let session = session.clone();
                runtime.spawn(async move {
                    let result = submitter.login(&email, &password).await;
                    if let Ok(established) = &result {
                        *session.lock().expect("lock session") = Some(established.clone());
                    }
                    let _ = event_tx.send(EngineEvent::LoginCompleted { result });
                });
            }
            EngineCommand::SubmitProcess { url } => {
                let submitter = submitter.clone();
                let event_tx = event_tx.clone();
                let session = session.clone();
                runtime.spawn(async move {
                    let session = session.lock().expect("lock session").clone();
                    let result = submitter.submit_process(&url, session.as_ref()).await;
                    let _ = event_tx.send(EngineEvent::SubmitCompleted {
                        job: SubmitJob::Process,
                        result,
                    });
                });
            }
            EngineCommand::SubmitResearch { tld, questions } => {
                let submitter = submitter.clone();
                let event_tx = event_tx.clone();
                let session = session.clone();
                runtime.spawn(async move {
                    let session = session.lock().expect("lock session").clone();
                    let result = submitter
                        .submit_research(&tld, &questions, session.as_ref())
                        .await;
                    let _ = event_tx.send(EngineEvent::SubmitCompleted {
                        job: SubmitJob::Research,
                        result,
                    });
                });
            }
            EngineCommand::OpenStream { channel } => {
                if streams.contains_key(&channel) {
                    board_warn!("stream {channel:?} already open, ignoring");
                    continue;
                }
                let sink = Arc::new(ChannelEventSink::new(event_tx.clone()));
                let subscription = Subscription::open(
                    stream_client.clone(),
                    channel,
                    config.stream_url(channel).clone(),
                    sink,
                );
                streams.insert(channel, subscription);
            }
            EngineCommand::CloseStream { channel } => {
                if let Some(subscription) = streams.remove(&channel) {
                    subscription.stop();
                }
            }
            EngineCommand::Shutdown => break,
        }
    }

    for (_, subscription) in streams.drain() {
        subscription.stop();
    }
}
