use std::sync::Arc;

use futures_util::StreamExt;
use medboard_logging::board_info;
use tokio_util::sync::CancellationToken;

use crate::sse::SseDecoder;
use crate::types::{Channel, EngineEvent, StreamError, StreamFailure};

/// Callback surface for everything the engine reports back to its owner.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Sink that forwards events into an mpsc channel.
pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Cancellable handle for one live event-stream subscription.
///
/// `open` spawns the reader task on the current tokio runtime; `stop` is the
/// only cancellation trigger. Once the reader observes cancellation it emits
/// nothing further, so a stopped subscription never appends to the dashboard.
pub struct Subscription {
    channel: Channel,
    cancel: CancellationToken,
}

impl Subscription {
    pub fn open(
        client: reqwest::Client,
        channel: Channel,
        url: reqwest::Url,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        board_info!("opening stream {channel:?} at {url}");
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        tokio::spawn(async move {
            run_stream(client, channel, url, sink, token).await;
        });
        Self { channel, cancel }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn stop(&self) {
        board_info!("stopping stream {:?}", self.channel);
        self.cancel.cancel();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_stream(
    client: reqwest::Client,
    channel: Channel,
    url: reqwest::Url,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
) {
    let response = tokio::select! {
        biased;
        _ = cancel.cancelled() => return,
        response = client.get(url).send() => response,
    };

    let response = match response {
        Ok(response) => response,
        Err(err) => {
            sink.emit(EngineEvent::StreamClosed {
                channel,
                error: Some(map_stream_error(err)),
            });
            return;
        }
    };

    let status = response.status();
    if !status.is_success() {
        sink.emit(EngineEvent::StreamClosed {
            channel,
            error: Some(StreamError::new(
                StreamFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            )),
        });
        return;
    }

    let mut decoder = SseDecoder::new();
    let mut stream = response.bytes_stream();
    loop {
        // Biased so that a stop racing an arriving chunk always wins.
        let chunk = tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            chunk = stream.next() => chunk,
        };
        match chunk {
            Some(Ok(chunk)) => {
                for data in decoder.feed(&chunk) {
                    sink.emit(EngineEvent::Stream { channel, data });
                }
            }
            Some(Err(err)) => {
                sink.emit(EngineEvent::StreamClosed {
                    channel,
                    error: Some(map_stream_error(err)),
                });
                return;
            }
            None => {
                // Backend closed the stream; the dashboard does not retry.
                sink.emit(EngineEvent::StreamClosed {
                    channel,
                    error: None,
                });
                return;
            }
        }
    }
}

fn map_stream_error(err: reqwest::Error) -> StreamError {
    if err.is_timeout() {
        return StreamError::new(StreamFailure::Timeout, err.to_string());
    }
    StreamError::new(StreamFailure::Network, err.to_string())
}
