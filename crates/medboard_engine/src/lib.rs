//! Medboard engine: IO pipeline and effect execution.
mod engine;
mod sse;
mod submit;
mod subscription;
mod types;

pub use engine::{EngineConfig, EngineHandle};
pub use sse::SseDecoder;
pub use submit::{GatewayClient, Submitter};
pub use subscription::{ChannelEventSink, EventSink, Subscription};
pub use types::{
    Ack, Channel, EngineEvent, Session, StreamError, StreamFailure, SubmitError, SubmitFailure,
    SubmitJob,
};
