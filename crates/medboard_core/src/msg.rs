use crate::state::ChannelKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Operator edited the process form's URL input.
    ProcessUrlChanged(String),
    /// Operator submitted the process form.
    ProcessSubmitted,
    /// The process submission settled (gateway accepted or failed).
    ProcessSettled { outcome: SubmitOutcome },
    /// Operator edited the research form's URL input.
    ResearchUrlChanged(String),
    /// Operator edited the research form's raw questions input.
    ResearchQuestionsChanged(String),
    /// Operator submitted the research form.
    ResearchSubmitted,
    /// The research submission settled.
    ResearchSettled { outcome: SubmitOutcome },
    /// The startup login call settled.
    LoginSettled { outcome: SubmitOutcome },
    /// A message arrived on one of the event-stream subscriptions.
    StreamMessage { channel: ChannelKind, raw: String },
    /// An event-stream subscription closed (transport error or backend EOF).
    StreamClosed { channel: ChannelKind },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Result of a settled gateway call, as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted { ack: String },
    Failed { error: String },
}
