//! Medboard core: pure dashboard state machine and view-model helpers.
mod effect;
mod msg;
mod parse;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{Msg, SubmitOutcome};
pub use parse::{parse_progress, parse_stream_message, split_questions, ParsedMessage};
pub use state::{
    AppState, ChannelKind, EntryKind, FormKind, LogEntry, Notice, NoticeKind, ResponseEntry,
};
pub use update::update;
pub use view_model::{AppViewModel, FormView, LogRowView};
