use medboard_logging::{board_debug, board_warn};
use url::Url;

use crate::parse::{parse_progress, parse_stream_message, ParsedMessage};
use crate::state::{ChannelKind, EntryKind, FormKind, Notice};
use crate::{split_questions, AppState, Effect, Msg, SubmitOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ProcessUrlChanged(input) => {
            state.set_process_url(input);
            Vec::new()
        }
        Msg::ResearchUrlChanged(input) => {
            state.set_research_url(input);
            Vec::new()
        }
        Msg::ResearchQuestionsChanged(input) => {
            state.set_research_questions(input);
            Vec::new()
        }
        Msg::ProcessSubmitted => {
            if state.is_loading(FormKind::Process) {
                return (state, Vec::new());
            }
            let url = match validate_url(state.process_url()) {
                Ok(url) => url,
                Err(message) => {
                    state.set_validation_error(FormKind::Process, message);
                    return (state, Vec::new());
                }
            };
            state.begin_submission(FormKind::Process);
            state.append_log(EntryKind::Request, format!("Processing website: {url}"));
            vec![
                Effect::SubmitProcess { url },
                Effect::OpenProgressStream {
                    form: FormKind::Process,
                },
            ]
        }
        Msg::ResearchSubmitted => {
            if state.is_loading(FormKind::Research) {
                return (state, Vec::new());
            }
            let tld = match validate_url(state.research_url()) {
                Ok(url) => url,
                Err(message) => {
                    state.set_validation_error(FormKind::Research, message);
                    return (state, Vec::new());
                }
            };
            let questions = split_questions(state.research_questions());
            state.begin_submission(FormKind::Research);
            state.append_log(EntryKind::Request, format!("Researching website: {tld}"));
            vec![
                Effect::SubmitResearch { tld, questions },
                Effect::OpenProgressStream {
                    form: FormKind::Research,
                },
            ]
        }
        Msg::ProcessSettled { outcome } => {
            state.settle_submission(FormKind::Process);
            match outcome {
                SubmitOutcome::Accepted { ack } => {
                    state.append_log(EntryKind::Response, format!("Processing initiated: {ack}"));
                    state.set_notice(Notice::info(
                        "Processing initiated",
                        "The website is being processed.",
                    ));
                }
                SubmitOutcome::Failed { error } => {
                    board_warn!("process submission failed: {error}");
                    state.set_notice(Notice::error(
                        "Error",
                        "There was an error processing the website.",
                    ));
                }
            }
            vec![Effect::CloseProgressStream {
                form: FormKind::Process,
            }]
        }
        Msg::ResearchSettled { outcome } => {
            state.settle_submission(FormKind::Research);
            match outcome {
                SubmitOutcome::Accepted { ack } => {
                    state.append_log(EntryKind::Response, format!("Query submitted: {ack}"));
                    state.set_notice(Notice::info(
                        "Query submitted",
                        "The query has been submitted for processing.",
                    ));
                }
                SubmitOutcome::Failed { error } => {
                    board_warn!("research submission failed: {error}");
                    state.set_notice(Notice::error(
                        "Error",
                        "There was an error submitting the query.",
                    ));
                }
            }
            vec![Effect::CloseProgressStream {
                form: FormKind::Research,
            }]
        }
        Msg::LoginSettled { outcome } => {
            match outcome {
                SubmitOutcome::Accepted { .. } => {
                    state.mark_session_active();
                    state.append_log(EntryKind::Log, "Operator session established".to_string());
                }
                SubmitOutcome::Failed { error } => {
                    board_warn!("login failed: {error}");
                    state.set_notice(Notice::error("Error", "Login failed."));
                }
            }
            Vec::new()
        }
        Msg::StreamMessage { channel, raw } => {
            apply_stream_message(&mut state, channel, &raw);
            Vec::new()
        }
        Msg::StreamClosed { channel } => {
            board_warn!("event stream closed: {channel:?}");
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_stream_message(state: &mut AppState, channel: ChannelKind, raw: &str) {
    match channel {
        ChannelKind::Log => match parse_stream_message(raw) {
            ParsedMessage::Parsed { message, kind } => {
                state.append_log(kind.unwrap_or(EntryKind::Log), message);
            }
            ParsedMessage::Raw(text) => state.append_log(EntryKind::Log, text),
        },
        ChannelKind::Response => match parse_stream_message(raw) {
            ParsedMessage::Parsed { message, .. } => state.append_response(message),
            ParsedMessage::Raw(_) => {
                board_debug!("dropping malformed response payload: {raw}");
            }
        },
        ChannelKind::ProcessProgress => match parse_progress(raw) {
            Some(value) => state.apply_progress(FormKind::Process, value),
            None => board_debug!("dropping malformed progress payload: {raw}"),
        },
        ChannelKind::ResearchProgress => match parse_progress(raw) {
            Some(value) => state.apply_progress(FormKind::Research, value),
            None => board_debug!("dropping malformed progress payload: {raw}"),
        },
    }
}

fn validate_url(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Please enter a valid URL.".to_string());
    }
    match Url::parse(trimmed) {
        Ok(_) => Ok(trimmed.to_string()),
        Err(_) => Err("Please enter a valid URL.".to_string()),
    }
}
