use std::sync::Once;

use medboard_core::{
    update, AppState, Effect, EntryKind, FormKind, Msg, NoticeKind, SubmitOutcome,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(medboard_logging::initialize_for_tests);
}

fn submit_process(state: AppState, url: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::ProcessUrlChanged(url.to_string()));
    update(state, Msg::ProcessSubmitted)
}

fn submit_research(state: AppState, url: &str, questions: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::ResearchUrlChanged(url.to_string()));
    let (state, _) = update(state, Msg::ResearchQuestionsChanged(questions.to_string()));
    update(state, Msg::ResearchSubmitted)
}

#[test]
fn process_submit_emits_one_gateway_call_and_opens_progress() {
    init_logging();
    let (mut state, effects) = submit_process(AppState::new(), "https://mdschool.example.edu");

    assert_eq!(
        effects,
        vec![
            Effect::SubmitProcess {
                url: "https://mdschool.example.edu".to_string(),
            },
            Effect::OpenProgressStream {
                form: FormKind::Process,
            },
        ]
    );

    let view = state.view();
    assert!(view.process.loading);
    assert_eq!(view.process.progress, 0.0);
    assert_eq!(view.log_rows.len(), 1);
    assert_eq!(view.log_rows[0].kind, EntryKind::Request);
    assert_eq!(
        view.log_rows[0].message,
        "Processing website: https://mdschool.example.edu"
    );
    assert!(state.consume_dirty());
}

#[test]
fn malformed_url_makes_no_network_call_and_shows_validation_message() {
    init_logging();
    let (mut state, effects) = submit_process(AppState::new(), "not a url");

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.process.loading);
    assert_eq!(view.process.error.as_deref(), Some("Please enter a valid URL."));
    assert!(view.log_rows.is_empty());
    assert!(state.consume_dirty());
}

#[test]
fn empty_url_is_rejected() {
    init_logging();
    let (state, effects) = submit_process(AppState::new(), "   ");
    assert!(effects.is_empty());
    assert!(state.view().process.error.is_some());
}

#[test]
fn editing_a_field_clears_its_validation_error() {
    init_logging();
    let (state, _) = submit_process(AppState::new(), "nope");
    assert!(state.view().process.error.is_some());

    let (state, _) = update(state, Msg::ProcessUrlChanged("https://a.example".to_string()));
    assert!(state.view().process.error.is_none());
}

#[test]
fn research_submit_derives_trimmed_question_list() {
    init_logging();
    let (state, effects) = submit_research(AppState::new(), "https://a.example", "A; B ;;C");

    assert_eq!(
        effects,
        vec![
            Effect::SubmitResearch {
                tld: "https://a.example".to_string(),
                questions: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            },
            Effect::OpenProgressStream {
                form: FormKind::Research,
            },
        ]
    );
    assert!(state.view().research.loading);
}

#[test]
fn settle_clears_loading_and_progress_on_both_outcomes_for_both_forms() {
    init_logging();

    // Process form, success path.
    let (state, _) = submit_process(AppState::new(), "https://a.example");
    let (state, effects) = update(
        state,
        Msg::ProcessSettled {
            outcome: SubmitOutcome::Accepted {
                ack: "Processing initiated".to_string(),
            },
        },
    );
    assert_eq!(
        effects,
        vec![Effect::CloseProgressStream {
            form: FormKind::Process,
        }]
    );
    let view = state.view();
    assert!(!view.process.loading);
    assert_eq!(view.process.progress, 0.0);
    assert_eq!(view.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Info));

    // Process form, failure path.
    let (state, _) = submit_process(state, "https://a.example");
    let (state, _) = update(
        state,
        Msg::ProcessSettled {
            outcome: SubmitOutcome::Failed {
                error: "backend returned 500".to_string(),
            },
        },
    );
    let view = state.view();
    assert!(!view.process.loading);
    assert_eq!(view.process.progress, 0.0);
    assert_eq!(view.notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));

    // Research form, failure path.
    let (state, _) = submit_research(state, "https://a.example", "Q1");
    let (state, effects) = update(
        state,
        Msg::ResearchSettled {
            outcome: SubmitOutcome::Failed {
                error: "timeout".to_string(),
            },
        },
    );
    assert_eq!(
        effects,
        vec![Effect::CloseProgressStream {
            form: FormKind::Research,
        }]
    );
    let view = state.view();
    assert!(!view.research.loading);
    assert_eq!(view.research.progress, 0.0);
}

#[test]
fn successful_settle_appends_response_entry_and_flips_flag() {
    init_logging();
    let (state, _) = submit_process(AppState::new(), "https://a.example");
    assert!(!state.view().has_response);

    let (state, _) = update(
        state,
        Msg::ProcessSettled {
            outcome: SubmitOutcome::Accepted {
                ack: "Processing initiated".to_string(),
            },
        },
    );
    let view = state.view();
    assert!(view.has_response);
    let last = view.log_rows.last().unwrap();
    assert_eq!(last.kind, EntryKind::Response);
    assert_eq!(last.message, "Processing initiated: Processing initiated");
}

#[test]
fn resubmit_while_loading_is_ignored() {
    init_logging();
    let (state, _) = submit_process(AppState::new(), "https://a.example");
    let (state, effects) = update(state, Msg::ProcessSubmitted);
    assert!(effects.is_empty());
    assert_eq!(state.view().log_rows.len(), 1);
}

#[test]
fn new_submission_resets_progress_and_clears_notice() {
    init_logging();
    let (state, _) = submit_process(AppState::new(), "https://a.example");
    let (state, _) = update(
        state,
        Msg::StreamMessage {
            channel: medboard_core::ChannelKind::ProcessProgress,
            raw: r#"{"progress": 60.0}"#.to_string(),
        },
    );
    assert_eq!(state.view().process.progress, 60.0);

    let (state, _) = update(
        state,
        Msg::ProcessSettled {
            outcome: SubmitOutcome::Failed {
                error: "boom".to_string(),
            },
        },
    );
    assert!(state.view().notice.is_some());

    let (state, _) = update(state, Msg::ProcessSubmitted);
    let view = state.view();
    assert!(view.process.loading);
    assert_eq!(view.process.progress, 0.0);
    assert!(view.notice.is_none());
}
