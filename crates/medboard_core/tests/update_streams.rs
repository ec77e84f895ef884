use std::sync::Once;

use medboard_core::{update, AppState, ChannelKind, EntryKind, Msg};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(medboard_logging::initialize_for_tests);
}

fn stream(state: AppState, channel: ChannelKind, raw: &str) -> AppState {
    let (state, effects) = update(
        state,
        Msg::StreamMessage {
            channel,
            raw: raw.to_string(),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn log_channel_preserves_arrival_order_across_parse_outcomes() {
    init_logging();
    let payloads = [
        r#"{"message":"crawl started"}"#,
        "plain text",
        r#"{"message":"fetched 12 pages"}"#,
        "{broken json",
        r#"[1,2,3]"#,
    ];

    let mut state = AppState::new();
    for payload in payloads {
        state = stream(state, ChannelKind::Log, payload);
    }

    let view = state.view();
    assert_eq!(view.log_rows.len(), payloads.len());
    let texts: Vec<&str> = view.log_rows.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "crawl started",
            "plain text",
            "fetched 12 pages",
            "{broken json",
            "[1,2,3]",
        ]
    );
    assert!(view.log_rows.iter().all(|r| r.kind == EntryKind::Log));
    assert!(!view.has_response);
}

#[test]
fn typed_response_payload_on_log_channel_flips_has_response() {
    init_logging();
    let state = stream(
        AppState::new(),
        ChannelKind::Log,
        r#"{"message":"done","type":"response"}"#,
    );

    let view = state.view();
    assert!(view.has_response);
    assert_eq!(view.log_rows.len(), 1);
    assert_eq!(view.log_rows[0].message, "done");
    assert_eq!(view.log_rows[0].kind, EntryKind::Response);
}

#[test]
fn raw_text_on_log_channel_is_kept_verbatim() {
    init_logging();
    let state = stream(AppState::new(), ChannelKind::Log, "plain text");

    let view = state.view();
    assert_eq!(view.log_rows.len(), 1);
    assert_eq!(view.log_rows[0].message, "plain text");
    assert_eq!(view.log_rows[0].kind, EntryKind::Log);
    assert!(!view.has_response);
}

#[test]
fn unknown_type_tag_falls_back_to_caller_tag() {
    init_logging();
    let state = stream(
        AppState::new(),
        ChannelKind::Log,
        r#"{"message":"hello","type":"banana"}"#,
    );
    assert_eq!(state.view().log_rows[0].kind, EntryKind::Log);
}

#[test]
fn response_channel_appends_in_order_and_drops_malformed() {
    init_logging();
    let mut state = AppState::new();
    state = stream(state, ChannelKind::Response, r#"{"message":"answer one"}"#);
    state = stream(state, ChannelKind::Response, "not json at all");
    state = stream(state, ChannelKind::Response, r#"{"no_message":true}"#);
    state = stream(state, ChannelKind::Response, r#"{"message":"answer two"}"#);

    let view = state.view();
    assert_eq!(view.response_rows, vec!["answer one", "answer two"]);
    assert_eq!(view.latest_response, Some(1));
}

#[test]
fn progress_is_latest_wins_while_loading_and_ignored_otherwise() {
    init_logging();

    // Not loading: progress events are stale and dropped.
    let state = stream(
        AppState::new(),
        ChannelKind::ProcessProgress,
        r#"{"progress": 50.0}"#,
    );
    assert_eq!(state.view().process.progress, 0.0);

    // Loading: each event supersedes the previous value.
    let (state, _) = update(
        state,
        Msg::ProcessUrlChanged("https://a.example".to_string()),
    );
    let (state, _) = update(state, Msg::ProcessSubmitted);
    let state = stream(
        state,
        ChannelKind::ProcessProgress,
        r#"{"status":"Processing","progress": 25.0}"#,
    );
    let state = stream(state, ChannelKind::ProcessProgress, r#"{"progress": 75.0}"#);
    assert_eq!(state.view().process.progress, 75.0);

    // Malformed progress payloads are dropped, not zeroed.
    let state = stream(state, ChannelKind::ProcessProgress, "garbage");
    assert_eq!(state.view().process.progress, 75.0);
}

#[test]
fn research_progress_only_touches_the_research_form() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::ResearchUrlChanged("https://a.example".to_string()),
    );
    let (state, _) = update(state, Msg::ResearchSubmitted);
    let state = stream(
        state,
        ChannelKind::ResearchProgress,
        r#"{"progress": 40.0}"#,
    );

    let view = state.view();
    assert_eq!(view.research.progress, 40.0);
    assert_eq!(view.process.progress, 0.0);
}

#[test]
fn stream_closed_is_diagnostic_only() {
    init_logging();
    let state = stream(AppState::new(), ChannelKind::Log, r#"{"message":"one"}"#);
    let (state, effects) = update(
        state,
        Msg::StreamClosed {
            channel: ChannelKind::Log,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().log_rows.len(), 1);
}
