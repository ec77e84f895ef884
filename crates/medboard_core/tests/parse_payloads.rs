use medboard_core::{parse_progress, parse_stream_message, split_questions, ParsedMessage};

#[test]
fn questions_are_trimmed_and_empties_dropped() {
    assert_eq!(split_questions("A; B ;;C"), vec!["A", "B", "C"]);
    assert_eq!(
        split_questions("What are the core values?; What is the curriculum?"),
        vec!["What are the core values?", "What is the curriculum?"]
    );
    assert!(split_questions("").is_empty());
    assert!(split_questions(" ; ; ").is_empty());
}

#[test]
fn json_with_message_field_parses() {
    let parsed = parse_stream_message(r#"{"message":"hi","type":"response"}"#);
    match parsed {
        ParsedMessage::Parsed { message, kind } => {
            assert_eq!(message, "hi");
            assert_eq!(kind, Some(medboard_core::EntryKind::Response));
        }
        ParsedMessage::Raw(_) => panic!("expected parsed message"),
    }
}

#[test]
fn non_object_or_missing_message_degrades_to_raw() {
    assert_eq!(
        parse_stream_message("plain text"),
        ParsedMessage::Raw("plain text".to_string())
    );
    assert_eq!(
        parse_stream_message("[1,2]"),
        ParsedMessage::Raw("[1,2]".to_string())
    );
    assert_eq!(
        parse_stream_message(r#"{"progress": 10}"#),
        ParsedMessage::Raw(r#"{"progress": 10}"#.to_string())
    );
    // A non-string message field is not usable as entry text.
    assert_eq!(
        parse_stream_message(r#"{"message": 42}"#),
        ParsedMessage::Raw(r#"{"message": 42}"#.to_string())
    );
}

#[test]
fn progress_field_is_extracted_as_f64() {
    assert_eq!(parse_progress(r#"{"progress": 62.5}"#), Some(62.5));
    assert_eq!(
        parse_progress(r#"{"status":"Processing","progress": 100}"#),
        Some(100.0)
    );
    assert_eq!(parse_progress(r#"{"status":"Processing"}"#), None);
    assert_eq!(parse_progress("nope"), None);
}
