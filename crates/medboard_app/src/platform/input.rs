use medboard_core::Msg;

/// One parsed operator input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Dispatch(Vec<Msg>),
    Quit,
    Help,
    Unknown(String),
}

/// Parses an operator command line.
///
/// `process <url>` submits the process form; `research <url> :: q1; q2`
/// fills and submits the research form (the `::` separates the URL from the
/// semicolon-delimited questions).
pub fn parse_line(line: &str) -> InputEvent {
    let line = line.trim();
    if line.is_empty() {
        return InputEvent::Dispatch(Vec::new());
    }
    if line == "quit" || line == "exit" {
        return InputEvent::Quit;
    }
    if line == "help" {
        return InputEvent::Help;
    }
    if let Some(rest) = line.strip_prefix("process ") {
        return InputEvent::Dispatch(vec![
            Msg::ProcessUrlChanged(rest.trim().to_string()),
            Msg::ProcessSubmitted,
        ]);
    }
    if let Some(rest) = line.strip_prefix("research ") {
        let (url, questions) = match rest.split_once("::") {
            Some((url, questions)) => (url.trim(), questions.trim()),
            None => (rest.trim(), ""),
        };
        return InputEvent::Dispatch(vec![
            Msg::ResearchUrlChanged(url.to_string()),
            Msg::ResearchQuestionsChanged(questions.to_string()),
            Msg::ResearchSubmitted,
        ]);
    }
    InputEvent::Unknown(line.to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse_line, InputEvent};
    use medboard_core::Msg;

    #[test]
    fn process_line_fills_and_submits() {
        assert_eq!(
            parse_line("process https://a.example\n"),
            InputEvent::Dispatch(vec![
                Msg::ProcessUrlChanged("https://a.example".to_string()),
                Msg::ProcessSubmitted,
            ])
        );
    }

    #[test]
    fn research_line_splits_url_from_questions() {
        assert_eq!(
            parse_line("research https://a.example :: What?; Why?"),
            InputEvent::Dispatch(vec![
                Msg::ResearchUrlChanged("https://a.example".to_string()),
                Msg::ResearchQuestionsChanged("What?; Why?".to_string()),
                Msg::ResearchSubmitted,
            ])
        );
    }

    #[test]
    fn research_line_without_questions_is_allowed() {
        assert_eq!(
            parse_line("research https://a.example"),
            InputEvent::Dispatch(vec![
                Msg::ResearchUrlChanged("https://a.example".to_string()),
                Msg::ResearchQuestionsChanged(String::new()),
                Msg::ResearchSubmitted,
            ])
        );
    }

    #[test]
    fn control_words_and_noise() {
        assert_eq!(parse_line("quit"), InputEvent::Quit);
        assert_eq!(parse_line("  exit  "), InputEvent::Quit);
        assert_eq!(parse_line("help"), InputEvent::Help);
        assert_eq!(parse_line(""), InputEvent::Dispatch(Vec::new()));
        assert_eq!(
            parse_line("dance"),
            InputEvent::Unknown("dance".to_string())
        );
    }
}
