use crate::state::{EntryKind, Notice};

#[derive(Debug, Clone, PartialEq)]
pub struct LogRowView {
    pub message: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormView {
    pub loading: bool,
    pub progress: f64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub log_rows: Vec<LogRowView>,
    pub response_rows: Vec<String>,
    /// Index of the newest response row; the viewer keeps it in sight.
    pub latest_response: Option<usize>,
    pub has_response: bool,
    pub session_active: bool,
    pub process: FormView,
    pub research: FormView,
    pub notice: Option<Notice>,
    pub dirty: bool,
}
