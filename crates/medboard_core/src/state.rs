use crate::view_model::{AppViewModel, FormView, LogRowView};

/// Tag carried by every activity-feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Log,
    Request,
    Response,
}

impl EntryKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "log" => Some(EntryKind::Log),
            "request" => Some(EntryKind::Request),
            "response" => Some(EntryKind::Response),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Log => "log",
            EntryKind::Request => "request",
            EntryKind::Response => "response",
        }
    }
}

/// One entry in the activity feed. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub kind: EntryKind,
}

/// One entry in the response feed. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEntry {
    pub message: String,
}

/// The two submission forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Process,
    Research,
}

/// The event-stream channels the dashboard listens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Log,
    Response,
    ProcessProgress,
    ResearchProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient notification shown after a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub detail: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ProcessFormState {
    url_input: String,
    error: Option<String>,
    loading: bool,
    progress: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct ResearchFormState {
    url_input: String,
    questions_input: String,
    error: Option<String>,
    loading: bool,
    progress: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    log: Vec<LogEntry>,
    responses: Vec<ResponseEntry>,
    has_response: bool,
    session_active: bool,
    process: ProcessFormState,
    research: ResearchFormState,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            log_rows: self
                .log
                .iter()
                .map(|entry| LogRowView {
                    message: entry.message.clone(),
                    kind: entry.kind,
                })
                .collect(),
            response_rows: self
                .responses
                .iter()
                .map(|entry| entry.message.clone())
                .collect(),
            latest_response: self.responses.len().checked_sub(1),
            has_response: self.has_response,
            session_active: self.session_active,
            process: FormView {
                loading: self.process.loading,
                progress: self.process.progress,
                error: self.process.error.clone(),
            },
            research: FormView {
                loading: self.research.loading,
                progress: self.research.progress,
                error: self.research.error.clone(),
            },
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty flag. The renderer calls this once per
    /// dispatched message to coalesce redraws.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn process_url(&self) -> &str {
        &self.process.url_input
    }

    pub(crate) fn research_url(&self) -> &str {
        &self.research.url_input
    }

    pub(crate) fn research_questions(&self) -> &str {
        &self.research.questions_input
    }

    pub(crate) fn is_loading(&self, form: FormKind) -> bool {
        match form {
            FormKind::Process => self.process.loading,
            FormKind::Research => self.research.loading,
        }
    }

    pub(crate) fn set_process_url(&mut self, input: String) {
        self.process.url_input = input;
        self.process.error = None;
        self.mark_dirty();
    }

    pub(crate) fn set_research_url(&mut self, input: String) {
        self.research.url_input = input;
        self.research.error = None;
        self.mark_dirty();
    }

    pub(crate) fn set_research_questions(&mut self, input: String) {
        self.research.questions_input = input;
        self.research.error = None;
        self.mark_dirty();
    }

    pub(crate) fn set_validation_error(&mut self, form: FormKind, message: String) {
        match form {
            FormKind::Process => self.process.error = Some(message),
            FormKind::Research => self.research.error = Some(message),
        }
        self.mark_dirty();
    }

    /// Moves a form into the submitting state. Loading and progress are reset
    /// unconditionally, independent of the previous submission's outcome.
    pub(crate) fn begin_submission(&mut self, form: FormKind) {
        match form {
            FormKind::Process => {
                self.process.loading = true;
                self.process.progress = 0.0;
                self.process.error = None;
            }
            FormKind::Research => {
                self.research.loading = true;
                self.research.progress = 0.0;
                self.research.error = None;
            }
        }
        self.notice = None;
        self.mark_dirty();
    }

    /// Leaves the submitting state. Called on both outcome paths.
    pub(crate) fn settle_submission(&mut self, form: FormKind) {
        match form {
            FormKind::Process => {
                self.process.loading = false;
                self.process.progress = 0.0;
            }
            FormKind::Research => {
                self.research.loading = false;
                self.research.progress = 0.0;
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn append_log(&mut self, kind: EntryKind, message: String) {
        self.log.push(LogEntry { message, kind });
        if kind == EntryKind::Response {
            self.has_response = true;
        }
        self.mark_dirty();
    }

    pub(crate) fn append_response(&mut self, message: String) {
        self.responses.push(ResponseEntry { message });
        self.mark_dirty();
    }

    /// Latest-wins progress for a form's dedicated channel. Values arriving
    /// outside the submitting state are stale and ignored.
    pub(crate) fn apply_progress(&mut self, form: FormKind, value: f64) {
        match form {
            FormKind::Process if self.process.loading => {
                self.process.progress = value;
                self.mark_dirty();
            }
            FormKind::Research if self.research.loading => {
                self.research.progress = value;
                self.mark_dirty();
            }
            _ => {}
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn mark_session_active(&mut self) {
        self.session_active = true;
        self.mark_dirty();
    }
}
