use chrono::Local;
use medboard_core::{AppViewModel, EntryKind, Notice, NoticeKind};

/// Append-only terminal renderer.
///
/// Tracks how much of each feed has already been printed so a render pass
/// only emits new rows; the output therefore always ends at the latest
/// entry, which stands in for the browser dashboard's scroll-to-latest.
pub struct Renderer {
    printed_log_rows: usize,
    printed_response_rows: usize,
    last_process_progress: f64,
    last_research_progress: f64,
    last_process_error: Option<String>,
    last_research_error: Option<String>,
    last_notice: Option<Notice>,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            printed_log_rows: 0,
            printed_response_rows: 0,
            last_process_progress: 0.0,
            last_research_progress: 0.0,
            last_process_error: None,
            last_research_error: None,
            last_notice: None,
        }
    }

    pub fn banner(&self) {
        println!("medboard console - commands:");
        println!("  process <url>");
        println!("  research <url> :: <question>; <question>");
        println!("  quit");
    }

    pub fn render(&mut self, view: &AppViewModel) {
        let stamp = Local::now().format("%H:%M:%S");

        for row in &view.log_rows[self.printed_log_rows..] {
            println!("{stamp} [{}] {}", kind_label(row.kind), row.message);
        }
        self.printed_log_rows = view.log_rows.len();

        for message in &view.response_rows[self.printed_response_rows..] {
            println!("{stamp} >> {message}");
        }
        self.printed_response_rows = view.response_rows.len();

        if view.process.loading && view.process.progress != self.last_process_progress {
            println!("{stamp} .. process {:>5.1}%", view.process.progress);
        }
        self.last_process_progress = view.process.progress;

        if view.research.loading && view.research.progress != self.last_research_progress {
            println!("{stamp} .. research {:>5.1}%", view.research.progress);
        }
        self.last_research_progress = view.research.progress;

        if view.process.error != self.last_process_error {
            if let Some(error) = &view.process.error {
                println!("{stamp} !! process: {error}");
            }
            self.last_process_error = view.process.error.clone();
        }
        if view.research.error != self.last_research_error {
            if let Some(error) = &view.research.error {
                println!("{stamp} !! research: {error}");
            }
            self.last_research_error = view.research.error.clone();
        }

        if view.notice != self.last_notice {
            if let Some(notice) = &view.notice {
                let marker = match notice.kind {
                    NoticeKind::Info => "**",
                    NoticeKind::Error => "!!",
                };
                println!("{stamp} {marker} {}: {}", notice.title, notice.detail);
            }
            self.last_notice = view.notice.clone();
        }
    }
}

fn kind_label(kind: EntryKind) -> &'static str {
    kind.as_str()
}
