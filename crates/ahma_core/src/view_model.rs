use chrono::{DateTime, Utc};

use crate::state::{AppState, CalendarEvent, Message, PdfFile, Task, TaskId};

/// Render-ready projection of [`AppState`]. Presentation reads this and
/// nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub messages: Vec<Message>,
    pub input: String,
    /// Show the typing indicator and disable send while true.
    pub awaiting_reply: bool,
    /// Disable every process trigger while true.
    pub processing_pdf: bool,
    pub events: Vec<EventRowView>,
    /// Tasks still open, in backend order. Completed tasks are not shown.
    pub open_tasks: Vec<TaskRowView>,
    pub uploaded_files: Vec<PdfRowView>,
    pub processed_files: Vec<PdfRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRowView {
    pub summary: String,
    pub start_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRowView {
    pub task_id: TaskId,
    pub content: String,
    pub priority_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfRowView {
    pub filename: String,
    pub size_label: String,
}

impl AppViewModel {
    pub(crate) fn project(state: &AppState) -> Self {
        Self {
            messages: state.messages().to_vec(),
            input: state.input().to_string(),
            awaiting_reply: state.is_awaiting_reply(),
            processing_pdf: state.is_processing_pdf(),
            events: state.calendar_events().iter().map(event_row).collect(),
            open_tasks: state
                .tasks()
                .iter()
                .filter(|task| !task.completed)
                .map(task_row)
                .collect(),
            uploaded_files: state.uploaded_files().iter().map(pdf_row).collect(),
            processed_files: state.processed_files().iter().map(pdf_row).collect(),
        }
    }
}

/// Human label for a 1..=4 task priority. Anything out of range reads as the
/// lowest priority rather than failing.
pub fn priority_label(priority: u8) -> &'static str {
    match priority {
        2 => "Medium",
        3 => "High",
        4 => "Urgent",
        _ => "Low",
    }
}

fn event_row(event: &CalendarEvent) -> EventRowView {
    EventRowView {
        summary: event.summary.clone(),
        start_label: format_event_start(event.start),
    }
}

fn task_row(task: &Task) -> TaskRowView {
    TaskRowView {
        task_id: task.id,
        content: task.content.clone(),
        priority_label: priority_label(task.priority),
    }
}

fn pdf_row(file: &PdfFile) -> PdfRowView {
    PdfRowView {
        filename: file.filename.clone(),
        size_label: format_size(file.size),
    }
}

// "Jul 8, 3:05 PM"
fn format_event_start(start: DateTime<Utc>) -> String {
    start.format("%b %-d, %-I:%M %p").to_string()
}

// "(12.3 KB)"
fn format_size(size: u64) -> String {
    format!("({:.1} KB)", size as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_labels_cover_range_and_fallback() {
        assert_eq!(priority_label(1), "Low");
        assert_eq!(priority_label(2), "Medium");
        assert_eq!(priority_label(3), "High");
        assert_eq!(priority_label(4), "Urgent");
        assert_eq!(priority_label(0), "Low");
        assert_eq!(priority_label(9), "Low");
    }

    #[test]
    fn size_label_is_kilobytes_with_one_decimal() {
        assert_eq!(format_size(12595), "(12.3 KB)");
        assert_eq!(format_size(0), "(0.0 KB)");
    }

    #[test]
    fn event_start_label_is_short_local_style() {
        use chrono::TimeZone;
        let start = Utc.with_ymd_and_hms(2024, 7, 8, 15, 5, 0).unwrap();
        assert_eq!(format_event_start(start), "Jul 8, 3:05 PM");
    }
}
