use ahma_core::{AppViewModel, Message, Sender};

pub const BANNER: &str = "AHMA console. Type a message to chat; /help lists commands.";

pub const HELP: &str = "\
Commands:
  /calendar            show upcoming events
  /tasks               show open tasks
  /files               show uploaded and filled forms
  /upload <path>       upload a PDF form
  /process <filename>  fill an uploaded form
  /download <filename> download a filled form
  /done <task-id>      complete a task
  /insurance           start the insurance helper
  /quit                leave";

pub fn format_message(message: &Message) -> String {
    let who = match message.sender {
        Sender::User => "You",
        Sender::Assistant => "AHMA",
    };
    format!(
        "[{}] {}: {}",
        message.timestamp.format("%-I:%M %p"),
        who,
        message.content
    )
}

pub fn calendar_lines(view: &AppViewModel) -> Vec<String> {
    if view.events.is_empty() {
        return vec!["No upcoming events".to_string()];
    }
    view.events
        .iter()
        .map(|event| format!("{} ({})", event.summary, event.start_label))
        .collect()
}

pub fn task_lines(view: &AppViewModel) -> Vec<String> {
    if view.open_tasks.is_empty() {
        return vec!["All tasks completed!".to_string()];
    }
    view.open_tasks
        .iter()
        .map(|task| {
            format!(
                "[#{}] {} (Priority: {})",
                task.task_id, task.content, task.priority_label
            )
        })
        .collect()
}

pub fn file_lines(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec!["Uploaded Forms:".to_string()];
    if view.uploaded_files.is_empty() {
        lines.push("  (none)".to_string());
    }
    for file in &view.uploaded_files {
        lines.push(format!("  {} {}", file.filename, file.size_label));
    }
    lines.push("Filled Forms:".to_string());
    if view.processed_files.is_empty() {
        lines.push("  (none)".to_string());
    }
    for file in &view.processed_files {
        lines.push(format!("  {} {}", file.filename, file.size_label));
    }
    if view.processing_pdf {
        lines.push("A form is being processed...".to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn messages_render_with_sender_and_clock_time() {
        let message = Message {
            id: 1,
            sender: Sender::Assistant,
            content: "Hello!".to_string(),
            timestamp: chrono::Utc.with_ymd_and_hms(2024, 7, 8, 15, 5, 0).unwrap(),
        };
        assert_eq!(format_message(&message), "[3:05 PM] AHMA: Hello!");
    }

    #[test]
    fn empty_widgets_show_their_empty_states() {
        let view = AppViewModel::default();
        assert_eq!(calendar_lines(&view), vec!["No upcoming events".to_string()]);
        assert_eq!(task_lines(&view), vec!["All tasks completed!".to_string()]);
        let files = file_lines(&view);
        assert!(files.contains(&"  (none)".to_string()));
    }
}
