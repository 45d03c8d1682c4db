use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use ahma_core::{update, AppState, Msg, PDF_MEDIA_TYPE};
use ahma_engine::BackendSettings;
use session_logging::session_info;

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui::{constants, render};
use super::ShellEvent;

/// Sidebar task list refresh cadence.
const TASK_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

pub fn run_app() -> anyhow::Result<()> {
    logging::initialize(LogDestination::File);

    let (event_tx, event_rx) = mpsc::channel::<ShellEvent>();

    let download_dir = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("downloads");
    let runner = EffectRunner::new(BackendSettings::default(), download_dir, event_tx.clone())?;

    spawn_refresh_ticker(event_tx.clone());
    spawn_stdin_reader(event_tx);

    let mut shell = Shell::new(runner);
    println!("{}", render::BANNER);
    shell.dispatch(Msg::SessionStarted);

    for event in event_rx.iter() {
        match event {
            ShellEvent::Core(msg) => shell.dispatch(msg),
            ShellEvent::Line(line) => {
                if shell.handle_line(&line) {
                    break;
                }
            }
            ShellEvent::Quit => break,
        }
    }

    session_info!("session closed");
    Ok(())
}

/// Periodic task reload. The thread ends once the session channel closes.
fn spawn_refresh_ticker(event_tx: mpsc::Sender<ShellEvent>) {
    thread::spawn(move || loop {
        thread::sleep(TASK_REFRESH_INTERVAL);
        if event_tx.send(ShellEvent::Core(Msg::RefreshTick)).is_err() {
            break;
        }
    });
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<ShellEvent>) {
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(ShellEvent::Line(line)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(ShellEvent::Quit);
    });
}

struct Shell {
    state: AppState,
    runner: EffectRunner,
    rendered: usize,
}

impl Shell {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            rendered: 0,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.render_new_messages(&state);
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn render_new_messages(&mut self, state: &AppState) {
        let messages = state.messages();
        for message in &messages[self.rendered..] {
            println!("{}", render::format_message(message));
        }
        self.rendered = messages.len();
    }

    /// Returns true when the session should end.
    fn handle_line(&mut self, line: &str) -> bool {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return false;
        }

        let (command, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (trimmed, ""),
        };

        if !command.starts_with('/') {
            // Plain text is chat.
            self.dispatch(Msg::InputChanged(line.to_string()));
            self.dispatch(Msg::SendClicked);
            return false;
        }

        match command {
            constants::CMD_QUIT => return true,
            constants::CMD_HELP => println!("{}", render::HELP),
            constants::CMD_CALENDAR => print_lines(render::calendar_lines(&self.state.view())),
            constants::CMD_TASKS => print_lines(render::task_lines(&self.state.view())),
            constants::CMD_FILES => print_lines(render::file_lines(&self.state.view())),
            constants::CMD_INSURANCE => self.dispatch(Msg::InsuranceChatClicked),
            constants::CMD_DONE => match rest.parse() {
                Ok(task_id) => self.dispatch(Msg::CompleteTaskClicked { task_id }),
                Err(_) => println!("usage: {} <task-id>", constants::CMD_DONE),
            },
            constants::CMD_UPLOAD => self.upload(rest),
            constants::CMD_PROCESS => self.process(rest),
            constants::CMD_DOWNLOAD => {
                if rest.is_empty() {
                    println!("usage: {} <filename>", constants::CMD_DOWNLOAD);
                } else {
                    self.dispatch(Msg::DownloadClicked {
                        filename: rest.to_string(),
                    });
                }
            }
            _ => println!(
                "unknown command {command}; {} lists the commands",
                constants::CMD_HELP
            ),
        }
        false
    }

    fn upload(&mut self, path: &str) {
        if path.is_empty() {
            println!("usage: {} <path-to-pdf>", constants::CMD_UPLOAD);
            return;
        }
        match read_chosen_file(Path::new(path)) {
            Ok(msg) => self.dispatch(msg),
            Err(err) => println!("cannot read {path}: {err}"),
        }
    }

    fn process(&mut self, filename: &str) {
        if filename.is_empty() {
            println!("usage: {} <filename>", constants::CMD_PROCESS);
            return;
        }
        // The trigger is disabled while a fill request is in flight; the
        // state machine rejects stragglers either way.
        if self.state.view().processing_pdf {
            println!("A form is already being processed; try again shortly.");
            return;
        }
        self.dispatch(Msg::ProcessClicked {
            filename: filename.to_string(),
        });
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

/// Reads a picked file and tags it with its media type; the state machine
/// decides whether it is uploadable.
fn read_chosen_file(path: &Path) -> Result<Msg, std::io::Error> {
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no usable file name")
        })?
        .to_string();
    Ok(Msg::FileChosen {
        filename,
        media_type: media_type_of(path).to_string(),
        bytes,
    })
}

fn media_type_of(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("pdf") => PDF_MEDIA_TYPE,
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_is_pdf_only_for_pdf_extensions() {
        assert_eq!(media_type_of(Path::new("forms/claim.pdf")), PDF_MEDIA_TYPE);
        assert_eq!(media_type_of(Path::new("CLAIM.PDF")), PDF_MEDIA_TYPE);
        assert_eq!(media_type_of(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(media_type_of(Path::new("claim")), "application/octet-stream");
    }
}
