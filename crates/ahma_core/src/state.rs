use chrono::{DateTime, Utc};

use crate::view_model::AppViewModel;

pub type MessageId = u64;
pub type TaskId = u64;

/// Who authored a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// One entry in the append-only conversation timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// An upcoming calendar entry, read-only on this side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    pub start: DateTime<Utc>,
}

/// A task from the task service. The local copy is a read cache; completion
/// goes through the backend and the list is re-fetched afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub content: String,
    pub completed: bool,
    pub priority: u8,
    pub created_at: DateTime<Utc>,
}

/// A file known to the PDF backend, in either the uploaded or processed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFile {
    pub filename: String,
    pub size: u64,
}

/// The whole session state: timeline, input buffer, in-flight flags and the
/// sidebar resource lists. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    clock: fn() -> DateTime<Utc>,
    next_message_id: MessageId,
    messages: Vec<Message>,
    input: String,
    awaiting_reply: bool,
    processing_pdf: bool,
    calendar_events: Vec<CalendarEvent>,
    tasks: Vec<Task>,
    uploaded_files: Vec<PdfFile>,
    processed_files: Vec<PdfFile>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_clock(Utc::now)
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state whose message timestamps come from `clock` instead of
    /// the wall clock. Tests use this for deterministic timelines.
    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            clock,
            next_message_id: 0,
            messages: Vec::new(),
            input: String::new(),
            awaiting_reply: false,
            processing_pdf: false,
            calendar_events: Vec::new(),
            tasks: Vec::new(),
            uploaded_files: Vec::new(),
            processed_files: Vec::new(),
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel::project(self)
    }

    /// Returns whether a render is pending and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// True while a chat exchange is outstanding; gates `SendClicked`.
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// True while a fill request is outstanding; shared across all files.
    pub fn is_processing_pdf(&self) -> bool {
        self.processing_pdf
    }

    pub fn calendar_events(&self) -> &[CalendarEvent] {
        &self.calendar_events
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn uploaded_files(&self) -> &[PdfFile] {
        &self.uploaded_files
    }

    pub fn processed_files(&self) -> &[PdfFile] {
        &self.processed_files
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
        self.mark_dirty();
    }

    pub(crate) fn take_input(&mut self) -> String {
        self.mark_dirty();
        std::mem::take(&mut self.input)
    }

    /// Appends one timeline entry. Ids are strictly increasing; entries are
    /// never edited or removed afterwards.
    pub(crate) fn push_message(&mut self, sender: Sender, content: impl Into<String>) -> MessageId {
        self.next_message_id += 1;
        let id = self.next_message_id;
        self.messages.push(Message {
            id,
            sender,
            content: content.into(),
            timestamp: (self.clock)(),
        });
        self.mark_dirty();
        id
    }

    /// Appends an assistant-sender notice describing an action outcome.
    pub(crate) fn push_notice(&mut self, content: impl Into<String>) {
        self.push_message(Sender::Assistant, content);
    }

    pub(crate) fn begin_exchange(&mut self) {
        self.awaiting_reply = true;
        self.mark_dirty();
    }

    pub(crate) fn end_exchange(&mut self) {
        self.awaiting_reply = false;
        self.mark_dirty();
    }

    pub(crate) fn begin_processing(&mut self) {
        self.processing_pdf = true;
        self.mark_dirty();
    }

    pub(crate) fn end_processing(&mut self) {
        self.processing_pdf = false;
        self.mark_dirty();
    }

    pub(crate) fn replace_calendar_events(&mut self, events: Vec<CalendarEvent>) {
        self.calendar_events = events;
        self.mark_dirty();
    }

    pub(crate) fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.mark_dirty();
    }

    pub(crate) fn replace_pdf_lists(&mut self, uploaded: Vec<PdfFile>, processed: Vec<PdfFile>) {
        self.uploaded_files = uploaded;
        self.processed_files = processed;
        self.mark_dirty();
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
