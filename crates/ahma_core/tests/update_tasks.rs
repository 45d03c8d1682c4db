use std::sync::Once;

use chrono::{DateTime, TimeZone, Utc};

use ahma_core::{
    update, AppState, CalendarEvent, Effect, Msg, Task, INSURANCE_GREETING,
    TASK_COMPLETED_NOTICE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(session_logging::initialize_for_tests);
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

fn sample_task(id: u64, content: &str, completed: bool, priority: u8) -> Task {
    Task {
        id,
        content: content.to_string(),
        completed,
        priority,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

#[test]
fn loaded_tasks_replace_the_cache_and_label_priorities() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = update(
        state,
        Msg::TasksLoaded(vec![sample_task(1, "Refill prescription", false, 3)]),
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.open_tasks.len(), 1);
    assert_eq!(view.open_tasks[0].task_id, 1);
    assert_eq!(view.open_tasks[0].content, "Refill prescription");
    assert_eq!(view.open_tasks[0].priority_label, "High");
}

#[test]
fn completed_tasks_are_hidden_from_the_view() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, _) = update(
        state,
        Msg::TasksLoaded(vec![
            sample_task(1, "Book appointment", false, 2),
            sample_task(2, "Collect referral", true, 4),
        ]),
    );

    let view = state.view();
    assert_eq!(view.open_tasks.len(), 1);
    assert_eq!(view.open_tasks[0].content, "Book appointment");
}

#[test]
fn task_reload_is_wholesale_and_empties_on_failure() {
    init_logging();
    let state = AppState::with_clock(fixed_now);
    let (state, _) = update(
        state,
        Msg::TasksLoaded(vec![sample_task(1, "Refill prescription", false, 3)]),
    );

    let (state, _) = update(state, Msg::TasksLoaded(Vec::new()));

    assert!(state.view().open_tasks.is_empty());
}

#[test]
fn completing_a_task_dispatches_the_request() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = update(state, Msg::CompleteTaskClicked { task_id: 5 });

    assert_eq!(effects, vec![Effect::CompleteTask { task_id: 5 }]);
    assert!(state.view().messages.is_empty());
}

#[test]
fn successful_completion_reloads_tasks_and_confirms_in_timeline() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = update(state, Msg::CompleteTaskFinished { success: true });

    assert_eq!(effects, vec![Effect::LoadTasks]);
    let view = state.view();
    assert_eq!(view.messages.len(), 1);
    assert_eq!(view.messages[0].content, TASK_COMPLETED_NOTICE);
}

#[test]
fn failed_completion_leaves_timeline_and_cache_untouched() {
    init_logging();
    let state = AppState::with_clock(fixed_now);
    let (state, _) = update(
        state,
        Msg::TasksLoaded(vec![sample_task(1, "Refill prescription", false, 3)]),
    );

    let (state, effects) = update(state, Msg::CompleteTaskFinished { success: false });

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.messages.is_empty());
    assert_eq!(view.open_tasks.len(), 1);
}

#[test]
fn refresh_tick_reloads_tasks_only() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, effects) = update(state, Msg::RefreshTick);

    assert_eq!(effects, vec![Effect::LoadTasks]);
    assert!(state.view().messages.is_empty());
}

#[test]
fn loaded_events_replace_the_calendar() {
    init_logging();
    let state = AppState::with_clock(fixed_now);

    let (state, _) = update(
        state,
        Msg::CalendarLoaded(vec![CalendarEvent {
            id: "evt-1".to_string(),
            summary: "Cardiology checkup".to_string(),
            start: Utc.with_ymd_and_hms(2024, 7, 8, 15, 5, 0).unwrap(),
        }]),
    );

    let view = state.view();
    assert_eq!(view.events.len(), 1);
    assert_eq!(view.events[0].summary, "Cardiology checkup");
    assert_eq!(view.events[0].start_label, "Jul 8, 3:05 PM");

    let (state, _) = update(state, Msg::CalendarLoaded(Vec::new()));
    assert!(state.view().events.is_empty());
}

#[test]
fn insurance_chat_appends_the_greeting_even_mid_exchange() {
    init_logging();
    let state = AppState::with_clock(fixed_now);
    let (state, _) = update(state, Msg::InputChanged("hello".to_string()));
    let (state, _) = update(state, Msg::SendClicked);

    let (state, effects) = update(state, Msg::InsuranceChatClicked);

    assert!(effects.is_empty());
    let view = state.view();
    // Notices are not gated by the in-flight chat exchange.
    assert!(view.awaiting_reply);
    assert_eq!(view.messages.len(), 2);
    assert_eq!(view.messages[1].content, INSURANCE_GREETING);
}
