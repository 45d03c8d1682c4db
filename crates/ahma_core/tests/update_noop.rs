use ahma_core::{update, AppState, Msg};

#[test]
fn noop_message_changes_nothing_and_emits_nothing() {
    let state = AppState::new();
    let before = state.view();
    let (mut next, effects) = update(state, Msg::NoOp);
    assert_eq!(next.view(), before);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
