use wordscore_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn poll_tick_while_idle_is_ignored() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::PollTick);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
