use medboard_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn tick_produces_no_effects() {
    let (_, effects) = update(AppState::new(), Msg::Tick);
    assert!(effects.is_empty());
}
