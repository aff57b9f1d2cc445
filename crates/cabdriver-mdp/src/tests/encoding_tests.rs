use crate::{Action, EnvConfig, EnvError, State, encode_state, encode_state_action};

fn hot_positions(encoded: &[f32]) -> Vec<usize> {
    encoded
        .iter()
        .enumerate()
        .filter(|(_, v)| **v == 1.0)
        .map(|(idx, _)| idx)
        .collect()
}

#[test]
fn state_is_one_hot_in_three_segments() {
    let config = EnvConfig::default();
    let encoded = encode_state(&config, State::new(2, 5, 1)).expect("valid state");

    assert_eq!(encoded.len(), 36);
    assert_eq!(hot_positions(&encoded), vec![2, 10, 30]);
    assert_eq!(encoded.iter().sum::<f32>(), 3.0);
}

#[test]
fn encoding_is_repeatable() {
    let config = EnvConfig::default();
    let state = State::new(4, 23, 6);

    let first = encode_state(&config, state).expect("valid state");
    let second = encode_state(&config, state).expect("valid state");

    assert_eq!(first, second);
    assert_eq!(hot_positions(&first), vec![4, 28, 35]);
}

#[test]
fn out_of_bounds_state_is_rejected() {
    let config = EnvConfig::default();
    let err = encode_state(&config, State::new(0, 0, 7)).expect_err("day 7 is invalid");
    assert!(matches!(err, EnvError::InvalidState { .. }));
}

#[test]
fn state_action_appends_pickup_and_drop() {
    let config = EnvConfig::default();
    let encoded =
        encode_state_action(&config, State::new(2, 5, 1), Action::ride(3, 0)).expect("valid");

    assert_eq!(encoded.len(), 36 + 10);
    assert_eq!(hot_positions(&encoded), vec![2, 10, 30, 39, 41]);
}

#[test]
fn state_action_sentinel_has_empty_action_segments() {
    let config = EnvConfig::default();
    let encoded =
        encode_state_action(&config, State::new(0, 0, 0), Action::NO_RIDE).expect("valid");

    assert_eq!(encoded.len(), 46);
    assert_eq!(hot_positions(&encoded), vec![0, 5, 29]);
}
