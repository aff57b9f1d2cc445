use std::path::PathBuf;

use cabdriver_mdp::{
    Action, ActionId, CabDriverEnv, EnvConfig, EnvError, MatrixShape, State, TravelTimeMatrix,
    TravelTimeOracle, load_matrix_json, load_matrix_yaml, save_matrix_json,
};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cabdriver-mdp-{}-{name}", std::process::id()))
}

fn matrix(hours: u32) -> TravelTimeMatrix {
    TravelTimeMatrix::filled(MatrixShape::new(5, 24, 7), hours)
}

#[test]
fn default_yaml_matches_default_config() {
    let config = EnvConfig::from_default_yaml().expect("default yaml should parse");
    assert_eq!(config, EnvConfig::default());
}

#[test]
fn yaml_fields_default_when_omitted() {
    let config = EnvConfig::from_yaml_str("revenue_per_hour: 12.0\n").expect("valid yaml");
    assert_eq!(config.revenue_per_hour, 12.0);
    assert_eq!(config.locations, 5);
    assert_eq!(config.max_requests, 15);
}

#[test]
fn config_validation_rejects_bad_values() {
    let err = EnvConfig::from_yaml_str("locations: 0\nrequest_rates: []\nmax_requests: 0\n")
        .expect_err("zero locations");
    assert!(matches!(err, EnvError::Configuration(_)));

    let err = EnvConfig::from_yaml_str("hours_per_day: 0\n").expect_err("zero hours");
    assert!(matches!(err, EnvError::Configuration(_)));

    let err = EnvConfig::from_yaml_str("request_rates: [2.0, 12.0]\n").expect_err("missing rates");
    assert!(matches!(err, EnvError::Configuration(_)));

    // Three locations only offer six distinct rides.
    let err = EnvConfig::from_yaml_str("locations: 3\nrequest_rates: [1.0, 1.0, 1.0]\n")
        .expect_err("cap above pool");
    assert!(matches!(err, EnvError::Configuration(_)));

    let config = EnvConfig::from_yaml_str(
        "locations: 3\nrequest_rates: [1.0, 1.0, 1.0]\nmax_requests: 6\n",
    )
    .expect("cap equal to pool is allowed");
    assert_eq!(config.ride_pool_size(), 6);
}

#[test]
fn env_exposes_spaces_and_initial_state() {
    let mut env = CabDriverEnv::with_default_config(3).expect("default env");
    let (actions, states, initial) = env.reset();

    assert_eq!(actions.len(), 21);
    assert_eq!(states.len(), 840);
    assert!(states.index_of(initial).is_ok());
    assert_eq!(env.current_state(), initial);
}

#[test]
fn same_seed_produces_same_requests() {
    let mut env_a = CabDriverEnv::with_default_config(42).expect("default env");
    let mut env_b = CabDriverEnv::with_default_config(42).expect("default env");
    assert_eq!(env_a.current_state(), env_b.current_state());

    let state = State::new(1, 9, 4);
    for _ in 0..20 {
        assert_eq!(
            env_a.requests(state).expect("valid"),
            env_b.requests(state).expect("valid")
        );
    }
}

#[test]
fn step_scores_the_transition() {
    let env = CabDriverEnv::with_default_config(0).expect("default env");
    let mut oracle = matrix(2);
    oracle.set(1, 3, 8, 0, 4).expect("in bounds");

    let outcome = env
        .step(State::new(1, 8, 0), Action::ride(1, 3), &oracle)
        .expect("valid step");
    assert_eq!(outcome.next_state, State::new(3, 12, 0));
    assert_eq!(outcome.total_time, 4);
    assert_eq!(outcome.reward, 9.0 * 4.0 - 5.0 * 4.0);

    let refused = env
        .step(State::new(2, 10, 3), Action::NO_RIDE, &oracle)
        .expect("valid step");
    assert_eq!(refused.next_state, State::new(2, 11, 3));
    assert_eq!(refused.total_time, 1);
    assert_eq!(refused.reward, -5.0);
}

#[test]
fn greedy_epoch_advances_current_state() {
    let mut env = CabDriverEnv::with_default_config(8).expect("default env");
    let oracle = matrix(1);
    let start = env.current_state();

    let requests = env.requests(start).expect("valid");
    let best = requests
        .iter()
        .map(|(_, action)| env.step(start, action, &oracle).expect("valid step"))
        .max_by(|a, b| a.reward.total_cmp(&b.reward))
        .expect("sentinel is always offered");

    env.set_current_state(best.next_state).expect("next state is valid");
    assert_eq!(env.current_state(), best.next_state);
    assert!(env.set_current_state(State::new(9, 0, 0)).is_err());
}

#[test]
fn encoder_feeds_fixed_width_vectors() {
    let env = CabDriverEnv::with_default_config(1).expect("default env");
    let encoded = env.encode_state(State::new(2, 5, 1)).expect("valid state");
    assert_eq!(encoded.len(), 36);

    let pair = env
        .encode_state_action(State::new(2, 5, 1), Action::ride(0, 4))
        .expect("valid pair");
    assert_eq!(pair.len(), 46);
    assert_eq!(&pair[..36], encoded.as_slice());
}

#[test]
fn requests_cover_known_action_ids() {
    let mut env = CabDriverEnv::with_default_config(5).expect("default env");
    let requests = env.requests(State::new(1, 0, 0)).expect("valid");

    for (id, action) in requests.iter() {
        assert_eq!(env.action_space().get(id), Some(action));
    }
    assert_eq!(requests.ids.last(), Some(&ActionId::NO_RIDE));
}

#[test]
fn matrix_json_round_trip_on_disk() {
    let path = scratch_path("travel_times.json");

    let mut original = matrix(3);
    original.set(4, 0, 23, 6, 11).expect("in bounds");
    save_matrix_json(&path, &original).expect("write matrix");

    let loaded = load_matrix_json(&path).expect("read matrix");
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, original);
}

#[test]
fn matrix_yaml_rejects_fractional_hours() {
    let path = scratch_path("travel_times.yaml");
    std::fs::write(&path, "[[[[1.0, 2.5]]]]\n").expect("write yaml");

    let err = load_matrix_yaml(&path).expect_err("2.5 hours is not whole");
    let _ = std::fs::remove_file(&path);
    assert!(matches!(err, EnvError::Yaml(_)));
}

#[test]
fn ragged_matrix_is_rejected() {
    let err = TravelTimeMatrix::from_nested(&vec![
        vec![vec![vec![1.0, 1.0]], vec![vec![1.0, 1.0]]],
        vec![vec![vec![1.0, 1.0]], vec![vec![1.0]]],
    ])
    .expect_err("last cell is short");
    assert!(matches!(err, EnvError::MatrixShape { .. }));
}

#[test]
fn travel_time_beyond_u32_is_rejected() {
    let err = TravelTimeMatrix::from_nested(&vec![vec![vec![vec![1.0e10]]]])
        .expect_err("1e10 hours does not fit in u32");
    assert!(matches!(err, EnvError::InvalidTravelTime { value, .. } if value == 1.0e10));

    let max = TravelTimeMatrix::from_nested(&vec![vec![vec![vec![f64::from(u32::MAX)]]]])
        .expect("u32::MAX hours is representable");
    assert_eq!(max.travel_time(0, 0, 0, 0).expect("in bounds"), u32::MAX);
}

#[test]
fn empty_destination_row_reports_its_length() {
    let err = TravelTimeMatrix::from_nested(&vec![
        vec![vec![vec![1.0]], vec![vec![1.0]]],
        vec![],
    ])
    .expect_err("second origin has no destinations");
    assert!(matches!(
        err,
        EnvError::MatrixShape {
            expected: (2, 2, 1, 1),
            found: (2, 0, 1, 1)
        }
    ));
}
