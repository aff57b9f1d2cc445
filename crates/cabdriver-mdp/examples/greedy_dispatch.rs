use std::path::PathBuf;

use cabdriver_mdp::{
    CabDriverEnv, EnvConfig, MatrixShape, TravelTimeMatrix, load_matrix_json, load_matrix_yaml,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

const EPOCHS: usize = 24;

/// Usage: `greedy_dispatch [travel_times.(json|yaml)] [env.yaml]`
fn main() {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let matrix_path = args.next().map(PathBuf::from);
    let config = match args.next() {
        Some(path) => EnvConfig::from_yaml_path(path).expect("failed to load env config"),
        None => EnvConfig::from_default_yaml().expect("bundled config is valid"),
    };
    let shape = MatrixShape::new(config.locations, config.hours_per_day, config.days_per_week);

    let oracle = match matrix_path {
        Some(path) if path.extension().is_some_and(|ext| ext == "json") => {
            load_matrix_json(&path).expect("failed to load travel time JSON")
        }
        Some(path) => load_matrix_yaml(&path).expect("failed to load travel time YAML"),
        None => TravelTimeMatrix::random(shape, 8, &mut ChaCha8Rng::seed_from_u64(7)),
    };
    assert!(
        oracle.covers(shape),
        "travel time matrix shape {:?} does not match config {:?}",
        oracle.shape(),
        shape
    );

    let mut env = CabDriverEnv::new(config, 12345).expect("invalid env config");
    let mut total_reward = 0.0;
    let mut total_hours = 0;

    for epoch in 0..EPOCHS {
        let state = env.current_state();
        let requests = env.requests(state).expect("requests for a valid state");

        let (action, outcome) = requests
            .iter()
            .map(|(_, action)| {
                let outcome = env.step(state, action, &oracle).expect("valid transition");
                (action, outcome)
            })
            .max_by(|(_, a), (_, b)| a.reward.total_cmp(&b.reward))
            .expect("the no-ride action is always offered");

        info!(
            epoch,
            state = %state,
            offered = requests.ride_count(),
            action = %action,
            reward = outcome.reward,
            next_state = %outcome.next_state,
            "greedy dispatch"
        );

        total_reward += outcome.reward;
        total_hours += outcome.total_time;
        env.set_current_state(outcome.next_state)
            .expect("transitions stay inside the state space");
    }

    let encoded = env
        .encode_state(env.current_state())
        .expect("current state is valid");
    println!("final_state={}", env.current_state());
    println!("total_reward={total_reward:.1} total_hours={total_hours}");
    println!("encoded_state={encoded:?}");
}
