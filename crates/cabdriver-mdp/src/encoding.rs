use crate::{Action, EnvConfig, EnvError, State};

/// One-hot encode a state as `[location | hour | day]`, length `m + t + d`.
pub fn encode_state(config: &EnvConfig, state: State) -> Result<Vec<f32>, EnvError> {
    if !state.is_within(config) {
        return Err(EnvError::InvalidState { state });
    }

    let m = config.locations;
    let t = config.hours_per_day;

    let mut encoded = vec![0.0; config.state_encoding_len()];
    encoded[state.location] = 1.0;
    encoded[m + state.hour] = 1.0;
    encoded[m + t + state.day] = 1.0;
    Ok(encoded)
}

/// One-hot encode a state-action pair as `[location | hour | day | pickup | drop]`,
/// length `m + t + d + m + m`.
///
/// The no-ride sentinel leaves both action segments zero.
pub fn encode_state_action(
    config: &EnvConfig,
    state: State,
    action: Action,
) -> Result<Vec<f32>, EnvError> {
    if !action.is_within(config) {
        return Err(EnvError::InvalidAction { action });
    }

    let m = config.locations;
    let mut encoded = encode_state(config, state)?;
    let offset = encoded.len();
    encoded.resize(offset + 2 * m, 0.0);

    if !action.is_no_ride() {
        encoded[offset + action.pickup] = 1.0;
        encoded[offset + m + action.drop] = 1.0;
    }
    Ok(encoded)
}
