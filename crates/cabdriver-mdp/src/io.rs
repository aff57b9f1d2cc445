use std::{fs, path::Path};

use crate::{EnvError, TravelTimeMatrix};

/// Load a travel time matrix from a nested JSON array on disk.
pub fn load_matrix_json(path: impl AsRef<Path>) -> Result<TravelTimeMatrix, EnvError> {
    let json = fs::read_to_string(path)?;
    let matrix: TravelTimeMatrix = serde_json::from_str(&json)?;
    Ok(matrix)
}

/// Load a travel time matrix from a nested YAML sequence on disk.
pub fn load_matrix_yaml(path: impl AsRef<Path>) -> Result<TravelTimeMatrix, EnvError> {
    let yaml = fs::read_to_string(path)?;
    let matrix: TravelTimeMatrix = serde_yaml::from_str(&yaml)?;
    Ok(matrix)
}

/// Serialize and write a travel time matrix as JSON.
pub fn save_matrix_json(path: impl AsRef<Path>, matrix: &TravelTimeMatrix) -> Result<(), EnvError> {
    let json = serde_json::to_string(matrix)?;
    fs::write(path, json)?;
    Ok(())
}
