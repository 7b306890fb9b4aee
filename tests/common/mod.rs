//! Shared test utilities for integration tests

#![allow(dead_code)]

use nlquery::{parser, CompiledPredictor, DatasetSnapshot, EngineConfig, Trainset};

/// Dataset id the population fixture is loaded under
pub const POPULATION_ID: i64 = 1;

/// Path of a file in the tests/test_data directory
pub fn fixture_path(name: &str) -> String {
    format!("tests/test_data/{}", name)
}

/// Load a CSV fixture as a snapshot with inferred columns
pub fn load_snapshot(name: &str, id: i64) -> DatasetSnapshot {
    DatasetSnapshot::from_csv_path(id, fixture_path(name), None)
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// The population fixture, under [`POPULATION_ID`]
pub fn population() -> DatasetSnapshot {
    load_snapshot("population.csv", POPULATION_ID)
}

/// Load a trainset fixture
pub fn load_trainset(name: &str) -> Trainset {
    Trainset::from_file(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// Load a config fixture
pub fn load_config(name: &str) -> EngineConfig {
    parser::parse_config_file(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

/// A predictor over the trainset fixture
pub fn predictor(version: &str) -> CompiledPredictor {
    CompiledPredictor::new(version, load_trainset("trainset.json"))
}
