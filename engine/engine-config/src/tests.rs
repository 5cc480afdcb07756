//! Tests for the configuration module.

use super::*;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.search.seed, "42");
    assert_eq!(config.search.runs, 4);
    assert_eq!(config.pool.num_workers, 4);
    assert_eq!(config.puzzle.kind, "n-queens");
}

#[test]
fn test_search_defaults() {
    let config = CentralConfig::default();
    assert!((config.search.exploration - std::f64::consts::SQRT_2).abs() < 1e-12);
    assert_eq!(config.search.max_iterations, 200_000);
    assert_eq!(config.search.timeout_secs, 60);
    assert_eq!(config.search.log_interval, 0);
}

#[test]
fn test_puzzle_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.puzzle.size, 8);
    assert_eq!(config.puzzle.target, 100);
    assert_eq!(
        config.puzzle.numbers,
        vec![3, 34, 4, 12, 5, 2, 27, 19, 8, 41]
    );
}

#[test]
fn test_mcsolve_env_overrides() {
    std::env::set_var("MCSOLVE_SEARCH_SEED", "night-run");
    std::env::set_var("MCSOLVE_SEARCH_MAX_ITERATIONS", "7");
    std::env::set_var("MCSOLVE_POOL_NUM_WORKERS", "2");
    std::env::set_var("MCSOLVE_PUZZLE_NUMBERS", "1, 2,3");
    // Unparseable values are ignored
    std::env::set_var("MCSOLVE_SEARCH_RUNS", "many");

    let config = load_config();
    assert_eq!(config.search.seed, "night-run");
    assert_eq!(config.search.max_iterations, 7);
    assert_eq!(config.pool.num_workers, 2);
    assert_eq!(config.puzzle.numbers, vec![1, 2, 3]);
    assert_eq!(config.search.runs, 4);

    std::env::remove_var("MCSOLVE_SEARCH_SEED");
    std::env::remove_var("MCSOLVE_SEARCH_MAX_ITERATIONS");
    std::env::remove_var("MCSOLVE_POOL_NUM_WORKERS");
    std::env::remove_var("MCSOLVE_PUZZLE_NUMBERS");
    std::env::remove_var("MCSOLVE_SEARCH_RUNS");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"

[search]
seed = "alpha"
runs = 16
max_iterations = 0

[puzzle]
kind = "subset-sum"
numbers = [1, 5, 9]
target = 14
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.search.seed, "alpha");
    assert_eq!(config.search.runs, 16);
    assert_eq!(config.search.max_iterations, 0);
    assert_eq!(config.puzzle.kind, "subset-sum");
    assert_eq!(config.puzzle.numbers, vec![1, 5, 9]);
    assert_eq!(config.puzzle.target, 14);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[search]
runs = 2
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.search.runs, 2);
    assert_eq!(config.search.seed, "42"); // Default
    assert_eq!(config.common.log_level, "info"); // Default
    assert_eq!(config.pool.num_workers, 4); // Default
}

#[test]
fn test_load_from_missing_path_falls_back() {
    let config = load_from_path(std::path::Path::new("/nonexistent/mcsolve.toml"));
    assert_eq!(config.puzzle.size, 8);
}

#[test]
fn test_parse_list() {
    use crate::loader::parse_list;

    assert_eq!(parse_list::<u64>("4, 8,15"), Some(vec![4, 8, 15]));
    assert_eq!(parse_list::<u64>("4, x"), None);
}
