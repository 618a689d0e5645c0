use std::fs;
use std::path::PathBuf;

use rank_bandit_lab::ClickModel;
use rank_bandit_lab::config::Config;
use rank_bandit_lab::settings::{Algorithm, RunSettings};
use rank_bandit_lab::test_utils::{TestCase, run_table_tests};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn load_fixture(relative: &str) -> Config {
    let content = fs::read_to_string(fixture_path(relative)).expect("read fixture");
    Config::from_toml_str(&content).expect("parse config")
}

#[test]
fn config_simulation_from_fixture() -> Result<(), String> {
    let cases = vec![
        TestCase::new(
            "default",
            "tests/fixtures/configs/default.toml",
            (2000usize, 3usize, 7u64, ClickModel::Cascade),
        ),
        TestCase::new(
            "custom",
            "tests/fixtures/configs/custom.toml",
            (300usize, 2usize, 11u64, ClickModel::PositionBased),
        ),
    ];

    run_table_tests(cases, |relative_path| {
        let config = load_fixture(relative_path);
        (
            config.simulation.steps,
            config.simulation.slate_size,
            config.simulation.seed,
            config.simulation.model,
        )
    })
}

#[test]
fn config_policy_and_output_from_fixture() -> Result<(), String> {
    let cases = vec![
        TestCase::new(
            "default",
            "tests/fixtures/configs/default.toml",
            (Algorithm::Epsilon, 0.1f64, 1.0f64, "human".to_string(), None),
        ),
        TestCase::new(
            "custom",
            "tests/fixtures/configs/custom.toml",
            (
                Algorithm::Ucb,
                0.1f64,
                1.5f64,
                "json".to_string(),
                Some(PathBuf::from("/tmp/rbl-logs")),
            ),
        ),
    ];

    run_table_tests(cases, |relative_path| {
        let config = load_fixture(relative_path);
        (
            config.policy.algo,
            config.policy.epsilon,
            config.policy.ucb_confidence,
            config.output.format,
            config.output.log_dir,
        )
    })
}

#[test]
fn settings_follow_config() {
    let config = load_fixture("tests/fixtures/configs/custom.toml");
    let settings = RunSettings::from_config(&config);
    assert_eq!(settings.algo, Algorithm::Ucb);
    assert_eq!(settings.position_bias, Some(vec![0.95, 0.8]));
    assert_eq!(settings.slate_size, 2);

    let defaults = RunSettings::from_config(&load_fixture("tests/fixtures/configs/default.toml"));
    assert_eq!(defaults, RunSettings::default());
}

#[test]
fn invalid_values_are_config_errors() -> Result<(), String> {
    let cases = vec![
        TestCase::new("bad model", "[simulation]\nmodel = \"bandit\"\n", true),
        TestCase::new("bad algo", "[policy]\nalgo = \"greedy\"\n", true),
        TestCase::new("zero slate", "[simulation]\nslate_size = 0\n", true),
        TestCase::new("unknown section", "[plots]\nshow = true\n", true),
        TestCase::new("empty file", "", false),
    ];
    run_table_tests(cases, |raw| {
        Config::from_toml_str(raw).is_err_and(|err| err.is_configuration())
    })
}
