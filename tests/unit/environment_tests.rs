use std::collections::BTreeMap;

use rank_bandit_lab::test_utils::fixtures::documents;
use rank_bandit_lab::test_utils::{TestCase, run_table_tests};
use rank_bandit_lab::{ClickModel, EnvironmentSpec};

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn spec(model: ClickModel) -> EnvironmentSpec {
    EnvironmentSpec::new(model)
}

#[test]
fn pbm_first_position_expectation_is_exact() {
    let mut spec = spec(ClickModel::PositionBased);
    spec.position_bias = Some(vec![0.95, 0.8, 0.6]);
    let env = spec
        .build_seeded(documents(&[("sure", 1.0), ("b", 0.4), ("c", 0.2)]), 3, 0)
        .unwrap();
    let expected = env
        .expected_clicks_by_position(&ids(&["sure", "b", "c"]))
        .unwrap();
    assert_eq!(expected[0], 0.95);
    assert!((expected[1] - 0.32).abs() < 1e-12);
    assert!((expected[2] - 0.12).abs() < 1e-12);
}

#[test]
fn expected_reward_matches_closed_forms() -> Result<(), String> {
    let cases = vec![
        TestCase::new("cascade", ClickModel::Cascade, 1.0 - 0.5 * 0.75),
        TestCase::new("pbm unit bias", ClickModel::PositionBased, 0.5 + 0.25),
        // a=0.5,s=0.5 then b: 0.5 + 0.25 * (1 - 0.25)
        TestCase::new("dcm", ClickModel::DependentClick, 0.5 + 0.25 * 0.75),
    ];
    run_table_tests(cases, |model| {
        let env = spec(model)
            .build_seeded(documents(&[("a", 0.5), ("b", 0.25)]), 2, 1)
            .unwrap();
        let value = env.expected_reward(&ids(&["a", "b"])).unwrap();
        (value * 1e9).round() / 1e9
    })
}

#[test]
fn slate_validation_errors() -> Result<(), String> {
    let cases = vec![
        TestCase::new("unknown id", vec!["a", "zzz"], Some("unknown_document")),
        TestCase::new("duplicate", vec!["a", "a"], Some("invalid_slate")),
        TestCase::new("too long", vec!["a", "b", "c"], Some("invalid_slate")),
        TestCase::new("empty", vec![], Some("invalid_slate")),
        TestCase::new("short ok", vec!["b"], None),
    ];
    run_table_tests(cases, |slate: Vec<&str>| {
        let mut env = spec(ClickModel::DependentClick)
            .build_seeded(documents(&[("a", 0.5), ("b", 0.3), ("c", 0.2)]), 2, 3)
            .unwrap();
        env.select_clicks(&ids(&slate)).err().map(|err| err.code())
    })
}

#[test]
fn construction_errors_are_configuration_errors() {
    let docs = || documents(&[("a", 0.5), ("b", 0.3)]);
    assert!(spec(ClickModel::Cascade).build_seeded(docs(), 0, 0).unwrap_err().is_configuration());
    assert!(spec(ClickModel::Cascade).build_seeded(docs(), 3, 0).unwrap_err().is_configuration());

    let mut bad_bias = spec(ClickModel::PositionBased);
    bad_bias.position_bias = Some(vec![0.9]);
    assert!(bad_bias.build_seeded(docs(), 2, 0).unwrap_err().is_configuration());

    let mut bad_satisfaction = spec(ClickModel::DependentClick);
    bad_satisfaction.satisfaction = BTreeMap::from([("ghost".to_string(), 0.5)]);
    assert!(bad_satisfaction.build_seeded(docs(), 2, 0).unwrap_err().is_configuration());
}

#[test]
fn outcomes_respect_stopping_rules() {
    for model in ClickModel::all() {
        let mut env = spec(*model)
            .build_seeded(documents(&[("a", 0.7), ("b", 0.6), ("c", 0.5)]), 3, 9)
            .unwrap();
        let slate = ids(&["a", "b", "c"]);
        for _ in 0..500 {
            let outcome = env.select_clicks(&slate).unwrap();
            assert_eq!(outcome.len(), 3);
            for position in outcome.click_positions() {
                assert!(outcome.examined[position]);
            }
            match model {
                ClickModel::Cascade => {
                    assert!(outcome.click_count() <= 1);
                    if let Some(stop) = outcome.stop_position {
                        assert!(outcome.examined[stop + 1..].iter().all(|e| !e));
                    }
                }
                ClickModel::DependentClick => {
                    if let Some(stop) = outcome.stop_position {
                        assert!(outcome.clicks[stop]);
                        assert!(outcome.clicks[stop + 1..].iter().all(|c| !c));
                    }
                }
                ClickModel::PositionBased => assert!(outcome.stop_position.is_none()),
            }
        }
    }
}

#[test]
fn reseed_replays_the_same_clicks() {
    let mut env = spec(ClickModel::Cascade)
        .build_seeded(documents(&[("a", 0.5), ("b", 0.5)]), 2, 4)
        .unwrap();
    let slate = ids(&["a", "b"]);
    let first: Vec<_> = (0..50).map(|_| env.select_clicks(&slate).unwrap()).collect();
    env.reseed(4);
    let second: Vec<_> = (0..50).map(|_| env.select_clicks(&slate).unwrap()).collect();
    assert_eq!(first, second);
}
