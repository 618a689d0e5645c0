use std::collections::HashMap;

use rank_bandit_lab::policy::{Policy, PolicyConfig};
use rank_bandit_lab::test_utils::{TestCase, run_table_tests};
use rank_bandit_lab::ClickOutcome;

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("d{i}")).collect()
}

fn all_configs() -> Vec<PolicyConfig> {
    vec![
        PolicyConfig::EpsilonGreedy { epsilon: 0.2 },
        PolicyConfig::Ucb1 { confidence: 1.0 },
        PolicyConfig::Thompson {
            alpha_prior: 1.0,
            beta_prior: 1.0,
        },
        PolicyConfig::Softmax { temperature: 0.2 },
    ]
}

#[test]
fn slates_have_requested_length_and_no_duplicates() {
    for config in all_configs() {
        let candidates = ids(6);
        let mut policy = Policy::seeded(config, &candidates, 4, 3).unwrap();
        for round in 0..200 {
            let slate = policy.next_slate().unwrap();
            assert_eq!(slate.len(), 4, "{config}");
            let mut unique = slate.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 4, "{config}");
            let outcome = ClickOutcome {
                clicks: vec![round % 3 == 0, false, false, false],
                examined: vec![true; 4],
                stop_position: None,
            };
            policy.update(&slate, &outcome).unwrap();
        }
    }
}

#[test]
fn invalid_hyperparameters_are_rejected() -> Result<(), String> {
    let cases = vec![
        TestCase::new("epsilon above one", PolicyConfig::EpsilonGreedy { epsilon: 1.2 }, true),
        TestCase::new("epsilon nan", PolicyConfig::EpsilonGreedy { epsilon: f64::NAN }, true),
        TestCase::new("negative confidence", PolicyConfig::Ucb1 { confidence: -1.0 }, true),
        TestCase::new(
            "zero prior",
            PolicyConfig::Thompson {
                alpha_prior: 0.0,
                beta_prior: 1.0,
            },
            true,
        ),
        TestCase::new("negative temperature", PolicyConfig::Softmax { temperature: -0.1 }, true),
        TestCase::new("zero temperature", PolicyConfig::Softmax { temperature: 0.0 }, false),
        TestCase::new("pure exploration", PolicyConfig::EpsilonGreedy { epsilon: 1.0 }, false),
    ];
    run_table_tests(cases, |config| Policy::seeded(config, &ids(3), 2, 0).is_err())
}

#[test]
fn candidate_errors() {
    let config = PolicyConfig::Ucb1 { confidence: 1.0 };
    assert!(Policy::seeded(config, &[], 1, 0).unwrap_err().is_usage());
    assert!(Policy::seeded(config, &ids(2), 3, 0).unwrap_err().is_configuration());
    assert!(Policy::seeded(config, &ids(2), 0, 0).unwrap_err().is_configuration());
    let dup = vec!["a".to_string(), "a".to_string()];
    assert!(Policy::seeded(config, &dup, 1, 0).unwrap_err().is_configuration());
}

#[test]
fn thompson_prior_is_uniform_before_any_observation() {
    let candidates = ids(4);
    let config = PolicyConfig::Thompson {
        alpha_prior: 1.0,
        beta_prior: 1.0,
    };
    let trials = 4000u64;
    let mut first_counts: HashMap<String, u64> = HashMap::new();
    for seed in 0..trials {
        let mut policy = Policy::seeded(config, &candidates, 1, seed).unwrap();
        let slate = policy.next_slate().unwrap();
        *first_counts.entry(slate[0].clone()).or_default() += 1;
    }
    for id in &candidates {
        let count = first_counts.get(id).copied().unwrap_or(0);
        assert!((850..=1150).contains(&count), "{id}: {count}");
    }
}

#[test]
fn updates_touch_only_examined_documents() {
    let candidates = ids(3);
    let mut policy =
        Policy::seeded(PolicyConfig::EpsilonGreedy { epsilon: 0.0 }, &candidates, 3, 0).unwrap();
    let slate = candidates.clone();
    let outcome = ClickOutcome {
        clicks: vec![false, true, false],
        examined: vec![true, true, false],
        stop_position: Some(1),
    };
    policy.update(&slate, &outcome).unwrap();
    let stats = policy.statistics();
    assert_eq!(stats.get("d0").shown, 1);
    assert_eq!(stats.get("d1").clicks, 1);
    assert_eq!(stats.get("d2").shown, 0);
    assert_eq!(stats.rounds(), 1);

    let exploit = policy.next_slate().unwrap();
    assert_eq!(exploit[0], "d1");
}

#[test]
fn mismatched_outcome_length_is_rejected() {
    let mut policy = Policy::seeded(PolicyConfig::Ucb1 { confidence: 1.0 }, &ids(3), 2, 0).unwrap();
    let outcome = ClickOutcome {
        clicks: vec![true],
        examined: vec![true],
        stop_position: Some(0),
    };
    assert!(policy.update(&ids(2), &outcome).is_err());
}
