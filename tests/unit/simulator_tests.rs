use std::collections::BTreeSet;

use rank_bandit_lab::policy::{Policy, PolicyConfig};
use rank_bandit_lab::settings::{Algorithm, RunSettings};
use rank_bandit_lab::test_utils::fixtures::documents;
use rank_bandit_lab::{ClickModel, EnvironmentSpec, Oracle, Simulator, SimulatorState};

fn simulator(model: ClickModel, config: PolicyConfig, docs: &[(&str, f64)], slate_size: usize, seed: u64) -> Simulator {
    let env = EnvironmentSpec::new(model)
        .build_seeded(documents(docs), slate_size, seed)
        .unwrap();
    let policy = Policy::seeded(config, &env.doc_ids(), slate_size, seed + 1).unwrap();
    Simulator::new(env, policy)
}

#[test]
fn epsilon_greedy_cascade_regression() {
    let docs = [("a", 0.35), ("b", 0.25), ("c", 0.10)];
    let config = PolicyConfig::EpsilonGreedy { epsilon: 0.1 };
    let first = simulator(ClickModel::Cascade, config, &docs, 2, 0).run(1000).unwrap();
    let second = simulator(ClickModel::Cascade, config, &docs, 2, 0).run(1000).unwrap();

    assert_eq!(first.summary(), second.summary());
    assert_eq!(first.records(), second.records());

    // Optimal slate [a, b] expects 0.5125 clicks per round; the worst pair 0.325.
    let total = first.total_reward();
    assert!((380..=620).contains(&total), "total reward {total}");
    assert_eq!(total, 504);
    assert_eq!(first.optimal_slate(), ["a".to_string(), "b".to_string()]);
}

#[test]
fn ucb_examines_every_candidate_within_first_rounds() {
    let docs = [
        ("a", 0.6),
        ("b", 0.5),
        ("c", 0.4),
        ("d", 0.3),
        ("e", 0.2),
        ("f", 0.1),
    ];
    let mut sim = simulator(
        ClickModel::Cascade,
        PolicyConfig::Ucb1 { confidence: 1.5 },
        &docs,
        3,
        5,
    );
    let log = sim.run(3000).unwrap();

    let mut examined = BTreeSet::new();
    for record in &log.records()[..docs.len()] {
        for doc_id in record.clicks.examined_doc_ids(&record.slate) {
            examined.insert(doc_id.to_string());
        }
    }
    assert_eq!(examined.len(), docs.len());
}

#[test]
fn regret_uses_expectation_not_realized_clicks() {
    let docs = [("a", 0.6), ("b", 0.3), ("c", 0.2), ("d", 0.1)];
    for model in ClickModel::all() {
        let mut sim = simulator(
            *model,
            PolicyConfig::Softmax { temperature: 0.5 },
            &docs,
            2,
            13,
        );
        let log = sim.run(300).unwrap();
        let oracle = Oracle::for_environment(sim.environment()).unwrap();
        assert_eq!(log.optimal_reward(), oracle.expected_reward);

        let mut running = 0.0;
        for record in log.records() {
            let (expected, regret) = oracle.regret(sim.environment(), &record.slate).unwrap();
            assert_eq!(record.expected_reward, expected);
            assert_eq!(record.instantaneous_regret, regret);
            assert!(regret >= 0.0);
            running += regret;
            assert!((record.cumulative_regret - running).abs() < 1e-9);
        }
    }
}

#[test]
fn oracle_slate_has_zero_regret() {
    let docs = [("a", 0.2), ("b", 0.7), ("c", 0.4)];
    let mut spec = EnvironmentSpec::new(ClickModel::PositionBased);
    spec.position_bias = Some(vec![1.0, 0.5]);
    let env = spec.build_seeded(documents(&docs), 2, 0).unwrap();
    let oracle = Oracle::for_environment(&env).unwrap();
    assert_eq!(oracle.slate, vec!["b".to_string(), "c".to_string()]);
    let (_, regret) = oracle.regret(&env, &oracle.slate).unwrap();
    assert_eq!(regret, 0.0);
}

#[test]
fn state_machine_transitions() {
    let mut settings = RunSettings::default();
    settings.algo = Algorithm::Ucb;
    let mut sim = settings
        .build_simulator(documents(&[("a", 0.5), ("b", 0.4), ("c", 0.3)]))
        .unwrap();
    assert_eq!(sim.state(), SimulatorState::Idle);
    sim.run(10).unwrap();
    assert_eq!(sim.state(), SimulatorState::Completed);
    let err = sim.run(10).unwrap_err();
    assert!(err.is_usage());
    assert_eq!(sim.state(), SimulatorState::Completed);
}

#[test]
fn summary_total_reward_equals_recorded_clicks() {
    let docs = [("a", 0.8), ("b", 0.7), ("c", 0.6)];
    let mut sim = simulator(
        ClickModel::DependentClick,
        PolicyConfig::Thompson {
            alpha_prior: 1.0,
            beta_prior: 1.0,
        },
        &docs,
        3,
        21,
    );
    let log = sim.run(400).unwrap();
    let clicks: u64 = log
        .records()
        .iter()
        .map(|r| r.clicks.click_positions().len() as u64)
        .sum();
    let summary = log.summary();
    assert_eq!(summary.total_reward, clicks);
    assert_eq!(summary.click_counts.values().sum::<u64>(), clicks);
    assert!(summary.ctr > 0.0);
}
