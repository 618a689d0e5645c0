use proptest::prelude::*;

use rank_bandit_lab::settings::{Algorithm, RunSettings};
use rank_bandit_lab::test_utils::fixtures::default_documents;
use rank_bandit_lab::ClickModel;

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::all().to_vec())
}

fn model() -> impl Strategy<Value = ClickModel> {
    prop::sample::select(ClickModel::all().to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn same_seed_same_log(seed in any::<u64>(), algo in algorithm(), model in model()) {
        let settings = RunSettings {
            algo,
            model,
            seed,
            steps: 60,
            ..RunSettings::default()
        };
        let first = settings.build_simulator(default_documents()).unwrap().run(settings.steps).unwrap();
        let second = settings.build_simulator(default_documents()).unwrap().run(settings.steps).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn summary_survives_json_roundtrip(seed in any::<u64>(), model in model()) {
        let settings = RunSettings { model, seed, steps: 40, ..RunSettings::default() };
        let log = settings.build_simulator(default_documents()).unwrap().run(settings.steps).unwrap();
        let json = serde_json::to_string(&log.summary()).unwrap();
        let back: rank_bandit_lab::Summary = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, log.summary());
    }
}
