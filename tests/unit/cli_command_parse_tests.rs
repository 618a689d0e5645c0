use clap::Parser;
use rank_bandit_lab::ClickModel;
use rank_bandit_lab::cli::{Cli, Commands};
use rank_bandit_lab::compare::SortKey;
use rank_bandit_lab::settings::Algorithm;
use rank_bandit_lab::test_utils::{TestCase, run_table_tests};

#[test]
fn run_flags_parse() {
    let cli = Cli::try_parse_from([
        "rbl",
        "run",
        "--algo",
        "thompson",
        "--model",
        "dcm",
        "--doc",
        "a=0.4",
        "--doc",
        "b=0.2",
        "--slate-size",
        "2",
        "--position-bias",
        "0.9,0.5",
        "--doc-satisfaction",
        "a=0.7",
        "--log-json",
        "out.json",
    ])
    .unwrap();
    let Commands::Run(args) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.simulation.algo, Some(Algorithm::Thompson));
    assert_eq!(args.simulation.model, Some(ClickModel::DependentClick));
    assert_eq!(args.simulation.docs, vec!["a=0.4", "b=0.2"]);
    assert_eq!(args.simulation.position_bias, vec![0.9, 0.5]);
    assert_eq!(args.simulation.doc_satisfaction, vec!["a=0.7"]);
    assert!(args.log_json.is_some());
}

#[test]
fn sweep_requires_run_specs() {
    assert!(Cli::try_parse_from(["rbl", "sweep"]).is_err());
    let cli = Cli::try_parse_from([
        "rbl",
        "sweep",
        "--run",
        "a:algo=ucb",
        "--run",
        "b:algo=softmax,temperature=0.3",
        "--sort-by",
        "regret",
        "--descending",
    ])
    .unwrap();
    let Commands::Sweep(args) = cli.command else {
        panic!("expected sweep command");
    };
    assert_eq!(args.runs.len(), 2);
    assert_eq!(args.sort_by, SortKey::Regret);
    assert!(args.descending);
}

#[test]
fn command_lines_parse_or_fail() -> Result<(), String> {
    let cases = vec![
        TestCase::new("run defaults", vec!["rbl", "run"], true),
        TestCase::new("bad algo", vec!["rbl", "run", "--algo", "greedy"], false),
        TestCase::new("bad model", vec!["rbl", "run", "--model", "grid"], false),
        TestCase::new("compare needs logs", vec!["rbl", "compare"], false),
        TestCase::new("compare two", vec!["rbl", "compare", "a.json", "b.json"], true),
        TestCase::new("bad sort key", vec!["rbl", "compare", "a.json", "--sort-by", "x"], false),
        TestCase::new("scenarios list", vec!["rbl", "scenarios", "list"], true),
        TestCase::new("scenarios show", vec!["rbl", "scenarios", "show", "news_headlines"], true),
        TestCase::new("robot global", vec!["rbl", "--robot", "run"], true),
    ];
    run_table_tests(cases, |argv| Cli::try_parse_from(argv).is_ok())
}
