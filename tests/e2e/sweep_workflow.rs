//! E2E Scenario: sweep over labelled overrides.

use super::fixture::E2EFixture;

#[test]
fn sweep_writes_logs_and_summary() {
    let mut fixture = E2EFixture::new("sweep");

    fixture.log_step("Sweep three configurations over a DCM scenario");
    let json = fixture.run_robot(&[
        "sweep",
        "--scenario",
        "video_streaming",
        "--steps",
        "300",
        "--run",
        "eps:algo=epsilon,epsilon=0.05",
        "--run",
        "ts:algo=thompson",
        "--run",
        "soft:algo=softmax,temperature=0.2,seed=3",
        "--output-dir",
        "out",
        "--summary-json",
        "summary.json",
        "--curves-json",
        "curves.json",
        "--sort-by",
        "reward",
        "--descending",
    ]);

    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    let rewards: Vec<u64> = rows
        .iter()
        .map(|row| row["total_reward"].as_u64().unwrap())
        .collect();
    assert!(rewards.windows(2).all(|w| w[0] >= w[1]));

    fixture.log_step("Check per-run logs");
    for label in ["eps", "ts", "soft"] {
        let log = fixture.read_json(&format!("out/{label}.json"));
        assert_eq!(log["metadata"]["label"], label);
        assert_eq!(log["model"], "dependent_click");
        assert_eq!(log["rounds"].as_array().unwrap().len(), 300);
    }
    let soft = fixture.read_json("out/soft.json");
    assert_eq!(soft["metadata"]["seed"], 3);
    assert_eq!(soft["metadata"]["overrides"]["temperature"], "0.2");

    let curves = fixture.read_json("curves.json");
    assert_eq!(curves.as_array().unwrap().len(), 3);
    assert_eq!(
        curves[0]["distribution"]["doc_ids"][0],
        "thriller-series"
    );
}

#[test]
fn sweep_rejects_unknown_override() {
    let mut fixture = E2EFixture::new("sweep-bad-override");
    fixture.log_step("Run with an unsupported key");
    let output = fixture.run(&["sweep", "--run", "x:gamma=0.1", "--output-dir", "out"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported override"));
    assert!(!fixture.path("out/x.json").exists());
}
