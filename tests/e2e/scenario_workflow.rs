//! E2E Scenario: built-in and file-based scenarios.

use super::fixture::E2EFixture;

#[test]
fn every_builtin_scenario_runs() {
    let mut fixture = E2EFixture::new("builtin-scenarios");
    fixture.log_step("List scenarios");
    let listed = fixture.run_robot(&["scenarios", "list"]);
    let names: Vec<String> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names.len(), 4);

    for name in &names {
        fixture.log_step(&format!("Run {name}"));
        let json = fixture.run_robot(&["run", "--scenario", name, "--steps", "100", "--algo", "ucb"]);
        assert_eq!(json["data"]["summary"]["rounds"], 100);
        assert!(!json["data"]["optimal_slate"].as_array().unwrap().is_empty());
    }
}

#[test]
fn show_prints_documents() {
    let fixture = E2EFixture::new("scenario-show");
    let output = fixture.run(&["scenarios", "show", "ecommerce_longtail"]);
    fixture.assert_success(&output, "scenarios show");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sku-headphones"));
    assert!(stdout.contains("position_based"));
}

#[test]
fn scenario_file_path_is_accepted() {
    let mut fixture = E2EFixture::new("scenario-file");
    fixture.log_step("Write a custom PBM scenario");
    fixture.write_file(
        "custom.json",
        r#"{
            "model": "position",
            "slate_size": 2,
            "position_bias": [0.9, 0.4],
            "documents": [
                {"doc_id": "left", "attraction": 0.5},
                {"doc_id": "right", "attraction": 0.3},
                {"doc_id": "down", "attraction": 0.1}
            ]
        }"#,
    );
    fixture.log_step("Run it");
    let json = fixture.run_robot(&["run", "--scenario", "custom.json", "--steps", "80"]);
    assert_eq!(json["data"]["settings"]["model"], "position_based");
    assert_eq!(json["data"]["settings"]["slate_size"], 2);
    assert_eq!(
        json["data"]["optimal_slate"],
        serde_json::json!(["left", "right"])
    );
}
