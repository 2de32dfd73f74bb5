use std::path::Path;

use assert_cmd::Command;
use predicates::str::contains;

fn cmd(config_dir: &Path) -> Command {
    let config = config_dir.join("config.toml");
    std::fs::write(&config, "").unwrap();
    let mut cmd = Command::cargo_bin("esg-rater").unwrap();
    cmd.current_dir(config_dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn score_inline_text_json() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["score", "--text", "Renewable energy cuts carbon emission", "--report", "json"])
        .assert()
        .success()
        .stdout(contains("\"environment\": 4"))
        .stdout(contains("\"rating\": \"Low\""));
}

#[test]
fn score_terminal_summary() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["score", "--text", "community health", "--quiet"])
        .assert()
        .success()
        .stdout(contains("Documents: 1"));
}

#[test]
fn score_fail_below_sets_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["score", "--text", "audit", "--fail-below", "medium", "-q"])
        .assert()
        .code(1);

    let text = "carbon ".repeat(200);
    cmd(dir.path())
        .args(["score", "--text", &text, "--fail-below", "medium", "-q"])
        .assert()
        .success();
}

#[test]
fn score_requires_input() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .arg("score")
        .assert()
        .failure()
        .stderr(contains("Nothing to score"));
}

#[test]
fn score_directory_of_text_files() {
    let dir = tempfile::tempdir().unwrap();
    let docs = dir.path().join("ideas");
    std::fs::create_dir(&docs).unwrap();
    std::fs::write(docs.join("solar.txt"), "solar energy and waste reduction").unwrap();
    std::fs::write(docs.join("school.txt"), "education for the community").unwrap();

    cmd(dir.path())
        .args(["score", "ideas", "--report", "json"])
        .assert()
        .success()
        .stdout(contains("\"name\": \"solar.txt\""))
        .stdout(contains("\"name\": \"school.txt\""));
}

#[test]
fn dataset_then_label() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ideas.csv");
    std::fs::write(
        &input,
        "name,text\nfarm,carbon climate job\nbank,audit policy ethics\n",
    )
    .unwrap();

    cmd(dir.path())
        .args(["dataset", "ideas.csv", "-o", "features.csv"])
        .assert()
        .success();

    let features = std::fs::read_to_string(dir.path().join("features.csv")).unwrap();
    assert!(features.starts_with("document,source,env_score,soc_score,gov_score"));
    assert!(!features.contains("total_esg"));

    cmd(dir.path())
        .args(["label", "features.csv"])
        .assert()
        .success()
        .stdout(contains("farm"));

    let labeled = std::fs::read_to_string(dir.path().join("features.csv")).unwrap();
    assert!(labeled.contains("total_esg"));
    assert!(labeled.contains("sustainability_label"));
    assert!(labeled.contains("Low"));
}

#[test]
fn label_quiet_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("features.csv"),
        "document,env_score,soc_score,gov_score\na.txt,1,2,3\n",
    )
    .unwrap();

    cmd(dir.path())
        .args(["label", "features.csv", "-q"])
        .assert()
        .success()
        .stdout("")
        .stderr("");

    let labeled = std::fs::read_to_string(dir.path().join("features.csv")).unwrap();
    assert!(labeled.contains("a.txt,1,2,3,6,Low"));
}

#[test]
fn validate_seeded_summary() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["validate", "--seed", "7", "--mock", "3", "-q"])
        .assert()
        .success()
        .stdout(contains("Scenarios: 8"));
}

#[test]
fn validate_export_writes_json() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .args(["validate", "--seed", "1", "--mock", "2", "-q", "--export", "results.json"])
        .assert()
        .success();

    let json = std::fs::read_to_string(dir.path().join("results.json")).unwrap();
    assert!(json.contains("\"test_timestamp\""));
    assert!(json.contains("\"real_world_scenarios\""));
    assert!(json.contains("\"edge_cases\""));
}

#[test]
fn explain_requires_idea() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path()).arg("explain").assert().failure();
}

#[test]
fn bad_keyword_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[keywords]\neconomic = [\"profit\"]\n").unwrap();

    Command::cargo_bin("esg-rater")
        .unwrap()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .args(["score", "--text", "carbon"])
        .assert()
        .failure()
        .stderr(contains("economic"));
}
