use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    let config = serde_json::json!({
        "cache_dir": dir.path().join("pdfs"),
        "output_dir": dir.path(),
    });
    std::fs::write(&path, config.to_string()).unwrap();
    path
}

#[test]
fn test_unknown_company_lists_known_keys() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    Command::cargo_bin("lendscope")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("nosuchco")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown company 'nosuchco'"))
        .stderr(predicate::str::contains("poonawalla"))
        .stderr(predicate::str::contains("mahindra"));

    assert!(!dir.path().join("nosuchco.json").exists());
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"quarters_to_fetch": 0}"#).unwrap();

    Command::cargo_bin("lendscope")
        .unwrap()
        .arg("-c")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("quarters_to_fetch"));
}

#[test]
fn test_help_mentions_company_argument() {
    Command::cargo_bin("lendscope")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("COMPANY"));
}
