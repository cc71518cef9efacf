#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

const STEUERN: &str = r#"{"CDU":70,"SPD":30,"Grüne":20,"FDP":90,"Linke":10,"AfD":60}"#;
const KLIMA: &str = r#"{"CDU":30,"SPD":70,"Grüne":80,"FDP":10,"Linke":90,"AfD":40}"#;

/// Binary with a clean provider environment.
fn wahlweiser() -> Command {
    let mut cmd = Command::cargo_bin("wahlweiser").unwrap();
    for var in [
        "OPENAI_API_KEY",
        "OPENAI_BASE_URL",
        "WAHLWEISER_PROVIDER",
        "WAHLWEISER_MODEL",
        "WAHLWEISER_TIMEOUT_SECS",
        "WAHLWEISER_NETWORK_POLICY",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn parties_lists_all_six() {
    wahlweiser()
        .arg("parties")
        .assert()
        .success()
        .stdout(predicate::str::contains("CDU"))
        .stdout(predicate::str::contains("Bündnis 90/Die Grünen"))
        .stdout(predicate::str::contains("AfD"));
}

#[test]
fn about_names_the_model() {
    wahlweiser()
        .args(["--model", "gpt-4o-mini", "about"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gpt-4o-mini"))
        .stdout(predicate::str::contains("Github: Wahlweiser/WahlWeiser"));
}

#[test]
fn eval_text_prints_charts_and_aggregate() {
    wahlweiser()
        .args([
            "--provider",
            "fake",
            "--fake-reply",
            STEUERN,
            "--fake-reply",
            KLIMA,
            "eval",
            "Steuern senken",
            "Klimaschutz ausbauen",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("» Steuern senken"))
        .stdout(predicate::str::contains("» Klimaschutz ausbauen"))
        .stdout(predicate::str::contains(
            "Wie gut passen die Aussagen zu den Parteien?",
        ))
        .stderr(predicate::str::contains("Die KI denkt nach..."));
}

#[test]
fn eval_json_reports_mean() {
    let output = wahlweiser()
        .args([
            "--provider",
            "fake",
            "--fake-reply",
            STEUERN,
            "eval",
            "--format",
            "json",
            "Steuern senken",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["results"][0]["status"], "recorded");
    assert_eq!(doc["mean"]["CDU"], 70.0);
    assert_eq!(doc["mean"]["Grüne"], 20.0);
    assert_eq!(doc["failed"], 0);
}

#[test]
fn eval_with_unparseable_reply_exits_one() {
    let output = wahlweiser()
        .args([
            "--provider",
            "fake",
            "--fake-reply",
            STEUERN,
            "--fake-reply",
            r#"{"CDU":50}"#,
            "eval",
            "--format",
            "json",
            "Steuern senken",
            "Rente mit 70",
        ])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["results"][1]["error"]["kind"], "ParseFailure");
    assert_eq!(doc["results"][1]["error"]["raw"], r#"{"CDU":50}"#);
    assert_eq!(doc["ledger"].as_array().unwrap().len(), 1);
    assert_eq!(doc["mean"]["FDP"], 90.0);
}

#[test]
fn missing_api_key_is_config_error() {
    wahlweiser()
        .args(["eval", "Steuern senken"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn unknown_provider_is_config_error() {
    wahlweiser()
        .args(["--provider", "bard", "eval", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown provider"));
}

#[test]
fn chat_over_stdin() {
    wahlweiser()
        .args([
            "--provider",
            "fake",
            "--fake-reply",
            STEUERN,
            "--fake-reply",
            KLIMA,
            "chat",
            "--no-intro",
        ])
        .write_stdin("Steuern senken\nKlimaschutz ausbauen\n/history\n/reset\n/mean\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 Aussagen)"))
        .stdout(predicate::str::contains("Alle Aussagen wurden gelöscht."))
        .stdout(predicate::str::contains("(0 Aussagen)"));
}

#[test]
fn chat_is_the_default_command() {
    wahlweiser()
        .args(["--provider", "fake"])
        .write_stdin("/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("WahlWeiser"));
}
