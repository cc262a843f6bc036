#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::cargo_bin_cmd;
use chrono::{Days, Local};
use predicates::prelude::{PredicateBooleanExt, predicate};

/// Writes a config whose endpoints point at `base`.
fn write_config(dir: &Path, base: &str) {
    let content = format!(
        r#"[epg]
endpoint = "{base}/api/epg.json"

[transport]
timeout_secs = 5

[[calendar.feeds]]
name = "international"
url = "{base}/basic.ics"
"#
    );
    std::fs::write(dir.join("config.toml"), content).unwrap();
}

#[test]
fn test_help_lists_flags() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("rugbyscout");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--days"))
        .stdout(predicate::str::contains("rugbypass"));
}

#[test]
fn test_unknown_command_fails() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("rugbyscout");
    cmd.arg("radio")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_rugbypass_prints_notice() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("rugbyscout");
    cmd.args(["rugbypass", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("next 7 days"))
        .stdout(predicate::str::contains("not yet implemented"));
}

#[test]
fn test_rugbypass_days_override() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("rugbyscout");
    cmd.args(["rugbypass", "-d", "3", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("next 3 days"));
}

#[test]
fn test_tv_without_store_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("rugbyscout");
    cmd.args(["tv", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("channel store not found"));
}

#[test]
fn test_init_db_is_idempotent() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut first = cargo_bin_cmd!("rugbyscout");
    first
        .args(["init-db", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(6 added)"))
        .stdout(predicate::str::contains("Nova Sport 6"));

    let mut second = cargo_bin_cmd!("rugbyscout");
    second
        .args(["init-db", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("(0 added)"));

    assert!(dir.path().join("stations.db").exists());
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_invalid_config_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[days\n").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("rugbyscout");
    cmd.args(["events", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn test_unreachable_sources_degrade_to_empty_reports() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "http://127.0.0.1:9");
    let mut init = cargo_bin_cmd!("rugbyscout");
    init.args(["init-db", "--dir"]).arg(dir.path()).assert().success();

    // Act & Assert
    let mut tv = cargo_bin_cmd!("rugbyscout");
    tv.args(["tv", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No rugby programs found."));

    let mut events = cargo_bin_cmd!("rugbyscout");
    events
        .args(["events", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No upcoming rugby events found."));
}

#[tokio::test]
async fn test_tv_reports_match_from_one_channel() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    let body = format!(
        r#"{{"epg_list":[{{"title":"Rugby World Cup Final","desc":"","start_date":"{today}T14:00:00","end_date":"{today}T16:00:00"}}]}}"#
    );
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/api/epg.json"))
        .and(wiremock::matchers::query_param("channel_id", "6263"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/api/epg.json"))
        .respond_with(wiremock::ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server.uri());
    let mut init = cargo_bin_cmd!("rugbyscout");
    init.args(["init-db", "--dir"]).arg(dir.path()).assert().success();

    // Act & Assert
    let mut tv = cargo_bin_cmd!("rugbyscout");
    tv.args(["tv", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rugby on TV (1 broadcasts)"))
        .stdout(predicate::str::contains("14:00 [Nova Sport 1] Rugby World Cup Final"))
        .stdout(predicate::str::contains("Total: 1 rugby broadcasts!"));
}

#[tokio::test]
async fn test_events_reports_upcoming_fixture() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    let soon = Local::now()
        .date_naive()
        .checked_add_days(Days::new(3))
        .unwrap();
    let later = Local::now()
        .date_naive()
        .checked_add_days(Days::new(60))
        .unwrap();
    let ics = format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\n\
         BEGIN:VEVENT\r\nSUMMARY:All Blacks v Wallabies\r\nDTSTART:{}T193500\r\nLOCATION:Eden Park\\, Auckland\r\nEND:VEVENT\r\n\
         BEGIN:VEVENT\r\nSUMMARY:Far Future Test\r\nDTSTART;VALUE=DATE:{}\r\nEND:VEVENT\r\n\
         END:VCALENDAR\r\n",
        soon.format("%Y%m%d"),
        later.format("%Y%m%d"),
    );
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/basic.ics"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(ics))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server.uri());

    // Act & Assert
    let mut events = cargo_bin_cmd!("rugbyscout");
    events
        .args(["events", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("19:35 All Blacks v Wallabies"))
        .stdout(predicate::str::contains("📍 Eden Park, Auckland"))
        .stdout(predicate::str::contains("Far Future Test").not())
        .stdout(predicate::str::contains("Total: 1 events in next 14 days"));
}
