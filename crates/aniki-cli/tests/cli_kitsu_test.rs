#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};

#[test]
fn test_anime_search_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("aniki");
    cmd.args(["anime", "search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"))
        .stdout(predicate::str::contains("--streamers"));
}

#[test]
fn test_manga_list_help_has_no_streamers() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("aniki");
    cmd.args(["manga", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--categories"))
        .stdout(predicate::str::contains("--streamers").not());
}

#[test]
fn test_anime_search_missing_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("aniki");
    cmd.args(["anime", "search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_anime_search_empty_query_is_rejected() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("aniki");
    cmd.args(["anime", "search", "--query", ""])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("`query` in anime find is empty"))
        .stderr(predicate::str::contains("status 400"));
}

#[test]
fn test_anime_show_zero_id_is_rejected() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("aniki");
    cmd.args(["anime", "show", "--id", "0"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("`id` in anime find_by_id is empty"));
}

#[test]
fn test_manga_chapter_non_numeric_id_is_rejected() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("aniki");
    cmd.args(["manga", "chapter", "--id", "first"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "`id` in manga chapters is not a number",
        ));
}

#[test]
fn test_invalid_season_is_rejected() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("aniki");
    cmd.args(["anime", "list", "--season", "autumn"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown Season token"));
}

#[test]
fn test_invalid_year_range_is_rejected() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("aniki");
    cmd.args(["manga", "list", "--year", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--year"));
}

#[test]
fn test_config_init_writes_template() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    let mut cmd = cargo_bin_cmd!("aniki");
    cmd.args(["config", "init"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success();

    // Assert
    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("[kitsu]"));
    assert!(written.contains("https://kitsu.app/api/edge/"));
}

#[test]
fn test_config_init_keeps_existing_file() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[kitsu]\nper_page = 3\n").unwrap();

    // Act
    let mut cmd = cargo_bin_cmd!("aniki");
    cmd.args(["config", "init"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success();

    // Assert
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[kitsu]\nper_page = 3\n"
    );
}

#[test]
fn test_invalid_config_base_url_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[kitsu]\nbase_url = \"not a url\"\n",
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("aniki");
    cmd.args(["anime", "show", "--id", "1"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid kitsu.base_url"));
}

#[test]
fn test_unreachable_server_reports_status_zero() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[kitsu]\nbase_url = \"http://127.0.0.1:1/api/edge/\"\n",
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("aniki");
    cmd.args(["anime", "show", "--id", "40052"])
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("request failed"))
        .stderr(predicate::str::contains("status 0"));
}

#[tokio::test]
async fn test_json_output_keeps_unmodelled_members() {
    // Arrange
    let server = wiremock::MockServer::start().await;
    let body = r#"{"data":{"id":"40052","type":"anime","attributes":{"canonicalTitle":"Oshi no Ko","coverImageBlurhash":"LKO2","subtype":"TV Special"}},"included":[{"id":"1","type":"genres"}]}"#;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::path("/api/edge/anime/40052"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!("[kitsu]\nbase_url = \"{}/api/edge/\"\n", server.uri()),
    )
    .unwrap();
    let dir_path = dir.path().to_path_buf();

    // Act
    let output = tokio::task::spawn_blocking(move || {
        let mut cmd = cargo_bin_cmd!("aniki");
        cmd.args(["--json", "anime", "show", "--id", "40052"])
            .arg("--dir")
            .arg(&dir_path)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    })
    .await
    .unwrap();

    // Assert
    let printed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(printed["included"][0]["type"], "genres");
    assert_eq!(printed["data"]["attributes"]["coverImageBlurhash"], "LKO2");
    assert_eq!(printed["data"]["attributes"]["subtype"], "TV Special");
}
