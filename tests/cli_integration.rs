//! ai-writer 바이너리 통합 테스트.
//!
//! 환경변수를 비운 상태에서 실행해 사용자 설정/.env의 영향을 받지 않게 한다.

mod support;

use std::fs;
use std::path::Path;

use predicates::prelude::*;
use tempfile::TempDir;

use support::StubServer;

fn ai_writer(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("ai-writer"));
    cmd.env_clear()
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .current_dir(home);
    cmd
}

fn write_post(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("post.md");
    fs::write(&path, "# CLI Title\n\nBody from the command line").unwrap();
    path
}

// =============================================================================
// platforms
// =============================================================================

#[test]
fn platforms_lists_missing_variables() {
    let dir = TempDir::new().unwrap();

    ai_writer(dir.path())
        .arg("platforms")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"wordpress\""))
        .stdout(predicate::str::contains("WP_SITE_URL"))
        .stdout(predicate::str::contains("\"configured\": false"));
}

#[test]
fn platforms_never_prints_secrets() {
    let dir = TempDir::new().unwrap();

    ai_writer(dir.path())
        .arg("platforms")
        .env("JUEJIN_COOKIE", "super-secret-cookie")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"juejin\""))
        .stdout(predicate::str::contains("super-secret-cookie").not());
}

// =============================================================================
// batch
// =============================================================================

#[test]
fn batch_missing_directory_fails() {
    let dir = TempDir::new().unwrap();

    ai_writer(dir.path())
        .args(["batch", "no-such-dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read directory"));
}

#[test]
fn batch_reports_progress_and_failed_count() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes");
    fs::create_dir(&notes).unwrap();
    fs::write(notes.join("one.txt"), "first note").unwrap();
    fs::write(notes.join("two.md"), "second note").unwrap();
    fs::write(notes.join("skip.png"), "binary").unwrap();

    ai_writer(dir.path())
        .env("MODEL_PROVIDER", "deepseek")
        .args(["batch", "notes"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1/2 one.txt"))
        .stdout(predicate::str::contains("2/2 two.md"))
        .stdout(predicate::str::contains("no model provider available"))
        .stdout(predicate::str::contains("0/2 succeeded"));
}

// =============================================================================
// publish
// =============================================================================

#[test]
fn publish_without_config_prints_empty_json() {
    let dir = TempDir::new().unwrap();
    let post = write_post(&dir);

    ai_writer(dir.path())
        .arg("publish")
        .arg(&post)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}

#[test]
fn publish_manual_platform_returns_copy_content() {
    let dir = TempDir::new().unwrap();
    let post = write_post(&dir);

    ai_writer(dir.path())
        .env("PUBLISH_MANUAL_PLATFORMS", "zhihu")
        .arg("publish")
        .arg(&post)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"platform\": \"知乎\""))
        .stdout(predicate::str::contains("\"copyContent\""))
        .stdout(predicate::str::contains("Body from the command line"));
}

#[test]
fn publish_to_inactive_platform_fails() {
    let dir = TempDir::new().unwrap();
    let post = write_post(&dir);

    ai_writer(dir.path())
        .arg("publish")
        .arg(&post)
        .args(["--platform", "wordpress"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured or not supported"));
}

#[test]
fn publish_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    ai_writer(dir.path())
        .args(["publish", "does-not-exist.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn publish_rejects_unknown_status() {
    let dir = TempDir::new().unwrap();
    let post = write_post(&dir);

    ai_writer(dir.path())
        .arg("publish")
        .arg(&post)
        .args(["--status", "later"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown publish status"));
}

#[tokio::test(flavor = "multi_thread")]
async fn publish_to_wordpress_end_to_end() {
    let server = StubServer::start(&[(
        "/wp-json/wp/v2/posts",
        201,
        r#"{"link":"https://x/1","id":1}"#,
    )])
    .await;
    let dir = TempDir::new().unwrap();
    let post = write_post(&dir);
    let site = server.url();

    let assert = tokio::task::spawn_blocking(move || {
        ai_writer(dir.path())
            .env("WP_SITE_URL", &site)
            .env("WP_USERNAME", "editor")
            .env("WP_PASSWORD", "app pass")
            .arg("publish")
            .arg(&post)
            .arg("--json")
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("\"url\": \"https://x/1\""))
        .stdout(predicate::str::contains("\"id\": \"1\""))
        .stdout(predicate::str::contains("\"message\": \"saved as draft\""));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].json()["title"], "CLI Title");
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_platform_sets_exit_code() {
    let server = StubServer::start(&[(
        "/wp-json/wp/v2/posts",
        403,
        r#"{"message":"forbidden"}"#,
    )])
    .await;
    let dir = TempDir::new().unwrap();
    let post = write_post(&dir);
    let site = server.url();

    let assert = tokio::task::spawn_blocking(move || {
        ai_writer(dir.path())
            .env("WP_SITE_URL", &site)
            .env("WP_USERNAME", "editor")
            .env("WP_PASSWORD", "app pass")
            .arg("publish")
            .arg(&post)
            .assert()
    })
    .await
    .unwrap();

    assert
        .code(1)
        .stdout(predicate::str::contains("forbidden"));
}
