use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A command with an empty home, no splash dwell and the given service URL.
fn campusride(home: &TempDir, base_url: &str) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("campusride");
    cmd.env("CAMPUSRIDE_HOME", home.path())
        .env("CAMPUSRIDE_API_URL", base_url)
        .env("CAMPUSRIDE_SPLASH_MS", "0")
        .env_remove("CAMPUSRIDE_LOG");
    cmd
}

#[test]
fn test_boot_reaches_welcome() {
    let home = TempDir::new().unwrap();

    campusride(&home, "http://127.0.0.1:9")
        .args(["boot"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> Reset(Splash)\n-> Reset(Welcome)"))
        .stdout(predicate::str::contains("Ready."));
}

#[tokio::test]
async fn test_login_success_enters_onboard() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"emailOrUsername": "alex", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": {"id": 7}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let home = TempDir::new().unwrap();
    campusride(&home, &mock_server.uri())
        .args(["login", "--identifier", "alex", "--password", "secret1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> Push(Login)"))
        .stdout(predicate::str::contains("-> Replace(OnBoard)"))
        .stdout(predicate::str::contains("Signed in."));
}

#[tokio::test]
async fn test_email_login_sends_email_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let home = TempDir::new().unwrap();
    campusride(&home, &mock_server.uri())
        .args(["login", "--email", "a@b.com", "--password", "secret1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> Replace(OnBoard)"));
}

#[tokio::test]
async fn test_login_rejection_prints_server_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let home = TempDir::new().unwrap();
    campusride(&home, &mock_server.uri())
        .args(["login", "--identifier", "alex", "--password", "secret1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("OnBoard").not())
        .stderr(predicate::str::contains("Invalid credentials"));
}

#[tokio::test]
async fn test_invalid_login_never_calls_service() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let home = TempDir::new().unwrap();
    campusride(&home, &mock_server.uri())
        .args(["login", "--identifier", "", "--password", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Email or Username is required"))
        .stderr(predicate::str::contains(
            "Password must be at least 6 characters",
        ));
}

#[tokio::test]
async fn test_signup_success_enters_onboard() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .and(body_json(
            json!({"username": "alex", "email": "a@b.com", "password": "secret1"}),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let home = TempDir::new().unwrap();
    campusride(&home, &mock_server.uri())
        .args([
            "signup",
            "--username",
            "alex",
            "--email",
            "a@b.com",
            "--password",
            "secret1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("-> Push(Signup)"))
        .stdout(predicate::str::contains("-> Replace(OnBoard)"))
        .stdout(predicate::str::contains("Account created."));
}

#[tokio::test]
async fn test_signup_server_error_without_message_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let home = TempDir::new().unwrap();
    campusride(&home, &mock_server.uri())
        .args([
            "signup",
            "--username",
            "alex",
            "--email",
            "a@b.com",
            "--password",
            "secret1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Internal server error"));
}

#[test]
fn test_unreachable_service_reports_internal_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let home = TempDir::new().unwrap();
    campusride(&home, &format!("http://127.0.0.1:{port}"))
        .args(["login", "--identifier", "alex", "--password", "secret1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Internal server error"));
}

#[test]
fn test_login_requires_exactly_one_account() {
    let home = TempDir::new().unwrap();

    campusride(&home, "http://127.0.0.1:9")
        .args(["login", "--password", "secret1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one of"));
}
