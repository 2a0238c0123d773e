//! Integration tests for the sample service.
//!
//! These bind real sockets. The `PORT` tests launch the compiled binary so
//! the environment path (`.env` + process environment) is exercised as a
//! deployment would use it.
//! Run with: cargo test --test integration

use std::net::TcpListener as StdListener;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use chrono::{DateTime, Utc};
use pretty_assertions::assert_eq;
use sample_app::api::{create_router, AppState};
use sample_app::config::Config;
use sample_app::identity::AppIdentity;
use sample_app::server;
use tokio::sync::oneshot;

/// A running server plus the handle that stops it.
struct TestServer {
    base: String,
    stop: Option<oneshot::Sender<()>>,
}

impl TestServer {
    async fn start(config: Config, static_dir: &std::path::Path) -> Self {
        let listener = server::bind(&config).await.expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = AppState::new(AppIdentity::new("sample-app", "1.0.0"));
        let router = create_router(state, static_dir);

        let (stop, stopped) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = server::serve(listener, router, async move {
                let _ = stopped.await;
            })
            .await;
        });

        Self {
            base: format!("http://127.0.0.1:{port}"),
            stop: Some(stop),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

/// Parse a `3h2m1s`-style uptime back into a duration.
fn parse_uptime(s: &str) -> Duration {
    let mut total = 0u64;
    let mut digits = String::new();
    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let n: u64 = digits.parse().expect("number before unit");
        digits.clear();
        total += match c {
            'h' => n * 3600,
            'm' => n * 60,
            's' => n,
            other => panic!("unexpected unit {other:?} in {s}"),
        };
    }
    assert!(digits.is_empty(), "trailing digits in {s}");
    Duration::from_secs(total)
}

#[test]
fn parse_uptime_understands_compound_values() {
    assert_eq!(parse_uptime("0s"), Duration::ZERO);
    assert_eq!(parse_uptime("3h2m1s"), Duration::from_secs(10921));
}

const BIN: &str = env!("CARGO_BIN_EXE_sample-app");

/// Child process that is killed when the test ends.
struct RunningBinary(Child);

impl Drop for RunningBinary {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

/// Launch the binary with `PORT` set, from an empty working directory.
fn launch(port: &str, workdir: &std::path::Path) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.env("PORT", port)
        .current_dir(workdir)
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    cmd
}

/// An ephemeral port that was free a moment ago.
fn free_port() -> u16 {
    StdListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[tokio::test]
async fn port_env_selects_listen_port() {
    let port = free_port();
    let dir = tempfile::tempdir().unwrap();
    let _child = RunningBinary(launch(&port.to_string(), dir.path()).spawn().unwrap());

    let url = format!("http://127.0.0.1:{port}/health");
    let mut last_err = None;
    for _ in 0..100 {
        match reqwest::get(&url).await {
            Ok(response) => {
                assert_eq!(response.status(), reqwest::StatusCode::OK);
                let body: serde_json::Value = response.json().await.unwrap();
                assert_eq!(body["status"], "healthy");
                return;
            }
            Err(e) => last_err = Some(e),
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("binary never listened on PORT={port}: {last_err:?}");
}

#[test]
fn port_already_in_use_is_fatal() {
    let taken = StdListener::bind("0.0.0.0:0").unwrap();
    let port = taken.local_addr().unwrap().port();
    let dir = tempfile::tempdir().unwrap();

    let status = launch(&port.to_string(), dir.path()).status().unwrap();
    assert!(!status.success());
}

#[test]
fn invalid_port_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let status = launch("not-a-port", dir.path()).status().unwrap();
    assert!(!status.success());
}

#[tokio::test]
async fn config_port_binds_that_port() {
    let port = free_port();
    let config = Config::from_vars([("PORT", port.to_string())]).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(config, dir.path()).await;
    assert!(server.base.ends_with(&format!(":{port}")));

    let response = reqwest::get(server.url("/health")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn probes_report_current_time() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(Config { port: 0 }, dir.path()).await;

    for (path, status) in [("/health", "healthy"), ("/ready", "ready")] {
        let sent = Utc::now();
        let response = reqwest::get(server.url(path)).await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(
            response.headers()[reqwest::header::CONTENT_TYPE],
            "application/json"
        );

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], status);
        let time = DateTime::parse_from_rfc3339(body["time"].as_str().unwrap())
            .unwrap()
            .with_timezone(&Utc);
        assert!(time >= sent - chrono::Duration::seconds(2));
    }
}

#[tokio::test]
async fn info_uptime_is_monotonic() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(Config { port: 0 }, dir.path()).await;

    let mut last = Duration::ZERO;
    for _ in 0..3 {
        let body: serde_json::Value = reqwest::get(server.url("/info"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let uptime = parse_uptime(body["uptime"].as_str().unwrap());
        assert!(uptime >= last);
        last = uptime;
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
}

#[tokio::test]
async fn status_lists_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(Config { port: 0 }, dir.path()).await;

    let body: serde_json::Value = reqwest::get(server.url("/api/status"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        body["endpoints"],
        serde_json::json!(["/health", "/ready", "/info", "/api/status"])
    );
}

#[tokio::test]
async fn home_page_contains_name_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let server = TestServer::start(Config { port: 0 }, dir.path()).await;

    let response = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("sample-app"));
    assert!(html.contains("1.0.0"));
}

#[tokio::test]
async fn static_files_are_served_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let payload: &[u8] = b"body { color: #333; }\n\x00\xff";
    std::fs::write(dir.path().join("site.css"), payload).unwrap();
    std::fs::create_dir(dir.path().join("img")).unwrap();
    std::fs::write(dir.path().join("img").join("logo.txt"), b"logo").unwrap();

    let server = TestServer::start(Config { port: 0 }, dir.path()).await;

    let response = reqwest::get(server.url("/static/site.css")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.bytes().await.unwrap().as_ref(), payload);

    let response = reqwest::get(server.url("/static/img/logo.txt")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "logo");

    let response = reqwest::get(server.url("/static/missing.css")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn static_files_cannot_escape_root() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(root.path().join("secret.txt"), b"secret").unwrap();
    let public = root.path().join("public");
    std::fs::create_dir(&public).unwrap();

    let server = TestServer::start(Config { port: 0 }, &public).await;

    let response = reqwest::get(server.url("/static/..%2Fsecret.txt")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}
