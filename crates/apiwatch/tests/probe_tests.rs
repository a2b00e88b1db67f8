//! Probe classification against real HTTP servers

use std::time::Duration;

use apiwatch::{Monitor, MonitorSettings, ProbeStatus};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(timeout: Duration) -> MonitorSettings {
    MonitorSettings::builder()
        .interval(Duration::from_secs(60))
        .probe_timeout(timeout)
        .user_agent("apiwatch-test/1.0")
        .build()
}

async fn serve(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_status_200_is_up() {
    let server = serve(200).await;
    let monitor = Monitor::new(settings(Duration::from_secs(5))).unwrap();
    let endpoint = monitor.add_endpoint(&format!("{}/health", server.uri()), None).await.unwrap();

    monitor.run_round().await;

    let history = monitor.history(endpoint.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, ProbeStatus::Up);
    assert_eq!(history[0].http_code, Some(200));
    assert!(history[0].latency_ms.is_some());
    assert!(history[0].error.is_none());
}

#[tokio::test]
async fn test_status_404_is_warning() {
    let server = serve(404).await;
    let monitor = Monitor::new(settings(Duration::from_secs(5))).unwrap();
    let endpoint = monitor.add_endpoint(&format!("{}/health", server.uri()), None).await.unwrap();

    monitor.run_round().await;

    let record = &monitor.history(endpoint.id).await.unwrap()[0];
    assert_eq!(record.status, ProbeStatus::Warning);
    assert_eq!(record.http_code, Some(404));
}

#[tokio::test]
async fn test_status_500_is_warning() {
    let server = serve(500).await;
    let monitor = Monitor::new(settings(Duration::from_secs(5))).unwrap();
    let endpoint = monitor.add_endpoint(&format!("{}/health", server.uri()), None).await.unwrap();

    monitor.run_round().await;

    let record = &monitor.history(endpoint.id).await.unwrap()[0];
    assert_eq!(record.status, ProbeStatus::Warning);
    assert_eq!(record.http_code, Some(500));
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let monitor = Monitor::new(settings(Duration::from_secs(5))).unwrap();
    let endpoint = monitor.add_endpoint(&format!("{}/old", server.uri()), None).await.unwrap();

    monitor.run_round().await;

    let record = &monitor.history(endpoint.id).await.unwrap()[0];
    assert_eq!(record.status, ProbeStatus::Up);
    assert_eq!(record.http_code, Some(200));
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "apiwatch-test/1.0"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let monitor = Monitor::new(settings(Duration::from_secs(5))).unwrap();
    let endpoint = monitor.add_endpoint(&server.uri(), None).await.unwrap();

    monitor.run_round().await;

    assert_eq!(monitor.history(endpoint.id).await.unwrap()[0].status, ProbeStatus::Up);
}

#[tokio::test]
async fn test_connection_refused_is_down() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let monitor = Monitor::new(settings(Duration::from_secs(5))).unwrap();
    let endpoint = monitor.add_endpoint(&format!("http://127.0.0.1:{port}/"), None).await.unwrap();

    monitor.run_round().await;

    let record = &monitor.history(endpoint.id).await.unwrap()[0];
    assert_eq!(record.status, ProbeStatus::Down);
    assert!(record.http_code.is_none());
    assert!(record.latency_ms.is_none());
    assert!(!record.error.as_deref().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_slow_response_times_out_as_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let monitor = Monitor::new(settings(Duration::from_millis(200))).unwrap();
    let endpoint = monitor.add_endpoint(&server.uri(), None).await.unwrap();

    let started = std::time::Instant::now();
    monitor.run_round().await;

    assert!(started.elapsed() < Duration::from_secs(4));
    let record = &monitor.history(endpoint.id).await.unwrap()[0];
    assert_eq!(record.status, ProbeStatus::Down);
    assert!(record.error.as_deref().unwrap_or_default().to_lowercase().contains("timed out"));
}
