//! End-to-end monitoring lifecycle tests

use std::time::Duration;

use apiwatch::{Monitor, MonitorSettings, MonitorState, ProbeStatus};
use tokio::time::{sleep, timeout};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_server() -> MockServer {
    let server = MockServer::start().await;
    for code in [200u16, 500] {
        Mock::given(method("GET"))
            .and(path(format!("/{code}")))
            .respond_with(ResponseTemplate::new(code))
            .mount(&server)
            .await;
    }
    server
}

fn monitor(interval: Duration) -> Monitor {
    let settings = MonitorSettings::builder()
        .interval(interval)
        .probe_timeout(Duration::from_secs(2))
        .history_capacity(50)
        .build();
    Monitor::new(settings).unwrap()
}

async fn wait_until_probed(monitor: &Monitor) {
    timeout(Duration::from_secs(10), async {
        while monitor.snapshot().await.iter().any(|s| s.latest.is_unknown()) {
            sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("Timeout waiting for the first tick");
}

#[tokio::test]
async fn test_one_tick_then_stop() {
    let _ = tracing_subscriber::fmt::try_init();

    let server = mock_server().await;
    let monitor = monitor(Duration::from_secs(1));
    let a = monitor.add_endpoint(&format!("{}/200", server.uri()), Some("A".into())).await.unwrap();
    let b = monitor.add_endpoint(&format!("{}/500", server.uri()), Some("B".into())).await.unwrap();

    assert!(monitor.start().await);
    wait_until_probed(&monitor).await;
    assert!(monitor.stop().await);

    let snapshot = monitor.snapshot().await;
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].endpoint.id, a.id);
    assert_eq!(snapshot[0].latest.status, ProbeStatus::Up);
    assert_eq!(snapshot[0].latest.http_code, Some(200));
    assert_eq!(snapshot[1].endpoint.id, b.id);
    assert_eq!(snapshot[1].latest.status, ProbeStatus::Warning);
    assert_eq!(snapshot[1].latest.http_code, Some(500));

    // Nothing changes once monitoring is stopped
    let report = monitor.status_report().await;
    sleep(Duration::from_millis(1500)).await;
    assert_eq!(monitor.snapshot().await, snapshot);
    assert_eq!(monitor.status_report().await, report);
    assert_eq!(monitor.state().await, MonitorState::Stopped);
}

#[tokio::test]
async fn test_add_while_running_is_picked_up() {
    let server = mock_server().await;
    let monitor = monitor(Duration::from_millis(200));
    monitor.add_endpoint(&format!("{}/200", server.uri()), None).await.unwrap();

    monitor.start().await;
    wait_until_probed(&monitor).await;

    let late = monitor.add_endpoint(&format!("{}/500", server.uri()), None).await.unwrap();
    wait_until_probed(&monitor).await;
    monitor.stop().await;

    let history = monitor.history(late.id).await.unwrap();
    assert!(!history.is_empty());
    assert_eq!(history[0].status, ProbeStatus::Warning);
}

#[tokio::test]
async fn test_remove_while_running() {
    let server = mock_server().await;
    let monitor = monitor(Duration::from_millis(100));
    let gone = monitor.add_endpoint(&format!("{}/200", server.uri()), None).await.unwrap();
    let kept = monitor.add_endpoint(&format!("{}/500", server.uri()), None).await.unwrap();

    monitor.start().await;
    wait_until_probed(&monitor).await;
    monitor.remove_endpoint(gone.id).await.unwrap();
    sleep(Duration::from_millis(350)).await;
    monitor.stop().await;

    let ids: Vec<_> = monitor.snapshot().await.into_iter().map(|s| s.endpoint.id).collect();
    assert_eq!(ids, vec![kept.id]);
    assert!(!monitor.status_report().await.contains_key(&gone.id));
}

#[tokio::test]
async fn test_history_grows_per_tick() {
    let server = mock_server().await;
    let monitor = monitor(Duration::from_millis(100));
    let endpoint = monitor.add_endpoint(&format!("{}/200", server.uri()), None).await.unwrap();

    monitor.start().await;
    timeout(Duration::from_secs(10), async {
        while monitor.history(endpoint.id).await.unwrap().len() < 3 {
            sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("Timeout waiting for three ticks");
    monitor.stop().await;

    let history = monitor.history(endpoint.id).await.unwrap();
    assert!(history.iter().all(|r| r.status == ProbeStatus::Up));
    assert!(history.windows(2).all(|w| w[0].checked_at <= w[1].checked_at));
}
