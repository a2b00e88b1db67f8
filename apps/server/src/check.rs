//! Terminal check mode: probe endpoints and print one line per result.

use std::time::Duration;

use apiwatch::{EndpointSnapshot, Monitor, ProbeStatus};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::config::SeedEndpoint;

/// Pair urls with names by position. Falls back to `configured` when no url is given.
pub fn targets(urls: Vec<String>, names: Vec<String>, configured: &[SeedEndpoint]) -> Vec<SeedEndpoint> {
    if urls.is_empty() {
        return configured.to_vec();
    }

    let mut names = names.into_iter();
    urls.into_iter().map(|url| SeedEndpoint { url, name: names.next() }).collect()
}

fn status_label(status: ProbeStatus) -> &'static str {
    match status {
        ProbeStatus::Up => "UP",
        ProbeStatus::Warning => "WARN",
        ProbeStatus::Down => "DOWN",
        ProbeStatus::Unknown => "----",
    }
}

/// One output row: status, name, code, latency, error and url
pub fn format_line(snapshot: &EndpointSnapshot) -> String {
    let latest = &snapshot.latest;
    let code = latest.http_code.map_or_else(|| "---".to_string(), |code| code.to_string());
    let latency = latest.latency_ms.map_or_else(|| "-".to_string(), |ms| format!("{ms}ms"));
    let error = latest.error.as_deref().unwrap_or("");

    format!(
        "[{:<4}] {:<24} {:>3} {:>8}  {}{}",
        status_label(latest.status),
        snapshot.endpoint.name,
        code,
        latency,
        snapshot.endpoint.url,
        if error.is_empty() { String::new() } else { format!("  ({error})") }
    )
}

async fn print_round(monitor: &Monitor) {
    monitor.run_round().await;

    for snapshot in monitor.snapshot().await {
        println!("{}", format_line(&snapshot));
    }
}

/// Run one round, or keep polling every interval until Ctrl-C
pub async fn run(monitor: &Monitor, once: bool) {
    if monitor.endpoints().await.is_empty() {
        warn!("No endpoints to check");
        return;
    }

    if once {
        print_round(monitor).await;
        return;
    }

    let mut ticker = interval(monitor.settings().interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                print_round(monitor).await;
                println!();
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping checks");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use apiwatch::{Checker, MonitorSettings};

    use super::*;

    struct StaticChecker(u16);

    #[async_trait::async_trait]
    impl Checker for StaticChecker {
        async fn check(&self, _target: &str) -> anyhow::Result<u16> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_targets_pair_by_position() {
        let targets = targets(
            vec!["https://a.example.com".into(), "https://b.example.com".into()],
            vec!["A".into()],
            &[],
        );

        assert_eq!(targets[0].name.as_deref(), Some("A"));
        assert_eq!(targets[1].name, None);
    }

    #[test]
    fn test_targets_fall_back_to_configured() {
        let configured = vec![SeedEndpoint { url: "https://example.com".into(), name: None }];

        assert_eq!(targets(vec![], vec!["ignored".into()], &configured), configured);
    }

    #[tokio::test]
    async fn test_format_line() {
        let monitor = Monitor::with_checker(MonitorSettings::default(), Arc::new(StaticChecker(404))).unwrap();
        monitor.add_endpoint("https://example.com/missing", Some("Missing".into())).await.unwrap();

        let before = format_line(&monitor.snapshot().await[0]);
        assert!(before.starts_with("[----] Missing"));
        assert!(before.contains("---"));

        monitor.run_round().await;
        let after = format_line(&monitor.snapshot().await[0]);
        assert!(after.starts_with("[WARN] Missing"));
        assert!(after.contains("404"));
        assert!(after.ends_with("https://example.com/missing"));
    }
}
