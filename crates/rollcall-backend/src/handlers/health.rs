use std::sync::Arc;

use axum::{Json, extract::State};
use rollcall::data::{DirectoryInfo, HealthResponse, HealthStatus, UptimeInfo};
use rollcall::log;

use crate::services::ActivityService;

fn uptime_seconds(started_at: chrono::DateTime<chrono::Utc>) -> i64 {
    (chrono::Utc::now() - started_at).num_seconds()
}

fn humanize(uptime_seconds: i64) -> String {
    let days = uptime_seconds / 86400;
    let hours = (uptime_seconds % 86400) / 3600;
    let minutes = (uptime_seconds % 3600) / 60;
    let secs = uptime_seconds % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {secs}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

fn service_uptime(started_at: chrono::DateTime<chrono::Utc>) -> (i64, String) {
    let seconds = uptime_seconds(started_at);
    let human = humanize(seconds);
    (seconds, human)
}

pub async fn get(State(state): State<Arc<crate::AppState>>) -> Json<HealthResponse> {
    let directory = state.activities.list().await.unwrap_or_default();
    let participant_count = directory
        .values()
        .map(|activity| activity.participants.len())
        .sum();
    let (seconds, human) = service_uptime(state.started_at);

    let health_response = HealthResponse {
        status: HealthStatus::Healthy,
        timestamp: chrono::Utc::now().to_rfc3339(),
        started_at: state.started_at.to_rfc3339(),
        uptime: UptimeInfo { seconds, human },
        services: DirectoryInfo {
            activities: "up".to_string(),
            activity_count: directory.len(),
            participant_count,
        },
    };

    log::info!("Health check: {:?}", health_response);

    Json(health_response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_picks_the_largest_unit() {
        assert_eq!(humanize(42), "42s");
        assert_eq!(humanize(90), "1m 30s");
        assert_eq!(humanize(3600 + 61), "1h 1m 1s");
        assert_eq!(humanize(2 * 86400 + 3600), "2d 1h 0m 0s");
    }

    #[tokio::test]
    async fn health_reports_seed_counts() {
        let state = Arc::new(crate::AppState::new());
        let Json(report) = get(State(state)).await;

        assert_eq!(report.status, HealthStatus::Healthy);
        assert_eq!(report.services.activities, "up");
        assert_eq!(
            report.services.activity_count,
            crate::seed::activities().len()
        );
        assert!(report.services.participant_count > 0);
    }
}
