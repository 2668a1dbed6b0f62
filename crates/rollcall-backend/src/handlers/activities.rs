use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use rollcall::data::{Confirmation, ErrorDetail};
use rollcall::errors::ActivityError;

use crate::services::ActivityService;

/// Query parameters for the signup and unregister routes.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// All directory errors are client mistakes here, so they map uniformly to
/// a 400 with the error's display text in the `detail` field.
fn rejection(err: ActivityError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorDetail {
            detail: err.to_string(),
        }),
    )
        .into_response()
}

/// Handler to list the full activity directory
pub async fn list(State(state): State<Arc<crate::AppState>>) -> Response {
    match state.activities.list().await {
        Ok(directory) => (StatusCode::OK, Json(directory)).into_response(),
        Err(err) => rejection(err),
    }
}

/// Handler to sign a student up for an activity
pub async fn signup(
    State(state): State<Arc<crate::AppState>>,
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Response {
    match state.activities.signup(&activity_name, &query.email).await {
        Ok(()) => (
            StatusCode::OK,
            Json(Confirmation {
                message: format!("Signed up {} for {}", query.email, activity_name),
            }),
        )
            .into_response(),
        Err(err) => rejection(err),
    }
}

/// Handler to remove a student from an activity's roster
pub async fn unregister(
    State(state): State<Arc<crate::AppState>>,
    Path(activity_name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Response {
    match state
        .activities
        .unregister(&activity_name, &query.email)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(Confirmation {
                message: format!("Unregistered {} from {}", query.email, activity_name),
            }),
        )
            .into_response(),
        Err(err) => rejection(err),
    }
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use rollcall::serde_json::{self, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        crate::router(Arc::new(crate::AppState::new()))
    }

    async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn chess_participants(directory: &Value) -> Vec<String> {
        directory["Chess Club"]["participants"]
            .as_array()
            .expect("participants should be an array")
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn get_activities_lists_every_seeded_name() {
        let app = app();
        let (status, body) = send(&app, "GET", "/activities").await;

        assert_eq!(status, StatusCode::OK);
        let directory = body.as_object().expect("response should be an object");
        for (name, _) in crate::seed::activities() {
            assert!(directory.contains_key(&name), "{name} missing");
        }
    }

    #[tokio::test]
    async fn activity_records_have_the_expected_shape() {
        let app = app();
        let (_, body) = send(&app, "GET", "/activities").await;

        let chess = &body["Chess Club"];
        assert!(chess["description"].is_string());
        assert!(chess["schedule"].is_string());
        assert!(chess["max_participants"].is_u64());
        assert!(chess["participants"].is_array());
    }

    #[tokio::test]
    async fn signup_then_unregister_round_trips() {
        let app = app();

        let (_, before) = send(&app, "GET", "/activities").await;
        let original = chess_participants(&before);
        assert!(!original.is_empty());

        // Activity names are URL-path-escaped on the wire
        let (status, body) = send(
            &app,
            "POST",
            "/activities/Chess%20Club/signup?email=new%40example.com",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("Signed up"));

        let (_, during) = send(&app, "GET", "/activities").await;
        assert!(
            chess_participants(&during).contains(&"new@example.com".to_string())
        );

        let (status, body) = send(
            &app,
            "POST",
            "/activities/Chess%20Club/unregister?email=new%40example.com",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().contains("Unregistered"));

        let (_, after) = send(&app, "GET", "/activities").await;
        assert_eq!(chess_participants(&after), original);
    }

    #[tokio::test]
    async fn duplicate_signup_returns_400_and_roster_is_unchanged() {
        let app = app();

        let (_, before) = send(&app, "GET", "/activities").await;
        let original = chess_participants(&before);
        let existing = original.first().unwrap();

        let uri = format!(
            "/activities/Chess%20Club/signup?email={}",
            existing.replace('@', "%40")
        );
        let (status, body) = send(&app, "POST", &uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());

        let (_, after) = send(&app, "GET", "/activities").await;
        assert_eq!(chess_participants(&after), original);
    }

    #[tokio::test]
    async fn signup_for_unknown_activity_returns_400() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/activities/Knitting%20Circle/signup?email=new%40example.com",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Activity not found");
    }

    #[tokio::test]
    async fn unregister_absent_email_returns_400_and_roster_is_unchanged() {
        let app = app();

        let (_, before) = send(&app, "GET", "/activities").await;
        let original = chess_participants(&before);

        let (status, body) = send(
            &app,
            "POST",
            "/activities/Chess%20Club/unregister?email=not-registered%40example.com",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].is_string());

        let (_, after) = send(&app, "GET", "/activities").await;
        assert_eq!(chess_participants(&after), original);
    }

    #[tokio::test]
    async fn unregister_for_unknown_activity_returns_400() {
        let app = app();
        let (status, _) = send(
            &app,
            "POST",
            "/activities/Knitting%20Circle/unregister?email=new%40example.com",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
