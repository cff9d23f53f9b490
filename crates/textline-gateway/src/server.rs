// SPDX-FileCopyrightText: 2026 Textline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use textline_core::TextlineError;

use crate::handlers;
use crate::state::AppState;

/// Build the gateway router.
///
/// - `POST /v1/chatbot` — the conversation webhook
/// - `GET /health` — unauthenticated liveness probe
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/v1/chatbot", post(handlers::post_chatbot))
        .route("/health", get(handlers::get_health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the gateway until the process exits.
pub async fn start_server(host: &str, port: u16, state: AppState) -> Result<(), TextlineError> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TextlineError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| TextlineError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use dashmap::DashMap;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use textline_campaigns::CampaignDirectory;
    use textline_engine::CommandSet;
    use textline_test_utils::{
        legacy_campaign_json, temp_database, MockCampaignProvider, RecordingMessagingGateway,
    };

    use crate::state::ChatbotRuntime;

    const OIP_CHATBOT: i64 = 210000;
    const OIP_AGENTVIEW: i64 = 210001;
    const OIP_SLOTH: i64 = 210045;

    async fn test_state() -> (AppState, Arc<RecordingMessagingGateway>, tempfile::TempDir) {
        let (db, dir) = temp_database().await;

        let provider = Arc::new(MockCampaignProvider::new());
        provider.insert(1104, legacy_campaign_json(1104, "Team Jeans", &["jeans"]));
        let directory = Arc::new(CampaignDirectory::new(provider));
        directory.load(&[1104]).await.unwrap();

        let messaging = Arc::new(RecordingMessagingGateway::new());
        let runtime = ChatbotRuntime::new(
            CommandSet {
                member_support: "q".into(),
                reportback: "start".into(),
                clear_cache: "clear cache".into(),
            },
            OIP_CHATBOT,
            OIP_AGENTVIEW,
            3,
        );

        let state = AppState {
            chatbot: Some(Arc::new(runtime)),
            sloth_opt_in: OIP_SLOTH,
            directory,
            db,
            messaging: messaging.clone(),
            associations: Arc::new(DashMap::new()),
        };
        (state, messaging, dir)
    }

    async fn post_chatbot(
        app: &Router,
        uri: &str,
        form: &[(&str, &str)],
    ) -> (StatusCode, serde_json::Value) {
        let body = serde_urlencoded::to_string(form).unwrap();
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn reply(json: &serde_json::Value) -> String {
        json["message"].as_str().unwrap_or_default().to_string()
    }

    #[tokio::test]
    async fn keyword_signup_returns_menu_and_dispatches_profile_update() {
        let (state, messaging, _dir) = test_state().await;
        let app = router(state);

        let (status, json) = post_chatbot(
            &app,
            "/v1/chatbot",
            &[("phone", "15555551234"), ("args", "jeans"), ("keyword", "Jeans")],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(reply(&json).contains("Thanks for joining Team Jeans"));

        let calls = messaging.wait_for_calls(1).await;
        assert_eq!(calls[0].phone, "15555551234");
        assert_eq!(calls[0].opt_in_path, OIP_CHATBOT);
        assert_eq!(calls[0].fields.chatbot_response, reply(&json));
        // Inbound carried no profile id, so the update links one.
        assert!(calls[0].fields.profile_id.is_some());
    }

    #[tokio::test]
    async fn unknown_keyword_is_a_server_error() {
        let (state, _messaging, _dir) = test_state().await;
        let app = router(state);

        let (status, _) = post_chatbot(
            &app,
            "/v1/chatbot",
            &[("phone", "15555551234"), ("keyword", "nope")],
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn missing_chatbot_settings_is_a_server_error() {
        let (mut state, _messaging, _dir) = test_state().await;
        state.chatbot = None;
        let app = router(state);

        let (status, _) = post_chatbot(
            &app,
            "/v1/chatbot",
            &[("phone", "15555551234"), ("args", "hi")],
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn no_campaign_context_degrades_to_error_reply() {
        let (state, _messaging, _dir) = test_state().await;
        let app = router(state);

        let (status, json) = post_chatbot(
            &app,
            "/v1/chatbot",
            &[("phone", "15555559999"), ("args", "hello")],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(reply(&json).contains("something went wrong"));
    }

    #[tokio::test]
    async fn full_reportback_flow_across_requests() {
        let (state, _messaging, _dir) = test_state().await;
        let app = router(state);
        let phone = [("phone", "15555551234")];

        // Sign up via keyword, then walk the whole draft.
        let (_, json) = post_chatbot(
            &app,
            "/v1/chatbot",
            &[phone[0], ("args", "jeans"), ("keyword", "jeans")],
        )
        .await;
        assert!(reply(&json).contains("Thanks for joining"));

        let (_, json) =
            post_chatbot(&app, "/v1/chatbot", &[phone[0], ("args", "start")]).await;
        assert!(reply(&json).contains("How many jeans"));

        let (_, json) = post_chatbot(&app, "/v1/chatbot", &[phone[0], ("args", "2")]).await;
        assert!(reply(&json).contains("Send a photo"));

        let (_, json) = post_chatbot(
            &app,
            "/v1/chatbot",
            &[
                phone[0],
                ("args", ""),
                ("mms_image_url", "https://example.org/p.jpg"),
            ],
        )
        .await;
        assert!(reply(&json).contains("caption"));

        let (_, json) =
            post_chatbot(&app, "/v1/chatbot", &[phone[0], ("args", "two pairs")]).await;
        assert!(reply(&json).contains("important to you"));

        let (_, json) = post_chatbot(
            &app,
            "/v1/chatbot",
            &[phone[0], ("args", "my whole school helped")],
        )
        .await;
        assert!(reply(&json).contains("collected 2 jeans"));

        // Completed state now answers the completed menu on keyword entry.
        let (_, json) = post_chatbot(
            &app,
            "/v1/chatbot",
            &[phone[0], ("args", "jeans"), ("keyword", "jeans")],
        )
        .await;
        assert!(reply(&json).contains("already submitted"));
    }

    #[tokio::test]
    async fn member_support_selects_agentview_path() {
        let (state, messaging, _dir) = test_state().await;
        let app = router(state);

        let (_, json) = post_chatbot(
            &app,
            "/v1/chatbot",
            &[("phone", "15555551234"), ("args", "Q"), ("keyword", "jeans")],
        )
        .await;
        assert!(reply(&json).contains("What's your question"));

        let calls = messaging.wait_for_calls(1).await;
        assert_eq!(calls[0].opt_in_path, OIP_AGENTVIEW);
    }

    #[tokio::test]
    async fn sloth_bot_answers_without_campaign_machinery() {
        let (mut state, messaging, _dir) = test_state().await;
        // Even a half-configured deployment serves the sloth.
        state.chatbot = None;
        let app = router(state);

        let (status, json) = post_chatbot(
            &app,
            "/v1/chatbot?bot_type=slothbot",
            &[("phone", "15555551234"), ("args", "hi sloth")],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(reply(&json).contains("sloth"));

        let calls = messaging.wait_for_calls(1).await;
        assert_eq!(calls[0].opt_in_path, OIP_SLOTH);
    }

    #[tokio::test]
    async fn clear_cache_resets_associations_and_re_derives_signup() {
        let (state, _messaging, _dir) = test_state().await;
        let associations = Arc::clone(&state.associations);
        let app = router(state);

        let (_, _) = post_chatbot(
            &app,
            "/v1/chatbot",
            &[("phone", "15555551234"), ("args", "jeans"), ("keyword", "jeans")],
        )
        .await;
        assert_eq!(associations.len(), 1);

        let (status, json) = post_chatbot(
            &app,
            "/v1/chatbot",
            &[("phone", "15555551234"), ("args", "clear cache")],
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // The signup is re-derived from the database and the association
        // re-cached; the text itself is ordinary content to the engine.
        assert!(reply(&json).contains("didn't get that"));
        assert_eq!(associations.len(), 1);
    }

    #[tokio::test]
    async fn clear_cache_mid_draft_keeps_the_persisted_draft() {
        let (state, _messaging, _dir) = test_state().await;
        let associations = Arc::clone(&state.associations);
        let db = state.db.clone();
        let app = router(state);
        let phone = ("phone", "15555551234");

        let (_, _) = post_chatbot(
            &app,
            "/v1/chatbot",
            &[phone, ("args", "jeans"), ("keyword", "jeans")],
        )
        .await;
        let (_, _) = post_chatbot(&app, "/v1/chatbot", &[phone, ("args", "start")]).await;
        let (_, json) = post_chatbot(&app, "/v1/chatbot", &[phone, ("args", "2")]).await;
        assert!(reply(&json).contains("Send a photo"));

        let (status, json) =
            post_chatbot(&app, "/v1/chatbot", &[phone, ("args", "clear cache")]).await;
        assert_eq!(status, StatusCode::OK);
        // Ordinary content to the engine: not a photo, so the pending field
        // re-prompts.
        assert!(reply(&json).contains("Send a photo"));

        // Only the in-memory association was reset; the stored draft kept
        // its collected quantity and the submission stayed open.
        let signup_id = *associations.iter().next().unwrap().value();
        let signup = textline_storage::queries::signups::find_by_id(&db, signup_id)
            .await
            .unwrap()
            .expect("signup persisted across cache clear");
        let draft = signup.draft.expect("draft survives cache clear");
        assert_eq!(draft.quantity, Some(2));
        assert!(draft.photo.is_none());
        assert!(signup.total_quantity_submitted.is_none());
    }

    #[tokio::test]
    async fn health_reports_loaded_campaigns() {
        let (state, _messaging, _dir) = test_state().await;
        let app = router(state);

        let request = Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["campaigns_loaded"], 1);
    }
}
