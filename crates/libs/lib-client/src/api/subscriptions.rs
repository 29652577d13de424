//! # Subscription Endpoints

use shared::Subscription;

use super::client::{decode, ApiClient};
use crate::error::Result;

/// The caller's subscriptions, in the order the gateway returns them.
pub async fn fetch_subscriptions(client: &ApiClient, session_token: &str) -> Result<Vec<Subscription>> {
    let response = client
        .client
        .get(client.url("/api/subscriptions"))
        .bearer_auth(session_token)
        .send()
        .await?;

    let subscriptions = decode::<Vec<Subscription>>(response).await?;
    tracing::debug!(count = subscriptions.len(), "Fetched subscriptions");
    Ok(subscriptions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use axum::{http::HeaderMap, http::StatusCode, routing::get, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_fetch_sends_session_and_decodes() {
        let app = Router::new().route(
            "/api/subscriptions",
            get(|headers: HeaderMap| async move {
                let auth = headers.get("authorization").and_then(|v| v.to_str().ok()).unwrap_or_default();
                if auth != "Bearer session-1" {
                    return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthorized" })));
                }
                (
                    StatusCode::OK,
                    Json(json!([{
                        "id": 3,
                        "type": "ivrex_pro",
                        "status": "active",
                        "price": "199",
                        "createdAt": "2025-01-01T00:00:00Z"
                    }])),
                )
            }),
        );
        let client = ApiClient::new(&serve(app).await).unwrap();

        let subscriptions = fetch_subscriptions(&client, "session-1").await.unwrap();
        assert_eq!(subscriptions.len(), 1);
        assert_eq!(subscriptions[0].id, "3");
        assert_eq!(subscriptions[0].price, 199.0);

        let err = fetch_subscriptions(&client, "stale").await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_login_error_message_surfaces() {
        let app = Router::new().route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["email"], "trader@ivrex.io");
                (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid credentials" })))
            }),
        );
        let client = ApiClient::new(&serve(app).await).unwrap();

        let err = client.login("trader@ivrex.io", "nope").await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Api {
                status: 401,
                message: "Invalid credentials".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_network_error() {
        let client = ApiClient::new("http://127.0.0.1:1").unwrap();
        let err = fetch_subscriptions(&client, "session-1").await.unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
    }
}
