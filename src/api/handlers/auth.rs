//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::api::dto::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use crate::api::error::ApiError;
use crate::api::extract::ValidatedJson;
use crate::auth::{create_token, hash_password, verify_password, AuthenticatedUser, JwtConfig};
use crate::domain::{DomainError, RepositoryProvider, User};

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, token issued", body = AuthResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let password_hash = hash_password(&request.password)?;

    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: request.name,
        email: request.email,
        password_hash,
        created_at: now,
        updated_at: now,
    };

    state.repos.users().insert(user.clone()).await?;

    let token = create_token(&user.id, &user.email, &state.jwt_config)
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    let response = AuthResponse {
        token,
        user: UserInfo {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    };
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .repos
        .users()
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| DomainError::Unauthorized("Invalid credentials".to_string()))?;

    if !verify_password(&request.password, &user.password_hash) {
        return Err(DomainError::Unauthorized("Invalid credentials".to_string()).into());
    }

    let token = create_token(&user.id, &user.email, &state.jwt_config)
        .map_err(|e| DomainError::Internal(e.to_string()))?;

    let response = AuthResponse {
        token,
        user: UserInfo {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    };
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    responses(
        (status = 200, description = "Current account", body = UserInfo),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<UserInfo>, ApiError> {
    let db_user = state
        .repos
        .users()
        .find_by_id(&user.user_id)
        .await?
        .ok_or(DomainError::not_found("User"))?;

    Ok(Json(UserInfo {
        id: db_user.id,
        name: db_user.name,
        email: db_user.email,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use serde_json::{json, Value};
    use tower::Service;

    fn app() -> Router {
        let state = AuthHandlerState {
            repos: Arc::new(InMemoryRepositoryProvider::new()),
            jwt_config: JwtConfig::default(),
        };
        Router::new()
            .route("/auth/register", post(register))
            .route("/auth/login", post(login))
            .with_state(state)
    }

    async fn send(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let mut svc = router.clone().into_service();
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn register_then_login() {
        let router = app();
        let creds = json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "secret123"
        });

        let (status, body) = send(&router, "/auth/register", creds).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["token"].as_str().is_some());
        assert_eq!(body["user"]["email"], "alice@example.com");

        let (status, body) = send(
            &router,
            "/auth/login",
            json!({ "email": "alice@example.com", "password": "secret123" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["token"].as_str().is_some());
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let router = app();
        let creds = json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "secret123"
        });
        send(&router, "/auth/register", creds.clone()).await;
        let (status, _) = send(&router, "/auth/register", creds).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let router = app();
        send(
            &router,
            "/auth/register",
            json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "secret123"
            }),
        )
        .await;

        let (status, body) = send(
            &router,
            "/auth/login",
            json!({ "email": "alice@example.com", "password": "nope-nope" }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let router = app();
        let (status, _) = send(
            &router,
            "/auth/register",
            json!({
                "name": "Alice",
                "email": "alice@example.com",
                "password": "abc"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
