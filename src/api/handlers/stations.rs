//! Station API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::{CreateStationRequest, StationDto, StationQuery, UpdateStationRequest};
use crate::api::error::ApiError;
use crate::api::extract::ValidatedJson;
use crate::application::StationService;
use crate::auth::AuthenticatedUser;

/// Station handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<StationService>,
}

/// Confirmation body for delete
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/stations",
    tag = "Stations",
    params(StationQuery),
    responses(
        (status = 200, description = "Stations matching the filter, owners resolved", body = Vec<StationDto>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_stations(
    State(state): State<AppState>,
    Query(query): Query<StationQuery>,
) -> Result<Json<Vec<StationDto>>, ApiError> {
    let stations = state.service.list(&query.into_filter()).await?;
    let dtos: Vec<StationDto> = stations.into_iter().map(StationDto::from_domain).collect();
    Ok(Json(dtos))
}

#[utoipa::path(
    get,
    path = "/stations/{id}",
    tag = "Stations",
    params(("id" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station details", body = StationDto),
        (status = 404, description = "Station not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StationDto>, ApiError> {
    let station = state.service.get(&id).await?;
    Ok(Json(StationDto::from_domain(station)))
}

#[utoipa::path(
    post,
    path = "/stations",
    tag = "Stations",
    request_body = CreateStationRequest,
    responses(
        (status = 201, description = "Station created, owned by the caller", body = StationDto),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_station(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<CreateStationRequest>,
) -> Result<(StatusCode, Json<StationDto>), ApiError> {
    let created = state
        .service
        .create(body.into_domain(), &user.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(StationDto::from_domain(created))))
}

#[utoipa::path(
    put,
    path = "/stations/{id}",
    tag = "Stations",
    params(("id" = String, Path, description = "Station ID")),
    request_body = UpdateStationRequest,
    responses(
        (status = 200, description = "Updated station", body = StationDto),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Station not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_station(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateStationRequest>,
) -> Result<Json<StationDto>, ApiError> {
    let updated = state
        .service
        .update(&id, body.into_domain(), &user.user_id)
        .await?;
    Ok(Json(StationDto::from_domain(updated)))
}

#[utoipa::path(
    delete,
    path = "/stations/{id}",
    tag = "Stations",
    params(("id" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station deleted", body = MessageResponse),
        (status = 403, description = "Caller is not the owner"),
        (status = 404, description = "Station not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_station(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.service.delete(&id, &user.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Station deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::create_token;
    use crate::auth::middleware::{auth_middleware, AuthState};
    use crate::auth::JwtConfig;
    use crate::domain::{RepositoryProvider, User};
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use axum::middleware;
    use axum::routing::get;
    use axum::Router;
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::Service;

    struct TestApp {
        router: Router,
        token_a: String,
        token_b: String,
    }

    async fn test_app() -> TestApp {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        for (id, name, email) in [
            ("user-a", "Alice", "a@example.com"),
            ("user-b", "Bob", "b@example.com"),
        ] {
            let now = Utc::now();
            repos
                .users()
                .insert(User {
                    id: id.to_string(),
                    name: name.to_string(),
                    email: email.to_string(),
                    password_hash: "x".to_string(),
                    created_at: now,
                    updated_at: now,
                })
                .await
                .unwrap();
        }

        let jwt_config = JwtConfig::default();
        let token_a = create_token("user-a", "a@example.com", &jwt_config).unwrap();
        let token_b = create_token("user-b", "b@example.com", &jwt_config).unwrap();

        let state = AppState {
            service: Arc::new(StationService::new(repos)),
        };
        let router = Router::new()
            .route("/stations", get(list_stations).post(create_station))
            .route(
                "/stations/{id}",
                get(get_station)
                    .put(update_station)
                    .delete(delete_station),
            )
            .layer(middleware::from_fn_with_state(
                AuthState { jwt_config },
                auth_middleware,
            ))
            .with_state(state);

        TestApp {
            router,
            token_a,
            token_b,
        }
    }

    async fn send(
        app: &mut TestApp,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&v).unwrap())
            }
            None => Body::empty(),
        };
        let mut svc = app.router.clone().into_service();
        let resp = svc.call(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn downtown() -> Value {
        json!({
            "name": "Downtown-1",
            "location": { "latitude": 40.0, "longitude": -74.0 },
            "powerOutput": 50,
            "connectorType": "CCS"
        })
    }

    #[tokio::test]
    async fn unauthenticated_requests_are_rejected() {
        let mut app = test_app().await;
        let (status, _) = send(&mut app, "GET", "/stations", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn ownership_scenario_end_to_end() {
        let mut app = test_app().await;
        let token_a = app.token_a.clone();
        let token_b = app.token_b.clone();

        // Create as user A: 201, owner resolved, status defaults to Active
        let (status, body) = send(
            &mut app,
            "POST",
            "/stations",
            Some(&token_a),
            Some(downtown()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "Active");
        assert_eq!(body["owner"]["id"], "user-a");
        assert_eq!(body["owner"]["email"], "a@example.com");
        let id = body["id"].as_str().unwrap().to_string();

        // User B cannot update
        let (status, body) = send(
            &mut app,
            "PUT",
            &format!("/stations/{}", id),
            Some(&token_b),
            Some(json!({ "powerOutput": 75 })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["message"].as_str().unwrap().contains("Not authorized"));

        // User A updates power output
        let (status, body) = send(
            &mut app,
            "PUT",
            &format!("/stations/{}", id),
            Some(&token_a),
            Some(json!({ "powerOutput": 75 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["powerOutput"], 75.0);
        assert_eq!(body["name"], "Downtown-1");

        // User B cannot delete
        let (status, _) = send(
            &mut app,
            "DELETE",
            &format!("/stations/{}", id),
            Some(&token_b),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // User A deletes, then get yields 404
        let (status, body) = send(
            &mut app,
            "DELETE",
            &format!("/stations/{}", id),
            Some(&token_a),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Station deleted successfully");

        let (status, _) = send(
            &mut app,
            "GET",
            &format!("/stations/{}", id),
            Some(&token_a),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_honors_filter_query() {
        let mut app = test_app().await;
        let token = app.token_a.clone();

        send(&mut app, "POST", "/stations", Some(&token), Some(downtown())).await;
        send(
            &mut app,
            "POST",
            "/stations",
            Some(&token),
            Some(json!({
                "name": "Suburb-1",
                "location": { "latitude": 41.0, "longitude": -73.0 },
                "status": "Inactive",
                "powerOutput": 22,
                "connectorType": "Type 2"
            })),
        )
        .await;

        let (status, body) =
            send(&mut app, "GET", "/stations?powerOutput=50", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "Downtown-1");

        let (status, body) = send(
            &mut app,
            "GET",
            "/stations?status=Inactive&connectorType=Type%202",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["name"], "Suburb-1");

        let (_, body) = send(&mut app, "GET", "/stations", Some(&token), None).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_with_missing_field_is_bad_request() {
        let mut app = test_app().await;
        let token = app.token_a.clone();

        let (status, _) = send(
            &mut app,
            "POST",
            "/stations",
            Some(&token),
            Some(json!({ "name": "Nameless" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_cannot_change_owner() {
        let mut app = test_app().await;
        let token_a = app.token_a.clone();

        let (_, body) = send(
            &mut app,
            "POST",
            "/stations",
            Some(&token_a),
            Some(downtown()),
        )
        .await;
        let id = body["id"].as_str().unwrap().to_string();

        // An owner field in the payload is ignored, not applied
        let (status, body) = send(
            &mut app,
            "PUT",
            &format!("/stations/{}", id),
            Some(&token_a),
            Some(json!({ "owner": "user-b", "name": "Renamed" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Renamed");
        assert_eq!(body["owner"]["id"], "user-a");
    }
}
