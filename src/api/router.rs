//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::*;
use crate::api::handlers::{auth, health, stations};
use crate::application::StationService;
use crate::auth::jwt::JwtConfig;
use crate::auth::middleware::{auth_middleware, AuthState};
use crate::domain::RepositoryProvider;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::register,
        auth::login,
        auth::get_current_user,
        // Stations
        stations::list_stations,
        stations::get_station,
        stations::create_station,
        stations::update_station,
        stations::delete_station,
    ),
    components(
        schemas(
            // Auth
            RegisterRequest,
            LoginRequest,
            UserInfo,
            AuthResponse,
            // Stations
            StationDto,
            LocationDto,
            OwnerDto,
            CreateStationRequest,
            UpdateStationRequest,
            // Misc
            stations::MessageResponse,
            health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoint for uptime monitoring."),
        (name = "Authentication", description = "Account registration and login. The returned token goes in the `Authorization: Bearer <token>` header."),
        (name = "Stations", description = "CRUD for charging stations. Reads are open to any authenticated caller; updates and deletes only to the station's owner."),
    ),
    info(
        title = "VoltGrid Charging Station API",
        version = "1.0.0",
        description = "REST API for managing EV charging stations.

## Authentication

Obtain a JWT via `POST /auth/register` or `POST /auth/login` and pass it
as `Authorization: Bearer <token>` on every `/stations` request.

## Filtering

`GET /stations` accepts `status` (exact), `powerOutput` (inclusive
minimum, kW) and `connectorType` (exact) query parameters. Omitted
parameters impose no constraint.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let station_state = stations::AppState {
        service: Arc::new(StationService::new(Arc::clone(&repos))),
    };

    let auth_state = auth::AuthHandlerState { repos, jwt_config };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Station routes (protected)
    let station_routes = Router::new()
        .route(
            "/",
            get(stations::list_stations).post(stations::create_station),
        )
        .route(
            "/{id}",
            get(stations::get_station)
                .put(stations::update_station)
                .delete(stations::delete_station),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(station_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check))
        .nest("/auth", auth_routes)
        .nest("/auth", auth_protected_routes)
        .nest("/stations", station_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
