//! VoltGrid charging station service library.
//!
//! REST API for managing EV charging stations with JWT-authenticated
//! access and owner-scoped mutations.

pub mod api;
pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use api::create_api_router;
pub use application::StationService;
pub use auth::JwtConfig;
pub use config::{default_config_path, AppConfig};
pub use infrastructure::database::{init_database, DatabaseConfig};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
