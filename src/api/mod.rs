//! HTTP API layer: DTOs, handlers, router, error mapping

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;

pub use error::ApiError;
pub use router::create_api_router;
