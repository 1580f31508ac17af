//! Core business entities, types and traits

pub mod error;
pub mod repositories;
pub mod station;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
pub use station::{
    ChargingStation, ConnectorType, Location, NewStation, StationFilter, StationOwner,
    StationPatch, StationStatus, StationWithOwner,
};
pub use user::{User, UserRepository};
