//! API data transfer objects

pub mod auth;
pub mod station;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
pub use station::{
    CreateStationRequest, LocationDto, OwnerDto, StationDto, StationQuery, UpdateStationRequest,
};
