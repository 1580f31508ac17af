//! SeaORM entities

pub mod station;
pub mod user;
