//! Business logic and use cases

pub mod stations;

pub use stations::StationService;
