pub mod model;
pub mod repository;

pub use model::{
    ChargingStation, ConnectorType, Location, NewStation, StationFilter, StationOwner,
    StationPatch, StationStatus, StationWithOwner,
};
pub use repository::StationRepository;
