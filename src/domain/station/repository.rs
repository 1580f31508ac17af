//! Station repository interface

use async_trait::async_trait;

use super::model::{ChargingStation, StationFilter};
use crate::domain::DomainResult;

#[async_trait]
pub trait StationRepository: Send + Sync {
    async fn insert(&self, station: ChargingStation) -> DomainResult<()>;
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ChargingStation>>;
    async fn find_all(&self, filter: &StationFilter) -> DomainResult<Vec<ChargingStation>>;
    async fn update(&self, station: ChargingStation) -> DomainResult<()>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
