//! Station business logic: validation, owner binding and
//! ownership-scoped mutations.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{
    ChargingStation, DomainError, DomainResult, NewStation, RepositoryProvider, StationFilter,
    StationOwner, StationPatch, StationWithOwner,
};

/// Service for station CRUD operations. Reads are open to any
/// authenticated caller; update and delete require the caller to be
/// the record's owner.
pub struct StationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl StationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// List stations matching the filter, owners resolved.
    pub async fn list(&self, filter: &StationFilter) -> DomainResult<Vec<StationWithOwner>> {
        let stations = self.repos.stations().find_all(filter).await?;

        let mut result = Vec::with_capacity(stations.len());
        for station in stations {
            let owner = self.resolve_owner(&station.owner_id).await?;
            result.push(StationWithOwner { station, owner });
        }
        Ok(result)
    }

    /// Fetch a single station by id, owner resolved.
    pub async fn get(&self, id: &str) -> DomainResult<StationWithOwner> {
        let station = self
            .repos
            .stations()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Station"))?;

        let owner = self.resolve_owner(&station.owner_id).await?;
        Ok(StationWithOwner { station, owner })
    }

    /// Create a station owned by the caller.
    pub async fn create(
        &self,
        new: NewStation,
        caller_id: &str,
    ) -> DomainResult<StationWithOwner> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("Station name must not be empty"));
        }

        let now = Utc::now();
        let station = ChargingStation {
            id: Uuid::new_v4().to_string(),
            name,
            location: new.location,
            status: new.status.unwrap_or_default(),
            power_output: new.power_output,
            connector_type: new.connector_type,
            owner_id: caller_id.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.repos.stations().insert(station.clone()).await?;
        info!("Station created: {} ({})", station.name, station.id);

        let owner = self.resolve_owner(&station.owner_id).await?;
        Ok(StationWithOwner { station, owner })
    }

    /// Merge a partial update onto an owned station. The patch type
    /// carries only mutable fields, so owner, id and timestamps can
    /// never be overwritten by a caller payload.
    pub async fn update(
        &self,
        id: &str,
        patch: StationPatch,
        caller_id: &str,
    ) -> DomainResult<StationWithOwner> {
        let mut station = self
            .repos
            .stations()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Station"))?;

        if station.owner_id != caller_id {
            return Err(DomainError::Forbidden(
                "Not authorized to update this station".to_string(),
            ));
        }

        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("Station name must not be empty"));
            }
        }

        patch.apply(&mut station);
        station.updated_at = Utc::now();

        self.repos.stations().update(station.clone()).await?;
        debug!("Station updated: {}", id);

        let owner = self.resolve_owner(&station.owner_id).await?;
        Ok(StationWithOwner { station, owner })
    }

    /// Permanently remove an owned station.
    pub async fn delete(&self, id: &str, caller_id: &str) -> DomainResult<()> {
        let station = self
            .repos
            .stations()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Station"))?;

        if station.owner_id != caller_id {
            return Err(DomainError::Forbidden(
                "Not authorized to delete this station".to_string(),
            ));
        }

        self.repos.stations().delete(id).await?;
        info!("Station deleted: {}", id);
        Ok(())
    }

    async fn resolve_owner(&self, owner_id: &str) -> DomainResult<Option<StationOwner>> {
        let user = self.repos.users().find_by_id(owner_id).await?;
        Ok(user.map(|u| StationOwner {
            id: u.id,
            name: u.name,
            email: u.email,
        }))
    }
}
