//! In-memory repositories for development and testing

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::repositories::RepositoryProvider;
use crate::domain::station::{ChargingStation, StationFilter, StationRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::{DomainError, DomainResult};

#[derive(Default)]
pub struct InMemoryStationRepository {
    stations: DashMap<String, ChargingStation>,
}

#[async_trait]
impl StationRepository for InMemoryStationRepository {
    async fn insert(&self, station: ChargingStation) -> DomainResult<()> {
        if self.stations.contains_key(&station.id) {
            return Err(DomainError::Conflict(format!(
                "Station '{}' already exists",
                station.id
            )));
        }
        self.stations.insert(station.id.clone(), station);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ChargingStation>> {
        Ok(self.stations.get(id).map(|s| s.clone()))
    }

    async fn find_all(&self, filter: &StationFilter) -> DomainResult<Vec<ChargingStation>> {
        Ok(self
            .stations
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn update(&self, station: ChargingStation) -> DomainResult<()> {
        if !self.stations.contains_key(&station.id) {
            return Err(DomainError::not_found("Station"));
        }
        self.stations.insert(station.id.clone(), station);
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        if self.stations.remove(id).is_none() {
            return Err(DomainError::not_found("Station"));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> DomainResult<()> {
        let taken = self
            .users
            .iter()
            .any(|entry| entry.value().email == user.email);
        if taken {
            return Err(DomainError::Conflict(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }
        self.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone()))
    }
}

/// Repository provider with no database behind it. Used by tests and
/// available for local development.
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    stations: InMemoryStationRepository,
    users: InMemoryUserRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn stations(&self) -> &dyn StationRepository {
        &self.stations
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
