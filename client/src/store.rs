//! Client-side station state.
//!
//! `StationStore` mirrors the server's station collection for the UI
//! layer: list and detail reads record failures in `error` and resolve
//! quietly, while mutations update the cached list in place and hand
//! the error back to the caller as well.

use std::sync::Arc;

use tracing::warn;

use crate::api::{ClientResult, StationApi};
use crate::types::{CreateStation, Station, StationFilters, UpdateStation};

pub struct StationStore {
    api: Arc<dyn StationApi>,
    pub stations: Vec<Station>,
    pub current_station: Option<Station>,
    pub loading: bool,
    pub error: Option<String>,
    pub filters: StationFilters,
}

impl StationStore {
    pub fn new(api: Arc<dyn StationApi>) -> Self {
        Self {
            api,
            stations: Vec::new(),
            current_station: None,
            loading: false,
            error: None,
            filters: StationFilters::default(),
        }
    }

    /// Refresh the station list under the current filters. A failure is
    /// recorded in `error` and leaves the previous list untouched.
    pub async fn fetch_stations(&mut self) {
        self.loading = true;
        self.error = None;
        match self.api.list_stations(&self.filters).await {
            Ok(stations) => self.stations = stations,
            Err(e) => {
                warn!("failed to fetch stations: {}", e);
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    /// Load a single station into `current_station`. A failure is
    /// recorded in `error`.
    pub async fn fetch_station(&mut self, id: &str) {
        self.loading = true;
        self.error = None;
        match self.api.get_station(id).await {
            Ok(station) => self.current_station = Some(station),
            Err(e) => {
                warn!("failed to fetch station {}: {}", id, e);
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    /// Create a station and append it to the cached list.
    pub async fn create_station(&mut self, station: CreateStation) -> ClientResult<Station> {
        self.loading = true;
        self.error = None;
        let result = self.api.create_station(&station).await;
        match &result {
            Ok(created) => self.stations.push(created.clone()),
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
        result
    }

    /// Update a station and replace its cached entry.
    pub async fn update_station(&mut self, id: &str, patch: UpdateStation) -> ClientResult<Station> {
        self.loading = true;
        self.error = None;
        let result = self.api.update_station(id, &patch).await;
        match &result {
            Ok(updated) => {
                if let Some(slot) = self.stations.iter_mut().find(|s| s.id == updated.id) {
                    *slot = updated.clone();
                }
                if self
                    .current_station
                    .as_ref()
                    .is_some_and(|s| s.id == updated.id)
                {
                    self.current_station = Some(updated.clone());
                }
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
        result
    }

    /// Delete a station and drop its cached entry.
    pub async fn delete_station(&mut self, id: &str) -> ClientResult<()> {
        self.loading = true;
        self.error = None;
        let result = self.api.delete_station(id).await;
        match &result {
            Ok(()) => {
                self.stations.retain(|s| s.id != id);
                if self.current_station.as_ref().is_some_and(|s| s.id == id) {
                    self.current_station = None;
                }
            }
            Err(e) => self.error = Some(e.to_string()),
        }
        self.loading = false;
        result
    }

    /// Replace the filters and refresh the list.
    pub async fn set_filters(&mut self, filters: StationFilters) {
        self.filters = filters;
        self.fetch_stations().await;
    }

    /// Drop all filters and refresh the list.
    pub async fn clear_filters(&mut self) {
        self.set_filters(StationFilters::default()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ClientError;
    use crate::types::{ConnectorType, Location, StationStatus};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    /// In-memory fake of the server's station collection.
    #[derive(Default)]
    struct FakeApi {
        stations: Mutex<Vec<Station>>,
        fail_reads: bool,
    }

    fn sample(id: &str, power: f64) -> Station {
        Station {
            id: id.to_string(),
            name: format!("Station-{}", id),
            location: Location {
                latitude: 40.0,
                longitude: -74.0,
            },
            status: StationStatus::Active,
            power_output: power,
            connector_type: ConnectorType::Ccs,
            owner: None,
            created_at: "2025-06-01T00:00:00Z".to_string(),
            updated_at: "2025-06-01T00:00:00Z".to_string(),
        }
    }

    fn not_found() -> ClientError {
        ClientError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Charging station not found".to_string(),
        }
    }

    #[async_trait]
    impl StationApi for FakeApi {
        async fn list_stations(&self, filters: &StationFilters) -> ClientResult<Vec<Station>> {
            if self.fail_reads {
                return Err(ClientError::Api {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "boom".to_string(),
                });
            }
            let stations = self.stations.lock().unwrap();
            Ok(stations
                .iter()
                .filter(|s| {
                    filters.status.is_none_or(|v| s.status == v)
                        && filters.min_power_output.is_none_or(|v| s.power_output >= v)
                        && filters.connector_type.is_none_or(|v| s.connector_type == v)
                })
                .cloned()
                .collect())
        }

        async fn get_station(&self, id: &str) -> ClientResult<Station> {
            let stations = self.stations.lock().unwrap();
            stations
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .ok_or_else(not_found)
        }

        async fn create_station(&self, station: &CreateStation) -> ClientResult<Station> {
            let mut stations = self.stations.lock().unwrap();
            let created = Station {
                id: format!("id-{}", stations.len() + 1),
                name: station.name.clone(),
                location: station.location,
                status: station.status.unwrap_or(StationStatus::Active),
                power_output: station.power_output,
                connector_type: station.connector_type,
                owner: None,
                created_at: "2025-06-01T00:00:00Z".to_string(),
                updated_at: "2025-06-01T00:00:00Z".to_string(),
            };
            stations.push(created.clone());
            Ok(created)
        }

        async fn update_station(&self, id: &str, patch: &UpdateStation) -> ClientResult<Station> {
            let mut stations = self.stations.lock().unwrap();
            let station = stations
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(not_found)?;
            if let Some(power) = patch.power_output {
                station.power_output = power;
            }
            if let Some(ref name) = patch.name {
                station.name = name.clone();
            }
            Ok(station.clone())
        }

        async fn delete_station(&self, id: &str) -> ClientResult<()> {
            let mut stations = self.stations.lock().unwrap();
            let before = stations.len();
            stations.retain(|s| s.id != id);
            if stations.len() == before {
                return Err(not_found());
            }
            Ok(())
        }
    }

    fn store_with(stations: Vec<Station>) -> StationStore {
        StationStore::new(Arc::new(FakeApi {
            stations: Mutex::new(stations),
            fail_reads: false,
        }))
    }

    #[tokio::test]
    async fn fetch_populates_list_and_clears_error() {
        let mut store = store_with(vec![sample("a", 50.0), sample("b", 22.0)]);
        store.error = Some("stale".to_string());

        store.fetch_stations().await;
        assert_eq!(store.stations.len(), 2);
        assert!(store.error.is_none());
        assert!(!store.loading);
    }

    #[tokio::test]
    async fn failed_fetch_records_error_and_keeps_list() {
        let mut store = StationStore::new(Arc::new(FakeApi {
            stations: Mutex::new(Vec::new()),
            fail_reads: true,
        }));
        store.stations = vec![sample("a", 50.0)];

        store.fetch_stations().await;
        assert_eq!(store.error.as_deref(), Some("boom"));
        assert_eq!(store.stations.len(), 1);
        assert!(!store.loading);
    }

    #[tokio::test]
    async fn create_appends_to_list() {
        let mut store = store_with(Vec::new());
        let created = store
            .create_station(CreateStation {
                name: "New".to_string(),
                location: Location {
                    latitude: 1.0,
                    longitude: 2.0,
                },
                status: None,
                power_output: 50.0,
                connector_type: ConnectorType::Type2,
            })
            .await
            .unwrap();

        assert_eq!(store.stations.len(), 1);
        assert_eq!(store.stations[0].id, created.id);
        assert_eq!(created.status, StationStatus::Active);
    }

    #[tokio::test]
    async fn update_replaces_cached_entry() {
        let mut store = store_with(vec![sample("a", 50.0)]);
        store.fetch_stations().await;
        store.current_station = Some(sample("a", 50.0));

        let patch = UpdateStation {
            power_output: Some(75.0),
            ..Default::default()
        };
        store.update_station("a", patch).await.unwrap();

        assert_eq!(store.stations[0].power_output, 75.0);
        assert_eq!(store.current_station.unwrap().power_output, 75.0);
    }

    #[tokio::test]
    async fn failed_mutation_sets_error_and_propagates() {
        let mut store = store_with(Vec::new());
        let result = store.delete_station("missing").await;

        assert!(result.is_err());
        assert_eq!(store.error.as_deref(), Some("Charging station not found"));
    }

    #[tokio::test]
    async fn delete_removes_cached_entry() {
        let mut store = store_with(vec![sample("a", 50.0), sample("b", 22.0)]);
        store.fetch_stations().await;
        store.current_station = Some(sample("a", 50.0));

        store.delete_station("a").await.unwrap();
        assert_eq!(store.stations.len(), 1);
        assert_eq!(store.stations[0].id, "b");
        assert!(store.current_station.is_none());
    }

    #[tokio::test]
    async fn changing_filters_refetches() {
        let mut store = store_with(vec![sample("a", 50.0), sample("b", 22.0)]);
        store.fetch_stations().await;
        assert_eq!(store.stations.len(), 2);

        store
            .set_filters(StationFilters {
                min_power_output: Some(50.0),
                ..Default::default()
            })
            .await;
        assert_eq!(store.stations.len(), 1);
        assert_eq!(store.stations[0].id, "a");

        store.clear_filters().await;
        assert_eq!(store.stations.len(), 2);
        assert!(store.filters.is_empty());
    }
}
