//! SeaORM implementation of StationRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use tracing::{debug, info};

use crate::domain::station::{
    ChargingStation, ConnectorType, Location, StationFilter, StationRepository, StationStatus,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::station;

pub struct SeaOrmStationRepository {
    db: DatabaseConnection,
}

impl SeaOrmStationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_entity(status: StationStatus) -> station::Status {
    match status {
        StationStatus::Active => station::Status::Active,
        StationStatus::Inactive => station::Status::Inactive,
    }
}

fn status_from_entity(status: station::Status) -> StationStatus {
    match status {
        station::Status::Active => StationStatus::Active,
        station::Status::Inactive => StationStatus::Inactive,
    }
}

fn connector_to_entity(connector: ConnectorType) -> station::Connector {
    match connector {
        ConnectorType::Type1 => station::Connector::Type1,
        ConnectorType::Type2 => station::Connector::Type2,
        ConnectorType::Ccs => station::Connector::Ccs,
        ConnectorType::Chademo => station::Connector::Chademo,
        ConnectorType::TeslaSupercharger => station::Connector::TeslaSupercharger,
    }
}

fn connector_from_entity(connector: station::Connector) -> ConnectorType {
    match connector {
        station::Connector::Type1 => ConnectorType::Type1,
        station::Connector::Type2 => ConnectorType::Type2,
        station::Connector::Ccs => ConnectorType::Ccs,
        station::Connector::Chademo => ConnectorType::Chademo,
        station::Connector::TeslaSupercharger => ConnectorType::TeslaSupercharger,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Errors from the update statement itself. The row can vanish between
/// the existence check and the update; that is still a missing station,
/// not a database failure.
fn update_err(e: sea_orm::DbErr) -> DomainError {
    match e {
        sea_orm::DbErr::RecordNotUpdated => DomainError::not_found("Station"),
        other => db_err(other),
    }
}

fn station_from_model(model: station::Model) -> ChargingStation {
    ChargingStation {
        id: model.id,
        name: model.name,
        location: Location {
            latitude: model.latitude,
            longitude: model.longitude,
        },
        status: status_from_entity(model.status),
        power_output: model.power_output,
        connector_type: connector_from_entity(model.connector_type),
        owner_id: model.owner_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn station_to_active_model(st: ChargingStation) -> station::ActiveModel {
    station::ActiveModel {
        id: Set(st.id),
        name: Set(st.name),
        latitude: Set(st.location.latitude),
        longitude: Set(st.location.longitude),
        status: Set(status_to_entity(st.status)),
        power_output: Set(st.power_output),
        connector_type: Set(connector_to_entity(st.connector_type)),
        owner_id: Set(st.owner_id),
        created_at: Set(st.created_at),
        updated_at: Set(st.updated_at),
    }
}

// ── StationRepository impl ──────────────────────────────────────

#[async_trait]
impl StationRepository for SeaOrmStationRepository {
    async fn insert(&self, st: ChargingStation) -> DomainResult<()> {
        debug!("Inserting station: {}", st.id);

        let id = st.id.clone();
        station_to_active_model(st)
            .insert(&self.db)
            .await
            .map_err(db_err)?;

        info!("Station saved: {}", id);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<ChargingStation>> {
        let model = station::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(station_from_model))
    }

    async fn find_all(&self, filter: &StationFilter) -> DomainResult<Vec<ChargingStation>> {
        let mut query = station::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(station::Column::Status.eq(status_to_entity(status)));
        }
        if let Some(min_power) = filter.min_power_output {
            query = query.filter(station::Column::PowerOutput.gte(min_power));
        }
        if let Some(connector) = filter.connector_type {
            query =
                query.filter(station::Column::ConnectorType.eq(connector_to_entity(connector)));
        }

        let models = query.all(&self.db).await.map_err(db_err)?;
        Ok(models.into_iter().map(station_from_model).collect())
    }

    async fn update(&self, st: ChargingStation) -> DomainResult<()> {
        debug!("Updating station: {}", st.id);

        let existing = station::Entity::find_by_id(&st.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        if existing.is_none() {
            return Err(DomainError::not_found("Station"));
        }

        station_to_active_model(st)
            .update(&self.db)
            .await
            .map_err(update_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = station::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Station"));
        }
        Ok(())
    }
}
