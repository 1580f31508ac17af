//! Station API DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{
    ConnectorType, Location, NewStation, StationFilter, StationPatch, StationStatus,
    StationWithOwner,
};

/// Geographic coordinates of a station
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Location> for LocationDto {
    fn from(l: Location) -> Self {
        Self {
            latitude: l.latitude,
            longitude: l.longitude,
        }
    }
}

impl From<LocationDto> for Location {
    fn from(l: LocationDto) -> Self {
        Self {
            latitude: l.latitude,
            longitude: l.longitude,
        }
    }
}

/// Station owner as returned on reads
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OwnerDto {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Station representation on the wire
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id: String,
    pub name: String,
    pub location: LocationDto,
    /// `Active` or `Inactive`
    #[schema(value_type = String, example = "Active")]
    pub status: StationStatus,
    pub power_output: f64,
    /// One of: `Type 1`, `Type 2`, `CCS`, `CHAdeMO`, `Tesla Supercharger`
    #[schema(value_type = String, example = "CCS")]
    pub connector_type: ConnectorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerDto>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl StationDto {
    pub fn from_domain(sw: StationWithOwner) -> Self {
        Self {
            id: sw.station.id,
            name: sw.station.name,
            location: sw.station.location.into(),
            status: sw.station.status,
            power_output: sw.station.power_output,
            connector_type: sw.station.connector_type,
            owner: sw.owner.map(|o| OwnerDto {
                id: o.id,
                name: o.name,
                email: o.email,
            }),
            created_at: sw.station.created_at,
            updated_at: sw.station.updated_at,
        }
    }
}

/// Request body for creating a station. Owner is implied by the
/// authenticated caller and cannot be supplied here.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "name": "Downtown-1",
    "location": { "latitude": 40.0, "longitude": -74.0 },
    "powerOutput": 50,
    "connectorType": "CCS"
}))]
pub struct CreateStationRequest {
    #[validate(length(min = 1, message = "Station name must not be empty"))]
    pub name: String,
    pub location: LocationDto,
    /// Defaults to `Active` when omitted
    #[schema(value_type = Option<String>, example = "Active")]
    pub status: Option<StationStatus>,
    pub power_output: f64,
    #[schema(value_type = String, example = "CCS")]
    pub connector_type: ConnectorType,
}

impl CreateStationRequest {
    pub fn into_domain(self) -> NewStation {
        NewStation {
            name: self.name,
            location: self.location.into(),
            status: self.status,
            power_output: self.power_output,
            connector_type: self.connector_type,
        }
    }
}

/// Partial update body. Unknown and server-owned fields (owner, id,
/// timestamps) are ignored by construction.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStationRequest {
    #[validate(length(min = 1, message = "Station name must not be empty"))]
    pub name: Option<String>,
    pub location: Option<LocationDto>,
    #[schema(value_type = Option<String>, example = "Inactive")]
    pub status: Option<StationStatus>,
    pub power_output: Option<f64>,
    #[schema(value_type = Option<String>, example = "Type 2")]
    pub connector_type: Option<ConnectorType>,
}

impl UpdateStationRequest {
    pub fn into_domain(self) -> StationPatch {
        StationPatch {
            name: self.name,
            location: self.location.map(Into::into),
            status: self.status,
            power_output: self.power_output,
            connector_type: self.connector_type,
        }
    }
}

/// Listing filter query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StationQuery {
    /// Exact status match (`Active` / `Inactive`)
    #[param(value_type = Option<String>)]
    pub status: Option<StationStatus>,
    /// Minimum power output in kW, inclusive
    pub power_output: Option<f64>,
    /// Exact connector type match
    #[param(value_type = Option<String>)]
    pub connector_type: Option<ConnectorType>,
}

impl StationQuery {
    pub fn into_filter(self) -> StationFilter {
        StationFilter {
            status: self.status,
            min_power_output: self.power_output,
            connector_type: self.connector_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_accepts_wire_field_names() {
        let body = serde_json::json!({
            "name": "Downtown-1",
            "location": { "latitude": 40.0, "longitude": -74.0 },
            "powerOutput": 50,
            "connectorType": "CCS"
        });
        let req: CreateStationRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.connector_type, ConnectorType::Ccs);
        assert_eq!(req.power_output, 50.0);
        assert!(req.status.is_none());
    }

    #[test]
    fn create_request_rejects_missing_required_field() {
        let body = serde_json::json!({
            "name": "Downtown-1",
            "location": { "latitude": 40.0, "longitude": -74.0 },
            "connectorType": "CCS"
        });
        assert!(serde_json::from_value::<CreateStationRequest>(body).is_err());
    }

    #[test]
    fn update_request_ignores_owner_field() {
        let body = serde_json::json!({
            "powerOutput": 75,
            "owner": "someone-else"
        });
        let req: UpdateStationRequest = serde_json::from_value(body).unwrap();
        let patch = req.into_domain();
        assert_eq!(patch.power_output, Some(75.0));
    }

    #[test]
    fn station_dto_serializes_camel_case() {
        let sw = StationWithOwner {
            station: crate::domain::ChargingStation {
                id: "st-1".into(),
                name: "Downtown-1".into(),
                location: Location {
                    latitude: 40.0,
                    longitude: -74.0,
                },
                status: StationStatus::Active,
                power_output: 50.0,
                connector_type: ConnectorType::TeslaSupercharger,
                owner_id: "user-1".into(),
                created_at: chrono::Utc::now(),
                updated_at: chrono::Utc::now(),
            },
            owner: None,
        };
        let value = serde_json::to_value(StationDto::from_domain(sw)).unwrap();
        assert_eq!(value["powerOutput"], 50.0);
        assert_eq!(value["connectorType"], "Tesla Supercharger");
        assert_eq!(value["status"], "Active");
        assert!(value.get("owner").is_none());
    }
}
