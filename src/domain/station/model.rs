//! Charging station domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Operational status of a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationStatus {
    Active,
    Inactive,
}

impl Default for StationStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}

impl std::str::FromStr for StationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(format!("Unknown station status: {}", other)),
        }
    }
}

/// Physical connector standard of a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorType {
    #[serde(rename = "Type 1")]
    Type1,
    #[serde(rename = "Type 2")]
    Type2,
    #[serde(rename = "CCS")]
    Ccs,
    #[serde(rename = "CHAdeMO")]
    Chademo,
    #[serde(rename = "Tesla Supercharger")]
    TeslaSupercharger,
}

impl std::fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type1 => write!(f, "Type 1"),
            Self::Type2 => write!(f, "Type 2"),
            Self::Ccs => write!(f, "CCS"),
            Self::Chademo => write!(f, "CHAdeMO"),
            Self::TeslaSupercharger => write!(f, "Tesla Supercharger"),
        }
    }
}

impl std::str::FromStr for ConnectorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Type 1" => Ok(Self::Type1),
            "Type 2" => Ok(Self::Type2),
            "CCS" => Ok(Self::Ccs),
            "CHAdeMO" => Ok(Self::Chademo),
            "Tesla Supercharger" => Ok(Self::TeslaSupercharger),
            other => Err(format!("Unknown connector type: {}", other)),
        }
    }
}

/// Geographic position. Required on every station, no range validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Charging station entity
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingStation {
    /// Store-assigned unique identifier, immutable
    pub id: String,
    pub name: String,
    pub location: Location,
    pub status: StationStatus,
    /// Rated power output in kW
    pub power_output: f64,
    pub connector_type: ConnectorType,
    /// Owning user, bound at creation and never altered afterwards
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a station. Owner and id are
/// assigned by the service, not the caller.
#[derive(Debug, Clone)]
pub struct NewStation {
    pub name: String,
    pub location: Location,
    pub status: Option<StationStatus>,
    pub power_output: f64,
    pub connector_type: ConnectorType,
}

/// Partial update. Owner, id and timestamps are structurally absent,
/// so an update payload can never overwrite them.
#[derive(Debug, Clone, Default)]
pub struct StationPatch {
    pub name: Option<String>,
    pub location: Option<Location>,
    pub status: Option<StationStatus>,
    pub power_output: Option<f64>,
    pub connector_type: Option<ConnectorType>,
}

impl StationPatch {
    /// Merge the patch onto an existing station in place.
    pub fn apply(&self, station: &mut ChargingStation) {
        if let Some(name) = &self.name {
            station.name = name.clone();
        }
        if let Some(location) = self.location {
            station.location = location;
        }
        if let Some(status) = self.status {
            station.status = status;
        }
        if let Some(power_output) = self.power_output {
            station.power_output = power_output;
        }
        if let Some(connector_type) = self.connector_type {
            station.connector_type = connector_type;
        }
    }
}

/// Listing filter. Absent fields impose no constraint.
#[derive(Debug, Clone, Default)]
pub struct StationFilter {
    /// Exact status match
    pub status: Option<StationStatus>,
    /// Minimum power output, inclusive
    pub min_power_output: Option<f64>,
    /// Exact connector type match
    pub connector_type: Option<ConnectorType>,
}

impl StationFilter {
    pub fn matches(&self, station: &ChargingStation) -> bool {
        if let Some(status) = self.status {
            if station.status != status {
                return false;
            }
        }
        if let Some(min) = self.min_power_output {
            if station.power_output < min {
                return false;
            }
        }
        if let Some(connector_type) = self.connector_type {
            if station.connector_type != connector_type {
                return false;
            }
        }
        true
    }
}

/// Owner identity as resolved on station reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationOwner {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Station together with its resolved owner
#[derive(Debug, Clone)]
pub struct StationWithOwner {
    pub station: ChargingStation,
    /// None if the owning user record has been removed
    pub owner: Option<StationOwner>,
}
