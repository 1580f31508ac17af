//! Wire types mirroring the server API.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationStatus {
    Active,
    Inactive,
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}

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

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Type1 => "Type 1",
            Self::Type2 => "Type 2",
            Self::Ccs => "CCS",
            Self::Chademo => "CHAdeMO",
            Self::TeslaSupercharger => "Tesla Supercharger",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    pub location: Location,
    pub status: StationStatus,
    pub power_output: f64,
    pub connector_type: ConnectorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStation {
    pub name: String,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StationStatus>,
    pub power_output: f64,
    pub connector_type: ConnectorType,
}

/// Partial update; only present fields are changed. Ownership and
/// timestamps are server-managed and cannot be sent at all.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_output: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<ConnectorType>,
}

/// List filters; unset fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationFilters {
    pub status: Option<StationStatus>,
    pub min_power_output: Option<f64>,
    pub connector_type: Option<ConnectorType>,
}

impl StationFilters {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.min_power_output.is_none() && self.connector_type.is_none()
    }

    /// Query string pairs for `GET /stations`.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
        if let Some(power) = self.min_power_output {
            query.push(("powerOutput", power.to_string()));
        }
        if let Some(connector) = self.connector_type {
            query.push(("connectorType", connector.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}
