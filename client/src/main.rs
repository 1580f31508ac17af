//! VoltGrid — CLI client for the charging station API.
//!
//! ```sh
//! # Log in and list stations
//! voltgrid login --email a@example.com --password secret123
//! voltgrid list --min-power 50 --connector "Type 2"
//!
//! # Create and update
//! voltgrid create --name "Downtown-1" --lat 40.0 --lon -74.0 \
//!     --power 50 --connector CCS
//! voltgrid update <id> --power 75
//! ```

use std::sync::Arc;

use clap::{Parser, Subcommand};

use voltgrid_client::api::HttpApi;
use voltgrid_client::session::{AuthSession, SessionStore};
use voltgrid_client::store::StationStore;
use voltgrid_client::types::{
    ConnectorType, CreateStation, Location, Station, StationFilters, StationStatus, UpdateStation,
};

/// VoltGrid — manage EV charging stations from the command line.
#[derive(Parser, Debug)]
#[command(
    name = "voltgrid",
    version,
    about = "CLI client for the VoltGrid charging station API"
)]
struct Cli {
    /// Base URL of the API server.
    #[arg(long, env = "VOLTGRID_SERVER", default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and log in.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and save the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the saved session.
    Logout,
    /// Show the logged-in account.
    Me,
    /// List stations, optionally filtered.
    List {
        /// Filter by status (Active, Inactive).
        #[arg(long)]
        status: Option<String>,
        /// Minimum power output in kW (inclusive).
        #[arg(long)]
        min_power: Option<f64>,
        /// Filter by connector type (e.g. "Type 2", CCS, CHAdeMO).
        #[arg(long)]
        connector: Option<String>,
    },
    /// Show one station.
    Get { id: String },
    /// Create a station owned by the logged-in account.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        #[arg(long)]
        power: f64,
        #[arg(long)]
        connector: String,
        #[arg(long)]
        status: Option<String>,
    },
    /// Update a station you own; omitted fields keep their value.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        lat: Option<f64>,
        #[arg(long)]
        lon: Option<f64>,
        #[arg(long)]
        power: Option<f64>,
        #[arg(long)]
        connector: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete a station you own.
    Delete { id: String },
}

fn parse_status(s: &str) -> Result<StationStatus, String> {
    match s {
        "Active" => Ok(StationStatus::Active),
        "Inactive" => Ok(StationStatus::Inactive),
        other => Err(format!("unknown status '{}' (Active, Inactive)", other)),
    }
}

fn parse_connector(s: &str) -> Result<ConnectorType, String> {
    match s {
        "Type 1" => Ok(ConnectorType::Type1),
        "Type 2" => Ok(ConnectorType::Type2),
        "CCS" => Ok(ConnectorType::Ccs),
        "CHAdeMO" => Ok(ConnectorType::Chademo),
        "Tesla Supercharger" => Ok(ConnectorType::TeslaSupercharger),
        other => Err(format!(
            "unknown connector type '{}' (Type 1, Type 2, CCS, CHAdeMO, Tesla Supercharger)",
            other
        )),
    }
}

fn parse_location(lat: Option<f64>, lon: Option<f64>) -> Result<Option<Location>, String> {
    match (lat, lon) {
        (Some(latitude), Some(longitude)) => Ok(Some(Location {
            latitude,
            longitude,
        })),
        (None, None) => Ok(None),
        _ => Err("--lat and --lon must be given together".to_string()),
    }
}

fn print_station(station: &Station) {
    println!("{}  {}", station.id, station.name);
    println!("  status     : {}", station.status);
    println!("  power      : {} kW", station.power_output);
    println!("  connector  : {}", station.connector_type);
    println!(
        "  location   : {}, {}",
        station.location.latitude, station.location.longitude
    );
    if let Some(owner) = &station.owner {
        println!("  owner      : {} <{}>", owner.name, owner.email);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let sessions = SessionStore::new(SessionStore::default_path());
    let session = sessions.load()?;
    let api = HttpApi::new(cli.server.clone(), session.clone());

    match cli.command {
        Command::Register {
            name,
            email,
            password,
        } => {
            let auth = api.register(&name, &email, &password).await?;
            sessions.save(&AuthSession::new(auth.token, &auth.user))?;
            println!("Registered and logged in as {}", auth.user.email);
        }
        Command::Login { email, password } => {
            let auth = api.login(&email, &password).await?;
            sessions.save(&AuthSession::new(auth.token, &auth.user))?;
            println!("Logged in as {}", auth.user.email);
        }
        Command::Logout => {
            sessions.clear()?;
            println!("Logged out");
        }
        Command::Me => {
            let user = api.current_user().await?;
            println!("{} <{}> ({})", user.name, user.email, user.id);
        }
        Command::List {
            status,
            min_power,
            connector,
        } => {
            let filters = StationFilters {
                status: status.as_deref().map(parse_status).transpose()?,
                min_power_output: min_power,
                connector_type: connector.as_deref().map(parse_connector).transpose()?,
            };
            let mut store = StationStore::new(Arc::new(api));
            store.set_filters(filters).await;
            if let Some(error) = &store.error {
                return Err(error.clone().into());
            }
            if store.stations.is_empty() {
                println!("No stations found");
            }
            for station in &store.stations {
                print_station(station);
            }
        }
        Command::Get { id } => {
            let mut store = StationStore::new(Arc::new(api));
            store.fetch_station(&id).await;
            if let Some(error) = &store.error {
                return Err(error.clone().into());
            }
            if let Some(station) = &store.current_station {
                print_station(station);
            }
        }
        Command::Create {
            name,
            lat,
            lon,
            power,
            connector,
            status,
        } => {
            let mut store = StationStore::new(Arc::new(api));
            let created = store
                .create_station(CreateStation {
                    name,
                    location: Location {
                        latitude: lat,
                        longitude: lon,
                    },
                    status: status.as_deref().map(parse_status).transpose()?,
                    power_output: power,
                    connector_type: parse_connector(&connector)?,
                })
                .await?;
            println!("Created:");
            print_station(&created);
        }
        Command::Update {
            id,
            name,
            lat,
            lon,
            power,
            connector,
            status,
        } => {
            let mut store = StationStore::new(Arc::new(api));
            let updated = store
                .update_station(
                    &id,
                    UpdateStation {
                        name,
                        location: parse_location(lat, lon)?,
                        status: status.as_deref().map(parse_status).transpose()?,
                        power_output: power,
                        connector_type: connector.as_deref().map(parse_connector).transpose()?,
                    },
                )
                .await?;
            println!("Updated:");
            print_station(&updated);
        }
        Command::Delete { id } => {
            let mut store = StationStore::new(Arc::new(api));
            store.delete_station(&id).await?;
            println!("Station deleted successfully");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
