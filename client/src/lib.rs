//! VoltGrid client library: HTTP API client, session handling and the
//! station state store used by the CLI.

pub mod api;
pub mod session;
pub mod store;
pub mod types;

pub use api::{ClientError, ClientResult, HttpApi, StationApi};
pub use session::{AuthSession, SessionStore};
pub use store::StationStore;
