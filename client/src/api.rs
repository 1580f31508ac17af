//! HTTP client for the VoltGrid REST API.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::session::AuthSession;
use crate::types::{
    AuthResponse, CreateStation, Station, StationFilters, UpdateStation, UserInfo,
};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error status; the message is the
    /// server's own `{"message": ...}` body.
    #[error("{message}")]
    Api { status: StatusCode, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("not logged in; run `voltgrid login` first")]
    NotAuthenticated,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Station operations the store depends on.
#[async_trait]
pub trait StationApi: Send + Sync {
    async fn list_stations(&self, filters: &StationFilters) -> ClientResult<Vec<Station>>;
    async fn get_station(&self, id: &str) -> ClientResult<Station>;
    async fn create_station(&self, station: &CreateStation) -> ClientResult<Station>;
    async fn update_station(&self, id: &str, patch: &UpdateStation) -> ClientResult<Station>;
    async fn delete_station(&self, id: &str) -> ClientResult<()>;
}

/// `reqwest`-backed client. Holds the base URL and, when logged in, the
/// session whose token is attached to every request.
pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
    session: Option<AuthSession>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, session: Option<AuthSession>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            session,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "sending request");
        let mut builder = self.client.request(method, url);
        if let Some(session) = &self.session {
            builder = builder.bearer_auth(&session.token);
        }
        builder
    }

    async fn parse<T: for<'de> Deserialize<'de>>(response: Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn api_error(status: StatusCode, response: Response) -> ClientError {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        ClientError::Api { status, message }
    }

    /// Create an account; the server logs the new user in immediately.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthResponse> {
        let response = self
            .request(Method::POST, "/auth/register")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::parse(response).await
    }

    pub async fn current_user(&self) -> ClientResult<UserInfo> {
        if self.session.is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        let response = self.request(Method::GET, "/auth/me").send().await?;
        Self::parse(response).await
    }
}

#[async_trait]
impl StationApi for HttpApi {
    async fn list_stations(&self, filters: &StationFilters) -> ClientResult<Vec<Station>> {
        let response = self
            .request(Method::GET, "/stations")
            .query(&filters.to_query())
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn get_station(&self, id: &str) -> ClientResult<Station> {
        let response = self
            .request(Method::GET, &format!("/stations/{}", id))
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn create_station(&self, station: &CreateStation) -> ClientResult<Station> {
        let response = self
            .request(Method::POST, "/stations")
            .json(station)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn update_station(&self, id: &str, patch: &UpdateStation) -> ClientResult<Station> {
        let response = self
            .request(Method::PUT, &format!("/stations/{}", id))
            .json(patch)
            .send()
            .await?;
        Self::parse(response).await
    }

    async fn delete_station(&self, id: &str) -> ClientResult<()> {
        let response = self
            .request(Method::DELETE, &format!("/stations/{}", id))
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status, response).await)
        }
    }
}
