//! Backend API client
//!
//! Thin typed wrappers over the inventory backend's REST endpoints. All
//! inventory rules live on the backend; the client only shapes requests and
//! maps responses and failures.

mod auth;
mod catalog;
mod dashboard;
mod movements;
mod reports;
mod settings;
mod stock;
mod users;

pub use reports::Report;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{CatalogItem, MovementRequest, Sector};
use tracing::{debug, error};

use crate::config::ApiConfig;
use crate::error::{extract_error_message, ClientError, ClientResult};
use crate::events::{EventBus, Resource};
use crate::session::Session;

/// Query string parameters
pub type Query = Vec<(&'static str, String)>;

/// Inventory backend client
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
    events: EventBus,
}

impl ApiClient {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig, session: Session) -> ClientResult<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            base_url: config.endpoint(),
            session,
            events: EventBus::default(),
        })
    }

    /// Create a client against an explicit API root (for testing)
    pub fn with_base_url(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            events: EventBus::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Bus on which successful mutations are announced
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and turn non-2xx answers into [`ClientError::Backend`]
    async fn send(&self, builder: RequestBuilder, path: &str) -> ClientResult<Response> {
        let response = builder.send().await.map_err(|e| {
            error!(path, error = %e, "Request to backend failed");
            ClientError::Network(e)
        })?;

        let status = response.status();
        debug!(path, %status, "Backend responded");
        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                debug!(path, %status, error = %e, "Could not read error body");
                String::new()
            }
        };
        let message = extract_error_message(&body);
        error!(path, %status, message = ?message, "Backend rejected request");
        Err(ClientError::Backend { status, message })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Like [`Self::read_json`] but an empty body means an empty list
    async fn read_list<T: DeserializeOwned>(response: Response) -> ClientResult<Vec<T>> {
        let bytes = response.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        let list: Option<Vec<T>> = serde_json::from_slice(&bytes)?;
        Ok(list.unwrap_or_default())
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> ClientResult<T> {
        let response = self
            .send(self.request(Method::GET, path).query(query), path)
            .await?;
        Self::read_json(response).await
    }

    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Query,
    ) -> ClientResult<Vec<T>> {
        let response = self
            .send(self.request(Method::GET, path).query(query), path)
            .await?;
        Self::read_list(response).await
    }

    pub(crate) async fn get_bytes(&self, path: &str, query: &Query) -> ClientResult<Vec<u8>> {
        let response = self
            .send(self.request(Method::GET, path).query(query), path)
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Send a JSON body and discard whatever the backend answers
    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<Response> {
        self.send(self.request(method, path).json(body), path).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send(self.request(Method::DELETE, path), path).await?;
        Ok(())
    }

    pub(crate) fn announce(&self, resources: &[Resource]) {
        self.events.publish_all(resources);
    }
}

/// Reference data the movement dialog offers for selection
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Selectable items; `only_in_stock` restricts to items with stock on hand
    async fn catalog_items(&self, only_in_stock: bool) -> ClientResult<Vec<CatalogItem>>;

    async fn catalog_sectors(&self) -> ClientResult<Vec<Sector>>;
}

/// Destination of a composed batch movement
#[async_trait]
pub trait MovementBackend: Send + Sync {
    /// Post the whole batch as one request
    async fn submit_movement(&self, request: &MovementRequest) -> ClientResult<()>;
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn catalog_items(&self, only_in_stock: bool) -> ClientResult<Vec<CatalogItem>> {
        if only_in_stock {
            self.items_with_stock().await
        } else {
            self.all_items().await
        }
    }

    async fn catalog_sectors(&self) -> ClientResult<Vec<Sector>> {
        self.list_sectors().await
    }
}

#[async_trait]
impl MovementBackend for ApiClient {
    async fn submit_movement(&self, request: &MovementRequest) -> ClientResult<()> {
        self.post_movement(request).await
    }
}
