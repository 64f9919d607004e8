//! STOQR items API client
//!
//! Thin async wrapper over `reqwest`. Every call returns a classified
//! [`ApiError`] on failure and logs it; nothing here touches client state.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::{ClientConfig, WithdrawMethod};
use crate::error::ApiError;
use crate::item::{Item, ItemId, NewItem};

/// Configured HTTP client pointed at the items API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: String,
    withdraw_method: WithdrawMethod,
}

impl ApiClient {
    /// Build a client from a validated configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base: config.api_url.trim_end_matches('/').to_string(),
            withdraw_method: config.withdraw_method,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// `GET /items`, optionally filtered by a name substring
    pub async fn list_items(&self, filter: Option<&str>) -> Result<Vec<Item>, ApiError> {
        let url = match filter.map(str::trim).filter(|f| !f.is_empty()) {
            Some(filter) => self.url(&format!("/items?filter={}", urlencoding::encode(filter))),
            None => self.url("/items"),
        };
        let request = self.http.get(&url);
        read_json("list", send("list", request).await?).await
    }

    /// `GET /items/{id}`
    pub async fn get_item(&self, id: ItemId) -> Result<Item, ApiError> {
        let request = self.http.get(self.url(&format!("/items/{}", id)));
        read_json("get", send("get", request).await?).await
    }

    /// `POST /items` - the response carries the assigned id
    pub async fn create_item(&self, item: &NewItem) -> Result<Item, ApiError> {
        let request = self.http.post(self.url("/items")).json(item);
        read_json("create", send("create", request).await?).await
    }

    /// `DELETE /items/{id}` - the response body is ignored
    pub async fn delete_item(&self, id: ItemId) -> Result<(), ApiError> {
        let request = self.http.delete(self.url(&format!("/items/{}", id)));
        send("delete", request).await?;
        Ok(())
    }

    /// Withdraw one unit.
    ///
    /// Returns the server's updated item, or `None` when the server answered
    /// without a body.
    pub async fn withdraw_item(&self, id: ItemId) -> Result<Option<Item>, ApiError> {
        let method = match self.withdraw_method {
            WithdrawMethod::Get => Method::GET,
            WithdrawMethod::Post => Method::POST,
        };
        let request = self
            .http
            .request(method, self.url(&format!("/items/withdraw/{}", id)));
        let response = send("withdraw", request).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| unreadable("withdraw", ApiError::from(e)))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| unreadable("withdraw", ApiError::Decode(e.to_string())))
    }
}

/// Send a request and turn non-success statuses into errors
async fn send(op: &'static str, request: RequestBuilder) -> Result<Response, ApiError> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            let err = ApiError::from(e);
            tracing::warn!(op, kind = err.kind(), error = %err, "API request failed");
            return Err(err);
        }
    };

    let status = response.status();
    if status.is_success() {
        tracing::debug!(op, status = status.as_u16(), "API request succeeded");
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    let message = if message.trim().is_empty() {
        status.canonical_reason().unwrap_or("").to_string()
    } else {
        message.trim().to_string()
    };
    let err = ApiError::from_status(status.as_u16(), message);
    tracing::warn!(op, kind = err.kind(), error = %err, "API request rejected");
    Err(err)
}

async fn read_json<T: DeserializeOwned>(
    op: &'static str,
    response: Response,
) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| unreadable(op, ApiError::Decode(e.to_string())))
}

/// Log a response whose body could not be read or decoded
fn unreadable(op: &'static str, err: ApiError) -> ApiError {
    tracing::warn!(op, kind = err.kind(), error = %err, "API response could not be decoded");
    err
}
