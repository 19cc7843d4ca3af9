//! REST client for the Content API.
//!
//! [`ContentApi`] wraps the `/api` endpoints with [`reqwest`]. Controllers
//! and loaders depend on the [`ContentGateway`] trait instead, so they can
//! be driven by an in-memory gateway in tests.

use std::future::Future;

use heritage_core::collection::Collection;
use heritage_core::content::ContentRecord;
use heritage_core::language::Language;
use heritage_core::types::DbId;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ClientError;

/// Header carrying the admin secret.
const API_KEY_HEADER: &str = "x-api-key";

/// Operations the admin panel and loaders need from the Content API.
///
/// Bodies are the raw JSON the API speaks: list calls return the
/// `{ <documentKey>: [...] }` envelope, writes return the stored record.
pub trait ContentGateway: Send + Sync {
    /// Published records of one language.
    fn list_published(
        &self,
        collection: Collection,
        language: Language,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;

    /// Every record of one language, drafts included.
    fn list_admin(
        &self,
        collection: Collection,
        language: Language,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;

    fn create(
        &self,
        collection: Collection,
        language: Language,
        record: &Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;

    fn update(
        &self,
        collection: Collection,
        language: Language,
        id: DbId,
        record: &Value,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;

    /// Delete `id` from one language partition.
    fn delete(
        &self,
        collection: Collection,
        language: Language,
        id: DbId,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// Raw records of a list envelope. A missing key reads as an empty list.
pub fn record_list(collection: Collection, body: &Value) -> Vec<Value> {
    body.get(collection.document_key())
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Typed records of a list envelope.
pub fn decode_records<R: ContentRecord>(body: &Value) -> Result<Vec<R>, ClientError> {
    match body.get(R::COLLECTION.document_key()) {
        Some(items) => Ok(Vec::<R>::deserialize(items)?),
        None => Ok(Vec::new()),
    }
}

/// HTTP client for one Content API deployment.
#[derive(Clone)]
pub struct ContentApi {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl ContentApi {
    /// Create a client for a server, e.g. `http://localhost:3000`.
    ///
    /// Without an API key only the public endpoints succeed.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
        }
    }

    /// Attach the admin API key sent on admin requests.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- URLs ----

    fn public_url(&self, collection: Collection, language: Language) -> String {
        format!(
            "{}/api/{}{}",
            self.base_url,
            collection.path(),
            language.route_suffix()
        )
    }

    fn admin_list_url(&self, collection: Collection, language: Language) -> String {
        format!(
            "{}/api/admin/{}{}",
            self.base_url,
            collection.path(),
            language.route_suffix()
        )
    }

    fn admin_url(&self, collection: Collection, id: Option<DbId>) -> String {
        match id {
            Some(id) => format!("{}/api/admin/{}/{id}", self.base_url, collection.path()),
            None => format!("{}/api/admin/{}", self.base_url, collection.path()),
        }
    }

    fn admin_request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response(response: reqwest::Response) -> Result<Value, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Value>().await?)
    }
}

impl ContentGateway for ContentApi {
    async fn list_published(
        &self,
        collection: Collection,
        language: Language,
    ) -> Result<Value, ClientError> {
        let response = self
            .client
            .get(self.public_url(collection, language))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn list_admin(
        &self,
        collection: Collection,
        language: Language,
    ) -> Result<Value, ClientError> {
        let request = self.client.get(self.admin_list_url(collection, language));
        let response = self.admin_request(request).send().await?;
        Self::parse_response(response).await
    }

    async fn create(
        &self,
        collection: Collection,
        language: Language,
        record: &Value,
    ) -> Result<Value, ClientError> {
        let request = self
            .client
            .post(self.admin_url(collection, None))
            .query(&[("lang", language.code())])
            .json(record);
        let response = self.admin_request(request).send().await?;
        Self::parse_response(response).await
    }

    async fn update(
        &self,
        collection: Collection,
        language: Language,
        id: DbId,
        record: &Value,
    ) -> Result<Value, ClientError> {
        let request = self
            .client
            .put(self.admin_url(collection, Some(id)))
            .query(&[("lang", language.code())])
            .json(record);
        let response = self.admin_request(request).send().await?;
        Self::parse_response(response).await
    }

    async fn delete(
        &self,
        collection: Collection,
        language: Language,
        id: DbId,
    ) -> Result<(), ClientError> {
        let request = self
            .client
            .delete(self.admin_url(collection, Some(id)))
            .query(&[("lang", language.code())]);
        let response = self.admin_request(request).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}
