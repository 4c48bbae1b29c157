//! HTTP client for the KSP storefront API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ksp_core::config::DEFAULT_BASE_URL;
use ksp_core::{AppConfig, Language};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::KspError;
use crate::model::{PartialProduct, Product};
use crate::raw::is_falsy;
use crate::transport::{BranchStockRecords, Transport};
use crate::types::{ApiResponse, SearchResult, StockResult};

/// Request header carrying the storefront language.
const LANGUAGE_HEADER: &str = "lang";

/// HTTP client for the storefront's JSON endpoints.
///
/// Cheap to clone; clones share the underlying connection pool. Products
/// returned by [`KspClient::get_product`] and [`KspClient::search`] hold a
/// clone as their [`Transport`] so they can look up stock later.
///
/// Non-2xx responses surface as typed errors. Nothing is retried.
#[derive(Debug, Clone)]
pub struct KspClient {
    client: Client,
    base_url: Url,
    language: Language,
}

impl KspClient {
    /// Creates a client pointed at the production storefront API.
    ///
    /// # Errors
    ///
    /// Returns [`KspError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(language: Language, timeout_secs: u64, user_agent: &str) -> Result<Self, KspError> {
        Self::with_base_url(DEFAULT_BASE_URL, language, timeout_secs, user_agent)
    }

    /// Creates a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// See [`KspClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, KspError> {
        Self::with_base_url(
            &config.base_url,
            config.language,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom API root (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`KspError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`KspError::InvalidBaseUrl`] if `base_url`
    /// is not an absolute hierarchical URL.
    pub fn with_base_url(
        base_url: &str,
        language: Language,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, KspError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| KspError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(KspError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
            language,
        })
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Fetches the full item page for `uin`.
    ///
    /// Returns `Ok(None)` when the storefront answers with an empty result
    /// for an unknown uin.
    ///
    /// # Errors
    ///
    /// - [`KspError::NotFound`] / [`KspError::UnexpectedStatus`] on non-2xx responses.
    /// - [`KspError::Http`] on network failure.
    /// - [`KspError::Deserialize`] if the body is not a JSON envelope.
    /// - [`KspError::MissingField`] / [`KspError::InvalidField`] if the item
    ///   payload does not have the expected shape.
    pub async fn get_product(&self, uin: i64) -> Result<Option<Product>, KspError> {
        let url = self.endpoint(&["item", &uin.to_string()])?;
        let envelope: ApiResponse<Value> = self
            .request_json(url, &format!("item(uin={uin})"))
            .await?;

        let result = envelope.result;
        if is_falsy(&result) {
            tracing::debug!(uin, "item lookup returned an empty result");
            return Ok(None);
        }

        let raw = result.as_object().ok_or_else(|| KspError::InvalidField {
            field: "result".to_owned(),
            value: result.clone(),
            entity: "Product",
        })?;

        Product::from_raw(raw, self.as_transport()).map(Some)
    }

    /// Searches the catalog and returns the summary record of each hit.
    ///
    /// Hits that fail to parse are skipped with a warning; one malformed
    /// entry does not discard the rest of the page.
    ///
    /// # Errors
    ///
    /// - [`KspError::NotFound`] / [`KspError::UnexpectedStatus`] on non-2xx responses.
    /// - [`KspError::Http`] on network failure.
    /// - [`KspError::Deserialize`] if the body does not match the search envelope.
    pub async fn search(&self, query: &str) -> Result<Vec<PartialProduct>, KspError> {
        let mut url = self.endpoint(&["category", ""])?;
        url.query_pairs_mut().append_pair("search", query);

        let envelope: ApiResponse<SearchResult> = self
            .request_json(url, &format!("search(query={query})"))
            .await?;

        let transport = self.as_transport();
        let products = envelope
            .result
            .items
            .iter()
            .filter_map(
                |item| match PartialProduct::from_raw(item, Arc::clone(&transport)) {
                    Ok(product) => Some(product),
                    Err(e) => {
                        tracing::warn!(query, error = %e, "skipping malformed search hit");
                        None
                    }
                },
            )
            .collect();

        Ok(products)
    }

    fn as_transport(&self) -> Arc<dyn Transport> {
        Arc::new(self.clone())
    }

    /// Appends `segments` to the API root, percent-encoding each one.
    ///
    /// An empty trailing segment produces a trailing slash.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, KspError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| KspError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: "URL cannot carry a path".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET request, maps non-2xx statuses to typed errors, and parses
    /// the body as `T`.
    async fn request_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, KspError> {
        tracing::debug!(url = %url, "requesting");

        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(LANGUAGE_HEADER, self.language.code())
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(KspError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(KspError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| KspError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[async_trait]
impl Transport for KspClient {
    /// Fetches per-branch stock for `sku` from `mlay/{sku}`.
    async fn get_product_stock(&self, sku: &str) -> Result<BranchStockRecords, KspError> {
        let url = self.endpoint(&["mlay", sku])?;
        let envelope: ApiResponse<StockResult> = self
            .request_json(url, &format!("stock(sku={sku})"))
            .await?;
        Ok(envelope.result.branches)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
