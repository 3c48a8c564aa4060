//! REST data API implementation of DataGateway
//!
//! Speaks the PostgREST dialect exposed by hosted Postgres services:
//!
//! - `GET    {url}/rest/v1/{table}?select=*&col=eq.value` for selects
//! - `POST   {url}/rest/v1/{table}` with a JSON row for inserts
//! - `PATCH  {url}/rest/v1/{table}?col=eq.value` with a JSON object for updates
//! - `DELETE {url}/rest/v1/{table}?col=eq.value` for deletes
//!
//! Every request carries the `apikey` and `Authorization: Bearer` headers, and
//! writes send `Prefer: return=representation|minimal`.

use crate::config::StoreConfig;
use crate::core::error::GatewayError;
use crate::core::gateway::{DataGateway, Filter, Returning};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

/// HTTPS client for the hosted data API
///
/// Cloning is cheap, the underlying connection pool is shared.
#[derive(Clone)]
pub struct RestGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestGateway {
    /// Build a gateway from store settings
    pub fn new(config: &StoreConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Read the rows returned by a write, or nothing for `return=minimal`
    async fn rows(response: Response, returning: Returning) -> Result<Vec<Value>, GatewayError> {
        let response = Self::checked(response).await?;
        match returning {
            Returning::Minimal => Ok(Vec::new()),
            Returning::Representation => Self::decode(response).await,
        }
    }

    async fn checked(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode(response: Response) -> Result<Vec<Value>, GatewayError> {
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            row => Ok(vec![row]),
        }
    }
}

/// Query pairs for equality filters (`col=eq.value`)
pub fn filter_query(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|f| (f.column.clone(), format!("eq.{}", f.value)))
        .collect()
}

fn prefer(returning: Returning) -> &'static str {
    match returning {
        Returning::Representation => "return=representation",
        Returning::Minimal => "return=minimal",
    }
}

#[async_trait]
impl DataGateway for RestGateway {
    async fn insert(
        &self,
        table: &str,
        row: Value,
        returning: Returning,
    ) -> Result<Vec<Value>, GatewayError> {
        tracing::debug!(table, "insert");
        let response = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", prefer(returning))
            .json(&row)
            .send()
            .await?;

        Self::rows(response, returning).await
    }

    async fn select(&self, table: &str, filters: &[Filter]) -> Result<Vec<Value>, GatewayError> {
        tracing::debug!(table, filters = filters.len(), "select");
        let mut query = vec![("select".to_string(), "*".to_string())];
        query.extend(filter_query(filters));

        let response = self
            .authorized(self.client.get(self.table_url(table)))
            .query(&query)
            .send()
            .await?;

        let response = Self::checked(response).await?;
        Self::decode(response).await
    }

    async fn update(
        &self,
        table: &str,
        changes: Value,
        filter: &Filter,
        returning: Returning,
    ) -> Result<Vec<Value>, GatewayError> {
        tracing::debug!(table, column = %filter.column, "update");
        let response = self
            .authorized(self.client.patch(self.table_url(table)))
            .header("Prefer", prefer(returning))
            .query(&filter_query(std::slice::from_ref(filter)))
            .json(&changes)
            .send()
            .await?;

        Self::rows(response, returning).await
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<(), GatewayError> {
        tracing::debug!(table, column = %filter.column, "delete");
        let response = self
            .authorized(self.client.delete(self.table_url(table)))
            .header("Prefer", prefer(Returning::Minimal))
            .query(&filter_query(std::slice::from_ref(filter)))
            .send()
            .await?;

        Self::checked(response).await?;
        Ok(())
    }
}
