use async_trait::async_trait;
use model::{filters_to_query_string, rows_from_body, Filter, Query, Row, StoreError, Table, TableStore};
use reqwest::{Client, Method, RequestBuilder};
use tracing::{debug, error, instrument};

use crate::config::StoreConfig;

/// Table store backed by a PostgREST-compatible HTTP API.
pub struct RestTableStore {
    client: Client,
    config: StoreConfig,
}

impl RestTableStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub(crate) fn url(&self, table: Table, query_string: &str) -> String {
        let base = self.config.table_url(table.name());
        if query_string.is_empty() {
            base
        } else {
            format!("{}?{}", base, query_string)
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.config.api_key)
            .bearer_auth(self.config.bearer_token())
            .header("Prefer", "return=representation")
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Vec<Row>, StoreError> {
        let response = builder.send().await.map_err(|e| {
            error!("Store request failed: {}", e);
            StoreError::new(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| StoreError::new(e.to_string()))?;
        if !status.is_success() {
            let err = StoreError::from_response(status.as_u16(), &body);
            error!("Store responded {}: {}", status, err);
            return Err(err);
        }

        let rows = rows_from_body(&body)?;
        debug!("Store returned {} rows", rows.len());
        Ok(rows)
    }
}

#[async_trait(?Send)]
impl TableStore for RestTableStore {
    #[instrument(skip(self, query), fields(table = %query.table))]
    async fn select(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        let url = self.url(query.table, &query.to_query_string());
        self.send(self.request(Method::GET, &url)).await
    }

    #[instrument(skip(self, row))]
    async fn insert(&self, table: Table, row: Row) -> Result<Vec<Row>, StoreError> {
        let url = self.url(table, "");
        self.send(self.request(Method::POST, &url).json(&row)).await
    }

    #[instrument(skip(self, filters, patch))]
    async fn update(&self, table: Table, filters: &[Filter], patch: Row) -> Result<Vec<Row>, StoreError> {
        let url = self.url(table, &filters_to_query_string(filters));
        self.send(self.request(Method::PATCH, &url).json(&patch)).await
    }

    #[instrument(skip(self, filters))]
    async fn delete(&self, table: Table, filters: &[Filter]) -> Result<Vec<Row>, StoreError> {
        let url = self.url(table, &filters_to_query_string(filters));
        self.send(self.request(Method::DELETE, &url)).await
    }
}
