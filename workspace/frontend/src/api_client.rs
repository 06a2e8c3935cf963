use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use model::{filters_to_query_string, rows_from_body, Filter, Query, Row, StoreError, Table, TableStore};

use crate::settings::AppSettings;

/// Table store talking to a PostgREST-compatible endpoint from the browser.
pub struct RestTableStore {
    base_url: String,
    api_key: String,
    bearer_token: String,
}

impl RestTableStore {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            base_url: settings.store_url.trim_end_matches('/').to_string(),
            api_key: settings.store_key.clone(),
            bearer_token: settings.bearer_token().to_string(),
        }
    }

    fn url(&self, table: Table, query_string: &str) -> String {
        if query_string.is_empty() {
            format!("{}/rest/v1/{}", self.base_url, table)
        } else {
            format!("{}/rest/v1/{}?{}", self.base_url, table, query_string)
        }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", &format!("Bearer {}", self.bearer_token))
            .header("Prefer", "return=representation")
    }

    async fn read_rows(method: &str, url: &str, response: Result<Response, gloo_net::Error>) -> Result<Vec<Row>, StoreError> {
        let response = response.map_err(|e| {
            let error_msg = format!("Request failed: {}", e);
            log::error!("{} {} - {}", method, url, error_msg);
            StoreError::new(error_msg)
        })?;

        let status = response.status();
        let ok = response.ok();
        let body = response.text().await.map_err(|e| {
            let error_msg = format!("Failed to read response: {}", e);
            log::error!("{} {} - {}", method, url, error_msg);
            StoreError::new(error_msg)
        })?;

        if !ok {
            let err = StoreError::from_response(status, &body);
            log::error!("{} {} - {} {}", method, url, status, err);
            return Err(err);
        }

        log::trace!("{} {} - Response received, parsing rows", method, url);
        let rows = rows_from_body(&body)?;
        log::info!("{} {} - {} rows", method, url, rows.len());
        Ok(rows)
    }
}

#[async_trait(?Send)]
impl TableStore for RestTableStore {
    async fn select(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        let url = self.url(query.table, &query.to_query_string());
        log::debug!("GET request to: {}", url);
        let response = self.authorize(Request::get(&url)).send().await;
        Self::read_rows("GET", &url, response).await
    }

    async fn insert(&self, table: Table, row: Row) -> Result<Vec<Row>, StoreError> {
        let url = self.url(table, "");
        log::debug!("POST request to: {}", url);
        let request = self
            .authorize(Request::post(&url))
            .json(&row)
            .map_err(|e| StoreError::new(format!("Failed to serialize request: {}", e)))?;
        Self::read_rows("POST", &url, request.send().await).await
    }

    async fn update(&self, table: Table, filters: &[Filter], patch: Row) -> Result<Vec<Row>, StoreError> {
        let url = self.url(table, &filters_to_query_string(filters));
        log::debug!("PATCH request to: {}", url);
        let request = self
            .authorize(Request::patch(&url))
            .json(&patch)
            .map_err(|e| StoreError::new(format!("Failed to serialize request: {}", e)))?;
        Self::read_rows("PATCH", &url, request.send().await).await
    }

    async fn delete(&self, table: Table, filters: &[Filter]) -> Result<Vec<Row>, StoreError> {
        let url = self.url(table, &filters_to_query_string(filters));
        log::debug!("DELETE request to: {}", url);
        let response = self.authorize(Request::delete(&url)).send().await;
        Self::read_rows("DELETE", &url, response).await
    }
}
