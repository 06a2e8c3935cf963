use clap::Args;
use std::path::PathBuf;

/// Connection settings for the remote table store and the local notes file.
#[derive(Args, Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the PostgREST-compatible backend
    ///
    /// Tables are addressed as `<url>/rest/v1/<table>`.
    #[arg(long = "store-url", env = "COUNSEL_STORE_URL")]
    pub url: String,

    /// Public API key sent as the `apikey` header
    #[arg(long = "store-key", env = "COUNSEL_STORE_KEY")]
    pub api_key: String,

    /// Session token of the signed-in counselor; the API key is used as
    /// bearer token when absent
    #[arg(long, env = "COUNSEL_ACCESS_TOKEN")]
    pub access_token: Option<String>,

    /// JSON file holding private client notes
    #[arg(long, env = "COUNSEL_NOTES_PATH", default_value = "counselor_client_notes.json")]
    pub notes_path: PathBuf,
}

impl StoreConfig {
    /// Token for the `Authorization` header.
    pub fn bearer_token(&self) -> &str {
        self.access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .unwrap_or(&self.api_key)
    }

    /// REST endpoint of a table, without query string.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), table)
    }
}
