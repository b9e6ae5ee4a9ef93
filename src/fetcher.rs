use reqwest::blocking::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{ProductInfo, ShoppingResponse};
use crate::parser::parse_search_response;

pub trait ProductFinder {
    /// Returns the top-rated shopping result for `query`.
    fn find_product(&self, query: &str) -> Result<ProductInfo>;
}

/// Google Shopping search through SerpApi.
pub struct SearchClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl SearchClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = config.http_client_builder().build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: config.search_endpoint.clone(),
            api_key: config.serpapi_api_key.clone(),
        }
    }
}

impl ProductFinder for SearchClient {
    fn find_product(&self, query: &str) -> Result<ProductInfo> {
        debug!("GET {} q={query}", self.endpoint);

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("engine", "google_shopping"),
                ("q", query),
                // sort by review rating
                ("tbs", "p_ord:r"),
            ])
            .send()?;

        let status = resp.status();
        let body = resp.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ShoppingResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(body);
            return Err(Error::Api {
                service: "SerpApi",
                status,
                message,
            });
        }

        parse_search_response(query, &body)
    }
}
