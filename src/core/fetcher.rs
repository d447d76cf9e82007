use crate::config::BotConfig;
use crate::domain::model::{ListingRecord, QuerySpec};
use crate::domain::ports::ListingSource;
use crate::utils::error::{Result, ScoutError};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// CSFloat listings API client. One GET per query, no retries, no caching.
#[derive(Debug, Clone)]
pub struct ListingFetcher {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ListingFetcher {
    pub fn new(endpoint: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(config: &BotConfig) -> Result<Self> {
        Self::new(
            config.api_endpoint(),
            config.api_key(),
            config.request_timeout(),
        )
    }

    /// Full request URL with every parameter `&`-joined and percent-encoded.
    pub fn request_url(&self, spec: &QuerySpec) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| ScoutError::InvalidConfigValueError {
            field: "marketplace.endpoint".to_string(),
            value: self.endpoint.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in spec.query_pairs() {
                query.append_pair(key, &value);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ListingSource for ListingFetcher {
    async fn fetch(&self, spec: &QuerySpec) -> Result<Vec<ListingRecord>> {
        let url = self.request_url(spec)?;
        tracing::debug!("API URL: {}", url);

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, &self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Marketplace request failed: {}", e);
                ScoutError::TransportError(e)
            })?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("API Error ({}): {}", status, body);
            return Err(ScoutError::RemoteError {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let listings: Vec<ListingRecord> =
            serde_json::from_str(&body).map_err(|e| ScoutError::DecodeError {
                message: format!("{} (body: {:.200})", e, body),
            })?;

        tracing::debug!(
            "Fetched {} listings for '{}'",
            listings.len(),
            spec.display_name
        );
        Ok(listings)
    }
}
