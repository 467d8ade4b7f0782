use crate::api::types::{PredictRequest, PredictResponse, StatsResponse, TopProduct};
use crate::error::{DashboardError, Result};
use log::debug;
use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://sales-prediction-api.onrender.com";

/// One-shot client for the remote prediction API. No retries, no backoff;
/// the transport's default timeout applies. A non-2xx response becomes
/// `DashboardError::ApiStatus` carrying the body text.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl Default for PredictionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictionClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /stats`: historical headline statistics.
    pub async fn stats(&self) -> Result<StatsResponse> {
        let url = format!("{}/stats", self.base_url);
        debug!("GET {}", url);
        let res = self.client.get(&url).send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await?;
            return Err(DashboardError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(res.json().await?)
    }

    /// `POST /predict`: server-side prediction for the next `days` days.
    pub async fn predict(&self, days: u32) -> Result<PredictResponse> {
        let url = format!("{}/predict", self.base_url);
        debug!("POST {} (dias={})", url, days);
        let res = self
            .client
            .post(&url)
            .json(&PredictRequest { days })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await?;
            return Err(DashboardError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(res.json().await?)
    }

    /// `GET /top-produtos`: best-selling products.
    pub async fn top_products(&self) -> Result<Vec<TopProduct>> {
        let url = format!("{}/top-produtos", self.base_url);
        debug!("GET {}", url);
        let res = self.client.get(&url).send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await?;
            return Err(DashboardError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(res.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let client = PredictionClient::new();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_override() {
        let client = PredictionClient::with_base_url("http://localhost:5000");
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
