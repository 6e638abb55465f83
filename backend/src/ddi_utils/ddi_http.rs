use std::fmt::Display;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::ApiConfig;

/// Non-success answer from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStatusError {
    pub status: u16,
    pub body: String,
}

impl Display for CatalogStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}: {}", self.status, self.body)
    }
}

impl std::error::Error for CatalogStatusError {}

#[derive(Debug, Clone)]
pub struct DdiApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

pub fn get_ddi_client() -> anyhow::Result<DdiApiClient> {
    DdiApiClient::new(ApiConfig::from_env()?)
}

impl DdiApiClient {
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// `{base}/api/{version}/{endpoint}/`
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/api/{}/{}/",
            self.config.base_url,
            self.config.api_version,
            endpoint.trim_matches('/')
        )
    }

    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)]) -> anyhow::Result<T> {
        let url = self.endpoint_url(endpoint);
        debug!("GET {} {:?}", url, query);
        let t0 = std::time::Instant::now();
        let response = self.http.get(&url).query(query).send().await?;
        let parsed = read_json(response).await;
        info!("GET {} took {}ms", endpoint, t0.elapsed().as_millis());
        parsed
    }

    pub async fn post_form<T: DeserializeOwned>(&self, endpoint: &str, form: &[(String, String)]) -> anyhow::Result<T> {
        let url = self.endpoint_url(endpoint);
        debug!("POST {} ({} fields)", url, form.len());
        let t0 = std::time::Instant::now();
        let response = self.http.post(&url).form(form).send().await?;
        let parsed = read_json(response).await;
        info!("POST {} took {}ms", endpoint, t0.elapsed().as_millis());
        parsed
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> anyhow::Result<T> {
    let status = response.status();
    let response_txt = response.text().await?;
    if status.is_client_error() || status.is_server_error() {
        return Err(CatalogStatusError { status: status.as_u16(), body: response_txt }.into());
    }
    let parsed = serde_json::from_str::<T>(&response_txt)
        .with_context(|| format!("Unexpected catalog response: {}", truncate(&response_txt, 200)))?;
    Ok(parsed)
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Comma-joined id list; empty means unconstrained.
pub fn join_ids<I: Display>(ids: impl IntoIterator<Item = I>) -> String {
    ids.into_iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use common::catalog_ids::CollectionId;

    use super::*;

    #[test]
    fn endpoint_url_has_version_and_trailing_slash() {
        let client = DdiApiClient::new(ApiConfig {
            base_url: "http://catalog".to_string(),
            api_version: "v1".to_string(),
            ..ApiConfig::default()
        })
        .unwrap();
        assert_eq!(client.endpoint_url("get-decades"), "http://catalog/api/v1/get-decades/");
        assert_eq!(client.endpoint_url("/search-results/"), "http://catalog/api/v1/search-results/");
    }

    #[test]
    fn ids_join_with_commas() {
        let ids: BTreeSet<CollectionId> = [CollectionId(5), CollectionId(2)].into();
        assert_eq!(join_ids(&ids), "2,5");
        assert_eq!(join_ids(Vec::<u64>::new()), "");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("décennie", 2), "dé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
