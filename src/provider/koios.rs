use super::ChainProvider;
use crate::domain::{
    AccountInfo, AppConfig, DomainError, DomainResult, ProtocolParams, SignedTransaction, TxInfo,
    Utxo,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

/// Koios REST API v1 client
#[derive(Debug, Clone)]
pub struct KoiosProvider {
    client: Client,
    base_url: String,
}

impl KoiosProvider {
    pub fn new(config: &AppConfig) -> DomainResult<Self> {
        Self::with_base_url(config, config.network.koios_base_url())
    }

    /// Point the client at a non-default Koios instance
    pub fn with_base_url(config: &AppConfig, base_url: &str) -> DomainResult<Self> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|_| DomainError::Config("API key contains invalid characters".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post_rows<T: DeserializeOwned>(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> DomainResult<Vec<T>> {
        debug!(path, "koios request");
        let response = self.client.post(self.url(path)).json(&body).send().await?;
        let response = check_status(path, response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ChainProvider for KoiosProvider {
    async fn fetch_address_utxos(&self, address: &str) -> DomainResult<Vec<Utxo>> {
        self.post_rows(
            "address_utxos",
            json!({ "_addresses": [address], "_extended": true }),
        )
        .await
    }

    async fn fetch_account_info(&self, stake_address: &str) -> DomainResult<Option<AccountInfo>> {
        let rows: Vec<AccountInfo> = self
            .post_rows("account_info", json!({ "_stake_addresses": [stake_address] }))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn fetch_tx_info(&self, tx_hash: &str) -> DomainResult<Option<TxInfo>> {
        let rows: Vec<TxInfo> = self
            .post_rows("tx_info", json!({ "_tx_hashes": [tx_hash] }))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn submit_tx(&self, tx: &SignedTransaction) -> DomainResult<String> {
        debug!(size = tx.as_bytes().len(), "submitting transaction");
        let response = self
            .client
            .post(self.url("submittx"))
            .header(CONTENT_TYPE, "application/cbor")
            .body(tx.as_bytes().to_vec())
            .send()
            .await
            .map_err(submission_error)?;

        let status = response.status();
        let body = response.text().await.map_err(submission_error)?;
        if !status.is_success() {
            warn!(%status, "transaction rejected");
            return Err(DomainError::SubmissionError(format!("{}: {}", status, body.trim())));
        }

        Ok(parse_submitted_hash(&body))
    }

    async fn fetch_protocol_params(&self) -> DomainResult<ProtocolParams> {
        debug!("koios request cli_protocol_params");
        let response = self.client.get(self.url("cli_protocol_params")).send().await?;
        let response = check_status("cli_protocol_params", response).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(path: &str, response: Response) -> DomainResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(DomainError::ProviderError(format!(
        "{} returned {}: {}",
        path,
        status,
        body.trim()
    )))
}

// Transport failures on submit surface as submission failures
fn submission_error(e: reqwest::Error) -> DomainError {
    DomainError::SubmissionError(e.to_string())
}

/// Koios answers `/submittx` with the hash as a JSON string or as bare text
fn parse_submitted_hash(body: &str) -> String {
    let body = body.trim();
    serde_json::from_str::<String>(body).unwrap_or_else(|_| body.to_string())
}
