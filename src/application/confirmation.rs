use crate::domain::{ConfirmSettings, DomainError, DomainResult, TxInfo};
use crate::provider::ChainProvider;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// A transaction seen on chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Confirmation {
    pub info: TxInfo,
    /// Queries it took, including the successful one
    pub attempts: u32,
}

/// Polls the provider until a transaction shows up or attempts run out
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationPoller {
    max_attempts: u32,
    delay: Duration,
}

impl ConfirmationPoller {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// Issue at most `max_attempts` queries, sleeping `delay` between them.
    ///
    /// Lookup errors count as "not yet visible". Exhaustion yields
    /// `ConfirmationTimeout`.
    pub async fn confirm<P>(&self, provider: &P, tx_hash: &str) -> DomainResult<Confirmation>
    where
        P: ChainProvider + ?Sized,
    {
        for attempt in 1..=self.max_attempts {
            match provider.fetch_tx_info(tx_hash).await {
                Ok(Some(info)) => {
                    info!(tx_hash, attempt, "transaction confirmed");
                    return Ok(Confirmation {
                        info,
                        attempts: attempt,
                    });
                }
                Ok(None) => debug!(tx_hash, attempt, "transaction not yet visible"),
                Err(e) => debug!(tx_hash, attempt, error = %e, "tx info lookup failed"),
            }

            if attempt < self.max_attempts {
                tokio::time::sleep(self.delay).await;
            }
        }

        Err(DomainError::ConfirmationTimeout {
            tx_hash: tx_hash.to_string(),
            attempts: self.max_attempts,
        })
    }
}

impl From<ConfirmSettings> for ConfirmationPoller {
    fn from(settings: ConfirmSettings) -> Self {
        Self::new(settings.max_attempts, settings.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MemoryProvider, TxInfoResponse};
    use tokio::time::Instant;

    fn found() -> TxInfoResponse {
        TxInfoResponse::Found(TxInfo {
            tx_hash: "abc".to_string(),
            block_height: Some(42),
            ..Default::default()
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_third_attempt() {
        let provider = MemoryProvider::new().with_tx_info_script([
            TxInfoResponse::Missing,
            TxInfoResponse::Missing,
            found(),
        ]);

        let confirmation = ConfirmationPoller::new(6, Duration::from_millis(10))
            .confirm(&provider, "abc")
            .await
            .unwrap();

        assert_eq!(confirmation.attempts, 3);
        assert_eq!(confirmation.info.block_height, Some(42));
        assert_eq!(provider.tx_info_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_always_missing_times_out_after_max_attempts() {
        let provider = MemoryProvider::new();

        let result = ConfirmationPoller::new(4, Duration::from_millis(10))
            .confirm(&provider, "abc")
            .await;

        assert!(matches!(
            result,
            Err(DomainError::ConfirmationTimeout { ref tx_hash, attempts: 4 }) if tx_hash == "abc"
        ));
        assert_eq!(provider.tx_info_calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_are_retried() {
        let provider = MemoryProvider::new().with_tx_info_script([
            TxInfoResponse::Error("502 bad gateway".to_string()),
            found(),
        ]);

        let confirmation = ConfirmationPoller::new(3, Duration::from_millis(10))
            .confirm(&provider, "abc")
            .await
            .unwrap();

        assert_eq!(confirmation.attempts, 2);
        assert_eq!(provider.tx_info_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_sleep_after_final_attempt() {
        let provider = MemoryProvider::new();
        let start = Instant::now();

        let _ = ConfirmationPoller::new(3, Duration::from_secs(10))
            .confirm(&provider, "abc")
            .await;

        // Two sleeps between three queries
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(20) && elapsed < Duration::from_secs(21));
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_attempt() {
        let provider = MemoryProvider::new();
        let start = Instant::now();

        let result = ConfirmationPoller::from(ConfirmSettings {
            enabled: true,
            max_attempts: 1,
            delay: Duration::from_secs(10),
        })
        .confirm(&provider, "abc")
        .await;

        assert!(matches!(result, Err(DomainError::ConfirmationTimeout { attempts: 1, .. })));
        assert_eq!(provider.tx_info_calls(), 1);
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
