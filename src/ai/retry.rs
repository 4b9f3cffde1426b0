//! Bounded Retry for Provider Calls
//!
//! Exponential backoff with a fixed attempt cap, gated on retryable failure
//! categories (rate limit, network, 5xx). Non-retryable failures propagate
//! immediately.

use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;
use tracing::warn;

use super::{LlmProvider, LlmRequest, LlmResponse};
use crate::types::{AgentseedError, Result};

/// Total attempts per call, including the first
pub const MAX_ATTEMPTS: usize = 3;

/// Call `provider.generate`, retrying transient failures with exponential
/// backoff
pub async fn generate_with_retry(
    provider: &dyn LlmProvider,
    request: &LlmRequest,
) -> Result<LlmResponse> {
    let backoff = ExponentialBuilder::default()
        .with_min_delay(Duration::from_millis(500))
        .with_max_delay(Duration::from_secs(30))
        .with_max_times(MAX_ATTEMPTS - 1);

    (|| async { provider.generate(request).await })
        .retry(backoff)
        .when(AgentseedError::is_retryable)
        .notify(|err, dur| {
            warn!("Retrying {} call in {:?}: {}", provider.name(), dur, err);
        })
        .await
}
