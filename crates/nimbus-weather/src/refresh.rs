//! Periodic re-fetch of current conditions.
//!
//! A session that wants live data owns a [`RefreshTask`]; the task
//! re-invokes the provider on a fixed period and hands every outcome to
//! a callback. Cancellation is guaranteed on drop - there is no global
//! timer state.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::provider::WeatherProvider;
use crate::types::{ProviderError, WeatherQuery, WeatherSnapshot};

/// Handle to a background refresh loop.
///
/// The loop fires immediately on spawn, then once per period. Dropping
/// the handle cancels the loop.
#[derive(Debug)]
pub struct RefreshTask {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl RefreshTask {
    /// Spawn a refresh loop for the given query.
    ///
    /// Each tick performs a single provider call; failures are reported
    /// through the callback like successes and do not stop the loop.
    pub fn spawn<P, F>(provider: P, query: WeatherQuery, period: Duration, mut on_update: F) -> Self
    where
        P: WeatherProvider + 'static,
        F: FnMut(Result<WeatherSnapshot, ProviderError>) + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.child_token();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!("Weather refresh for {} cancelled", query);
                        break;
                    }
                    _ = ticker.tick() => {
                        let result = provider.fetch_current(&query).await;
                        if let Err(e) = &result {
                            tracing::warn!("Weather refresh for {} failed: {}", query, e);
                        }
                        on_update(result);
                    }
                }
            }
        });

        Self { cancel, task }
    }

    /// Stop the refresh loop. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the background loop has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
