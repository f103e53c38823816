//! Request pacing between upstream page fetches.
//!
//! The paginator calls [`RequestPacer::pause`] after every page beyond the
//! first, whether or not that page succeeded.

use std::time::Duration;

use async_trait::async_trait;

use crate::models::PaginationConfig;

/// Delay policy applied between sequential page requests.
#[async_trait]
pub trait RequestPacer: Send + Sync {
    async fn pause(&self);
}

/// Sleep for a fixed duration.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &PaginationConfig) -> Self {
        Self::new(Duration::from_millis(config.request_delay_ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::from_config(&PaginationConfig::default())
    }
}

#[async_trait]
impl RequestPacer for FixedDelay {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// No pacing at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl RequestPacer for NoDelay {
    async fn pause(&self) {}
}
