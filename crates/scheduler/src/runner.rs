//! Processing step executed for each dequeued batch

use async_trait::async_trait;
use ingestq_core::config::SchedulerConfig;
use ingestq_core::types::WorkItemId;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;
use uuid::Uuid;

/// Processing step for a dequeued batch.
///
/// Implementations consume the batch, suspend for however long the work
/// takes, then return. The scheduler marks the batch `triggered` before
/// calling [`run`](BatchRunner::run) and `completed` after it returns, so a
/// runner never touches status itself. Injectable so tests can substitute a
/// zero-delay or gated implementation.
#[async_trait]
pub trait BatchRunner: Send + Sync {
    async fn run(&self, batch_id: Uuid, ids: &[WorkItemId]);
}

/// Default runner: simulates external work with a fixed per-batch setup
/// delay followed by one delay per work item, in item order.
#[derive(Debug, Clone)]
pub struct DelayRunner {
    setup_delay: Duration,
    per_item_delay: Duration,
}

impl DelayRunner {
    pub fn new(setup_delay: Duration, per_item_delay: Duration) -> Self {
        Self {
            setup_delay,
            per_item_delay,
        }
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(
            Duration::from_millis(config.batch_setup_delay_ms),
            Duration::from_millis(config.per_item_delay_ms),
        )
    }
}

#[async_trait]
impl BatchRunner for DelayRunner {
    async fn run(&self, batch_id: Uuid, ids: &[WorkItemId]) {
        sleep(self.setup_delay).await;
        for id in ids {
            sleep(self.per_item_delay).await;
            debug!(%batch_id, item = %id, "Processed work item");
        }
    }
}
