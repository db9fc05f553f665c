use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::services::posting_service::PostingService;
use crate::utils::time;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub archived: usize,
    pub failed: usize,
}

/// Archives published postings older than the configured age.
#[derive(Clone)]
pub struct ExpiryService {
    postings: PostingService,
    max_age_days: u32,
}

impl ExpiryService {
    pub fn new(postings: PostingService) -> Self {
        let max_age_days = postings.config().posting_max_age_days;
        Self {
            postings,
            max_age_days,
        }
    }

    pub async fn sweep(&self) -> Result<SweepReport> {
        self.sweep_at(time::now()).await
    }

    pub async fn sweep_at(&self, now: DateTime<Utc>) -> Result<SweepReport> {
        let cutoff = time::expiry_cutoff(now, self.max_age_days);
        let expired = self
            .postings
            .repository()
            .list_published_before(cutoff)
            .await?;

        let mut report = SweepReport::default();
        for posting in expired {
            let id = posting.posting.id;
            match self.postings.archive_expired(posting).await {
                Ok(_) => report.archived += 1,
                // archived by an admin since the listing
                Err(e) if e.is_invalid_transition() => {}
                Err(e) => {
                    tracing::error!(posting_id = %id, error = %e, "Failed to archive expired posting");
                    report.failed += 1;
                }
            }
        }

        if report.archived > 0 || report.failed > 0 {
            tracing::info!(
                archived = report.archived,
                failed = report.failed,
                cutoff = %time::to_rfc3339(cutoff),
                "Expiry sweep finished"
            );
        }
        Ok(report)
    }

    /// Sweeps on every tick until `shutdown` is cancelled.
    pub async fn run(self, every: Duration, shutdown: CancellationToken) {
        tracing::info!(
            interval_secs = every.as_secs(),
            max_age_days = self.max_age_days,
            "Expiry sweep started"
        );
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep().await {
                        tracing::error!(error = %e, "Expiry sweep failed");
                    }
                }
            }
        }
        tracing::info!("Expiry sweep stopped");
    }
}
