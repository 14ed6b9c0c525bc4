use crate::domain::{compute_stats, AggregateStats, Record};
use crate::foundation::{AccountAddress, PollError, RecordId, Result};
use crate::infrastructure::ledger::LedgerGateway;
use futures_util::stream::{self, StreamExt};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Locally-held view of the chain-hosted record set. Owned exclusively by the
/// synchronizer; everything else reads snapshots and requests a resync.
#[derive(Clone, Debug, Default)]
pub struct LocalView {
    pub records: Vec<Record>,
    pub stats: AggregateStats,
    pub mine: Vec<Record>,
}

/// Outcome of one synchronization run.
#[derive(Clone, Debug)]
pub struct SyncReport {
    pub records: Vec<Record>,
    pub stats: AggregateStats,
    pub mine: Vec<Record>,
    /// Records skipped because their individual fetch failed.
    pub skipped: usize,
}

pub struct RecordSynchronizer {
    ledger: Arc<dyn LedgerGateway>,
    view: RwLock<LocalView>,
    max_concurrent_fetches: usize,
}

impl RecordSynchronizer {
    pub fn new(ledger: Arc<dyn LedgerGateway>, max_concurrent_fetches: usize) -> Self {
        Self { ledger, view: RwLock::new(LocalView::default()), max_concurrent_fetches: max_concurrent_fetches.max(1) }
    }

    /// Rebuild the local view from the ledger.
    ///
    /// Per-record fetch failures are logged and skipped; they never abort the
    /// batch. A failure to fetch the identifier list, or a duplicate id in
    /// it, fails the whole run and leaves the previous view untouched.
    pub async fn synchronize(&self, account: Option<&AccountAddress>) -> Result<SyncReport> {
        let ids = match self.ledger.list_record_ids().await {
            Ok(ids) => ids,
            Err(PollError::SynchronizationFailed { details }) => {
                return Err(PollError::SynchronizationFailed { details })
            }
            Err(err) => return Err(PollError::synchronization_failed(err.to_string())),
        };
        debug!("synchronizing records record_count={}", ids.len());

        let fetches = stream::iter(ids.into_iter().map(|id| {
            let ledger = Arc::clone(&self.ledger);
            async move {
                let data = ledger.get_record(&id).await;
                let handle = ledger.get_encrypted_handle(&id).await;
                (id, data, handle)
            }
        }))
        .buffer_unordered(self.max_concurrent_fetches)
        .collect::<Vec<_>>()
        .await;

        let mut records = Vec::with_capacity(fetches.len());
        let mut seen: HashSet<RecordId> = HashSet::with_capacity(fetches.len());
        let mut skipped = 0usize;
        for (id, data, handle) in fetches {
            let (data, handle) = match (data, handle) {
                (Ok(data), Ok(handle)) => (data, handle),
                (Err(err), _) | (_, Err(err)) => {
                    warn!("skipping record after fetch failure record_id={id} error={err}");
                    skipped += 1;
                    continue;
                }
            };
            if !seen.insert(id.clone()) {
                return Err(PollError::DuplicateRecordId { record_id: id.to_string() });
            }
            records.push(data.into_record(id, handle));
        }

        // Stats are computed once over the full surviving batch, never
        // incrementally, so no partially-aggregated state is observable.
        let stats = compute_stats(&records);
        let mine = match account {
            Some(account) => records.iter().filter(|r| r.is_owned_by(account)).cloned().collect(),
            None => Vec::new(),
        };

        let report = SyncReport { records: records.clone(), stats: stats.clone(), mine: mine.clone(), skipped };

        let mut view = self.view.write().await;
        self.warn_on_verified_regression(&view.records, &records);
        *view = LocalView { records, stats, mine };
        info!(
            "synchronization complete total_count={} verified_count={} mine_count={} skipped={}",
            report.stats.total_count,
            report.stats.verified_count,
            report.mine.len(),
            report.skipped
        );
        Ok(report)
    }

    /// Snapshot of the current view without touching the ledger.
    pub async fn current_view(&self) -> LocalView {
        self.view.read().await.clone()
    }

    /// The chain is authoritative, but a verified flag reverting to false
    /// between two syncs violates the protocol's monotonicity guarantee and
    /// is worth surfacing.
    fn warn_on_verified_regression(&self, previous: &[Record], next: &[Record]) {
        for old in previous.iter().filter(|r| r.verified) {
            if let Some(new) = next.iter().find(|r| r.id == old.id) {
                if !new.verified {
                    warn!("verified flag regressed record_id={}", old.id);
                }
            }
        }
    }
}
