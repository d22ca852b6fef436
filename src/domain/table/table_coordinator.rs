use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use validator::Validate;

use crate::domain::table::page_fetcher::PageFetcher;
use crate::domain::table::page_result::PageResult;
use crate::domain::table::table_query::TableQuery;
use crate::domain::table::table_snapshot::TableSnapshot;
use crate::errors::AppError;

/// Drives fetches for one remote table view.
///
/// Any number of refreshes may be issued concurrently; only the most
/// recently issued one is allowed to settle into the snapshot. Outcomes of
/// superseded fetches are discarded, so the snapshot can never jump
/// backwards to an older query's rows.
pub struct TableCoordinator<F: PageFetcher> {
    fetcher: Arc<F>,

    /// Snapshot handed to observers; replaced wholesale, never mutated
    /// in place.
    state: Arc<RwLock<Arc<TableSnapshot>>>,

    /// Monotonic fetch generation, bumped at every refresh.
    generation: AtomicU64,
}

impl<F: PageFetcher> TableCoordinator<F> {
    pub fn new(fetcher: Arc<F>) -> Self {
        Self {
            fetcher,
            state: Arc::new(RwLock::new(Arc::new(TableSnapshot::default()))),
            generation: AtomicU64::new(0),
        }
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Return the shared Arc snapshot (zero cost).
    pub async fn snapshot(&self) -> Arc<TableSnapshot> {
        self.state.read().await.clone()
    }

    /// Issue a fetch for `query` and settle its outcome into the snapshot.
    ///
    /// Never returns an error: failures are absorbed into the snapshot as
    /// cleared rows plus a banner message. The returned snapshot is the
    /// state as left by this call; a newer refresh may already have
    /// superseded it.
    pub async fn refresh(&self, token: Option<&str>, query: &TableQuery) -> Arc<TableSnapshot> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, page_index = query.page_index, "Table refresh issued");

        self.commit(generation, |state| state.begin_loading(generation))
            .await;

        match self.run_fetch(token, query).await {
            Ok(page) => {
                let rows = page.items.len();
                let applied = self
                    .commit(generation, |state| state.apply_page(page, generation))
                    .await;
                if applied {
                    debug!(generation, rows, "Table refresh settled");
                }
            }
            Err(err) => {
                warn!(generation, %err, "❌ Table refresh failed");
                self.commit(generation, |state| {
                    state.apply_error(err, query.page_index, query.page_size, generation)
                })
                .await;
            }
        }

        self.snapshot().await
    }

    /// Invalidate every in-flight fetch; their outcomes will be discarded.
    ///
    /// Called when the view goes away or its governing filter is torn down.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    async fn run_fetch(
        &self,
        token: Option<&str>,
        query: &TableQuery,
    ) -> Result<PageResult<Value>, AppError> {
        // --- Step 1: reject bad queries before anything leaves the process ---
        if let Err(errors) = query.validate() {
            return Err(AppError::InvalidQuery(validation_message(&errors)));
        }

        // --- Step 2: no credential, no request ---
        let token = token.ok_or(AppError::MissingCredential)?;

        // --- Step 3: hand off to the view's fetcher ---
        self.fetcher.fetch_page(token, query).await
    }

    /// Clone-and-replace the snapshot, unless `generation` was superseded
    /// while the caller was working. The check runs under the write lock so
    /// a stale outcome can never slip in between check and replace.
    async fn commit<M>(&self, generation: u64, mutate: M) -> bool
    where
        M: FnOnce(&mut TableSnapshot),
    {
        let mut guard = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Discarding superseded table fetch outcome");
            return false;
        }

        let mut next = (**guard).clone();
        mutate(&mut next);
        *guard = Arc::new(next);
        true
    }
}

fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_values()
        .flatten()
        .filter_map(|error| error.message.as_ref().map(|message| message.to_string()))
        .next()
        .unwrap_or_else(|| errors.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;
    use tokio::sync::Notify;

    use super::*;

    fn sample_query() -> TableQuery {
        TableQuery::new(
            Some(1),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 7).unwrap(),
        )
    }

    fn marker_page(marker: &str) -> PageResult<Value> {
        PageResult {
            items: vec![json!({ "marker": marker })],
            total_elements: 1,
            total_pages: 1,
            page_index: 0,
            page_size: 20,
        }
    }

    /// Plays back a fixed list of outcomes and counts calls.
    struct ScriptedFetcher {
        responses: Mutex<VecDeque<Result<PageResult<Value>, AppError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(responses: Vec<Result<PageResult<Value>, AppError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageFetcher for ScriptedFetcher {
        async fn fetch_page(
            &self,
            _token: &str,
            _query: &TableQuery,
        ) -> Result<PageResult<Value>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("scripted response available")
        }
    }

    /// First call parks on a gate until released; later calls answer at once.
    struct GatedFetcher {
        started: Arc<Notify>,
        release: Arc<Notify>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageFetcher for GatedFetcher {
        async fn fetch_page(
            &self,
            _token: &str,
            _query: &TableQuery,
        ) -> Result<PageResult<Value>, AppError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.started.notify_one();
                self.release.notified().await;
                Ok(marker_page("stale"))
            } else {
                Ok(marker_page("fresh"))
            }
        }
    }

    #[tokio::test]
    async fn successful_refresh_replaces_rows() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(marker_page("first"))]));
        let coordinator = TableCoordinator::new(fetcher);

        let view = coordinator.refresh(Some("token"), &sample_query()).await;

        assert_eq!(view.page.items[0]["marker"], "first");
        assert_eq!(view.error, None);
        assert!(!view.loading);
        assert_eq!(view.generation, 1);
    }

    #[tokio::test]
    async fn missing_credential_short_circuits_without_a_request() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(marker_page("unreached"))]));
        let coordinator = TableCoordinator::new(fetcher.clone());

        let view = coordinator.refresh(None, &sample_query()).await;

        assert_eq!(view.error, Some(AppError::MissingCredential));
        assert!(view.page.is_empty());
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn failed_refresh_clears_previous_rows() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            Ok(marker_page("first")),
            Err(AppError::Application("No permission.".into())),
        ]));
        let coordinator = TableCoordinator::new(fetcher);
        let query = sample_query();

        let first = coordinator.refresh(Some("token"), &query).await;
        assert_eq!(first.page.total_elements, 1);

        let second = coordinator.refresh(Some("token"), &query).await;
        assert!(second.page.is_empty());
        assert_eq!(second.page.total_elements, 0);
        assert_eq!(
            second.error,
            Some(AppError::Application("No permission.".into()))
        );
    }

    #[tokio::test]
    async fn inverted_date_range_never_reaches_the_backend() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(marker_page("unreached"))]));
        let coordinator = TableCoordinator::new(fetcher.clone());

        let query = TableQuery::new(
            Some(1),
            NaiveDate::from_ymd_opt(2024, 5, 7).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        let view = coordinator.refresh(Some("token"), &query).await;

        assert!(matches!(view.error, Some(AppError::InvalidQuery(_))));
        assert_eq!(fetcher.call_count(), 0);
    }

    #[tokio::test]
    async fn superseding_refresh_wins_over_earlier_fetch() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let fetcher = Arc::new(GatedFetcher {
            started: started.clone(),
            release: release.clone(),
            calls: AtomicUsize::new(0),
        });
        let coordinator = TableCoordinator::new(fetcher).shared();
        let query = sample_query();

        let first = {
            let coordinator = coordinator.clone();
            let query = query.clone();
            tokio::spawn(async move { coordinator.refresh(Some("token"), &query).await })
        };

        // Wait until the first fetch is parked in flight, then supersede it.
        started.notified().await;
        let fresh = coordinator.refresh(Some("token"), &query).await;
        assert_eq!(fresh.page.items[0]["marker"], "fresh");

        // Let the first fetch settle; its outcome must be discarded.
        release.notify_one();
        let after_first = first.await.unwrap();
        assert_eq!(after_first.page.items[0]["marker"], "fresh");

        let current = coordinator.snapshot().await;
        assert_eq!(current.page.items[0]["marker"], "fresh");
        assert_eq!(current.error, None);
    }

    #[tokio::test]
    async fn invalidate_discards_in_flight_outcome() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let fetcher = Arc::new(GatedFetcher {
            started: started.clone(),
            release: release.clone(),
            calls: AtomicUsize::new(0),
        });
        let coordinator = TableCoordinator::new(fetcher).shared();

        let inflight = {
            let coordinator = coordinator.clone();
            let query = sample_query();
            tokio::spawn(async move { coordinator.refresh(Some("token"), &query).await })
        };

        started.notified().await;
        coordinator.invalidate();
        release.notify_one();
        inflight.await.unwrap();

        let current = coordinator.snapshot().await;
        assert!(current.page.is_empty());
        assert_eq!(current.error, None);
    }
}
