use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::table::page_result::PageResult;
use crate::domain::table::table_query::DEFAULT_PAGE_SIZE;
use crate::errors::AppError;

/// In-memory snapshot of one remote table view.
///
/// This state:
/// - lives only in memory (NOT persisted)
/// - is replaced wholesale each time a fetch settles
/// - is always presentable: rows on success, a banner message on failure,
///   never both
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    /// Rows plus pagination counters from the last settled fetch.
    pub page: PageResult<Value>,

    /// Banner error from the last failed fetch, cleared on success.
    pub error: Option<AppError>,

    /// A fetch for this view is currently in flight.
    pub loading: bool,

    /// Generation of the fetch that produced this snapshot.
    pub generation: u64,

    pub last_loaded_at: Option<DateTime<Utc>>,
}

impl Default for TableSnapshot {
    fn default() -> Self {
        Self {
            page: PageResult::empty(0, DEFAULT_PAGE_SIZE),
            error: None,
            loading: false,
            generation: 0,
            last_loaded_at: None,
        }
    }
}

impl TableSnapshot {
    /// Mark a fetch as issued. Previous rows stay visible while it runs.
    pub fn begin_loading(&mut self, generation: u64) {
        self.loading = true;
        self.generation = generation;
    }

    /// Settle a successful fetch: replace the rows, clear any banner error.
    pub fn apply_page(&mut self, page: PageResult<Value>, generation: u64) {
        self.page = page;
        self.error = None;
        self.loading = false;
        self.generation = generation;
        self.last_loaded_at = Some(Utc::now());
    }

    /// Settle a failed fetch: rows and counters are cleared so stale data
    /// is never shown next to an error banner.
    pub fn apply_error(
        &mut self,
        error: AppError,
        page_index: u32,
        page_size: u32,
        generation: u64,
    ) {
        self.page = PageResult::empty(page_index, page_size);
        self.error = Some(error);
        self.loading = false;
        self.generation = generation;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
