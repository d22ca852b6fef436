use async_trait::async_trait;
use serde_json::Value;

use crate::domain::table::page_result::PageResult;
use crate::domain::table::table_query::TableQuery;
use crate::errors::AppError;

/// Backend seam for one remote table view.
///
/// Implementations wrap a single list endpoint and return rows already in
/// normalized page form; the coordinator never sees raw payloads.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page of rows for the given query.
    async fn fetch_page(
        &self,
        token: &str,
        query: &TableQuery,
    ) -> Result<PageResult<Value>, AppError>;
}
