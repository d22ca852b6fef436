//! Inverter history table: bucketed telemetry rows with an inverter-id
//! option list derived from the pages themselves.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::core::client::backend_client::BackendClient;
use crate::core::client::inverter_api;
use crate::core::envelope;
use crate::core::normalize::{self, PageShape};
use crate::domain::history::dto::inverter_history_row::InverterHistoryRow;
use crate::domain::table::option_set::OptionSet;
use crate::domain::table::page_fetcher::PageFetcher;
use crate::domain::table::page_result::PageResult;
use crate::domain::table::table_coordinator::TableCoordinator;
use crate::domain::table::table_query::TableQuery;
use crate::domain::table::table_snapshot::TableSnapshot;
use crate::errors::AppError;

const HISTORY_PAGE_SHAPES: &[PageShape] = &[PageShape::Enveloped, PageShape::Flat("inverters")];

/// Row key the inverter dropdown is derived from.
const INV_ID_KEY: &str = "invId";

pub struct HistoryPageFetcher {
    client: Arc<BackendClient>,
    bucket_sec: Option<u32>,
}

#[async_trait]
impl PageFetcher for HistoryPageFetcher {
    async fn fetch_page(
        &self,
        token: &str,
        query: &TableQuery,
    ) -> Result<PageResult<Value>, AppError> {
        let raw =
            inverter_api::fetch_inverter_history(&self.client, token, query, self.bucket_sec)
                .await?;
        envelope::require_success(&raw)?;
        Ok(normalize::normalize_page(
            &raw,
            HISTORY_PAGE_SHAPES,
            query.page_index,
            query.page_size,
        ))
    }
}

pub struct HistoryTableService {
    coordinator: TableCoordinator<HistoryPageFetcher>,

    /// No dedicated endpoint exists for inverter ids; the dropdown grows
    /// from ids observed in unfiltered pages.
    options: RwLock<OptionSet>,
}

impl HistoryTableService {
    pub fn new(client: Arc<BackendClient>, bucket_sec: Option<u32>) -> Self {
        let fetcher = Arc::new(HistoryPageFetcher { client, bucket_sec });
        Self {
            coordinator: TableCoordinator::new(fetcher),
            options: RwLock::new(OptionSet::new()),
        }
    }

    pub async fn refresh(&self, token: Option<&str>, query: &TableQuery) -> Arc<TableSnapshot> {
        let view = self.coordinator.refresh(token, query).await;

        if query.sub_filter.is_all() && view.error.is_none() {
            let mut options = self.options.write().await;
            if options.merge_from_page(&view.page, INV_ID_KEY) {
                debug!(count = options.values().len(), "Inverter id options grew");
            }
        }

        view
    }

    pub async fn inverter_id_options(&self) -> Vec<String> {
        self.options.read().await.values().to_vec()
    }

    pub async fn snapshot(&self) -> Arc<TableSnapshot> {
        self.coordinator.snapshot().await
    }

    pub fn invalidate(&self) {
        self.coordinator.invalidate();
    }

    /// Current page decoded into typed history rows.
    pub async fn rows(&self) -> Result<PageResult<InverterHistoryRow>> {
        let view = self.coordinator.snapshot().await;
        Ok(view.page.decode_rows()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::core::client::stub_backend;

    #[tokio::test]
    async fn unfiltered_refresh_grows_the_inverter_dropdown() {
        let base = stub_backend::serve_one(
            200,
            json!({
                "code": "SU",
                "data": {
                    "content": [{"invId": 2}, {"invId": 1}],
                    "totalElements": 2,
                    "totalPages": 1,
                    "number": 0,
                    "size": 20
                }
            }),
        )
        .await;
        let service =
            HistoryTableService::new(Arc::new(BackendClient::new(&base)), Some(300));

        let day = NaiveDate::from_ymd_opt(2026, 1, 27).unwrap();
        let view = service
            .refresh(Some("tok"), &TableQuery::new(Some(1), day, day))
            .await;

        assert!(view.error.is_none());
        assert_eq!(view.page.total_elements, 2);
        assert_eq!(service.inverter_id_options().await, vec!["1", "2"]);
    }
}
