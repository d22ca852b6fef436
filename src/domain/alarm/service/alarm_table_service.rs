//! Alarm history table: server-paginated rows plus the device-id option
//! list feeding the sub-filter dropdown.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::join;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::core::client::alarm_api;
use crate::core::client::backend_client::BackendClient;
use crate::core::envelope;
use crate::core::normalize::{self, PageShape};
use crate::domain::alarm::dto::alarm_row::AlarmRow;
use crate::domain::table::option_set::{coerce_option_value, OptionSet};
use crate::domain::table::page_fetcher::PageFetcher;
use crate::domain::table::page_result::PageResult;
use crate::domain::table::table_coordinator::TableCoordinator;
use crate::domain::table::table_query::{FilterValue, TableQuery};
use crate::domain::table::table_snapshot::TableSnapshot;
use crate::errors::AppError;

const ALARM_PAGE_SHAPES: &[PageShape] = &[PageShape::Enveloped, PageShape::Flat("alarms")];

/// Row key the dropdown options are derived from.
const DEVICE_ID_KEY: &str = "deviceId";

pub struct AlarmPageFetcher {
    client: Arc<BackendClient>,
}

#[async_trait]
impl PageFetcher for AlarmPageFetcher {
    async fn fetch_page(
        &self,
        token: &str,
        query: &TableQuery,
    ) -> Result<PageResult<Value>, AppError> {
        let raw = alarm_api::fetch_alarm_page(&self.client, token, query).await?;
        envelope::require_success(&raw)?;
        Ok(normalize::normalize_page(
            &raw,
            ALARM_PAGE_SHAPES,
            query.page_index,
            query.page_size,
        ))
    }
}

/// Collected device ids plus the category they were collected under.
#[derive(Debug, Clone, Default)]
struct DeviceIdOptions {
    set: OptionSet,
    category: FilterValue,
}

impl DeviceIdOptions {
    /// Ids from one category mean nothing under another; start over.
    fn align_category(&mut self, category: &FilterValue) {
        if &self.category != category {
            self.set.reset();
            self.category = category.clone();
        }
    }
}

pub struct AlarmTableService {
    client: Arc<BackendClient>,
    coordinator: TableCoordinator<AlarmPageFetcher>,
    options: RwLock<DeviceIdOptions>,
}

impl AlarmTableService {
    pub fn new(client: Arc<BackendClient>) -> Self {
        let fetcher = Arc::new(AlarmPageFetcher {
            client: client.clone(),
        });
        Self {
            client,
            coordinator: TableCoordinator::new(fetcher),
            options: RwLock::new(DeviceIdOptions::default()),
        }
    }

    /// Fetch the page for `query`, refreshing the option list alongside.
    ///
    /// The page refresh settles into the snapshot even when the option
    /// endpoint fails; options are a best-effort garnish.
    pub async fn refresh(&self, token: Option<&str>, query: &TableQuery) -> Arc<TableSnapshot> {
        self.options.write().await.align_category(&query.category);

        let (view, _) = join!(
            self.coordinator.refresh(token, query),
            self.refresh_option_endpoint(token, query),
        );

        // Ids observed in unfiltered result pages feed the dropdown too,
        // covering devices the dedicated endpoint does not report.
        if query.sub_filter.is_all() && view.error.is_none() {
            let mut options = self.options.write().await;
            if options.category == query.category {
                options.set.merge_from_page(&view.page, DEVICE_ID_KEY);
            }
        }

        view
    }

    async fn refresh_option_endpoint(&self, token: Option<&str>, query: &TableQuery) {
        // A narrowed view cannot widen the option list.
        if !query.sub_filter.is_all() {
            return;
        }
        let Some(token) = token else { return };

        match alarm_api::fetch_alarm_device_ids(&self.client, token, query).await {
            Ok(raw) => {
                if envelope::require_success(&raw).is_err() {
                    return;
                }
                let values = device_id_values(&raw);
                let mut options = self.options.write().await;
                if options.category == query.category && options.set.merge_values(values) {
                    debug!(count = options.set.values().len(), "Device id options grew");
                }
            }
            Err(err) => {
                debug!(%err, "Device id option fetch failed; keeping previous options");
            }
        }
    }

    pub async fn device_id_options(&self) -> Vec<String> {
        self.options.read().await.set.values().to_vec()
    }

    pub async fn snapshot(&self) -> Arc<TableSnapshot> {
        self.coordinator.snapshot().await
    }

    pub fn invalidate(&self) {
        self.coordinator.invalidate();
    }

    /// Current page decoded into typed alarm rows.
    pub async fn rows(&self) -> Result<PageResult<AlarmRow>> {
        let view = self.coordinator.snapshot().await;
        Ok(view.page.decode_rows()?)
    }
}

/// The device-id endpoint answers `data: [...]` on some builds and
/// `deviceIds: [...]` on others.
fn device_id_values(raw: &Value) -> Vec<String> {
    raw.get("data")
        .and_then(Value::as_array)
        .or_else(|| raw.get("deviceIds").and_then(Value::as_array))
        .map(|values| values.iter().filter_map(coerce_option_value).collect())
        .unwrap_or_default()
}
