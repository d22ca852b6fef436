//! Inverter registration management: the paginated list view plus the
//! create/update/delete operations behind it.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use validator::Validate;

use crate::core::client::backend_client::BackendClient;
use crate::core::client::inverter_api;
use crate::core::envelope;
use crate::core::normalize;
use crate::domain::device::dto::inverter_list_row::InverterListRow;
use crate::domain::device::dto::upsert_inverter_request::UpsertInverterRequest;
use crate::domain::table::page_fetcher::PageFetcher;
use crate::domain::table::page_result::PageResult;
use crate::domain::table::table_coordinator::TableCoordinator;
use crate::domain::table::table_query::TableQuery;
use crate::domain::table::table_snapshot::TableSnapshot;
use crate::errors::AppError;

/// `/invt_list` has no server-side paging: every registration comes back
/// in one response and pages are cut locally.
pub struct InverterListFetcher {
    client: Arc<BackendClient>,
}

#[async_trait]
impl PageFetcher for InverterListFetcher {
    async fn fetch_page(
        &self,
        token: &str,
        query: &TableQuery,
    ) -> Result<PageResult<Value>, AppError> {
        let raw = inverter_api::fetch_inverter_list(&self.client, token).await?;
        envelope::require_success(&raw)?;
        let rows = normalize::extract_rows(&raw, "inverters");
        Ok(normalize::paginate_rows(
            rows,
            query.page_index,
            query.page_size,
        ))
    }
}

pub struct DeviceMngtService {
    client: Arc<BackendClient>,
    coordinator: TableCoordinator<InverterListFetcher>,
}

impl DeviceMngtService {
    pub fn new(client: Arc<BackendClient>) -> Self {
        let fetcher = Arc::new(InverterListFetcher {
            client: client.clone(),
        });
        Self {
            client,
            coordinator: TableCoordinator::new(fetcher),
        }
    }

    pub async fn refresh(&self, token: Option<&str>, query: &TableQuery) -> Arc<TableSnapshot> {
        self.coordinator.refresh(token, query).await
    }

    pub async fn snapshot(&self) -> Arc<TableSnapshot> {
        self.coordinator.snapshot().await
    }

    pub fn invalidate(&self) {
        self.coordinator.invalidate();
    }

    /// Current page decoded into typed list rows.
    pub async fn rows(&self) -> Result<PageResult<InverterListRow>> {
        let view = self.coordinator.snapshot().await;
        Ok(view.page.decode_rows()?)
    }

    /// Register a new inverter. Callers refresh the list afterwards.
    pub async fn create(&self, token: &str, req: &UpsertInverterRequest) -> Result<Value> {
        req.validate()?;
        let body = serde_json::to_value(req)?;
        let raw = inverter_api::create_inverter(&self.client, token, &body).await?;
        envelope::require_success(&raw)?;

        info!(plant_id = req.plant_id, "Inverter created");
        Ok(raw)
    }

    pub async fn update(&self, token: &str, id: i64, req: &UpsertInverterRequest) -> Result<Value> {
        req.validate()?;
        let body = serde_json::to_value(req)?;
        let raw = inverter_api::update_inverter(&self.client, token, id, &body).await?;
        envelope::require_success(&raw)?;

        info!(id, "Inverter updated");
        Ok(raw)
    }

    pub async fn delete(&self, token: &str, id: i64) -> Result<Value> {
        let raw = inverter_api::delete_inverter(&self.client, token, id).await?;
        envelope::require_success(&raw)?;

        info!(id, "Inverter deleted");
        Ok(raw)
    }
}
