//! Admin account management: the paginated account list plus update and
//! delete operations.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;
use validator::Validate;

use crate::core::client::backend_client::BackendClient;
use crate::core::client::user_api;
use crate::core::envelope;
use crate::core::normalize;
use crate::domain::table::page_fetcher::PageFetcher;
use crate::domain::table::page_result::PageResult;
use crate::domain::table::table_coordinator::TableCoordinator;
use crate::domain::table::table_query::TableQuery;
use crate::domain::table::table_snapshot::TableSnapshot;
use crate::domain::user::dto::update_user_request::UpdateUserRequest;
use crate::domain::user::dto::user_row::UserRow;
use crate::errors::AppError;

/// `/admin/users` returns the whole account list; pages are cut locally.
pub struct UserListFetcher {
    client: Arc<BackendClient>,
}

#[async_trait]
impl PageFetcher for UserListFetcher {
    async fn fetch_page(
        &self,
        token: &str,
        query: &TableQuery,
    ) -> Result<PageResult<Value>, AppError> {
        let raw = user_api::fetch_admin_users(&self.client, token).await?;
        envelope::require_success(&raw)?;
        let rows = normalize::extract_rows(&raw, "users");
        Ok(normalize::paginate_rows(
            rows,
            query.page_index,
            query.page_size,
        ))
    }
}

pub struct UserMngtService {
    client: Arc<BackendClient>,
    coordinator: TableCoordinator<UserListFetcher>,
}

impl UserMngtService {
    pub fn new(client: Arc<BackendClient>) -> Self {
        let fetcher = Arc::new(UserListFetcher {
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

    /// Current page decoded into typed account rows.
    pub async fn rows(&self) -> Result<PageResult<UserRow>> {
        let view = self.coordinator.snapshot().await;
        Ok(view.page.decode_rows()?)
    }

    pub async fn update(
        &self,
        token: &str,
        user_id: &str,
        req: &UpdateUserRequest,
    ) -> Result<Value> {
        req.validate()?;
        let body = serde_json::to_value(req)?;
        let raw = user_api::update_admin_user(&self.client, token, user_id, &body).await?;
        envelope::require_success(&raw)?;

        info!(user_id, "User updated");
        Ok(raw)
    }

    pub async fn delete(&self, token: &str, user_id: &str) -> Result<Value> {
        let raw = user_api::delete_admin_user(&self.client, token, user_id).await?;
        envelope::require_success(&raw)?;

        info!(user_id, "User deleted");
        Ok(raw)
    }
}
