//! Admin user-management endpoints.

use serde_json::Value;

use crate::core::client::backend_client::BackendClient;
use crate::errors::AppError;

/// GET /admin/users — every account visible to the administrator.
pub async fn fetch_admin_users(client: &BackendClient, token: &str) -> Result<Value, AppError> {
    client.get_json(token, "/admin/users", &[]).await
}

/// PUT /admin/users/{userId}
pub async fn update_admin_user(
    client: &BackendClient,
    token: &str,
    user_id: &str,
    body: &Value,
) -> Result<Value, AppError> {
    let path = format!("/admin/users/{}", urlencoding::encode(user_id));
    client.put_json(token, &path, body).await
}

/// DELETE /admin/users/{userId}
pub async fn delete_admin_user(
    client: &BackendClient,
    token: &str,
    user_id: &str,
) -> Result<Value, AppError> {
    let path = format!("/admin/users/{}", urlencoding::encode(user_id));
    client.delete_json(token, &path).await
}
