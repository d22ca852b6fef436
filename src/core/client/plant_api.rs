//! Plant endpoints.

use serde_json::Value;

use crate::core::client::backend_client::BackendClient;
use crate::errors::AppError;

/// GET /plants — the full plant list. Search and use-flag filtering happen
/// client-side.
pub async fn fetch_plants(client: &BackendClient, token: &str) -> Result<Value, AppError> {
    client.get_json(token, "/plants", &[]).await
}
