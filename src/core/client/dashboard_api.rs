//! Dashboard endpoints.

use serde_json::Value;

use crate::core::client::backend_client::BackendClient;
use crate::errors::AppError;

/// GET /dashboard/kpi — headline generation figures, optionally scoped to
/// one plant.
pub async fn fetch_dashboard_kpi(
    client: &BackendClient,
    token: &str,
    plant_id: Option<i64>,
) -> Result<Value, AppError> {
    let mut params = Vec::with_capacity(1);
    if let Some(plant_id) = plant_id {
        params.push(("plantId", plant_id.to_string()));
    }
    client.get_json(token, "/dashboard/kpi", &params).await
}
