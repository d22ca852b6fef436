//! Alarm history endpoints.

use serde_json::Value;

use crate::core::client::backend_client::BackendClient;
use crate::domain::table::table_query::TableQuery;
use crate::errors::AppError;

/// GET /alarm/list — one page of alarm rows matching the query.
pub async fn fetch_alarm_page(
    client: &BackendClient,
    token: &str,
    query: &TableQuery,
) -> Result<Value, AppError> {
    let params = alarm_list_params(query);
    client.get_json(token, "/alarm/list", &params).await
}

/// GET /alarm/device-ids — distinct device ids for the option dropdown.
/// Scoped by the same date range and device-type filter as the list, but
/// never by page or device id.
pub async fn fetch_alarm_device_ids(
    client: &BackendClient,
    token: &str,
    query: &TableQuery,
) -> Result<Value, AppError> {
    let params = device_id_params(query);
    client.get_json(token, "/alarm/device-ids", &params).await
}

fn alarm_list_params(query: &TableQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(7);
    if let Some(plant_id) = query.plant_id {
        params.push(("plantId", plant_id.to_string()));
    }
    params.push(("from", query.date_from_param()));
    params.push(("to", query.date_to_param()));
    params.push(("deviceType", query.category.as_param().to_string()));
    params.push(("deviceId", query.sub_filter.as_param().to_string()));
    params.push(("page", query.page_index.to_string()));
    params.push(("size", query.page_size.to_string()));
    params
}

fn device_id_params(query: &TableQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(4);
    if let Some(plant_id) = query.plant_id {
        params.push(("plantId", plant_id.to_string()));
    }
    params.push(("from", query.date_from_param()));
    params.push(("to", query.date_to_param()));
    params.push(("deviceType", query.category.as_param().to_string()));
    params
}
