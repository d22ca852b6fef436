//! Inverter endpoints: history readings plus the management CRUD group.

use chrono::NaiveTime;
use serde_json::Value;

use crate::core::client::backend_client::BackendClient;
use crate::domain::table::table_query::TableQuery;
use crate::errors::AppError;

/// GET /inverter/history — bucketed electrical readings for the range.
///
/// The history endpoint takes datetime bounds: start of the from-day,
/// exclusive start of the day after the to-day.
pub async fn fetch_inverter_history(
    client: &BackendClient,
    token: &str,
    query: &TableQuery,
    bucket_sec: Option<u32>,
) -> Result<Value, AppError> {
    let (from, to) = datetime_bounds(query);
    let mut params = Vec::with_capacity(6);
    if !query.sub_filter.is_all() {
        params.push(("invId", query.sub_filter.as_param().to_string()));
    }
    params.push(("from", from));
    params.push(("to", to));
    if let Some(bucket_sec) = bucket_sec {
        params.push(("bucketSec", bucket_sec.to_string()));
    }
    params.push(("page", query.page_index.to_string()));
    params.push(("size", query.page_size.to_string()));
    client.get_json(token, "/inverter/history", &params).await
}

/// GET /invt_list — every registered inverter.
pub async fn fetch_inverter_list(client: &BackendClient, token: &str) -> Result<Value, AppError> {
    client.get_json(token, "/invt_list", &[]).await
}

/// POST /invt_list/create
pub async fn create_inverter(
    client: &BackendClient,
    token: &str,
    body: &Value,
) -> Result<Value, AppError> {
    client.post_json(Some(token), "/invt_list/create", body).await
}

/// PUT /invt_list/{id}
pub async fn update_inverter(
    client: &BackendClient,
    token: &str,
    id: i64,
    body: &Value,
) -> Result<Value, AppError> {
    let path = format!("/invt_list/{}", urlencoding::encode(&id.to_string()));
    client.put_json(token, &path, body).await
}

/// DELETE /invt_list/{id}
pub async fn delete_inverter(
    client: &BackendClient,
    token: &str,
    id: i64,
) -> Result<Value, AppError> {
    let path = format!("/invt_list/{}", urlencoding::encode(&id.to_string()));
    client.delete_json(token, &path).await
}

fn datetime_bounds(query: &TableQuery) -> (String, String) {
    let from = query.date_from.and_time(NaiveTime::MIN);
    let to_day = query.date_to.succ_opt().unwrap_or(query.date_to);
    let to = to_day.and_time(NaiveTime::MIN);
    (
        from.format("%Y-%m-%dT%H:%M:%S").to_string(),
        to.format("%Y-%m-%dT%H:%M:%S").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn history_bounds_cover_whole_days() {
        let query = TableQuery::new(
            None,
            NaiveDate::from_ymd_opt(2026, 1, 27).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 27).unwrap(),
        );
        let (from, to) = datetime_bounds(&query);
        assert_eq!(from, "2026-01-27T00:00:00");
        assert_eq!(to, "2026-01-28T00:00:00");
    }
}
