//! Dashboard headline figures.

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::core::client::backend_client::BackendClient;
use crate::core::client::dashboard_api;
use crate::core::envelope;
use crate::domain::dashboard::dto::dashboard_kpi::DashboardKpi;

pub struct DashboardKpiService {
    client: Arc<BackendClient>,
}

impl DashboardKpiService {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// GET /dashboard/kpi, decoded from `data` or the top level.
    pub async fn fetch_kpi(&self, token: &str, plant_id: Option<i64>) -> Result<DashboardKpi> {
        let raw = dashboard_api::fetch_dashboard_kpi(&self.client, token, plant_id).await?;
        envelope::require_success(&raw)?;

        let kpi = decode_kpi(&raw)?;
        debug!(
            today_gen_kwh = kpi.today_gen_kwh,
            current_power_kw = kpi.current_power_kw,
            "Dashboard KPI fetched"
        );
        Ok(kpi)
    }
}

fn decode_kpi(raw: &Value) -> Result<DashboardKpi> {
    let payload = raw.get("data").filter(|d| d.is_object()).unwrap_or(raw);
    Ok(serde_json::from_value(payload.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kpi_decodes_from_data_or_top_level() {
        let raw = json!({"code": "SU", "data": {"todayGenKwh": 12.5}});
        assert_eq!(decode_kpi(&raw).unwrap().today_gen_kwh, 12.5);

        let raw = json!({"totalGenKwh": 900.0});
        assert_eq!(decode_kpi(&raw).unwrap().total_gen_kwh, 900.0);
    }
}
