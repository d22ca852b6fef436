use serde::{Deserialize, Serialize};

/// Headline production figures for the dashboard strip.
///
/// Fields default to zero so a partial backend payload still renders.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardKpi {
    pub gen_hours: f64,
    pub total_gen_kwh: f64,
    pub month_gen_kwh: f64,
    pub yesterday_gen_kwh: f64,
    pub today_gen_kwh: f64,
    pub current_power_kw: f64,
}
