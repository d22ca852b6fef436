use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use validator::Validate;

/// Create/update payload for an inverter registration.
///
/// Ratings may arrive from form code as strings ("50.0"), so the numeric
/// fields accept either representation on the way in.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertInverterRequest {
    pub plant_id: i64,
    pub group_id: i64,
    pub unit_id: i64,

    // --- Identity ---
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inv_id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inv_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inv_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inv_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inv_protocol: Option<String>,

    // --- Ratings and yield ---
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub inv_capacity: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub min_power: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub max_power: f64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub today_gen: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_gen: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_yn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inv_fault: Option<String>,

    // --- Breaker ---
    pub mccb_id: i64,
    pub mccb_status: i64,
}
