use serde::{Deserialize, Serialize};

use crate::core::util::serde_util::string_or_number;

/// One configured inverter from the device management list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InverterListRow {
    pub plant_id: i64,
    pub group_id: i64,
    pub unit_id: i64,

    // --- Identity ---
    #[serde(deserialize_with = "string_or_number")]
    pub inv_id: String,
    pub inv_name: String,
    pub inv_type: String,
    pub inv_model: String,
    pub inv_protocol: String,

    // --- Ratings and yield ---
    pub inv_capacity: f64,
    pub min_power: f64,
    pub max_power: f64,
    pub today_gen: f64,
    pub total_gen: f64,

    pub use_yn: String,
    pub inv_fault: String,

    // --- Breaker ---
    pub mccb_id: i64,
    pub mccb_status: i64,
}
