use serde::{Deserialize, Serialize};

use crate::core::util::serde_util::string_or_number;

/// One alarm occurrence as listed by the alarm history endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlarmRow {
    pub id: i64,
    pub plant_id: i64,
    pub device_type: String,

    /// Some deployments send this as `"INV-001"`, others as a bare number.
    #[serde(deserialize_with = "string_or_number")]
    pub device_id: String,
    pub device_name: String,

    pub alarm_message: String,
    /// Raised/cleared marker, verbatim from the backend.
    pub alarm_flag: String,
    pub alert_flag: String,

    /// ISO timestamp of the occurrence.
    pub reg_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::domain::table::page_result::PageResult;

    #[test]
    fn decodes_numeric_device_id() {
        let row: AlarmRow = serde_json::from_value(json!({
            "id": 11,
            "plantId": 1,
            "deviceType": "INVERTER",
            "deviceId": 3,
            "deviceName": "INV03",
            "alarmMessage": "Overvoltage",
            "alarmFlag": "RAISED",
            "alertFlag": "Y",
            "regDate": "2026-01-27T09:15:00"
        }))
        .unwrap();

        assert_eq!(row.device_id, "3");
        assert_eq!(row.device_type, "INVERTER");
    }

    #[test]
    fn typed_page_decode() {
        let page = PageResult {
            items: vec![json!({
                "id": 1,
                "plantId": 1,
                "deviceType": "SENSOR",
                "deviceId": "S-01",
                "deviceName": "Irradiance",
                "alarmMessage": "Link lost",
                "alarmFlag": "RAISED",
                "alertFlag": "N",
                "regDate": "2026-01-27T10:00:00"
            })],
            total_elements: 1,
            total_pages: 1,
            page_index: 0,
            page_size: 20,
        };

        let typed: PageResult<AlarmRow> = page.decode_rows().unwrap();
        assert_eq!(typed.items[0].device_name, "Irradiance");
        assert_eq!(typed.total_elements, 1);
    }
}
