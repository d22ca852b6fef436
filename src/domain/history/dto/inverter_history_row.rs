use serde::{Deserialize, Serialize};

/// One telemetry sample from the inverter history endpoint.
///
/// The backend emits `regdate` as a single lowercase word, unlike the
/// rest of its camelCase payloads, so the field keeps that spelling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InverterHistoryRow {
    pub id: i64,
    pub plant_id: i64,
    pub inv_id: i64,

    // --- Status ---
    pub inv_status: String,
    #[serde(default)]
    pub inv_fault: Option<String>,

    // --- DC side ---
    pub in_volt: f64,
    pub in_current: f64,
    pub in_power: f64,

    // --- AC side ---
    pub out_volt1: f64,
    pub out_volt2: f64,
    pub out_volt3: f64,
    pub out_current1: f64,
    pub out_current2: f64,
    pub out_current3: f64,
    pub out_power: f64,
    pub hz: f64,

    // --- Yield ---
    pub today_gen: f64,
    pub total_gen: f64,

    pub recv_time: String,
    pub regdate: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_lowercase_regdate() {
        let row: InverterHistoryRow = serde_json::from_value(json!({
            "id": 1,
            "plantId": 1,
            "invId": 2,
            "invStatus": "RUN",
            "invFault": null,
            "inVolt": 612.4,
            "inCurrent": 11.2,
            "inPower": 6.8,
            "outVolt1": 380.1,
            "outVolt2": 379.8,
            "outVolt3": 380.4,
            "outCurrent1": 10.1,
            "outCurrent2": 10.0,
            "outCurrent3": 10.2,
            "outPower": 6.6,
            "hz": 60.0,
            "todayGen": 43.5,
            "totalGen": 128_340.0,
            "recvTime": "2026-01-27T09:15:00",
            "regdate": "2026-01-27T09:15:02"
        }))
        .unwrap();

        assert_eq!(row.inv_id, 2);
        assert_eq!(row.regdate, "2026-01-27T09:15:02");
        assert!(row.inv_fault.is_none());
    }

    #[test]
    fn missing_fault_defaults_to_none() {
        let raw = json!({
            "id": 2,
            "plantId": 1,
            "invId": 3,
            "invStatus": "STOP",
            "inVolt": 0.0,
            "inCurrent": 0.0,
            "inPower": 0.0,
            "outVolt1": 0.0,
            "outVolt2": 0.0,
            "outVolt3": 0.0,
            "outCurrent1": 0.0,
            "outCurrent2": 0.0,
            "outCurrent3": 0.0,
            "outPower": 0.0,
            "hz": 0.0,
            "todayGen": 0.0,
            "totalGen": 99.0,
            "recvTime": "2026-01-27T09:20:00",
            "regdate": "2026-01-27T09:20:02"
        });

        let row: InverterHistoryRow = serde_json::from_value(raw).unwrap();
        assert!(row.inv_fault.is_none());
    }
}
