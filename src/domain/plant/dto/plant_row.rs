use serde::{Deserialize, Serialize};

/// One plant from the plant management list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlantRow {
    pub plant_id: i64,
    pub plant_code: i64,
    pub plant_name: String,
    pub plant_owner: String,
    pub plant_man: String,
    pub user_id: String,

    // --- Site ---
    pub plant_capacity: String,
    pub plant_price: String,
    pub address: String,
    pub lat: String,
    pub lng: String,
    pub inv_count: i64,

    // --- Flags ---
    pub use_yn: String,
    pub sms_yn: String,

    // --- Commissioning ---
    pub start_ymd: String,
    pub start_year: String,
    pub module_info: String,
    pub get_data_sec: i64,

    // --- Yield ---
    pub yes_gen: f64,
    pub month_gen: f64,

    pub reg_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_plant_row() {
        let row: PlantRow = serde_json::from_value(json!({
            "plantId": 1,
            "plantCode": 1001,
            "plantName": "Haenam Solar 1",
            "plantOwner": "Haenam Energy",
            "plantMan": "Kim",
            "userId": "haenam01",
            "plantCapacity": "998.6",
            "plantPrice": "120.5",
            "address": "Jeonnam Haenam-gun",
            "lat": "34.57",
            "lng": "126.59",
            "invCount": 20,
            "useYn": "Y",
            "smsYn": "N",
            "startYmd": "2019-03-01",
            "startYear": "2019",
            "moduleInfo": "410W x 2436",
            "getDataSec": 60,
            "yesGen": 4120.5,
            "monthGen": 88210.0,
            "regDate": "2019-02-15T00:00:00"
        }))
        .unwrap();

        assert_eq!(row.plant_name, "Haenam Solar 1");
        assert_eq!(row.inv_count, 20);
        assert_eq!(row.use_yn, "Y");
    }
}
