pub mod inverter_list_row;
pub mod upsert_inverter_request;
