pub mod update_user_request;
pub mod user_row;
