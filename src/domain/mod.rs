//! Domain views over the backend data, one directory per admin page,
//! plus the shared remote-table machinery under `table`.

pub mod table;

pub mod alarm;
pub mod auth;
pub mod dashboard;
pub mod device;
pub mod export;
pub mod history;
pub mod plant;
pub mod user;
