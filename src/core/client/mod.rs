//! HTTP access to the plant backend, one module per endpoint group.

pub mod backend_client;

#[cfg(test)]
pub mod stub_backend;

pub mod alarm_api;
pub mod auth_api;
pub mod dashboard_api;
pub mod inverter_api;
pub mod plant_api;
pub mod user_api;
