//! Data layer of a solar-plant telemetry admin console: session
//! handling, paginated table state with stale-response discard,
//! response normalization, filter-option derivation and CSV export.
//!
//! The binary in `main.rs` drives these services as a headless
//! report/watch runner; embedders can wire them into their own loop.

pub mod app_state;
pub mod core;
pub mod domain;
pub mod errors;
