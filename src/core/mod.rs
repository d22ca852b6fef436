pub mod client;
pub mod config;
pub mod envelope;
pub mod normalize;
pub mod state;
pub mod util;
