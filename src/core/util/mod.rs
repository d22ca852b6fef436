pub mod serde_util;
