//! Remote paginated table machinery shared by every list view: query
//! state, fetch coordination with stale-response discard, page
//! normalization and option derivation.

pub mod option_set;
pub mod page_fetcher;
pub mod page_result;
pub mod table_coordinator;
pub mod table_query;
pub mod table_snapshot;
