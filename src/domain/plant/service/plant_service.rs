//! Plant directory: full-list fetch with local search.
//!
//! `/plants` answers with a bare payload, no status envelope, and takes
//! no query parameters; filtering happens on this side.

use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use tracing::debug;

use crate::core::client::backend_client::BackendClient;
use crate::core::client::plant_api;
use crate::core::envelope;
use crate::core::normalize;
use crate::domain::plant::dto::plant_row::PlantRow;
use crate::domain::plant::dto::plant_search::PlantSearch;

pub struct PlantService {
    client: Arc<BackendClient>,
}

impl PlantService {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }

    /// Every plant visible to the caller.
    pub async fn fetch_plants(&self, token: &str) -> Result<Vec<PlantRow>> {
        let raw = plant_api::fetch_plants(&self.client, token).await?;
        envelope::require_success(&raw)?;

        let rows = normalize::extract_rows(&raw, "plants");
        let plants: Vec<PlantRow> = serde_json::from_value(Value::Array(rows))?;
        debug!(count = plants.len(), "Plant list fetched");
        Ok(plants)
    }

    /// Fetch and filter in one step.
    pub async fn search(&self, token: &str, search: &PlantSearch) -> Result<Vec<PlantRow>> {
        let plants = self.fetch_plants(token).await?;
        Ok(filter_plants(plants, search))
    }
}

pub fn filter_plants(plants: Vec<PlantRow>, search: &PlantSearch) -> Vec<PlantRow> {
    plants
        .into_iter()
        .filter(|plant| search.matches(plant))
        .collect()
}
