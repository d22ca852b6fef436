use serde::{Deserialize, Serialize};

use crate::domain::plant::dto::plant_row::PlantRow;

/// Client-side filter over the full plant list.
///
/// The plants endpoint returns everything in one response, so searching
/// happens locally instead of via query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlantSearch {
    /// Case-insensitive match against name, owner, address and owner id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Exact match against the row's use flag when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_yn: Option<String>,
}

impl PlantSearch {
    pub fn matches(&self, row: &PlantRow) -> bool {
        if let Some(flag) = &self.use_yn {
            if &row.use_yn != flag {
                return false;
            }
        }

        match self.keyword.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(keyword) => {
                let needle = keyword.to_lowercase();
                [
                    &row.plant_name,
                    &row.plant_owner,
                    &row.address,
                    &row.user_id,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> PlantRow {
        PlantRow {
            plant_name: "Haenam Solar 1".into(),
            plant_owner: "Haenam Energy".into(),
            address: "Jeonnam Haenam-gun".into(),
            user_id: "haenam01".into(),
            use_yn: "Y".into(),
            ..PlantRow::default()
        }
    }

    #[test]
    fn keyword_matches_case_insensitively() {
        let search = PlantSearch {
            keyword: Some("haenam".into()),
            use_yn: None,
        };
        assert!(search.matches(&sample_row()));

        let search = PlantSearch {
            keyword: Some("busan".into()),
            use_yn: None,
        };
        assert!(!search.matches(&sample_row()));
    }

    #[test]
    fn blank_keyword_matches_everything() {
        let search = PlantSearch {
            keyword: Some("   ".into()),
            use_yn: None,
        };
        assert!(search.matches(&sample_row()));
    }

    #[test]
    fn use_flag_must_match_exactly() {
        let search = PlantSearch {
            keyword: None,
            use_yn: Some("N".into()),
        };
        assert!(!search.matches(&sample_row()));
    }
}
