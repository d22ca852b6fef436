use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// One fetched page of table rows, replaced wholesale on every refresh.
///
/// Invariants: `items.len() <= page_size`, `total_pages >= 1`, and an
/// empty result set still reports one (empty) page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    pub page_index: u32,
    pub page_size: u32,
}

impl<T> PageResult<T> {
    pub fn empty(page_index: u32, page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total_elements: 0,
            total_pages: 1,
            page_index,
            page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl PageResult<Value> {
    /// Convert loose JSON rows into typed rows.
    ///
    /// Works on a borrowed page so shared snapshots can be decoded in
    /// place. Pagination counters are carried over unchanged; a row that
    /// does not match the target shape fails the whole conversion rather
    /// than being silently dropped.
    pub fn decode_rows<T: DeserializeOwned>(&self) -> Result<PageResult<T>> {
        let items = self
            .items
            .iter()
            .cloned()
            .map(|row| serde_json::from_value(row).context("Failed to decode table row"))
            .collect::<Result<Vec<T>>>()?;

        Ok(PageResult {
            items,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page_index: self.page_index,
            page_size: self.page_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
    }

    #[test]
    fn empty_page_keeps_one_page() {
        let page: PageResult<Value> = PageResult::empty(3, 20);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_index, 3);
    }

    #[test]
    fn decode_rows_preserves_counters() {
        let page = PageResult {
            items: vec![json!({"id": 1}), json!({"id": 2})],
            total_elements: 2,
            total_pages: 1,
            page_index: 0,
            page_size: 20,
        };
        let typed = page.decode_rows::<Row>().expect("decode");
        assert_eq!(typed.items, vec![Row { id: 1 }, Row { id: 2 }]);
        assert_eq!(typed.total_elements, 2);
    }

    #[test]
    fn decode_rows_rejects_mismatched_row() {
        let page = PageResult {
            items: vec![json!({"id": "not-a-number"})],
            total_elements: 1,
            total_pages: 1,
            page_index: 0,
            page_size: 20,
        };
        assert!(page.decode_rows::<Row>().is_err());
    }
}
