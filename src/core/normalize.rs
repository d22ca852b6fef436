use serde_json::Value;

use crate::domain::table::page_result::PageResult;

/// Recognized backend payload layouts.
///
/// The backend does not use one envelope convention consistently: some
/// endpoints nest a Spring-style page under `data.content`, others return
/// a top-level domain-named array with loose counters. Each view declares
/// the layouts it accepts, in priority order, and the first structural
/// match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageShape {
    /// Nested paginated envelope: `data.content` array plus
    /// `totalElements` / `totalPages` / `number` / `size` siblings.
    Enveloped,
    /// Flat layout: a named top-level array (`alarms`, `inverters`, ...)
    /// with optional top-level `totalElements` / `totalPages`.
    Flat(&'static str),
}

/// Map a raw backend body onto the canonical page form.
///
/// Never fails: a body matching none of the given shapes yields an empty
/// page built from the fallback index/size, which is how a legitimately
/// empty dataset is reported by several endpoints.
pub fn normalize_page(
    raw: &Value,
    shapes: &[PageShape],
    fallback_page_index: u32,
    fallback_page_size: u32,
) -> PageResult<Value> {
    for shape in shapes {
        let matched = match shape {
            PageShape::Enveloped => match_enveloped(raw, fallback_page_index, fallback_page_size),
            PageShape::Flat(field) => {
                match_flat(raw, field, fallback_page_index, fallback_page_size)
            }
        };
        if let Some(page) = matched {
            return page;
        }
    }

    PageResult::empty(fallback_page_index, fallback_page_size)
}

fn match_enveloped(
    raw: &Value,
    fallback_page_index: u32,
    fallback_page_size: u32,
) -> Option<PageResult<Value>> {
    let data = raw.get("data")?;
    let content = data.get("content")?.as_array()?;

    let page_index = read_u64(data, "number")
        .map(|n| n as u32)
        .unwrap_or(fallback_page_index);
    let page_size = read_u64(data, "size")
        .map(|n| n as u32)
        .unwrap_or(fallback_page_size);

    Some(build_page(
        content.clone(),
        read_u64(data, "totalElements"),
        read_u64(data, "totalPages"),
        page_index,
        page_size,
    ))
}

fn match_flat(
    raw: &Value,
    field: &str,
    fallback_page_index: u32,
    fallback_page_size: u32,
) -> Option<PageResult<Value>> {
    let items = raw.get(field)?.as_array()?;

    Some(build_page(
        items.clone(),
        read_u64(raw, "totalElements"),
        read_u64(raw, "totalPages"),
        fallback_page_index,
        fallback_page_size,
    ))
}

fn build_page(
    mut items: Vec<Value>,
    total_elements: Option<u64>,
    total_pages: Option<u64>,
    page_index: u32,
    page_size: u32,
) -> PageResult<Value> {
    // The canonical form promises at most one page of rows.
    if page_size > 0 && items.len() > page_size as usize {
        items.truncate(page_size as usize);
    }

    let total_elements = total_elements.unwrap_or(items.len() as u64);
    let total_pages = total_pages
        .unwrap_or_else(|| pages_for(total_elements, page_size))
        .max(1);

    PageResult {
        items,
        total_elements,
        total_pages,
        page_index,
        page_size,
    }
}

fn pages_for(total_elements: u64, page_size: u32) -> u64 {
    if page_size == 0 || total_elements == 0 {
        return 1;
    }
    total_elements.div_ceil(u64::from(page_size))
}

/// Pull the full row list out of a fetch-everything response.
///
/// Checks the named top-level array first, then `data` as an array, then
/// a bare top-level array. Endpoints without server-side paging
/// (`/invt_list`, `/admin/users`, `/plants`) vary between the three.
pub fn extract_rows(raw: &Value, field: &str) -> Vec<Value> {
    if let Some(items) = raw.get(field).and_then(Value::as_array) {
        return items.clone();
    }
    if let Some(items) = raw.get("data").and_then(Value::as_array) {
        return items.clone();
    }
    raw.as_array().cloned().unwrap_or_default()
}

/// Slice a full row list into one canonical page.
///
/// Counters describe the whole list, not the slice, so page navigation
/// over a client-paginated view behaves like a server-paginated one.
pub fn paginate_rows(rows: Vec<Value>, page_index: u32, page_size: u32) -> PageResult<Value> {
    let total_elements = rows.len() as u64;
    let total_pages = pages_for(total_elements, page_size).max(1);

    let start = (page_index as usize).saturating_mul(page_size as usize);
    let items: Vec<Value> = rows
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect();

    PageResult {
        items,
        total_elements,
        total_pages,
        page_index,
        page_size,
    }
}

/// Tolerant unsigned read: backends emit counters as ints or floats.
fn read_u64(value: &Value, key: &str) -> Option<u64> {
    let v = value.get(key)?;
    v.as_u64()
        .or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BOTH: &[PageShape] = &[PageShape::Enveloped, PageShape::Flat("alarms")];

    #[test]
    fn nested_envelope_shape() {
        let raw = json!({
            "code": "SU",
            "data": {
                "content": [{"id": 1}, {"id": 2}],
                "totalElements": 2,
                "totalPages": 1,
                "number": 0,
                "size": 20
            }
        });

        let page = normalize_page(&raw, BOTH, 9, 99);
        assert_eq!(page.items, vec![json!({"id": 1}), json!({"id": 2})]);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_index, 0);
        assert_eq!(page.page_size, 20);
    }

    #[test]
    fn flat_shape_uses_fallback_counters() {
        let raw = json!({"code": "SU", "alarms": [{"id": 5}], "totalElements": 1});

        let page = normalize_page(&raw, BOTH, 2, 20);
        assert_eq!(page.items, vec![json!({"id": 5})]);
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_index, 2);
        assert_eq!(page.page_size, 20);
    }

    #[test]
    fn envelope_takes_priority_over_flat() {
        let raw = json!({
            "data": {"content": [{"id": 1}]},
            "alarms": [{"id": 7}]
        });

        let page = normalize_page(&raw, BOTH, 0, 20);
        assert_eq!(page.items, vec![json!({"id": 1})]);
    }

    #[test]
    fn unknown_shape_yields_empty_page() {
        let raw = json!({"code": "SU", "unexpected": true});

        let page = normalize_page(&raw, BOTH, 4, 50);
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_index, 4);
        assert_eq!(page.page_size, 50);
    }

    #[test]
    fn empty_total_still_reports_one_page() {
        let raw = json!({"data": {"content": [], "totalElements": 0, "totalPages": 0}});

        let page = normalize_page(&raw, BOTH, 0, 20);
        assert_eq!(page.total_pages, 1);
        assert!(page.is_empty());
    }

    #[test]
    fn missing_total_pages_is_derived() {
        let raw = json!({"alarms": [{"id": 1}], "totalElements": 41});

        let page = normalize_page(&raw, BOTH, 0, 20);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn oversized_row_list_is_clamped_to_page_size() {
        let rows: Vec<Value> = (0..5).map(|i| json!({"id": i})).collect();
        let raw = json!({"alarms": rows, "totalElements": 5});

        let page = normalize_page(&raw, BOTH, 0, 3);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total_elements, 5);
    }

    #[test]
    fn content_must_be_a_sequence() {
        // `data.content` present but not an array: the envelope shape does
        // not structurally match and the flat shape gets its turn.
        let raw = json!({"data": {"content": "oops"}, "alarms": [{"id": 3}]});

        let page = normalize_page(&raw, BOTH, 0, 20);
        assert_eq!(page.items, vec![json!({"id": 3})]);
    }

    #[test]
    fn extract_rows_prefers_the_named_field() {
        let raw = json!({"inverters": [{"id": 1}], "data": [{"id": 9}]});
        assert_eq!(extract_rows(&raw, "inverters"), vec![json!({"id": 1})]);
    }

    #[test]
    fn extract_rows_falls_back_to_data_then_bare_array() {
        let raw = json!({"data": [{"id": 2}]});
        assert_eq!(extract_rows(&raw, "users"), vec![json!({"id": 2})]);

        let raw = json!([{"id": 3}]);
        assert_eq!(extract_rows(&raw, "plants"), vec![json!({"id": 3})]);

        let raw = json!({"code": "SU"});
        assert!(extract_rows(&raw, "users").is_empty());
    }

    #[test]
    fn paginate_rows_slices_and_keeps_full_counters() {
        let rows: Vec<Value> = (0..5).map(|i| json!({"id": i})).collect();

        let page = paginate_rows(rows.clone(), 1, 2);
        assert_eq!(page.items, vec![json!({"id": 2}), json!({"id": 3})]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page_index, 1);

        let past_the_end = paginate_rows(rows, 7, 2);
        assert!(past_the_end.items.is_empty());
        assert_eq!(past_the_end.total_elements, 5);
    }
}
