use std::fmt;

use chrono::NaiveDate;
use validator::{Validate, ValidationError};

/// Default page size used across the table views.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// One filter dimension. `All` is the explicit "no restriction" sentinel
/// and is sent on the wire as the literal string `ALL`; it is not the same
/// thing as an absent parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    #[default]
    All,
    Value(String),
}

impl FilterValue {
    pub const SENTINEL: &'static str = "ALL";

    pub fn from_param<S: AsRef<str>>(raw: S) -> Self {
        let raw = raw.as_ref();
        if raw == Self::SENTINEL {
            Self::All
        } else {
            Self::Value(raw.to_string())
        }
    }

    pub fn as_param(&self) -> &str {
        match self {
            Self::All => Self::SENTINEL,
            Self::Value(v) => v,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Filter and pagination state for one table view.
///
/// Changing any filter dimension resets `page_index` to 0: page N of the
/// previous result set has no meaning against a different filter. Explicit
/// page navigation leaves the filters untouched.
#[derive(Debug, Clone, PartialEq, Validate)]
#[validate(schema(function = validate_date_order))]
pub struct TableQuery {
    pub plant_id: Option<i64>,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub category: FilterValue,
    pub sub_filter: FilterValue,
    pub page_index: u32,
    pub page_size: u32,
}

impl TableQuery {
    pub fn new(plant_id: Option<i64>, date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            plant_id,
            date_from,
            date_to,
            category: FilterValue::All,
            sub_filter: FilterValue::All,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn set_date_from(&mut self, date_from: NaiveDate) {
        self.date_from = date_from;
        self.page_index = 0;
    }

    pub fn set_date_to(&mut self, date_to: NaiveDate) {
        self.date_to = date_to;
        self.page_index = 0;
    }

    pub fn set_category(&mut self, category: FilterValue) {
        self.category = category;
        self.page_index = 0;
    }

    pub fn set_sub_filter(&mut self, sub_filter: FilterValue) {
        self.sub_filter = sub_filter;
        self.page_index = 0;
    }

    /// Explicit page navigation; filters stay as they are.
    pub fn set_page_index(&mut self, page_index: u32) {
        self.page_index = page_index;
    }

    /// Wire format for the date bounds (`YYYY-MM-DD`).
    pub fn date_from_param(&self) -> String {
        self.date_from.format("%Y-%m-%d").to_string()
    }

    pub fn date_to_param(&self) -> String {
        self.date_to.format("%Y-%m-%d").to_string()
    }
}

fn validate_date_order(query: &TableQuery) -> Result<(), ValidationError> {
    if query.date_from > query.date_to {
        return Err(ValidationError::new("date_range")
            .with_message("dateFrom must not be after dateTo".into()));
    }
    Ok(())
}
