//! Global dashboard filters, normalized for the query layer.
//!
//! UI widgets report "no selection" with sentinel strings (`""`, `"Todos"`,
//! `"Todas"`). That translation is confined to [`FilterSet::from_ui`]; the
//! query layer only ever sees `None` or a concrete value.

use crate::sql_builder::SqlBuilder;

/// UI sentinels meaning "no filter selected".
const UI_SENTINELS: [&str; 3] = ["", "Todos", "Todas"];

/// The normalized set of active global filters for one dashboard session.
///
/// Immutable per request: construct a fresh one on every filter-apply action.
/// Date bounds are inclusive ISO dates (`YYYY-MM-DD`); `None` means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Inclusive lower bound on purchase date.
    pub start_date: Option<String>,
    /// Inclusive upper bound on purchase date.
    pub end_date: Option<String>,
    /// Customer state the whole dashboard is scoped to.
    pub state: Option<String>,
    /// Product category the whole dashboard is scoped to.
    pub category: Option<String>,
}

impl FilterSet {
    /// A filter set with no active filters: the full unrestricted dataset.
    pub fn unfiltered() -> Self {
        Self::default()
    }

    /// Build a `FilterSet` from raw UI widget values, translating sentinels.
    ///
    /// Empty strings, `"Todos"`, and `"Todas"` all mean "no selection" at the
    /// UI boundary and become `None` here.
    pub fn from_ui(start_date: &str, end_date: &str, state: &str, category: &str) -> Self {
        Self {
            start_date: normalize(start_date),
            end_date: normalize(end_date),
            state: normalize(state),
            category: normalize(category),
        }
    }

    /// Set the date range (builder-style, for programmatic callers).
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    /// Set the customer-state filter.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Set the product-category filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether the query must join `dim_calendar` (aliased `cal`) to apply
    /// this filter set.
    pub fn needs_calendar(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Whether the query must join `dim_customers` (aliased `c`) to apply
    /// this filter set.
    pub fn needs_customers(&self) -> bool {
        self.state.is_some()
    }

    /// Whether the query must join `dim_products` (aliased `p`) to apply
    /// this filter set.
    pub fn needs_products(&self) -> bool {
        self.category.is_some()
    }

    /// Append this filter set's predicates to a query.
    ///
    /// All predicates are combined with AND; absent filters contribute
    /// nothing. The query must already join the dimension tables reported by
    /// [`needs_calendar`](Self::needs_calendar) /
    /// [`needs_customers`](Self::needs_customers) /
    /// [`needs_products`](Self::needs_products) under the aliases `cal`,
    /// `c`, and `p`.
    pub fn apply(&self, qb: &mut SqlBuilder) {
        if let Some(start) = &self.start_date {
            qb.where_gte("cal.date_ymd", start);
        }
        if let Some(end) = &self.end_date {
            qb.where_lte("cal.date_ymd", end);
        }
        if let Some(state) = &self.state {
            qb.where_eq("c.customer_state", state);
        }
        if let Some(category) = &self.category {
            qb.where_eq("p.product_category_name", category);
        }
    }

    /// The filter values as named cache-key parameters.
    ///
    /// Absent filters are represented with an empty value so that "no filter"
    /// and "filter on empty string" can never collide with each other -- the
    /// sentinel translation in [`from_ui`](Self::from_ui) guarantees no
    /// concrete filter value is ever the empty string.
    pub fn cache_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start_date", self.start_date.clone().unwrap_or_default()),
            ("end_date", self.end_date.clone().unwrap_or_default()),
            ("state", self.state.clone().unwrap_or_default()),
            ("category", self.category.clone().unwrap_or_default()),
        ]
    }
}

fn normalize(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if UI_SENTINELS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}
