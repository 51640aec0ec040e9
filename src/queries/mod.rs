//! Query modules for the sales data mart.
//!
//! Each module provides a query struct that borrows a
//! [`Connection`](crate::connection::Connection) and the shared
//! [`QueryCache`](crate::cache::QueryCache), and exposes methods taking a
//! [`FilterSet`](crate::filters::FilterSet) plus operation parameters.
//! Results are memoized per `(operation, parameters)` until the cache is
//! cleared by a filter change.

pub mod charts;
pub mod dimensions;
pub mod overview;
pub mod rankings;
pub mod statistics;
pub mod timeseries;

pub use charts::{ChartQuery, Dimension};
pub use dimensions::DimensionQuery;
pub use overview::OverviewQuery;
pub use rankings::RankingQuery;
pub use statistics::StatsQuery;
pub use timeseries::TimeSeriesQuery;

use crate::filters::FilterSet;
use crate::sql_builder::SqlBuilder;

/// The dimension joins a query needs: those it projects plus those the
/// filter set predicates reference. Each join binds a dimension key that is
/// unique per fact row, so joins never fan out or duplicate fact rows.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct JoinSet {
    customers: bool,
    sellers: bool,
    products: bool,
    calendar: bool,
}

impl JoinSet {
    /// Start from the joins the filter set itself requires.
    pub(crate) fn for_filters(filters: &FilterSet) -> Self {
        Self {
            customers: filters.needs_customers(),
            sellers: false,
            products: filters.needs_products(),
            calendar: filters.needs_calendar(),
        }
    }

    pub(crate) fn with_customers(mut self) -> Self {
        self.customers = true;
        self
    }

    pub(crate) fn with_sellers(mut self) -> Self {
        self.sellers = true;
        self
    }

    pub(crate) fn with_products(mut self) -> Self {
        self.products = true;
        self
    }

    pub(crate) fn with_calendar(mut self) -> Self {
        self.calendar = true;
        self
    }

    /// Add the JOIN clauses to a query rooted at `fact_sales f`.
    pub(crate) fn apply(&self, qb: &mut SqlBuilder) {
        if self.customers {
            qb.join("JOIN dim_customers c ON f.customer_key = c.customer_key");
        }
        if self.sellers {
            qb.join("JOIN dim_sellers s ON f.seller_key = s.seller_key");
        }
        if self.products {
            qb.join("JOIN dim_products p ON f.product_key = p.product_key");
        }
        if self.calendar {
            qb.join("JOIN dim_calendar cal ON f.date_purchase_key = cal.date_key");
        }
    }
}
