//! Dynamic by-dimension charts: one ranking query, four dimensions, any
//! metric.
//!
//! These back the interactive chart widgets where the user flips the metric
//! and the top-N count. A failed chart degrades to an empty result (logged)
//! via [`ChartQuery::by_dimension_or_empty`] so one broken widget doesn't
//! abort the rest of a dashboard refresh.

use crate::cache::QueryCache;
use crate::connection::{Connection, Rows};
use crate::error::Result;
use crate::filters::FilterSet;
use crate::metrics::{clamp_limit, Metric};
use crate::queries::JoinSet;
use crate::sql_builder::SqlBuilder;

/// Grouping dimension for the dynamic charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Customer state (`state` column).
    State,
    /// Customer city (`city` column).
    City,
    /// Product category (`category` column), NULL categories excluded.
    Category,
    /// Seller id (`seller_id` column).
    Seller,
}

impl Dimension {
    /// The canonical name, used in cache keys and operation names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::State => "state",
            Self::City => "city",
            Self::Category => "category",
            Self::Seller => "seller",
        }
    }

    /// The labeled SELECT expression for the dimension column.
    fn label_expr(&self) -> &'static str {
        match self {
            Self::State => "c.customer_state AS state",
            Self::City => "c.customer_city AS city",
            Self::Category => "p.product_category_name AS category",
            Self::Seller => "s.seller_id AS seller_id",
        }
    }

    /// The underlying column grouped on.
    fn group_column(&self) -> &'static str {
        match self {
            Self::State => "c.customer_state",
            Self::City => "c.customer_city",
            Self::Category => "p.product_category_name",
            Self::Seller => "s.seller_id",
        }
    }

    /// Add the dimension's own join requirement.
    fn join(&self, joins: JoinSet) -> JoinSet {
        match self {
            Self::State | Self::City => joins.with_customers(),
            Self::Category => joins.with_products(),
            Self::Seller => joins.with_sellers(),
        }
    }
}

/// Query interface for the dynamic by-dimension chart widgets.
pub struct ChartQuery<'a> {
    conn: &'a Connection,
    cache: &'a QueryCache,
}

impl<'a> ChartQuery<'a> {
    pub fn new(conn: &'a Connection, cache: &'a QueryCache) -> Self {
        Self { conn, cache }
    }

    /// Top `limit` dimension values by the chosen metric, descending.
    ///
    /// Result rows carry the dimension label column plus one value column
    /// aliased with the metric's canonical name. `limit` is clamped to at
    /// least 5 before query construction.
    pub fn by_dimension(
        &self,
        filters: &FilterSet,
        dimension: Dimension,
        metric: Metric,
        limit: usize,
    ) -> Result<Rows> {
        let limit = clamp_limit(limit);
        let operation = format!("sales_by_{}", dimension.name());

        let mut params = filters.cache_params();
        params.push(("metric", metric.name().to_string()));
        params.push(("limit", limit.to_string()));

        self.cache.rows_or_compute(&operation, &params, || {
            let value_col = format!("{} AS {}", metric.sql_expr(), metric.name());
            let order = format!("{} DESC", metric.name());

            let mut qb = SqlBuilder::new("fact_sales f");
            qb.select(&[dimension.label_expr(), &value_col]);
            dimension.join(JoinSet::for_filters(filters)).apply(&mut qb);
            if dimension == Dimension::Category {
                qb.where_not_null("p.product_category_name");
            }
            filters.apply(&mut qb);
            qb.group_by(&[dimension.group_column()])
                .order_by(&[&order])
                .limit(limit);

            let (sql, params) = qb.build();
            self.conn.execute(&sql, &params)
        })
    }

    /// Degrading variant of [`by_dimension`](Self::by_dimension): execution
    /// errors are logged and an empty result is returned, so one failing
    /// chart never aborts a full dashboard refresh.
    pub fn by_dimension_or_empty(
        &self,
        filters: &FilterSet,
        dimension: Dimension,
        metric: Metric,
        limit: usize,
    ) -> Rows {
        match self.by_dimension(filters, dimension, metric, limit) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("Failed to load {} chart: {}", dimension.name(), e);
                Vec::new()
            }
        }
    }
}
