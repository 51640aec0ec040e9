//! Overview KPIs for the dashboard header cards.

use crate::cache::QueryCache;
use crate::connection::{Connection, Row};
use crate::error::Result;
use crate::filters::FilterSet;
use crate::queries::JoinSet;
use crate::sql_builder::SqlBuilder;

/// Query interface for the dashboard's headline metrics.
pub struct OverviewQuery<'a> {
    conn: &'a Connection,
    cache: &'a QueryCache,
}

impl<'a> OverviewQuery<'a> {
    pub fn new(conn: &'a Connection, cache: &'a QueryCache) -> Self {
        Self { conn, cache }
    }

    /// Headline metrics over the filtered fact table: distinct order count,
    /// total sales, average ticket, unique customers, and active sellers.
    ///
    /// Always returns exactly one row; over an empty slice the aggregates
    /// come back as 0 / NULL per SQL semantics. Execution errors propagate --
    /// the overview is the dashboard's anchor, not a degradable chart.
    pub fn metrics(&self, filters: &FilterSet) -> Result<Row> {
        let rows = self.cache.rows_or_compute(
            "overview_metrics",
            &filters.cache_params(),
            || {
                let mut qb = SqlBuilder::new("fact_sales f");
                qb.select(&[
                    "COUNT(DISTINCT f.order_id) AS total_orders",
                    "SUM(f.total) AS total_sales",
                    "SUM(f.total) / COUNT(DISTINCT f.order_id) AS avg_ticket",
                    "COUNT(DISTINCT f.customer_key) AS unique_customers",
                    "COUNT(DISTINCT f.seller_key) AS active_sellers",
                ]);
                JoinSet::for_filters(filters).apply(&mut qb);
                filters.apply(&mut qb);

                let (sql, params) = qb.build();
                self.conn.execute(&sql, &params)
            },
        )?;

        Ok(rows.into_iter().next().unwrap_or_default())
    }
}
