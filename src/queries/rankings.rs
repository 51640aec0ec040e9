//! Top/bottom-N rankings and single best-entity lookups.

use crate::cache::QueryCache;
use crate::connection::{Connection, Row, Rows};
use crate::error::Result;
use crate::filters::FilterSet;
use crate::metrics::clamp_limit;
use crate::queries::JoinSet;
use crate::sql_builder::SqlBuilder;

/// Query interface for state/category rankings and top performers.
///
/// All methods propagate execution errors; degraded rendering of individual
/// charts is the dynamic chart layer's concern, not this one's.
pub struct RankingQuery<'a> {
    conn: &'a Connection,
    cache: &'a QueryCache,
}

impl<'a> RankingQuery<'a> {
    pub fn new(conn: &'a Connection, cache: &'a QueryCache) -> Self {
        Self { conn, cache }
    }

    /// States with the highest total sales. `limit` is clamped to at least 5.
    ///
    /// Columns: `state`, `total_orders`, `total_sales`, `avg_sale`.
    pub fn top_states(&self, filters: &FilterSet, limit: usize) -> Result<Rows> {
        self.states_ranked("top_states", filters, limit, "total_sales DESC")
    }

    /// States with the lowest total sales. `limit` is clamped to at least 5.
    pub fn bottom_states(&self, filters: &FilterSet, limit: usize) -> Result<Rows> {
        self.states_ranked("bottom_states", filters, limit, "total_sales ASC")
    }

    fn states_ranked(
        &self,
        operation: &str,
        filters: &FilterSet,
        limit: usize,
        order: &str,
    ) -> Result<Rows> {
        let limit = clamp_limit(limit);
        let mut params = filters.cache_params();
        params.push(("limit", limit.to_string()));

        self.cache.rows_or_compute(operation, &params, || {
            let mut qb = SqlBuilder::new("fact_sales f");
            qb.select(&[
                "c.customer_state AS state",
                "COUNT(DISTINCT f.order_id) AS total_orders",
                "SUM(f.total) AS total_sales",
                "AVG(f.total) AS avg_sale",
            ]);
            JoinSet::for_filters(filters).with_customers().apply(&mut qb);
            filters.apply(&mut qb);
            qb.group_by(&["c.customer_state"])
                .order_by(&[order])
                .limit(limit);

            let (sql, params) = qb.build();
            self.conn.execute(&sql, &params)
        })
    }

    /// Product categories with the highest total sales, NULL categories
    /// excluded. `limit` is clamped to at least 5.
    ///
    /// Columns: `category`, `units_sold`, `total_sales`, `avg_sale`.
    pub fn top_categories(&self, filters: &FilterSet, limit: usize) -> Result<Rows> {
        let limit = clamp_limit(limit);
        let mut params = filters.cache_params();
        params.push(("limit", limit.to_string()));

        self.cache.rows_or_compute("top_categories", &params, || {
            let mut qb = SqlBuilder::new("fact_sales f");
            qb.select(&[
                "p.product_category_name AS category",
                "COUNT(*) AS units_sold",
                "SUM(f.total) AS total_sales",
                "AVG(f.total) AS avg_sale",
            ]);
            JoinSet::for_filters(filters).with_products().apply(&mut qb);
            qb.where_not_null("p.product_category_name");
            filters.apply(&mut qb);
            qb.group_by(&["p.product_category_name"])
                .order_by(&["total_sales DESC"])
                .limit(limit);

            let (sql, params) = qb.build();
            self.conn.execute(&sql, &params)
        })
    }

    /// The single most-sold product by units, or `None` over an empty slice.
    ///
    /// Columns: `product_id`, `category`, `units_sold`, `total_sales`,
    /// `avg_price`.
    pub fn top_product(&self, filters: &FilterSet) -> Result<Option<Row>> {
        let rows = self.cache.rows_or_compute(
            "top_product",
            &filters.cache_params(),
            || {
                let mut qb = SqlBuilder::new("fact_sales f");
                qb.select(&[
                    "p.product_id",
                    "p.product_category_name AS category",
                    "COUNT(*) AS units_sold",
                    "SUM(f.total) AS total_sales",
                    "AVG(f.price) AS avg_price",
                ]);
                JoinSet::for_filters(filters).with_products().apply(&mut qb);
                filters.apply(&mut qb);
                qb.group_by(&["p.product_id", "p.product_category_name"])
                    .order_by(&["units_sold DESC"])
                    .limit(1);

                let (sql, params) = qb.build();
                self.conn.execute(&sql, &params)
            },
        )?;
        Ok(rows.into_iter().next())
    }

    /// The seller with the highest total sales, or `None` over an empty slice.
    ///
    /// Columns: `seller_id`, `seller_city`, `seller_state`, `total_orders`,
    /// `total_sales`, `avg_sale`.
    pub fn top_seller(&self, filters: &FilterSet) -> Result<Option<Row>> {
        let rows = self.cache.rows_or_compute(
            "top_seller",
            &filters.cache_params(),
            || {
                let mut qb = SqlBuilder::new("fact_sales f");
                qb.select(&[
                    "s.seller_id",
                    "s.seller_city",
                    "s.seller_state",
                    "COUNT(DISTINCT f.order_id) AS total_orders",
                    "SUM(f.total) AS total_sales",
                    "AVG(f.total) AS avg_sale",
                ]);
                JoinSet::for_filters(filters).with_sellers().apply(&mut qb);
                filters.apply(&mut qb);
                qb.group_by(&["s.seller_id", "s.seller_city", "s.seller_state"])
                    .order_by(&["total_sales DESC"])
                    .limit(1);

                let (sql, params) = qb.build();
                self.conn.execute(&sql, &params)
            },
        )?;
        Ok(rows.into_iter().next())
    }

    /// The customer with the highest total spend, or `None` over an empty
    /// slice.
    ///
    /// Columns: `customer_id`, `customer_city`, `customer_state`,
    /// `total_orders`, `total_bought`, `avg_purchase`.
    pub fn top_customer(&self, filters: &FilterSet) -> Result<Option<Row>> {
        let rows = self.cache.rows_or_compute(
            "top_customer",
            &filters.cache_params(),
            || {
                let mut qb = SqlBuilder::new("fact_sales f");
                qb.select(&[
                    "c.customer_id",
                    "c.customer_city",
                    "c.customer_state",
                    "COUNT(DISTINCT f.order_id) AS total_orders",
                    "SUM(f.total) AS total_bought",
                    "AVG(f.total) AS avg_purchase",
                ]);
                JoinSet::for_filters(filters).with_customers().apply(&mut qb);
                filters.apply(&mut qb);
                qb.group_by(&["c.customer_id", "c.customer_city", "c.customer_state"])
                    .order_by(&["total_bought DESC"])
                    .limit(1);

                let (sql, params) = qb.build();
                self.conn.execute(&sql, &params)
            },
        )?;
        Ok(rows.into_iter().next())
    }
}
