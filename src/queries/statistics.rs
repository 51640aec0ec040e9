//! Descriptive statistics over a filtered fact column.

use crate::cache::QueryCache;
use crate::connection::Connection;
use crate::error::Result;
use crate::filters::FilterSet;
use crate::metrics::{StatColumn, StatGroup};
use crate::queries::JoinSet;
use crate::sql_builder::SqlBuilder;
use crate::stats::Statistics;

/// Query interface for the statistics panel.
pub struct StatsQuery<'a> {
    conn: &'a Connection,
    cache: &'a QueryCache,
}

impl<'a> StatsQuery<'a> {
    pub fn new(conn: &'a Connection, cache: &'a QueryCache) -> Self {
        Self { conn, cache }
    }

    /// Descriptive statistics for `column` over the filtered fact table.
    ///
    /// When both `group` and `filter_value` are supplied, one extra equality
    /// predicate on the group dimension is AND-ed in. Supplying only one of
    /// the two applies no extra predicate -- a group dimension without a
    /// value is a no-op, not a per-value breakdown.
    ///
    /// NULLs in `column` are excluded before the statistics are computed; an
    /// empty slice yields the all-zero record.
    pub fn descriptive(
        &self,
        filters: &FilterSet,
        column: StatColumn,
        group: Option<StatGroup>,
        filter_value: Option<&str>,
    ) -> Result<Statistics> {
        // The extra predicate only exists when both halves are present.
        let extra = match (group, filter_value) {
            (Some(g), Some(v)) if !v.is_empty() => Some((g, v)),
            _ => None,
        };

        let mut params = filters.cache_params();
        params.push(("column", column.name().to_string()));
        params.push(("group", extra.map(|(g, _)| g.name()).unwrap_or_default().to_string()));
        params.push(("value", extra.map(|(_, v)| v).unwrap_or_default().to_string()));

        self.cache.stats_or_compute("statistics", &params, || {
            let value_expr = format!("{} AS value", column.sql_column());

            let mut qb = SqlBuilder::new("fact_sales f");
            qb.select(&[&value_expr]);

            let mut joins = JoinSet::for_filters(filters);
            if let Some((g, _)) = extra {
                joins = match g {
                    StatGroup::CustomerState | StatGroup::CustomerCity => joins.with_customers(),
                    StatGroup::SellerState | StatGroup::SellerCity => joins.with_sellers(),
                    StatGroup::ProductCategory => joins.with_products(),
                };
            }
            joins.apply(&mut qb);

            filters.apply(&mut qb);
            if let Some((g, v)) = extra {
                qb.where_eq(g.sql_column(), v);
            }
            // Null exclusion happens here, before the statistics, not after.
            qb.where_not_null(column.sql_column());

            let (sql, params) = qb.build();
            let rows = self.conn.execute(&sql, &params)?;

            let values: Vec<f64> = rows
                .iter()
                .filter_map(|row| row.get("value").and_then(|v| v.as_f64()))
                .collect();

            Ok(Statistics::from_values(&values))
        })
    }

    /// Degrading variant of [`descriptive`](Self::descriptive): execution
    /// errors are logged and the all-zero record is returned, so the
    /// statistics panel failing never aborts a dashboard refresh.
    pub fn descriptive_or_zero(
        &self,
        filters: &FilterSet,
        column: StatColumn,
        group: Option<StatGroup>,
        filter_value: Option<&str>,
    ) -> Statistics {
        match self.descriptive(filters, column, group, filter_value) {
            Ok(stats) => stats,
            Err(e) => {
                eprintln!("Failed to compute statistics for {}: {}", column.name(), e);
                Statistics::default()
            }
        }
    }
}
