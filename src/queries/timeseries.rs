//! Time-bucketed sales series over the calendar dimension.
//!
//! Buckets use the calendar dimension's pre-computed keys (`date_year`,
//! `yyyymm`, `yyyymmdd`) rather than date arithmetic on the fact table.

use crate::cache::QueryCache;
use crate::connection::{Connection, Rows};
use crate::error::Result;
use crate::filters::FilterSet;
use crate::metrics::TemporalMetric;
use crate::queries::JoinSet;
use crate::sql_builder::SqlBuilder;

/// Query interface for yearly/monthly/daily sales series.
pub struct TimeSeriesQuery<'a> {
    conn: &'a Connection,
    cache: &'a QueryCache,
}

impl<'a> TimeSeriesQuery<'a> {
    pub fn new(conn: &'a Connection, cache: &'a QueryCache) -> Self {
        Self { conn, cache }
    }

    /// One row per year (`date_year` column), ascending.
    pub fn by_year(&self, filters: &FilterSet, metric: TemporalMetric) -> Result<Rows> {
        self.bucketed("sales_by_year", "cal.date_year", "date_year", filters, metric)
    }

    /// One row per year-month (`yyyymm` column), ascending.
    pub fn by_year_month(&self, filters: &FilterSet, metric: TemporalMetric) -> Result<Rows> {
        self.bucketed("sales_by_year_month", "cal.yyyymm", "yyyymm", filters, metric)
    }

    /// One row per day (`yyyymmdd` column), ascending.
    ///
    /// Daily granularity over a wide date range is the heaviest query in the
    /// crate; callers refreshing a dashboard should prefer the degrading
    /// [`by_year_month_day_or_empty`](Self::by_year_month_day_or_empty).
    pub fn by_year_month_day(&self, filters: &FilterSet, metric: TemporalMetric) -> Result<Rows> {
        self.bucketed("sales_by_year_month_day", "cal.yyyymmdd", "yyyymmdd", filters, metric)
    }

    /// Degrading variant of [`by_year`](Self::by_year): logs and returns
    /// empty on execution error.
    pub fn by_year_or_empty(&self, filters: &FilterSet, metric: TemporalMetric) -> Rows {
        self.or_empty("year", self.by_year(filters, metric))
    }

    /// Degrading variant of [`by_year_month`](Self::by_year_month).
    pub fn by_year_month_or_empty(&self, filters: &FilterSet, metric: TemporalMetric) -> Rows {
        self.or_empty("year-month", self.by_year_month(filters, metric))
    }

    /// Degrading variant of [`by_year_month_day`](Self::by_year_month_day).
    pub fn by_year_month_day_or_empty(&self, filters: &FilterSet, metric: TemporalMetric) -> Rows {
        self.or_empty("year-month-day", self.by_year_month_day(filters, metric))
    }

    fn bucketed(
        &self,
        operation: &str,
        bucket_col: &str,
        bucket_alias: &str,
        filters: &FilterSet,
        metric: TemporalMetric,
    ) -> Result<Rows> {
        let mut params = filters.cache_params();
        params.push(("metric", metric.name().to_string()));

        self.cache.rows_or_compute(operation, &params, || {
            let bucket = format!("{} AS {}", bucket_col, bucket_alias);
            let value_col = format!("{} AS {}", metric.sql_expr(), metric.name());
            let order = format!("{} ASC", bucket_alias);

            let mut qb = SqlBuilder::new("fact_sales f");
            qb.select(&[&bucket, &value_col]);
            // The bucket itself is projected from the calendar dimension.
            JoinSet::for_filters(filters).with_calendar().apply(&mut qb);
            filters.apply(&mut qb);
            qb.group_by(&[bucket_col]).order_by(&[&order]);

            let (sql, params) = qb.build();
            self.conn.execute(&sql, &params)
        })
    }

    fn or_empty(&self, granularity: &str, result: Result<Rows>) -> Rows {
        match result {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("Failed to load {} series: {}", granularity, e);
                Vec::new()
            }
        }
    }
}
