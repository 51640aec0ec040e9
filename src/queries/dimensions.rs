//! Dimension-value lookups that populate the filter dropdowns.

use crate::cache::QueryCache;
use crate::connection::Connection;
use crate::error::Result;
use crate::sql_builder::SqlBuilder;

/// Query interface for the distinct dimension values and the available date
/// range. These feed the UI's filter widgets and are memoized like every
/// other operation.
pub struct DimensionQuery<'a> {
    conn: &'a Connection,
    cache: &'a QueryCache,
}

impl<'a> DimensionQuery<'a> {
    pub fn new(conn: &'a Connection, cache: &'a QueryCache) -> Self {
        Self { conn, cache }
    }

    /// Distinct customer states, sorted.
    pub fn states(&self) -> Result<Vec<String>> {
        let rows = self.cache.rows_or_compute("available_states", &[], || {
            let (sql, params) = SqlBuilder::new("dim_customers")
                .select(&["customer_state"])
                .distinct()
                .order_by(&["customer_state ASC"])
                .build();
            self.conn.execute(&sql, &params)
        })?;
        Ok(column_strings(&rows, "customer_state"))
    }

    /// Distinct customer cities, optionally scoped to a state, sorted.
    pub fn cities(&self, state: Option<&str>) -> Result<Vec<String>> {
        let params = [("state", state.unwrap_or_default().to_string())];
        let rows = self.cache.rows_or_compute("available_cities", &params, || {
            let mut qb = SqlBuilder::new("dim_customers");
            qb.select(&["customer_city"]).distinct();
            if let Some(state) = state {
                qb.where_eq("customer_state", state);
            }
            qb.order_by(&["customer_city ASC"]);

            let (sql, params) = qb.build();
            self.conn.execute(&sql, &params)
        })?;
        Ok(column_strings(&rows, "customer_city"))
    }

    /// Distinct non-NULL product categories, sorted.
    pub fn categories(&self) -> Result<Vec<String>> {
        let rows = self.cache.rows_or_compute("available_categories", &[], || {
            let (sql, params) = SqlBuilder::new("dim_products")
                .select(&["product_category_name"])
                .distinct()
                .where_not_null("product_category_name")
                .order_by(&["product_category_name ASC"])
                .build();
            self.conn.execute(&sql, &params)
        })?;
        Ok(column_strings(&rows, "product_category_name"))
    }

    /// The `(min, max)` purchase dates present in the fact table, or `None`
    /// for an empty warehouse.
    pub fn date_range(&self) -> Result<Option<(String, String)>> {
        let rows = self.cache.rows_or_compute("date_range", &[], || {
            let (sql, params) = SqlBuilder::new("fact_sales f")
                // CAST keeps the result textual whether date_ymd is DATE or VARCHAR.
                .select(&[
                    "CAST(MIN(cal.date_ymd) AS VARCHAR) AS min_date",
                    "CAST(MAX(cal.date_ymd) AS VARCHAR) AS max_date",
                ])
                .join("JOIN dim_calendar cal ON f.date_purchase_key = cal.date_key")
                .build();
            self.conn.execute(&sql, &params)
        })?;

        let row = match rows.first() {
            Some(row) => row,
            None => return Ok(None),
        };
        let min = row.get("min_date").and_then(|v| v.as_str());
        let max = row.get("max_date").and_then(|v| v.as_str());
        match (min, max) {
            (Some(min), Some(max)) => Ok(Some((min.to_string(), max.to_string()))),
            _ => Ok(None),
        }
    }
}

fn column_strings(rows: &crate::connection::Rows, column: &str) -> Vec<String> {
    rows.iter()
        .filter_map(|row| row.get(column).and_then(|v| v.as_str()).map(str::to_string))
        .collect()
}
