//! Metric and dimension identifiers with their SQL aggregate expressions.
//!
//! Every name that ends up in a SELECT list is drawn from a closed enum, so
//! no caller-supplied string ever reaches SQL text. Unrecognized metric names
//! fall back to a documented default and the substitution is logged, keeping
//! silent metric-swap bugs diagnosable.

use std::fmt;

/// Minimum result limit for top/bottom-N queries. Requests below this are
/// clamped up before query construction.
pub const MIN_LIMIT: usize = 5;

/// Clamp a requested top/bottom-N limit to [`MIN_LIMIT`].
pub fn clamp_limit(limit: usize) -> usize {
    limit.max(MIN_LIMIT)
}

// ---------------------------------------------------------------------------
// Metric
// ---------------------------------------------------------------------------

/// Ranking metric for the dynamic by-dimension charts.
///
/// Adding a metric means adding a variant plus its two mapping entries below;
/// nothing else in the query layer changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TotalSales,
    AvgSales,
    TotalOrders,
    AvgTicket,
}

impl Metric {
    /// All metric names accepted by [`parse`](Self::parse), in UI order.
    pub const NAMES: [&'static str; 4] = ["total_sales", "avg_sales", "total_orders", "avg_ticket"];

    /// Parse a metric name, falling back to `total_sales` for unknown input.
    ///
    /// The fallback is logged so the substitution is observable.
    pub fn parse(name: &str) -> Self {
        match name {
            "total_sales" => Self::TotalSales,
            "avg_sales" => Self::AvgSales,
            "total_orders" => Self::TotalOrders,
            "avg_ticket" => Self::AvgTicket,
            other => {
                eprintln!(
                    "Unknown metric {:?}; falling back to \"total_sales\"",
                    other
                );
                Self::TotalSales
            }
        }
    }

    /// The canonical name, used as the result column alias and in cache keys.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TotalSales => "total_sales",
            Self::AvgSales => "avg_sales",
            Self::TotalOrders => "total_orders",
            Self::AvgTicket => "avg_ticket",
        }
    }

    /// The SQL aggregate expression over the fact table (aliased `f`).
    pub fn sql_expr(&self) -> &'static str {
        match self {
            Self::TotalSales => "SUM(f.total)",
            Self::AvgSales => "AVG(f.total)",
            Self::TotalOrders => "COUNT(DISTINCT f.order_id)",
            Self::AvgTicket => "SUM(f.total) / COUNT(DISTINCT f.order_id)",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// TemporalMetric
// ---------------------------------------------------------------------------

/// Aggregate applied per time bucket in the time-series queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalMetric {
    SumSales,
    AvgSales,
    StdSales,
}

impl TemporalMetric {
    /// All temporal metric names accepted by [`parse`](Self::parse).
    pub const NAMES: [&'static str; 3] = ["sum_sales", "avg_sales", "std_sales"];

    /// Parse a temporal metric name, falling back to `sum_sales` (logged).
    pub fn parse(name: &str) -> Self {
        match name {
            "sum_sales" => Self::SumSales,
            "avg_sales" => Self::AvgSales,
            "std_sales" => Self::StdSales,
            other => {
                eprintln!(
                    "Unknown temporal metric {:?}; falling back to \"sum_sales\"",
                    other
                );
                Self::SumSales
            }
        }
    }

    /// The canonical name, used as the result column alias and in cache keys.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SumSales => "sum_sales",
            Self::AvgSales => "avg_sales",
            Self::StdSales => "std_sales",
        }
    }

    /// The SQL aggregate expression over the fact table (aliased `f`).
    pub fn sql_expr(&self) -> &'static str {
        match self {
            Self::SumSales => "SUM(f.total)",
            Self::AvgSales => "AVG(f.total)",
            Self::StdSales => "STDDEV(f.total)",
        }
    }
}

impl fmt::Display for TemporalMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// StatColumn
// ---------------------------------------------------------------------------

/// Raw numeric fact column the descriptive statistics are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatColumn {
    Total,
    Price,
    FreightValue,
}

impl StatColumn {
    /// Parse a column name, falling back to `total` (logged).
    pub fn parse(name: &str) -> Self {
        match name {
            "total" => Self::Total,
            "price" => Self::Price,
            "freight_value" => Self::FreightValue,
            other => {
                eprintln!("Unknown statistics column {:?}; falling back to \"total\"", other);
                Self::Total
            }
        }
    }

    /// The canonical column name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::Price => "price",
            Self::FreightValue => "freight_value",
        }
    }

    /// The qualified fact-table column.
    pub fn sql_column(&self) -> &'static str {
        match self {
            Self::Total => "f.total",
            Self::Price => "f.price",
            Self::FreightValue => "f.freight_value",
        }
    }
}

impl fmt::Display for StatColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// StatGroup
// ---------------------------------------------------------------------------

/// Grouping dimension for the statistics extra-filter pair.
///
/// Only applied when a concrete filter value accompanies it; a group
/// dimension alone is a no-op (see `StatsQuery`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatGroup {
    CustomerState,
    SellerState,
    CustomerCity,
    SellerCity,
    ProductCategory,
}

impl StatGroup {
    /// Parse a group dimension name; unknown names are `None` (no extra filter).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "customer_state" => Some(Self::CustomerState),
            "seller_state" => Some(Self::SellerState),
            "customer_city" => Some(Self::CustomerCity),
            "seller_city" => Some(Self::SellerCity),
            "product_category_name" => Some(Self::ProductCategory),
            _ => None,
        }
    }

    /// The canonical name, used in cache keys.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CustomerState => "customer_state",
            Self::SellerState => "seller_state",
            Self::CustomerCity => "customer_city",
            Self::SellerCity => "seller_city",
            Self::ProductCategory => "product_category_name",
        }
    }

    /// The qualified dimension column the equality predicate binds to.
    pub fn sql_column(&self) -> &'static str {
        match self {
            Self::CustomerState => "c.customer_state",
            Self::SellerState => "s.seller_state",
            Self::CustomerCity => "c.customer_city",
            Self::SellerCity => "s.seller_city",
            Self::ProductCategory => "p.product_category_name",
        }
    }
}
