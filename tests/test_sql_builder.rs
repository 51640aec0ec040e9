//! Unit tests for the SqlBuilder query construction.

use salesmart::SqlBuilder;

// ---------------------------------------------------------------------------
// Basic construction
// ---------------------------------------------------------------------------

#[test]
fn new_creates_select_star_from_table() {
    let (sql, params) = SqlBuilder::new("fact_sales").build();
    assert_eq!(sql, "SELECT *\nFROM fact_sales");
    assert!(params.is_empty());
}

#[test]
fn select_replaces_default_star() {
    let (sql, _) = SqlBuilder::new("fact_sales f")
        .select(&["f.order_id", "f.total"])
        .build();
    assert!(sql.starts_with("SELECT f.order_id, f.total\n"));
}

#[test]
fn distinct_adds_keyword() {
    let (sql, _) = SqlBuilder::new("dim_customers").distinct().build();
    assert!(sql.starts_with("SELECT DISTINCT *"));
}

// ---------------------------------------------------------------------------
// WHERE conditions
// ---------------------------------------------------------------------------

#[test]
fn where_eq_adds_equality_with_param() {
    let (sql, params) = SqlBuilder::new("dim_customers")
        .where_eq("customer_state", "SP")
        .build();
    assert!(sql.contains("WHERE customer_state = ?"));
    assert_eq!(params, vec!["SP"]);
}

#[test]
fn where_gte_adds_comparison() {
    let (sql, params) = SqlBuilder::new("fact_sales f")
        .where_gte("cal.date_ymd", "2018-01-01")
        .build();
    assert!(sql.contains("cal.date_ymd >= ?"));
    assert_eq!(params, vec!["2018-01-01"]);
}

#[test]
fn where_lte_adds_comparison() {
    let (sql, params) = SqlBuilder::new("fact_sales f")
        .where_lte("cal.date_ymd", "2018-01-31")
        .build();
    assert!(sql.contains("cal.date_ymd <= ?"));
    assert_eq!(params, vec!["2018-01-31"]);
}

#[test]
fn where_not_null_takes_no_param() {
    let (sql, params) = SqlBuilder::new("dim_products")
        .where_not_null("product_category_name")
        .build();
    assert!(sql.contains("WHERE product_category_name IS NOT NULL"));
    assert!(params.is_empty());
}

#[test]
fn where_clause_appends_params_in_order() {
    let (sql, params) = SqlBuilder::new("fact_sales f")
        .where_eq("c.customer_state", "SP")
        .where_clause("f.total > ?", &["100"])
        .build();
    assert!(sql.contains("c.customer_state = ?"));
    assert!(sql.contains("f.total > ?"));
    assert_eq!(params, vec!["SP", "100"]);
}

#[test]
fn multiple_where_clauses_joined_with_and() {
    let (sql, _) = SqlBuilder::new("fact_sales f")
        .where_eq("c.customer_state", "SP")
        .where_eq("p.product_category_name", "toys")
        .build();
    assert!(sql.contains("WHERE c.customer_state = ? AND p.product_category_name = ?"));
}

#[test]
fn no_conditions_means_no_where_clause() {
    let (sql, params) = SqlBuilder::new("fact_sales").build();
    assert!(!sql.contains("WHERE"));
    assert!(params.is_empty());
}

// ---------------------------------------------------------------------------
// JOIN
// ---------------------------------------------------------------------------

#[test]
fn join_adds_clause() {
    let (sql, _) = SqlBuilder::new("fact_sales f")
        .join("JOIN dim_customers c ON f.customer_key = c.customer_key")
        .build();
    assert!(sql.contains("JOIN dim_customers c ON f.customer_key = c.customer_key"));
}

// ---------------------------------------------------------------------------
// GROUP BY / ORDER BY / LIMIT
// ---------------------------------------------------------------------------

#[test]
fn group_by_adds_clause() {
    let (sql, _) = SqlBuilder::new("fact_sales f")
        .select(&["c.customer_state", "SUM(f.total) AS total_sales"])
        .group_by(&["c.customer_state"])
        .build();
    assert!(sql.contains("GROUP BY c.customer_state"));
}

#[test]
fn order_by_adds_clause() {
    let (sql, _) = SqlBuilder::new("fact_sales f")
        .order_by(&["total_sales DESC", "state ASC"])
        .build();
    assert!(sql.contains("ORDER BY total_sales DESC, state ASC"));
}

#[test]
fn limit_adds_clause() {
    let (sql, _) = SqlBuilder::new("fact_sales").limit(10).build();
    assert!(sql.contains("LIMIT 10"));
}

// ---------------------------------------------------------------------------
// Combined / chained
// ---------------------------------------------------------------------------

#[test]
fn full_aggregation_query() {
    let (sql, params) = SqlBuilder::new("fact_sales f")
        .select(&["c.customer_state AS state", "SUM(f.total) AS total_sales"])
        .join("JOIN dim_customers c ON f.customer_key = c.customer_key")
        .join("JOIN dim_calendar cal ON f.date_purchase_key = cal.date_key")
        .where_gte("cal.date_ymd", "2018-01-01")
        .where_lte("cal.date_ymd", "2018-12-31")
        .group_by(&["c.customer_state"])
        .order_by(&["total_sales DESC"])
        .limit(10)
        .build();

    assert!(sql.contains("SELECT c.customer_state AS state, SUM(f.total) AS total_sales"));
    assert!(sql.contains("FROM fact_sales f"));
    assert!(sql.contains("JOIN dim_customers c ON f.customer_key = c.customer_key"));
    assert!(sql.contains("JOIN dim_calendar cal ON f.date_purchase_key = cal.date_key"));
    assert!(sql.contains("WHERE cal.date_ymd >= ? AND cal.date_ymd <= ?"));
    assert!(sql.contains("GROUP BY c.customer_state"));
    assert!(sql.contains("ORDER BY total_sales DESC"));
    assert!(sql.contains("LIMIT 10"));
    assert_eq!(params, vec!["2018-01-01", "2018-12-31"]);
}
