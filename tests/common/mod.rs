//! Shared test fixtures for the salesmart integration tests.
//!
//! Provides `setup_sample_mart()` which creates an in-memory DuckDB warehouse
//! populated with a small star schema (fact_sales plus the customer, seller,
//! product, and calendar dimensions) via NDJSON temp files.
//!
//! Fixture totals, for reference in assertions:
//! - states: SP 600.0 (3 orders), RJ 150.0, MG 50.0
//! - categories: electronics 550.0 (3 units), toys 200.0, one NULL category
//! - years: 2018 -> 450.0, 2019 -> 350.0
//! - overview: 5 orders, 850.0 total, 170.0 avg ticket, 4 customers, 2 sellers

use salesmart::SalesMart;
use std::io::Write;
use tempfile::NamedTempFile;

/// Create a `SalesMart` over an in-memory warehouse with sample data loaded
/// into the star-schema tables via NDJSON temp files.
pub fn setup_sample_mart() -> SalesMart {
    let mart = SalesMart::builder().database(":memory:").build().unwrap();

    register_customers(&mart);
    register_sellers(&mart);
    register_products(&mart);
    register_calendar(&mart);
    register_facts(&mart);

    mart
}

/// A mart whose warehouse has no tables at all, for exercising the degraded
/// (logged, empty-result) paths.
pub fn setup_empty_mart() -> SalesMart {
    SalesMart::builder().database(":memory:").build().unwrap()
}

fn register_customers(mart: &SalesMart) {
    let customers = vec![
        serde_json::json!({"customer_key": 1, "customer_id": "cust-001", "customer_city": "sao paulo", "customer_state": "SP"}),
        serde_json::json!({"customer_key": 2, "customer_id": "cust-002", "customer_city": "campinas", "customer_state": "SP"}),
        serde_json::json!({"customer_key": 3, "customer_id": "cust-003", "customer_city": "rio de janeiro", "customer_state": "RJ"}),
        serde_json::json!({"customer_key": 4, "customer_id": "cust-004", "customer_city": "belo horizonte", "customer_state": "MG"}),
    ];
    write_ndjson_and_register(mart, "dim_customers", &customers);
}

fn register_sellers(mart: &SalesMart) {
    let sellers = vec![
        serde_json::json!({"seller_key": 1, "seller_id": "sell-001", "seller_city": "sao paulo", "seller_state": "SP"}),
        serde_json::json!({"seller_key": 2, "seller_id": "sell-002", "seller_city": "curitiba", "seller_state": "PR"}),
    ];
    write_ndjson_and_register(mart, "dim_sellers", &sellers);
}

fn register_products(mart: &SalesMart) {
    let products = vec![
        serde_json::json!({"product_key": 1, "product_id": "prod-001", "product_category_name": "electronics", "product_weight_g": 500}),
        serde_json::json!({"product_key": 2, "product_id": "prod-002", "product_category_name": "toys", "product_weight_g": 300}),
        serde_json::json!({"product_key": 3, "product_id": "prod-003", "product_category_name": null, "product_weight_g": 100}),
    ];
    write_ndjson_and_register(mart, "dim_products", &products);
}

fn register_calendar(mart: &SalesMart) {
    let calendar = vec![
        serde_json::json!({"date_key": 20180105, "date_ymd": "2018-01-05", "date_year": 2018, "date_month": 1, "yyyymm": 201801, "yyyymmdd": 20180105, "month_name": "January"}),
        serde_json::json!({"date_key": 20180120, "date_ymd": "2018-01-20", "date_year": 2018, "date_month": 1, "yyyymm": 201801, "yyyymmdd": 20180120, "month_name": "January"}),
        serde_json::json!({"date_key": 20180210, "date_ymd": "2018-02-10", "date_year": 2018, "date_month": 2, "yyyymm": 201802, "yyyymmdd": 20180210, "month_name": "February"}),
        serde_json::json!({"date_key": 20190315, "date_ymd": "2019-03-15", "date_year": 2019, "date_month": 3, "yyyymm": 201903, "yyyymmdd": 20190315, "month_name": "March"}),
    ];
    write_ndjson_and_register(mart, "dim_calendar", &calendar);
}

fn register_facts(mart: &SalesMart) {
    let facts = vec![
        serde_json::json!({"order_id": "o1", "order_item_id": 1, "price": 90.0, "freight_value": 10.0, "total": 100.0,
            "customer_key": 1, "seller_key": 1, "product_key": 1, "date_purchase_key": 20180105, "status_key": 1}),
        serde_json::json!({"order_id": "o2", "order_item_id": 1, "price": 180.0, "freight_value": 20.0, "total": 200.0,
            "customer_key": 2, "seller_key": 1, "product_key": 2, "date_purchase_key": 20180120, "status_key": 1}),
        serde_json::json!({"order_id": "o3", "order_item_id": 1, "price": 140.0, "freight_value": 10.0, "total": 150.0,
            "customer_key": 3, "seller_key": 2, "product_key": 1, "date_purchase_key": 20180210, "status_key": 1}),
        serde_json::json!({"order_id": "o4", "order_item_id": 1, "price": 45.0, "freight_value": 5.0, "total": 50.0,
            "customer_key": 4, "seller_key": 2, "product_key": 3, "date_purchase_key": 20190315, "status_key": 1}),
        serde_json::json!({"order_id": "o5", "order_item_id": 1, "price": 280.0, "freight_value": 20.0, "total": 300.0,
            "customer_key": 1, "seller_key": 1, "product_key": 1, "date_purchase_key": 20190315, "status_key": 1}),
    ];
    write_ndjson_and_register(mart, "fact_sales", &facts);
}

/// Write a slice of JSON values as NDJSON to a temp file and register it
/// as a DuckDB table via `Connection::register_table_from_ndjson`.
fn write_ndjson_and_register(mart: &SalesMart, table_name: &str, rows: &[serde_json::Value]) {
    let mut file = NamedTempFile::new().unwrap();
    for row in rows {
        writeln!(file, "{}", serde_json::to_string(row).unwrap()).unwrap();
    }
    file.flush().unwrap();

    let path = file.path().to_str().unwrap();
    mart.connection()
        .register_table_from_ndjson(table_name, path)
        .unwrap();
    // NamedTempFile is dropped here, but DuckDB has already read the data
    // into an in-memory table, so this is fine.
}
