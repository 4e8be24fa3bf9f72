//! End-to-end save interception against an in-memory SQLite database
//!
//! SQLite is the hermetic engine of the suite: every test builds its own
//! in-memory database, so nothing external is required. SQLite does not
//! enforce declared string lengths or numeric precision, so the max-length
//! and numeric-overflow scenarios live in the PostgreSQL suite instead.

use anyhow::Result;
use interceptor::{Provider, SaveError, SaveInterceptor, SaveResultExt, ViolationKind};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

async fn setup() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::query(
        "CREATE TABLE products (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )",
    )
    .execute(&pool)
    .await?;

    sqlx::query(
        "CREATE TABLE product_sales (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            price REAL NOT NULL,
            product_id INTEGER NOT NULL REFERENCES products (id)
        )",
    )
    .execute(&pool)
    .await?;

    Ok(pool)
}

async fn insert_product(pool: &SqlitePool, id: i64, name: Option<&str>) -> Result<(), SaveError> {
    SaveInterceptor::new(Provider::Sqlite)
        .save(async {
            sqlx::query("INSERT INTO products (id, name) VALUES (?, ?)")
                .bind(id)
                .bind(name)
                .execute(pool)
                .await
                .map(|_| ())
        })
        .await
}

async fn insert_sale(pool: &SqlitePool, price: f64, product_id: i64) -> Result<(), SaveError> {
    SaveInterceptor::new(Provider::Sqlite)
        .save(async {
            sqlx::query("INSERT INTO product_sales (price, product_id) VALUES (?, ?)")
                .bind(price)
                .bind(product_id)
                .execute(pool)
                .await
                .map(|_| ())
        })
        .await
}

#[tokio::test]
async fn test_successful_save_passes_through() -> Result<()> {
    let pool = setup().await?;

    insert_product(&pool, 1, Some("GD")).await?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 1);

    Ok(())
}

#[tokio::test]
async fn test_unique_column_violation() -> Result<()> {
    let pool = setup().await?;

    insert_product(&pool, 1, Some("GD")).await?;
    let err = insert_product(&pool, 2, Some("GD")).await.unwrap_err();

    assert_eq!(err.kind(), Some(ViolationKind::UniqueConstraint));
    assert_eq!(err.constraint(), Some("products.name"));

    // The raw driver error stays attached as the cause
    match err.driver_error() {
        sqlx::Error::Database(db_error) => {
            assert!(db_error.message().contains("UNIQUE constraint failed"));
        }
        other => panic!("expected a database error cause, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn test_primary_key_violation() -> Result<()> {
    let pool = setup().await?;

    insert_product(&pool, 42, Some("first")).await?;
    let err = insert_product(&pool, 42, Some("second")).await.unwrap_err();

    assert_eq!(err.kind(), Some(ViolationKind::UniqueConstraint));
    assert_eq!(err.constraint(), Some("products.id"));

    Ok(())
}

#[tokio::test]
async fn test_missing_required_column() -> Result<()> {
    let pool = setup().await?;

    let err = insert_product(&pool, 1, None).await.unwrap_err();

    assert_eq!(err.kind(), Some(ViolationKind::NotNull));
    assert_eq!(err.constraint(), Some("products.name"));

    Ok(())
}

#[tokio::test]
async fn test_missing_parent_row() -> Result<()> {
    let pool = setup().await?;

    let err = insert_sale(&pool, 3.14, 999).await.unwrap_err();

    assert_eq!(err.kind(), Some(ViolationKind::ReferenceConstraint));
    // SQLite never names the violated foreign key
    assert_eq!(err.constraint(), None);

    Ok(())
}

#[tokio::test]
async fn test_unrecognized_error_passes_through() -> Result<()> {
    let pool = setup().await?;

    let err = SaveInterceptor::new(Provider::Sqlite)
        .save(async {
            sqlx::query("INSERT INTO missing (x) VALUES (1)")
                .execute(&pool)
                .await
                .map(|_| ())
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), None);
    match &err {
        SaveError::Unclassified(sqlx::Error::Database(db_error)) => {
            assert!(db_error.message().contains("no such table"));
        }
        other => panic!("expected an unclassified database error, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn test_row_not_found_passes_through() -> Result<()> {
    let pool = setup().await?;

    let result = sqlx::query("SELECT id FROM products WHERE id = 1")
        .fetch_one(&pool)
        .await
        .map(|_| ());
    let err = result.classify_violations(Provider::Sqlite).unwrap_err();

    assert!(matches!(
        err,
        SaveError::Unclassified(sqlx::Error::RowNotFound)
    ));

    Ok(())
}

#[tokio::test]
async fn test_call_styles_report_identical_errors() -> Result<()> {
    let pool = setup().await?;
    insert_product(&pool, 1, Some("GD")).await?;

    let via_future = insert_product(&pool, 2, Some("GD")).await.unwrap_err();

    let via_result = sqlx::query("INSERT INTO products (id, name) VALUES (3, 'GD')")
        .execute(&pool)
        .await
        .map(|_| ())
        .classify_violations(Provider::Sqlite)
        .unwrap_err();

    assert_eq!(via_future.kind(), via_result.kind());
    assert_eq!(via_future.constraint(), via_result.constraint());
    assert_eq!(via_future.to_string(), via_result.to_string());

    Ok(())
}
