// src/seed.rs
//! Sample data inserted once into an empty store.

use bcrypt::hash;
use sqlx::SqlitePool;

use crate::error::AppError;

pub const SEED_USERNAME: &str = "business";
pub const SEED_PASSWORD: &str = "password123";

/// `(data_category, record_count, comma-joined fields)`
pub const SEED_PRODUCTS: [(&str, i64, &str); 5] = [
    ("Firmographic", 5250, "Company name,Company address,Website"),
    ("Demographic", 8500, "Age,Gender,Income,Education"),
    ("Technographic", 3200, "Technology stack,Software used,Hardware used"),
    ("Geographic", 12000, "Country,City,Region,Postal code"),
    ("Behavioral", 7600, "Purchase history,Website visits,Email engagement"),
];

#[derive(Debug, Default, PartialEq)]
pub struct SeedReport {
    pub products_inserted: usize,
    pub user_created: bool,
}

/// Inserts the sample catalog if `products` is empty and the sample user if
/// it does not exist yet. Safe to run on every startup.
pub async fn seed(pool: &SqlitePool, bcrypt_cost: u32) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();
    let mut tx = pool.begin().await?;

    let has_product: Option<i64> = sqlx::query_scalar("SELECT id FROM products LIMIT 1")
        .fetch_optional(&mut *tx)
        .await?;

    if has_product.is_none() {
        for (category, record_count, fields) in SEED_PRODUCTS {
            sqlx::query("INSERT INTO products (data_category, record_count, fields) VALUES (?, ?, ?)")
                .bind(category)
                .bind(record_count)
                .bind(fields)
                .execute(&mut *tx)
                .await?;
            report.products_inserted += 1;
        }
    }

    let has_user: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
        .bind(SEED_USERNAME)
        .fetch_optional(&mut *tx)
        .await?;

    if has_user.is_none() {
        let password_hash = hash(SEED_PASSWORD, bcrypt_cost)
            .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;
        sqlx::query("INSERT INTO users (username, password_hash) VALUES (?, ?)")
            .bind(SEED_USERNAME)
            .bind(password_hash)
            .execute(&mut *tx)
            .await?;
        report.user_created = true;
    }

    tx.commit().await?;

    tracing::info!(
        products_inserted = report.products_inserted,
        user_created = report.user_created,
        "Seed step finished"
    );
    Ok(report)
}
