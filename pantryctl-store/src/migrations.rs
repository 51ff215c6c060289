//! Schema bootstrap for the `Item` table
//!
//! Quoted camelCase column names match tables created by earlier versions of
//! the tracker, so an existing database is reused as-is. Older rows may carry
//! a month outside 1-12; listings skip those with a warning, while fetching
//! one by id still fails with `StoreError::InvalidRow`.

use sqlx::PgPool;

/// Create the `Item` table if it does not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::debug!("Ensuring Item table exists");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS "Item" (
            "id" SERIAL PRIMARY KEY,
            "name" TEXT NOT NULL,
            "expiryDay" INTEGER,
            "expiryMonth" INTEGER NOT NULL,
            "expiryYear" INTEGER NOT NULL,
            "updatedAt" TIMESTAMP(3) NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
