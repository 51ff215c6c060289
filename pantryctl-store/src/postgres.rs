//! PostgreSQL item store
//!
//! Every operation is a single parameterized statement against `"Item"`:
//! - create/update use RETURNING so the caller gets the stored row back
//! - update/delete report a missing id as `StoreError::NotFound`
//! - listings skip rows whose expiry month is outside 1-12, with a warning

use async_trait::async_trait;
use chrono::NaiveDateTime;
use pantryctl_core::{DatabaseConfig, ExpiryDate, Item, NewItem};
use sqlx::{FromRow, PgPool};
use tracing::{debug, info, warn};

use crate::{migrations, pool, ItemStore, StoreError, StoreResult};

/// Row shape of the `"Item"` table
#[derive(Debug, Clone, FromRow)]
struct ItemRow {
    id: i32,
    name: String,
    #[sqlx(rename = "expiryDay")]
    expiry_day: Option<i32>,
    #[sqlx(rename = "expiryMonth")]
    expiry_month: i32,
    #[sqlx(rename = "expiryYear")]
    expiry_year: i32,
    #[sqlx(rename = "updatedAt")]
    updated_at: NaiveDateTime,
}

impl TryFrom<ItemRow> for Item {
    type Error = StoreError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item {
            id: row.id,
            name: row.name,
            expiry: ExpiryDate::new(row.expiry_day, row.expiry_month, row.expiry_year)?,
            updated_at: row.updated_at,
        })
    }
}

/// Convert listed rows, dropping the ones that do not form a valid item.
fn into_items(rows: Vec<ItemRow>) -> Vec<Item> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            match Item::try_from(row) {
                Ok(item) => Some(item),
                Err(err) => {
                    warn!(id, error = %err, "Skipping unreadable item row");
                    None
                }
            }
        })
        .collect()
}

/// Escape LIKE wildcards so the search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Item store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Wait for the database, then make sure the table exists.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = pool::wait_until_ready(config).await?;
        migrations::run(&pool).await?;
        Ok(Self::new(pool))
    }

    /// Close every pooled connection. Call before the container goes away.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!("Database pool closed");
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn create(&self, item: NewItem) -> StoreResult<Item> {
        let row: ItemRow = sqlx::query_as(
            r#"
            INSERT INTO "Item" ("name", "expiryDay", "expiryMonth", "expiryYear", "updatedAt")
            VALUES ($1, $2, $3, $4, NOW() AT TIME ZONE 'UTC')
            RETURNING "id", "name", "expiryDay", "expiryMonth", "expiryYear", "updatedAt"
            "#,
        )
        .bind(item.name.as_str())
        .bind(item.expiry.day())
        .bind(item.expiry.month())
        .bind(item.expiry.year())
        .fetch_one(&self.pool)
        .await?;

        info!(id = row.id, name = %row.name, "Item created");
        row.try_into()
    }

    async fn get(&self, id: i32) -> StoreResult<Option<Item>> {
        let row: Option<ItemRow> = sqlx::query_as(
            r#"
            SELECT "id", "name", "expiryDay", "expiryMonth", "expiryYear", "updatedAt"
            FROM "Item"
            WHERE "id" = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Item::try_from).transpose()
    }

    async fn list_all(&self) -> StoreResult<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT "id", "name", "expiryDay", "expiryMonth", "expiryYear", "updatedAt"
            FROM "Item"
            ORDER BY "id"
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(into_items(rows))
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT "id", "name", "expiryDay", "expiryMonth", "expiryYear", "updatedAt"
            FROM "Item"
            WHERE "name" ILIKE '%' || $1 || '%'
            ORDER BY "id"
            "#,
        )
        .bind(escape_like(term))
        .fetch_all(&self.pool)
        .await?;

        Ok(into_items(rows))
    }

    async fn list_sorted_by_expiry(&self) -> StoreResult<Vec<Item>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            r#"
            SELECT "id", "name", "expiryDay", "expiryMonth", "expiryYear", "updatedAt"
            FROM "Item"
            ORDER BY "expiryYear" ASC, "expiryMonth" ASC, "expiryDay" ASC NULLS FIRST, "id" ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(into_items(rows))
    }

    async fn update_expiry(&self, id: i32, expiry: ExpiryDate) -> StoreResult<Item> {
        let row: ItemRow = sqlx::query_as(
            r#"
            UPDATE "Item"
            SET "expiryDay" = $2,
                "expiryMonth" = $3,
                "expiryYear" = $4,
                "updatedAt" = NOW() AT TIME ZONE 'UTC'
            WHERE "id" = $1
            RETURNING "id", "name", "expiryDay", "expiryMonth", "expiryYear", "updatedAt"
            "#,
        )
        .bind(id)
        .bind(expiry.day())
        .bind(expiry.month())
        .bind(expiry.year())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { id })?;

        info!(id, expiry = %expiry, "Item updated");
        row.try_into()
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        let result = sqlx::query(r#"DELETE FROM "Item" WHERE "id" = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        info!(id, "Item deleted");
        Ok(())
    }
}
