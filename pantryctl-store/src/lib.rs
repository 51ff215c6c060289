//! pantryctl-store: the persistence boundary for items
//!
//! One trait, [`ItemStore`], with two implementations:
//! - [`PgItemStore`] - PostgreSQL via sqlx, one table named `Item`
//! - [`MemoryItemStore`] - in-process map with the same observable behavior
//!
//! Mutations targeting a missing id return [`StoreError::NotFound`]; every
//! other error means the store itself is unusable.

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;

use async_trait::async_trait;
use pantryctl_core::{ExpiryDate, Item, NewItem};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryItemStore;
pub use pool::{create_pool, wait_until_ready};
pub use postgres::PgItemStore;

/// Item CRUD used by the command loop
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Insert a new item; the store assigns id and timestamp.
    async fn create(&self, item: NewItem) -> StoreResult<Item>;

    /// Fetch one item by id.
    async fn get(&self, id: i32) -> StoreResult<Option<Item>>;

    /// Every item. Callers must not rely on the order.
    async fn list_all(&self) -> StoreResult<Vec<Item>>;

    /// Items whose name contains `term`, ignoring case.
    async fn search(&self, term: &str) -> StoreResult<Vec<Item>>;

    /// Every item ordered by (year, month, day), missing day first, then id.
    async fn list_sorted_by_expiry(&self) -> StoreResult<Vec<Item>>;

    /// Replace the expiry fields of an item and bump its timestamp.
    ///
    /// The name is never touched.
    async fn update_expiry(&self, id: i32, expiry: ExpiryDate) -> StoreResult<Item>;

    /// Remove one item.
    async fn delete(&self, id: i32) -> StoreResult<()>;
}
