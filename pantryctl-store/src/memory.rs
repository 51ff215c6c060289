//! In-process item store
//!
//! Same observable behavior as the PostgreSQL store: ids start at 1 and are
//! never reused, search ignores case, sort puts a missing day first.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Timelike, Utc};
use pantryctl_core::{ExpiryDate, Item, NewItem};
use tokio::sync::Mutex;
use tracing::info;

use crate::{ItemStore, StoreError, StoreResult};

#[derive(Debug, Default)]
struct Inner {
    items: BTreeMap<i32, Item>,
    last_id: i32,
}

/// Item store that lives for the duration of the process
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    inner: Mutex<Inner>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Millisecond precision, matching a `TIMESTAMP(3)` column.
fn now() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond((now.nanosecond() / 1_000_000) * 1_000_000)
        .unwrap_or(now)
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn create(&self, item: NewItem) -> StoreResult<Item> {
        let mut inner = self.inner.lock().await;
        inner.last_id += 1;
        let item = Item {
            id: inner.last_id,
            name: item.name.into_string(),
            expiry: item.expiry,
            updated_at: now(),
        };
        inner.items.insert(item.id, item.clone());

        info!(id = item.id, name = %item.name, "Item created");
        Ok(item)
    }

    async fn get(&self, id: i32) -> StoreResult<Option<Item>> {
        Ok(self.inner.lock().await.items.get(&id).cloned())
    }

    async fn list_all(&self) -> StoreResult<Vec<Item>> {
        Ok(self.inner.lock().await.items.values().cloned().collect())
    }

    async fn search(&self, term: &str) -> StoreResult<Vec<Item>> {
        let needle = term.to_lowercase();
        Ok(self
            .inner
            .lock()
            .await
            .items
            .values()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn list_sorted_by_expiry(&self) -> StoreResult<Vec<Item>> {
        let mut items = self.list_all().await?;
        items.sort_by_key(|item| (item.expiry, item.id));
        Ok(items)
    }

    async fn update_expiry(&self, id: i32, expiry: ExpiryDate) -> StoreResult<Item> {
        let mut inner = self.inner.lock().await;
        let item = inner.items.get_mut(&id).ok_or(StoreError::NotFound { id })?;
        item.expiry = expiry;
        item.updated_at = now();

        info!(id, expiry = %expiry, "Item updated");
        Ok(item.clone())
    }

    async fn delete(&self, id: i32) -> StoreResult<()> {
        self.inner
            .lock()
            .await
            .items
            .remove(&id)
            .ok_or(StoreError::NotFound { id })?;

        info!(id, "Item deleted");
        Ok(())
    }
}
