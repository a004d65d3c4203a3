use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::ApiError,
    items::repo_types::{Item, ItemPatch, ItemStatus, NewItem},
};

#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Item>, ApiError>;

    async fn get(&self, id: i64) -> Result<Option<Item>, ApiError>;

    async fn insert(&self, new_item: NewItem) -> Result<Item, ApiError>;

    /// Applies the patch and returns the updated item, or `None` if absent.
    async fn update(&self, id: i64, patch: ItemPatch) -> Result<Option<Item>, ApiError>;

    /// Removes and returns the item, or `None` if absent.
    async fn remove(&self, id: i64) -> Result<Option<Item>, ApiError>;
}

#[derive(Default)]
struct Inner {
    items: Vec<Item>,
    last_id: i64,
}

/// Process-lifetime item store. Ids are never reused after deletion.
#[derive(Default)]
pub struct InMemoryItemStore {
    inner: RwLock<Inner>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the three sample items.
    pub fn with_samples() -> Self {
        let samples = [
            ("Item 1", ItemStatus::Active, "admin"),
            ("Item 2", ItemStatus::Active, "user"),
            ("Item 3", ItemStatus::Inactive, "admin"),
        ];
        let items: Vec<Item> = samples
            .into_iter()
            .zip(1..)
            .map(|((title, status, created_by), id)| Item {
                id,
                title: title.to_string(),
                description: format!("Description for item {id}"),
                status,
                created_by: created_by.to_string(),
            })
            .collect();
        let last_id = items.len() as i64;
        Self {
            inner: RwLock::new(Inner { items, last_id }),
        }
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list(&self) -> Result<Vec<Item>, ApiError> {
        Ok(self.inner.read().await.items.clone())
    }

    async fn get(&self, id: i64) -> Result<Option<Item>, ApiError> {
        let inner = self.inner.read().await;
        Ok(inner.items.iter().find(|i| i.id == id).cloned())
    }

    async fn insert(&self, new_item: NewItem) -> Result<Item, ApiError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let item = Item {
            id: inner.last_id,
            title: new_item.title,
            description: new_item.description,
            status: new_item.status,
            created_by: new_item.created_by,
        };
        inner.items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: i64, patch: ItemPatch) -> Result<Option<Item>, ApiError> {
        let mut inner = self.inner.write().await;
        Ok(inner.items.iter_mut().find(|i| i.id == id).map(|item| {
            item.apply(patch);
            item.clone()
        }))
    }

    async fn remove(&self, id: i64) -> Result<Option<Item>, ApiError> {
        let mut inner = self.inner.write().await;
        Ok(inner
            .items
            .iter()
            .position(|i| i.id == id)
            .map(|pos| inner.items.remove(pos)))
    }
}
