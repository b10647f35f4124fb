use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::filters::{Filters, Metadata, SortDirection, calculate_metadata};
use crate::models::{Item, ItemQuery};

/// Repository trait for Item persistence
///
/// Implementations own id assignment and the version counter used for
/// optimistic concurrency.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item, assigning `id`, `created_at` and version 1
    async fn insert(&self, item: Item) -> ItemResult<Item>;

    /// Fetch an item by id
    async fn get(&self, id: i64) -> ItemResult<Item>;

    /// Store `item` if its version still matches, returning it with the
    /// version incremented
    async fn update(&self, item: Item) -> ItemResult<Item>;

    /// Delete an item by id
    async fn delete(&self, id: i64) -> ItemResult<()>;

    /// One page of matching items plus metadata for the full match set
    async fn get_all(&self, query: ItemQuery, filters: Filters)
    -> ItemResult<(Vec<Item>, Metadata)>;
}

#[derive(Debug)]
struct Store {
    items: BTreeMap<i64, Item>,
    next_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory implementation of ItemRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryItemRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(item: &Item, query: &ItemQuery) -> bool {
    let contains = |haystack: &str, needle: &str| {
        needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
    };

    contains(&item.name, &query.name)
        && contains(&item.description, &query.description)
        && (query.status.is_empty() || item.status == query.status)
        && query.mode.iter().all(|tag| item.mode.contains(tag))
}

fn compare(a: &Item, b: &Item, filters: &Filters) -> Ordering {
    let by_column = match filters.sort_column() {
        "name" => a.name.cmp(&b.name),
        "description" => a.description.cmp(&b.description),
        "status" => a.status.cmp(&b.status),
        _ => a.id.cmp(&b.id),
    };

    let by_column = match filters.sort_direction() {
        SortDirection::Asc => by_column,
        SortDirection::Desc => by_column.reverse(),
    };

    by_column.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, mut item: Item) -> ItemResult<Item> {
        let mut store = self.store.write().await;

        item.id = store.next_id;
        item.version = 1;
        item.created_at = Utc::now();
        store.next_id += 1;
        store.items.insert(item.id, item.clone());

        tracing::info!(item_id = item.id, "Created item");
        Ok(item)
    }

    async fn get(&self, id: i64) -> ItemResult<Item> {
        if id < 1 {
            return Err(ItemError::NotFound(id));
        }

        let store = self.store.read().await;
        store.items.get(&id).cloned().ok_or(ItemError::NotFound(id))
    }

    async fn update(&self, mut item: Item) -> ItemResult<Item> {
        let mut store = self.store.write().await;

        let Some(stored) = store.items.get_mut(&item.id) else {
            return Err(ItemError::EditConflict(item.id));
        };
        if stored.version != item.version {
            return Err(ItemError::EditConflict(item.id));
        }

        item.version += 1;
        item.created_at = stored.created_at;
        *stored = item.clone();

        tracing::info!(item_id = item.id, version = item.version, "Updated item");
        Ok(item)
    }

    async fn delete(&self, id: i64) -> ItemResult<()> {
        if id < 1 {
            return Err(ItemError::NotFound(id));
        }

        let mut store = self.store.write().await;
        store
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or(ItemError::NotFound(id))?;

        tracing::info!(item_id = id, "Deleted item");
        Ok(())
    }

    async fn get_all(
        &self,
        query: ItemQuery,
        filters: Filters,
    ) -> ItemResult<(Vec<Item>, Metadata)> {
        let store = self.store.read().await;

        let mut matched: Vec<&Item> = store
            .items
            .values()
            .filter(|item| matches(item, &query))
            .collect();
        matched.sort_by(|a, b| compare(a, b, &filters));

        let total = matched.len() as i64;
        let offset = usize::try_from(filters.offset()).unwrap_or(0);
        let limit = usize::try_from(filters.limit()).unwrap_or(0);

        let items = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((
            items,
            calculate_metadata(total, filters.page, filters.page_size),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::ITEM_SORT_SAFELIST;
    use crate::models::CreateItem;

    fn new_item(name: &str, status: &str, mode: &[&str]) -> Item {
        Item::new(CreateItem {
            name: name.to_string(),
            description: format!("{name} description"),
            status: status.to_string(),
            mode: mode.iter().map(|m| m.to_string()).collect(),
        })
    }

    async fn seeded() -> InMemoryItemRepository {
        let repo = InMemoryItemRepository::new();
        repo.insert(new_item("Buy milk", "pending", &["home", "errand"]))
            .await
            .unwrap();
        repo.insert(new_item("Answer email", "in-progress", &["work"]))
            .await
            .unwrap();
        repo.insert(new_item("Walk the dog", "completed", &["home"]))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_version() {
        let repo = InMemoryItemRepository::new();

        let first = repo
            .insert(new_item("Buy milk", "pending", &[]))
            .await
            .unwrap();
        let second = repo
            .insert(new_item("Buy bread", "pending", &[]))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(first.version, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_get_rejects_non_positive_ids() {
        let repo = seeded().await;
        assert!(matches!(repo.get(0).await, Err(ItemError::NotFound(0))));
        assert!(matches!(repo.get(-4).await, Err(ItemError::NotFound(-4))));
        assert!(matches!(repo.get(99).await, Err(ItemError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_update_increments_version() {
        let repo = seeded().await;
        let mut item = repo.get(1).await.unwrap();
        item.status = "completed".to_string();

        let updated = repo.update(item).await.unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(repo.get(1).await.unwrap().status, "completed");
    }

    #[tokio::test]
    async fn test_stale_update_is_rejected_and_leaves_item_unchanged() {
        let repo = seeded().await;
        let original = repo.get(1).await.unwrap();

        let mut first = original.clone();
        first.name = "Buy oat milk".to_string();
        repo.update(first).await.unwrap();

        let mut stale = original.clone();
        stale.name = "Buy soy milk".to_string();
        let err = repo.update(stale).await.unwrap_err();
        assert!(matches!(err, ItemError::EditConflict(1)));

        let stored = repo.get(1).await.unwrap();
        assert_eq!(stored.name, "Buy oat milk");
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn test_update_of_missing_item_conflicts() {
        let repo = seeded().await;
        let mut item = repo.get(1).await.unwrap();
        repo.delete(1).await.unwrap();

        item.name = "gone".to_string();
        assert!(matches!(
            repo.update(item).await,
            Err(ItemError::EditConflict(1))
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repo = seeded().await;
        repo.delete(2).await.unwrap();

        assert!(matches!(repo.get(2).await, Err(ItemError::NotFound(2))));
        assert!(matches!(repo.delete(2).await, Err(ItemError::NotFound(2))));
        assert!(matches!(repo.delete(0).await, Err(ItemError::NotFound(0))));
    }

    #[tokio::test]
    async fn test_get_all_with_empty_filters_returns_everything() {
        let repo = seeded().await;

        let (items, metadata) = repo
            .get_all(ItemQuery::default(), Filters::default())
            .await
            .unwrap();

        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(metadata.total_records, 3);
        assert_eq!(metadata.last_page, 1);
    }

    #[tokio::test]
    async fn test_get_all_filters() {
        let repo = seeded().await;

        let query = ItemQuery {
            name: "MILK".to_string(),
            ..Default::default()
        };
        let (items, _) = repo.get_all(query, Filters::default()).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Buy milk");

        let query = ItemQuery {
            status: "completed".to_string(),
            ..Default::default()
        };
        let (items, _) = repo.get_all(query, Filters::default()).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 3);

        let query = ItemQuery {
            mode: vec!["home".to_string()],
            ..Default::default()
        };
        let (items, metadata) = repo.get_all(query, Filters::default()).await.unwrap();
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(metadata.total_records, 2);

        let query = ItemQuery {
            mode: vec!["home".to_string(), "work".to_string()],
            ..Default::default()
        };
        let (items, metadata) = repo.get_all(query, Filters::default()).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(metadata, Metadata::default());
    }

    #[tokio::test]
    async fn test_get_all_sorts_and_paginates() {
        let repo = seeded().await;

        let filters = Filters::new(1, 2, "-id", &ITEM_SORT_SAFELIST);
        let (items, metadata) = repo
            .get_all(ItemQuery::default(), filters)
            .await
            .unwrap();
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(metadata.total_records, 3);
        assert_eq!(metadata.last_page, 2);

        let filters = Filters::new(2, 2, "name", &ITEM_SORT_SAFELIST);
        let (items, metadata) = repo
            .get_all(ItemQuery::default(), filters)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Walk the dog");
        assert_eq!(metadata.current_page, 2);
        assert_eq!(metadata.total_records, 3);
    }

    #[tokio::test]
    async fn test_sort_ties_break_on_id() {
        let repo = InMemoryItemRepository::new();
        for name in ["b", "a", "b", "a"] {
            repo.insert(new_item(name, "pending", &[])).await.unwrap();
        }

        let filters = Filters::new(1, 20, "-name", &ITEM_SORT_SAFELIST);
        let (items, _) = repo
            .get_all(ItemQuery::default(), filters)
            .await
            .unwrap();
        assert_eq!(
            items.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![1, 3, 2, 4]
        );
    }
}
