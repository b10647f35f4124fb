//! Item Service - Business logic layer

use axum_helpers::validation::Validator;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::filters::{Filters, Metadata, validate_filters};
use crate::models::{CreateItem, Item, ItemQuery, UpdateItem};
use crate::repository::ItemRepository;
use crate::validation::validate_item;

/// Item service providing business logic operations
///
/// Every mutating repository call is preceded by validation.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

fn ensure_valid(v: Validator) -> ItemResult<()> {
    if v.valid() {
        Ok(())
    } else {
        Err(ItemError::Validation(v.into_errors()))
    }
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Validate and store a new item
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        let item = Item::new(input);

        let mut v = Validator::new();
        validate_item(&mut v, &item);
        ensure_valid(v)?;

        self.repository.insert(item).await
    }

    /// Get an item by ID
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i64) -> ItemResult<Item> {
        self.repository.get(id).await
    }

    /// Apply `patch` to `current`, the item as last read.
    ///
    /// A version named by the patch body or by `expected_version` must
    /// equal the version of `current`.
    #[instrument(skip(self, current, patch), fields(item_id = current.id, version = current.version))]
    pub async fn update_item(
        &self,
        current: Item,
        patch: UpdateItem,
        expected_version: Option<i32>,
    ) -> ItemResult<Item> {
        let stale = [patch.version, expected_version]
            .into_iter()
            .flatten()
            .any(|v| v != current.version);
        if stale {
            return Err(ItemError::EditConflict(current.id));
        }

        let mut item = current;
        item.apply(patch);

        let mut v = Validator::new();
        validate_item(&mut v, &item);
        ensure_valid(v)?;

        self.repository.update(item).await
    }

    /// Delete an item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: i64) -> ItemResult<()> {
        self.repository.delete(id).await
    }

    /// List one page of matching items
    #[instrument(skip(self))]
    pub async fn list_items(
        &self,
        query: ItemQuery,
        filters: Filters,
    ) -> ItemResult<(Vec<Item>, Metadata)> {
        let mut v = Validator::new();
        validate_filters(&mut v, &filters);
        ensure_valid(v)?;

        self.repository.get_all(query, filters).await
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
