use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement};

use crate::{
    error::{ItemError, ItemResult},
    filters::{Filters, Metadata, calculate_metadata},
    models::{Item, ItemQuery},
    repository::ItemRepository,
};

const COLUMNS: &str = "id, name, description, status, mode, version, created_at";

const LIST_FILTER: &str = r#"
    WHERE name ILIKE $1
      AND description ILIKE $2
      AND ($3::text = '' OR status = $3::text)
      AND mode @> $4::text[]
"#;

pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct ItemRow {
    id: i64,
    name: String,
    description: String,
    status: String,
    mode: Vec<String>,
    version: i32,
    created_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            status: row.status,
            mode: row.mode,
            version: row.version,
            created_at: row.created_at,
        }
    }
}

/// Item row with the window count of all matches
#[derive(Debug, FromQueryResult)]
struct ListedItemRow {
    total_records: i64,
    id: i64,
    name: String,
    description: String,
    status: String,
    mode: Vec<String>,
    version: i32,
    created_at: DateTime<Utc>,
}

impl From<ListedItemRow> for Item {
    fn from(row: ListedItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            status: row.status,
            mode: row.mode,
            version: row.version,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct CountRow {
    total_records: i64,
}

/// `%needle%` with LIKE wildcards in `needle` taken literally
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn list_values(query: &ItemQuery) -> Vec<sea_orm::Value> {
    vec![
        contains_pattern(&query.name).into(),
        contains_pattern(&query.description).into(),
        query.status.clone().into(),
        query.mode.clone().into(),
    ]
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn insert(&self, item: Item) -> ItemResult<Item> {
        let sql = format!(
            "INSERT INTO items (name, description, status, mode) \
             VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
        );

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                item.name.into(),
                item.description.into(),
                item.status.into(),
                item.mode.into(),
            ],
        );

        let row = ItemRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or_else(|| ItemError::Internal("insert returned no row".to_string()))?;

        tracing::info!(item_id = row.id, "Created item");
        Ok(row.into())
    }

    async fn get(&self, id: i64) -> ItemResult<Item> {
        if id < 1 {
            return Err(ItemError::NotFound(id));
        }

        let sql = format!("SELECT {COLUMNS} FROM items WHERE id = $1");
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        ItemRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .map(Into::into)
            .ok_or(ItemError::NotFound(id))
    }

    async fn update(&self, item: Item) -> ItemResult<Item> {
        let sql = format!(
            "UPDATE items \
             SET name = $1, description = $2, status = $3, mode = $4, version = version + 1 \
             WHERE id = $5 AND version = $6 \
             RETURNING {COLUMNS}"
        );

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                item.name.into(),
                item.description.into(),
                item.status.into(),
                item.mode.into(),
                item.id.into(),
                item.version.into(),
            ],
        );

        // No row means the id is gone or the version moved on
        let row = ItemRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .ok_or(ItemError::EditConflict(item.id))?;

        tracing::info!(item_id = row.id, version = row.version, "Updated item");
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> ItemResult<()> {
        if id < 1 {
            return Err(ItemError::NotFound(id));
        }

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM items WHERE id = $1",
            [id.into()],
        );

        let result = self.db.execute_raw(stmt).await?;
        if result.rows_affected() == 0 {
            return Err(ItemError::NotFound(id));
        }

        tracing::info!(item_id = id, "Deleted item");
        Ok(())
    }

    async fn get_all(
        &self,
        query: ItemQuery,
        filters: Filters,
    ) -> ItemResult<(Vec<Item>, Metadata)> {
        // sort_column() only yields safe-listed names
        let sql = format!(
            "SELECT count(*) OVER() AS total_records, {COLUMNS} FROM items {LIST_FILTER} \
             ORDER BY {} {}, id ASC \
             LIMIT $5 OFFSET $6",
            filters.sort_column(),
            filters.sort_direction().as_sql(),
        );

        let mut values = list_values(&query);
        values.push(filters.limit().into());
        values.push(filters.offset().into());

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, values);
        let rows = ListedItemRow::find_by_statement(stmt).all(&self.db).await?;

        let total = match rows.first() {
            Some(row) => row.total_records,
            // Past the last page the window count is unavailable
            None if filters.page > 1 => self.count(&query).await?,
            None => 0,
        };

        let items = rows.into_iter().map(Into::into).collect();
        Ok((
            items,
            calculate_metadata(total, filters.page, filters.page_size),
        ))
    }
}

impl PgItemRepository {
    async fn count(&self, query: &ItemQuery) -> ItemResult<i64> {
        let sql = format!("SELECT count(*) AS total_records FROM items {LIST_FILTER}");
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, list_values(query));

        let row = CountRow::find_by_statement(stmt).one(&self.db).await?;
        Ok(row.map(|r| r.total_records).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern(""), "%%");
        assert_eq!(contains_pattern("milk"), "%milk%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
