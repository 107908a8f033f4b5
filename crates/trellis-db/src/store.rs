//! Content store
//!
//! Items are kept as JSON documents in `content_items`; the two index
//! tables carry the columns queries filter on.

use crate::{
    config::DatabaseConfig,
    error::{DatabaseError, Result},
    query::ItemQuery,
    types::{ContainedPartIndex, ContentItemIndex},
};
use std::path::Path;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use trellis_types::{ContainedPart, ContentItem};
use turso::{Builder, Connection};

/// Content item store backed by a single Turso connection
pub struct ContentStore {
    conn: Mutex<Connection>,
}

impl ContentStore {
    /// Open the store and make sure the schema exists
    pub async fn new(config: DatabaseConfig) -> Result<Self> {
        info!(
            "[DB] Opening content store at {} ({})",
            config.path,
            config.database_type()
        );

        if !config.is_memory() {
            if let Some(parent) = Path::new(&config.path).parent() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    DatabaseError::filesystem(parent.display().to_string(), e)
                })?;
            }
        }

        let db = Builder::new_local(&config.path)
            .build()
            .await
            .map_err(|e| {
                DatabaseError::connection_with_source(
                    format!("Failed to create local database: {}", config.path),
                    e,
                )
            })?;

        let conn = db.connect().map_err(|e| {
            DatabaseError::connection_with_source("Failed to establish database connection", e)
        })?;

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema().await?;

        Ok(store)
    }

    async fn initialize_schema(&self) -> Result<()> {
        info!("[DB] Initializing content schema");

        let tables = [
            "CREATE TABLE IF NOT EXISTS content_items (
                content_item_id TEXT PRIMARY KEY,
                document TEXT NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS content_item_index (
                content_item_id TEXT PRIMARY KEY,
                content_type TEXT NOT NULL,
                display_text TEXT NOT NULL,
                published INTEGER NOT NULL,
                latest INTEGER NOT NULL,
                owner TEXT NOT NULL,
                created_utc INTEGER NOT NULL,
                modified_utc INTEGER NOT NULL
            )",
            "CREATE TABLE IF NOT EXISTS contained_part_index (
                content_item_id TEXT PRIMARY KEY,
                list_content_item_id TEXT NOT NULL,
                item_order INTEGER NOT NULL
            )",
        ];

        let conn = self.conn.lock().await;
        for table in tables.iter() {
            conn.execute(table, ())
                .await
                .map_err(|e| DatabaseError::schema_with_source("Failed to create table", e))?;
        }

        let indexes = [
            "CREATE INDEX IF NOT EXISTS idx_contained_part_list ON contained_part_index(list_content_item_id)",
            "CREATE INDEX IF NOT EXISTS idx_content_item_index_type ON content_item_index(content_type)",
        ];

        for index in indexes.iter() {
            conn.execute(index, ())
                .await
                .map_err(|e| DatabaseError::schema_with_source("Failed to create index", e))?;
        }

        info!("[DB] Content schema initialized");
        Ok(())
    }

    /// Insert or replace an item, its index row and its list membership.
    /// `contained = None` removes any existing membership.
    pub async fn save(&self, item: &ContentItem, contained: Option<&ContainedPart>) -> Result<()> {
        if item.content_item_id.is_empty() {
            return Err(DatabaseError::validation(
                "content_item_id",
                "must not be empty",
            ));
        }

        let document = serde_json::to_string(item)
            .map_err(|e| DatabaseError::serialization("Failed to serialize content item", e))?;
        let index = ContentItemIndex::from(item);
        let conn = self.conn.lock().await;

        begin(&conn).await?;
        let written = write_item(&conn, item, document, index, contained).await;
        finish(&conn, written).await?;

        debug!("[DB] Saved content item {}", item.content_item_id);
        Ok(())
    }

    /// Load one item by id
    pub async fn get(&self, content_item_id: &str) -> Result<Option<ContentItem>> {
        let mut items = self
            .fetch_documents(
                "SELECT d.document FROM content_items d WHERE d.content_item_id = ?",
                vec![content_item_id.to_string()],
            )
            .await?;
        Ok(items.pop())
    }

    /// Delete an item and its index rows, returns whether it existed
    pub async fn remove(&self, content_item_id: &str) -> Result<bool> {
        let conn = self.conn.lock().await;

        begin(&conn).await?;
        let deleted = delete_item(&conn, content_item_id).await;
        finish(&conn, deleted).await
    }

    /// Start a query over stored items
    pub fn query(&self) -> ItemQuery<'_> {
        ItemQuery::new(self)
    }

    /// Run a `SELECT` whose only column is the item document
    pub(crate) async fn fetch_documents(
        &self,
        sql: &str,
        params: Vec<String>,
    ) -> Result<Vec<ContentItem>> {
        debug!("[DB] Querying documents: {}", sql);
        debug!("[DB] Query params: {:?}", params);

        let conn = self.conn.lock().await;
        let mut rows = conn
            .query(sql, turso::params_from_iter(params.iter().map(String::as_str)))
            .await
            .map_err(|e| DatabaseError::query("Failed to query content items", e))?;

        let mut items = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::query("Failed to iterate content items", e))?
        {
            let document: String = row.get(0).map_err(|e| {
                DatabaseError::generic_with_source("Failed to get item document", e)
            })?;
            let item: ContentItem = serde_json::from_str(&document)
                .map_err(|e| DatabaseError::serialization("Failed to deserialize item", e))?;
            items.push(item);
        }

        Ok(items)
    }

    /// Run a `SELECT COUNT(*)`
    pub(crate) async fn fetch_count(&self, sql: &str, params: Vec<String>) -> Result<i64> {
        debug!("[DB] Counting: {}", sql);

        let conn = self.conn.lock().await;
        let mut rows = conn
            .query(sql, turso::params_from_iter(params.iter().map(String::as_str)))
            .await
            .map_err(|e| DatabaseError::query("Failed to count content items", e))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::query("Failed to read item count", e))?
        {
            let count: i64 = row
                .get(0)
                .map_err(|e| DatabaseError::generic_with_source("Failed to parse item count", e))?;
            Ok(count)
        } else {
            Ok(0)
        }
    }
}

/// Open a transaction so multi-table writes land together
async fn begin(conn: &Connection) -> Result<()> {
    conn.execute("BEGIN", ())
        .await
        .map_err(|e| DatabaseError::query("Failed to begin transaction", e))?;
    Ok(())
}

/// Commit on success, roll back and hand the original error on failure
async fn finish<T>(conn: &Connection, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            conn.execute("COMMIT", ())
                .await
                .map_err(|e| DatabaseError::query("Failed to commit transaction", e))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback) = conn.execute("ROLLBACK", ()).await {
                warn!("[DB] Rollback failed: {}", rollback);
            }
            Err(err)
        }
    }
}

async fn write_item(
    conn: &Connection,
    item: &ContentItem,
    document: String,
    index: ContentItemIndex,
    contained: Option<&ContainedPart>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO content_items (content_item_id, document)
        VALUES (?, ?)
        ON CONFLICT(content_item_id) DO UPDATE SET
            document = excluded.document;",
        [item.content_item_id.clone(), document],
    )
    .await
    .map_err(|e| DatabaseError::query("Failed to upsert content item", e))?;

    conn.execute(
        "INSERT INTO content_item_index (
            content_item_id, content_type, display_text, published,
            latest, owner, created_utc, modified_utc
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(content_item_id) DO UPDATE SET
            content_type = excluded.content_type,
            display_text = excluded.display_text,
            published = excluded.published,
            latest = excluded.latest,
            owner = excluded.owner,
            modified_utc = excluded.modified_utc;",
        [
            index.content_item_id.clone(),
            index.content_type,
            index.display_text,
            sql_bool(index.published),
            sql_bool(index.latest),
            index.owner.unwrap_or_default(),
            item.created_utc.timestamp().to_string(),
            item.modified_utc.timestamp().to_string(),
        ],
    )
    .await
    .map_err(|e| DatabaseError::query("Failed to upsert content item index", e))?;

    match contained {
        Some(part) => {
            let part = ContainedPartIndex::new(&item.content_item_id, part);
            conn.execute(
                "INSERT INTO contained_part_index (content_item_id, list_content_item_id, item_order)
                VALUES (?, ?, ?)
                ON CONFLICT(content_item_id) DO UPDATE SET
                    list_content_item_id = excluded.list_content_item_id,
                    item_order = excluded.item_order;",
                [
                    part.content_item_id,
                    part.list_content_item_id,
                    part.order.to_string(),
                ],
            )
            .await
            .map_err(|e| DatabaseError::query("Failed to upsert contained part index", e))?;
        }
        None => {
            conn.execute(
                "DELETE FROM contained_part_index WHERE content_item_id = ?",
                [item.content_item_id.clone()],
            )
            .await
            .map_err(|e| DatabaseError::query("Failed to clear contained part index", e))?;
        }
    }

    Ok(())
}

async fn delete_item(conn: &Connection, content_item_id: &str) -> Result<bool> {
    let removed = conn
        .execute(
            "DELETE FROM content_items WHERE content_item_id = ?",
            [content_item_id.to_string()],
        )
        .await
        .map_err(|e| DatabaseError::query("Failed to delete content item", e))?;

    for table in ["content_item_index", "contained_part_index"] {
        conn.execute(
            &format!("DELETE FROM {table} WHERE content_item_id = ?"),
            [content_item_id.to_string()],
        )
        .await
        .map_err(|e| DatabaseError::query(format!("Failed to delete from {table}"), e))?;
    }

    Ok(removed > 0)
}

fn sql_bool(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}
