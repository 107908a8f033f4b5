//! Chainable item queries
//!
//! Each `with_*` call adds a filter; filters are AND-combined. `count` and
//! `list` always see the same filter set, so their results agree.

use crate::{error::Result, store::ContentStore, types::ItemPredicate};
use trellis_types::ContentItem;

/// Query over stored content items
pub struct ItemQuery<'a> {
    store: &'a ContentStore,
    contained_in: Vec<String>,
    item_filters: Vec<ItemPredicate>,
}

impl<'a> ItemQuery<'a> {
    pub(crate) fn new(store: &'a ContentStore) -> Self {
        Self {
            store,
            contained_in: Vec::new(),
            item_filters: Vec::new(),
        }
    }

    /// Keep items whose containment record points at `list_content_item_id`
    pub fn with_contained(mut self, list_content_item_id: impl Into<String>) -> Self {
        self.contained_in.push(list_content_item_id.into());
        self
    }

    /// Keep items whose index row satisfies `predicate`
    pub fn with_item(mut self, predicate: ItemPredicate) -> Self {
        self.item_filters.push(predicate);
        self
    }

    /// Number of matching items
    pub async fn count(self) -> Result<i64> {
        let (from_where, params) = self.from_where();
        let sql = format!("SELECT COUNT(*) FROM {from_where}");
        self.store.fetch_count(&sql, params).await
    }

    /// Matching items, ordered by list position then id
    pub async fn list(self) -> Result<Vec<ContentItem>> {
        let (from_where, params) = self.from_where();
        let order_by = if self.contained_in.is_empty() {
            "d.content_item_id"
        } else {
            "c.item_order, d.content_item_id"
        };
        let sql = format!("SELECT d.document FROM {from_where} ORDER BY {order_by}");
        self.store.fetch_documents(&sql, params).await
    }

    /// `FROM ... WHERE ...` clause shared by `count` and `list`
    fn from_where(&self) -> (String, Vec<String>) {
        let mut sql = "content_items d".to_string();
        let mut params = Vec::new();
        let mut where_clauses = Vec::new();

        if !self.contained_in.is_empty() {
            sql.push_str(" JOIN contained_part_index c ON c.content_item_id = d.content_item_id");
            for list_id in &self.contained_in {
                where_clauses.push("c.list_content_item_id = ?".to_string());
                params.push(list_id.clone());
            }
        }

        if !self.item_filters.is_empty() {
            sql.push_str(" JOIN content_item_index i ON i.content_item_id = d.content_item_id");
            for predicate in &self.item_filters {
                where_clauses.push(format!("({})", predicate.to_sql("i", &mut params)));
            }
        }

        if !where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clauses.join(" AND "));
        }

        (sql, params)
    }
}
