//! Items belonging to a list content item
//!
//! Both helpers run the same two filters: membership of the list, then an
//! item predicate. Without a predicate only published items are returned;
//! a supplied predicate replaces that default instead of narrowing it.

use crate::{
    error::{DatabaseError, Result},
    store::ContentStore,
    types::ItemPredicate,
};
use trellis_types::ContentItem;

/// Count the items of `list_content_item_id` matching `item_predicate`
pub async fn query_list_items_count(
    store: &ContentStore,
    list_content_item_id: &str,
    item_predicate: Option<ItemPredicate>,
) -> Result<i64> {
    validate_list_id(list_content_item_id)?;

    store
        .query()
        .with_contained(list_content_item_id)
        .with_item(item_predicate.unwrap_or_default())
        .count()
        .await
}

/// Load the items of `list_content_item_id` matching `item_predicate`
pub async fn query_list_items(
    store: &ContentStore,
    list_content_item_id: &str,
    item_predicate: Option<ItemPredicate>,
) -> Result<Vec<ContentItem>> {
    validate_list_id(list_content_item_id)?;

    store
        .query()
        .with_contained(list_content_item_id)
        .with_item(item_predicate.unwrap_or_default())
        .list()
        .await
}

fn validate_list_id(list_content_item_id: &str) -> Result<()> {
    if list_content_item_id.trim().is_empty() {
        return Err(DatabaseError::validation(
            "list_content_item_id",
            "must not be empty",
        ));
    }
    Ok(())
}
