//! Integration tests for list membership queries
//!
//! Each test opens its own store in a temporary directory.

use anyhow::Result;
use tempfile::TempDir;
use trellis_db::lists::{query_list_items, query_list_items_count};
use trellis_db::{ContentStore, DatabaseConfig, DatabaseError, ItemPredicate};
use trellis_types::{ContainedPart, ContentItem};

async fn setup_store() -> Result<(ContentStore, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("nested").join("content.db");
    let store = ContentStore::new(DatabaseConfig::new(db_path.to_string_lossy())).await?;
    Ok((store, temp_dir))
}

/// Two lists: `blog` holds three posts (two published), `news` holds one
/// published article. `orphan` belongs to no list.
async fn seed(store: &ContentStore) -> Result<()> {
    let items = [
        (
            ContentItem::new("post-1", "BlogPost", "First post").published(),
            Some(ContainedPart::new("blog", 2)),
        ),
        (
            ContentItem::new("post-2", "BlogPost", "Second post")
                .published()
                .with_owner("alice"),
            Some(ContainedPart::new("blog", 1)),
        ),
        (
            ContentItem::new("post-3", "BlogPost", "Draft post"),
            Some(ContainedPart::new("blog", 3)),
        ),
        (
            ContentItem::new("article-1", "Article", "Headline").published(),
            Some(ContainedPart::new("news", 1)),
        ),
        (ContentItem::new("orphan", "BlogPost", "Orphan").published(), None),
    ];

    for (item, part) in items.iter() {
        store.save(item, part.as_ref()).await?;
    }
    Ok(())
}

fn ids(items: &[ContentItem]) -> Vec<&str> {
    items.iter().map(|i| i.content_item_id.as_str()).collect()
}

#[tokio::test]
async fn test_default_returns_only_published_members() -> Result<()> {
    let (store, _temp_dir) = setup_store().await?;
    seed(&store).await?;

    let items = query_list_items(&store, "blog", None).await?;

    assert!(items.iter().all(|item| item.published));
    let mut found = ids(&items);
    found.sort();
    assert_eq!(found, vec!["post-1", "post-2"]);
    Ok(())
}

#[tokio::test]
async fn test_count_matches_list_length() -> Result<()> {
    let (store, _temp_dir) = setup_store().await?;
    seed(&store).await?;

    let predicates = [
        None,
        Some(ItemPredicate::Published.negate()),
        Some(ItemPredicate::Latest),
        Some(ItemPredicate::Owner("alice".to_string())),
        Some(ItemPredicate::ContentType("Article".to_string())),
        Some(ItemPredicate::Or(vec![])),
    ];

    for list_id in ["blog", "news", "missing"] {
        for predicate in predicates.iter() {
            let count = query_list_items_count(&store, list_id, predicate.clone()).await?;
            let items = query_list_items(&store, list_id, predicate.clone()).await?;
            assert_eq!(
                count,
                items.len() as i64,
                "count and list disagree for {list_id} / {predicate:?}"
            );
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_predicate_replaces_published_default() -> Result<()> {
    let (store, _temp_dir) = setup_store().await?;
    seed(&store).await?;

    let drafts =
        query_list_items(&store, "blog", Some(ItemPredicate::Published.negate())).await?;
    assert_eq!(ids(&drafts), vec!["post-3"]);

    let everything = query_list_items(&store, "blog", Some(ItemPredicate::Latest)).await?;
    assert_eq!(everything.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_empty_result_is_not_an_error() -> Result<()> {
    let (store, _temp_dir) = setup_store().await?;
    seed(&store).await?;

    assert_eq!(query_list_items_count(&store, "missing", None).await?, 0);
    assert!(query_list_items(&store, "missing", None).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_empty_list_id_is_rejected() -> Result<()> {
    let (store, _temp_dir) = setup_store().await?;

    let err = query_list_items_count(&store, "", None).await.unwrap_err();
    assert!(matches!(err, DatabaseError::ValidationError { .. }));

    let err = query_list_items(&store, "  ", None).await.unwrap_err();
    assert!(err.is_client_error());
    Ok(())
}

#[tokio::test]
async fn test_membership_follows_latest_save() -> Result<()> {
    let (store, _temp_dir) = setup_store().await?;
    seed(&store).await?;

    // Move post-1 from blog to news, then detach post-2 entirely
    let post_1 = store.get("post-1").await?.expect("post-1 stored");
    store
        .save(&post_1, Some(&ContainedPart::new("news", 5)))
        .await?;
    let post_2 = store.get("post-2").await?.expect("post-2 stored");
    store.save(&post_2, None).await?;

    assert!(query_list_items(&store, "blog", None).await?.is_empty());
    let news = query_list_items(&store, "news", None).await?;
    assert_eq!(ids(&news), vec!["article-1", "post-1"]);
    Ok(())
}

#[tokio::test]
async fn test_remove_drops_item_from_lists() -> Result<()> {
    let (store, _temp_dir) = setup_store().await?;
    seed(&store).await?;

    assert!(store.remove("post-1").await?);
    assert!(!store.remove("post-1").await?);
    assert!(store.get("post-1").await?.is_none());
    assert_eq!(query_list_items_count(&store, "blog", None).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_documents_round_trip_through_store() -> Result<()> {
    let (store, _temp_dir) = setup_store().await?;

    let mut item = ContentItem::new("page-1", "Page", "About").published();
    item.content = serde_json::json!({ "TitlePart": { "Title": "About" } });
    store.save(&item, Some(&ContainedPart::new("pages", 0))).await?;

    let loaded = store.get("page-1").await?.expect("page stored");
    assert_eq!(loaded.content["TitlePart"]["Title"], "About");
    assert_eq!(loaded.display_text, "About");
    Ok(())
}

#[tokio::test]
async fn test_writes_are_committed_for_the_next_connection() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("content.db");
    let config = DatabaseConfig::new(db_path.to_string_lossy());

    {
        let store = ContentStore::new(config.clone()).await?;
        seed(&store).await?;
        // Every write runs in its own transaction, so back-to-back writes
        // only succeed if the previous one was closed
        assert!(store.remove("post-3").await?);
        let post_1 = store.get("post-1").await?.expect("post-1 stored");
        store.save(&post_1, Some(&ContainedPart::new("blog", 9))).await?;
    }

    let reopened = ContentStore::new(config).await?;
    let blog = query_list_items(&reopened, "blog", Some(ItemPredicate::Latest)).await?;
    assert_eq!(ids(&blog), vec!["post-2", "post-1"]);
    assert!(reopened.get("post-3").await?.is_none());
    Ok(())
}
