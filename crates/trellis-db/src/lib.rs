//! # Trellis Database Library
//!
//! Content item storage on SQLite/Turso. Items are stored as JSON documents
//! next to two index tables, `content_item_index` and
//! `contained_part_index`, which queries filter on.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use trellis_db::{lists, ContentStore, DatabaseConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = ContentStore::new(DatabaseConfig::new("db/trellis.db")).await?;
//!
//!     // Published items contained in the list "blog"
//!     let posts = lists::query_list_items(&store, "blog", None).await?;
//!     println!("{} published posts", posts.len());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod lists;
pub mod query;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::DatabaseConfig;
pub use error::{DatabaseError, Result};
pub use lists::{query_list_items, query_list_items_count};
pub use query::ItemQuery;
pub use store::ContentStore;
pub use types::*;
