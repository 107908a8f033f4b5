//! Index records and item predicates

use serde::{Deserialize, Serialize};
use trellis_types::{ContainedPart, ContentItem};

/// Row of `content_item_index`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItemIndex {
    pub content_item_id: String,
    pub content_type: String,
    pub display_text: String,
    pub published: bool,
    pub latest: bool,
    /// Stored as an empty string when unset
    pub owner: Option<String>,
}

impl From<&ContentItem> for ContentItemIndex {
    fn from(item: &ContentItem) -> Self {
        Self {
            content_item_id: item.content_item_id.clone(),
            content_type: item.content_type.clone(),
            display_text: item.display_text.clone(),
            published: item.published,
            latest: item.latest,
            owner: item.owner.clone(),
        }
    }
}

/// Row of `contained_part_index`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainedPartIndex {
    pub content_item_id: String,
    pub list_content_item_id: String,
    pub order: i64,
}

impl ContainedPartIndex {
    pub fn new(content_item_id: &str, part: &ContainedPart) -> Self {
        Self {
            content_item_id: content_item_id.to_string(),
            list_content_item_id: part.list_content_item_id.clone(),
            order: part.order,
        }
    }
}

/// Filter over `content_item_index` rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemPredicate {
    #[default]
    Published,
    Latest,
    ContentType(String),
    Owner(String),
    /// Substring match on the display text
    DisplayTextContains(String),
    Not(Box<ItemPredicate>),
    /// All must hold; empty is always true
    And(Vec<ItemPredicate>),
    /// At least one must hold; empty is always false
    Or(Vec<ItemPredicate>),
}

impl ItemPredicate {
    /// Negate this predicate
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Render as a SQL condition over the alias `alias`, pushing bind values
    /// into `params` in placeholder order
    pub fn to_sql(&self, alias: &str, params: &mut Vec<String>) -> String {
        match self {
            Self::Published => format!("{alias}.published = 1"),
            Self::Latest => format!("{alias}.latest = 1"),
            Self::ContentType(content_type) => {
                params.push(content_type.clone());
                format!("{alias}.content_type = ?")
            }
            Self::Owner(owner) => {
                params.push(owner.clone());
                format!("{alias}.owner = ?")
            }
            Self::DisplayTextContains(text) => {
                params.push(text.clone());
                format!("instr({alias}.display_text, ?) > 0")
            }
            Self::Not(inner) => format!("NOT ({})", inner.to_sql(alias, params)),
            Self::And(all) => join_sql(all, " AND ", "1 = 1", alias, params),
            Self::Or(any) => join_sql(any, " OR ", "1 = 0", alias, params),
        }
    }
}

fn join_sql(
    predicates: &[ItemPredicate],
    separator: &str,
    empty: &str,
    alias: &str,
    params: &mut Vec<String>,
) -> String {
    if predicates.is_empty() {
        return empty.to_string();
    }

    let parts: Vec<String> = predicates
        .iter()
        .map(|p| format!("({})", p.to_sql(alias, params)))
        .collect();
    parts.join(separator)
}
