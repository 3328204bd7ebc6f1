//! Library item domain model
//!
//! A library item is a saved article, page or document owned by a user. The
//! export job only reads items and forwards them to export clients.

use super::ids::{HighlightId, LibraryItemId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of annotation a highlight represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HighlightType {
    /// Quoted text selection
    #[default]
    Highlight,
    /// Redacted span
    Redaction,
    /// Free-standing note without a quote
    Note,
}

/// A highlight or note attached to a library item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: HighlightId,

    #[serde(default)]
    pub highlight_type: HighlightType,

    /// Selected text
    #[serde(default)]
    pub quote: Option<String>,

    /// User note on the highlight
    #[serde(default)]
    pub annotation: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Highlight {
    /// Whether this highlight carries quoted text worth exporting
    pub fn is_quoted_highlight(&self) -> bool {
        self.highlight_type == HighlightType::Highlight
            && self
                .quote
                .as_deref()
                .map(|q| !q.trim().is_empty())
                .unwrap_or(false)
    }
}

/// A saved library item
///
/// # Examples
///
/// ```
/// use ferry::domain::library_item::LibraryItemBuilder;
/// use ferry::domain::ids::{LibraryItemId, UserId};
///
/// let item = LibraryItemBuilder::new()
///     .id(LibraryItemId::new("item-1").unwrap())
///     .user_id(UserId::new("user-1").unwrap())
///     .title("Designing Data-Intensive Applications")
///     .original_url("https://example.com/ddia")
///     .build()
///     .unwrap();
/// assert!(item.highlights.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryItem {
    pub id: LibraryItemId,

    /// Owner of the item
    pub user_id: UserId,

    pub title: String,

    /// URL the item was saved from
    pub original_url: String,

    #[serde(default)]
    pub author: Option<String>,

    /// Publisher name, e.g. "Twitter"
    #[serde(default)]
    pub site_name: Option<String>,

    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Label names attached by the user
    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub highlights: Vec<Highlight>,

    pub saved_at: DateTime<Utc>,
}

impl LibraryItem {
    /// Creates a new builder for constructing a LibraryItem
    pub fn builder() -> LibraryItemBuilder {
        LibraryItemBuilder::default()
    }
}

/// Builder for constructing LibraryItem instances
#[derive(Debug, Default)]
pub struct LibraryItemBuilder {
    id: Option<LibraryItemId>,
    user_id: Option<UserId>,
    title: Option<String>,
    original_url: Option<String>,
    author: Option<String>,
    site_name: Option<String>,
    thumbnail: Option<String>,
    labels: Vec<String>,
    highlights: Vec<Highlight>,
    saved_at: Option<DateTime<Utc>>,
}

impl LibraryItemBuilder {
    /// Creates a new LibraryItemBuilder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: LibraryItemId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn original_url(mut self, url: impl Into<String>) -> Self {
        self.original_url = Some(url.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = Some(site_name.into());
        self
    }

    pub fn thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.highlights.push(highlight);
        self
    }

    /// Defaults to now when unset
    pub fn saved_at(mut self, saved_at: DateTime<Utc>) -> Self {
        self.saved_at = Some(saved_at);
        self
    }

    /// Builds the LibraryItem
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is missing
    pub fn build(self) -> Result<LibraryItem, String> {
        Ok(LibraryItem {
            id: self.id.ok_or("id is required")?,
            user_id: self.user_id.ok_or("user_id is required")?,
            title: self.title.ok_or("title is required")?,
            original_url: self.original_url.ok_or("original_url is required")?,
            author: self.author,
            site_name: self.site_name,
            thumbnail: self.thumbnail,
            labels: self.labels,
            highlights: self.highlights,
            saved_at: self.saved_at.unwrap_or_else(Utc::now),
        })
    }
}
