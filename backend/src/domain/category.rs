//! Blog post category reference entity.
//!
//! Categories classify posts (e.g. Technology, Health, Travel). They are
//! plain labelled records; creating and editing them is handled elsewhere.

use serde::{Deserialize, Serialize};

/// Database identifier of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(i32);

impl CategoryId {
    /// Wrap a raw category identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier as stored in the database.
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Category a blog post can belong to.
///
/// # Examples
/// ```
/// use wordweave::domain::{Category, CategoryId};
///
/// let category = Category::new(CategoryId::new(3), "Travel");
/// assert_eq!(category.id().get(), 3);
/// assert_eq!(category.name(), "Travel");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "categoryId")]
    id: CategoryId,
    name: String,
}

impl Category {
    /// Build a category from its identifier and name.
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Category identifier.
    pub fn id(&self) -> CategoryId {
        self.id
    }

    /// Display name of the category.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
