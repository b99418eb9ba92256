//! Menu categories

use chrono::{DateTime, Utc};
use kernel::id::CategoryId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub slug: String,
    pub name_en: String,
    pub name_bn: String,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(slug: String, name_en: String, name_bn: String, sort_order: i32) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            slug,
            name_en,
            name_bn,
            sort_order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial edit; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_bn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

impl CategoryPatch {
    pub fn apply(&self, category: &mut Category) {
        if let Some(slug) = &self.slug {
            category.slug = slug.clone();
        }
        if let Some(name_en) = &self.name_en {
            category.name_en = name_en.clone();
        }
        if let Some(name_bn) = &self.name_bn {
            category.name_bn = name_bn.clone();
        }
        if let Some(sort_order) = self.sort_order {
            category.sort_order = sort_order;
        }
        category.updated_at = Utc::now();
    }
}
