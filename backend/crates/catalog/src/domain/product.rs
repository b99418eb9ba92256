//! Products
//!
//! Prices are whole currency units. Products are deactivated, never
//! deleted, so past orders keep pointing at a real row.

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, ProductId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub slug: String,
    pub name_en: String,
    pub name_bn: String,
    pub description_en: String,
    pub description_bn: String,
    pub price: i64,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_trending: bool,
    pub is_hot: bool,
    pub media_image_url: Option<String>,
    pub media_video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Menu ordering: featured, then trending, then hot, newest first.
    pub fn menu_rank(&self) -> (bool, bool, bool, DateTime<Utc>) {
        (self.is_featured, self.is_trending, self.is_hot, self.created_at)
    }
}

/// Sort products the way the menu lists them.
pub fn sort_for_menu(products: &mut [Product]) {
    products.sort_by(|a, b| b.menu_rank().cmp(&a.menu_rank()));
}

/// Public product search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Category slug
    pub category: Option<String>,
    pub hot_only: bool,
    pub trending_only: bool,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product, category_slug: Option<&str>) -> bool {
        product.is_active
            && (!self.hot_only || product.is_hot)
            && (!self.trending_only || product.is_trending)
            && self
                .category
                .as_deref()
                .is_none_or(|wanted| category_slug == Some(wanted))
    }
}

/// Partial edit; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_bn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_bn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_trending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_video_url: Option<String>,
}

impl ProductPatch {
    pub fn apply(&self, product: &mut Product) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        set(&mut product.category_id, &self.category_id);
        set(&mut product.slug, &self.slug);
        set(&mut product.name_en, &self.name_en);
        set(&mut product.name_bn, &self.name_bn);
        set(&mut product.description_en, &self.description_en);
        set(&mut product.description_bn, &self.description_bn);
        set(&mut product.price, &self.price);
        set(&mut product.is_active, &self.is_active);
        set(&mut product.is_featured, &self.is_featured);
        set(&mut product.is_trending, &self.is_trending);
        set(&mut product.is_hot, &self.is_hot);
        if self.media_image_url.is_some() {
            product.media_image_url = self.media_image_url.clone();
        }
        if self.media_video_url.is_some() {
            product.media_video_url = self.media_video_url.clone();
        }
        product.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn product(slug: &str, featured: bool, trending: bool, hot: bool, age_days: i64) -> Product {
        let created = Utc::now() - Duration::days(age_days);
        Product {
            id: ProductId::new(),
            category_id: CategoryId::new(),
            slug: slug.into(),
            name_en: slug.into(),
            name_bn: slug.into(),
            description_en: String::new(),
            description_bn: String::new(),
            price: 100,
            is_active: true,
            is_featured: featured,
            is_trending: trending,
            is_hot: hot,
            media_image_url: None,
            media_video_url: None,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_menu_order() {
        let mut products = vec![
            product("old-plain", false, false, false, 10),
            product("hot", false, false, true, 5),
            product("new-plain", false, false, false, 1),
            product("featured", true, false, false, 30),
            product("trending", false, true, false, 20),
        ];
        sort_for_menu(&mut products);

        let slugs: Vec<_> = products.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["featured", "trending", "hot", "new-plain", "old-plain"]);
    }

    #[test]
    fn test_filter() {
        let hot = product("hot", false, false, true, 1);
        let mut inactive = product("gone", false, true, true, 1);
        inactive.is_active = false;

        let hot_only = ProductFilter {
            hot_only: true,
            ..Default::default()
        };
        assert!(hot_only.matches(&hot, Some("drinks")));
        assert!(!hot_only.matches(&inactive, Some("drinks")));

        let drinks = ProductFilter {
            category: Some("drinks".into()),
            ..Default::default()
        };
        assert!(drinks.matches(&hot, Some("drinks")));
        assert!(!drinks.matches(&hot, Some("snacks")));
    }
}
