//! Badge tiers
//!
//! A tier table is keyed by `min_points`; each threshold must be unique.

use serde::Serialize;

pub const DEFAULT_BADGE_KEY: &str = "NEWBIE";
pub const DEFAULT_BADGE_NAME: &str = "Newbie";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeLevel {
    pub key: String,
    pub display_name_en: String,
    pub display_name_bn: String,
    pub min_points: i64,
    pub discount_percent: i32,
    pub sort_order: i32,
}

impl BadgeLevel {
    /// Zero-discount tier used when no configured tier qualifies.
    pub fn newbie() -> Self {
        Self {
            key: DEFAULT_BADGE_KEY.to_string(),
            display_name_en: DEFAULT_BADGE_NAME.to_string(),
            display_name_bn: DEFAULT_BADGE_NAME.to_string(),
            min_points: 0,
            discount_percent: 0,
            sort_order: 0,
        }
    }
}

/// The tier with the greatest `min_points` not above `points`, or
/// [`BadgeLevel::newbie`] when none qualifies.
pub fn badge_for_points(points: i64, tiers: &[BadgeLevel]) -> BadgeLevel {
    tiers
        .iter()
        .filter(|tier| tier.min_points <= points)
        .max_by_key(|tier| tier.min_points)
        .cloned()
        .unwrap_or_else(BadgeLevel::newbie)
}

/// Customers per tier band `[min_points, next.min_points)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BadgeBand {
    pub key: String,
    pub label: String,
    pub count: usize,
}

pub fn badge_distribution(points: &[i64], tiers: &[BadgeLevel]) -> Vec<BadgeBand> {
    let mut sorted: Vec<&BadgeLevel> = tiers.iter().collect();
    sorted.sort_by_key(|tier| tier.min_points);

    sorted
        .iter()
        .enumerate()
        .map(|(i, tier)| {
            let upper = sorted.get(i + 1).map(|next| next.min_points);
            let count = points
                .iter()
                .filter(|&&p| p >= tier.min_points && upper.is_none_or(|u| p < u))
                .count();
            BadgeBand {
                key: tier.key.clone(),
                label: tier.display_name_en.clone(),
                count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(key: &str, min_points: i64, discount_percent: i32) -> BadgeLevel {
        BadgeLevel {
            key: key.to_string(),
            display_name_en: key.to_string(),
            display_name_bn: key.to_string(),
            min_points,
            discount_percent,
            sort_order: 0,
        }
    }

    fn tiers() -> Vec<BadgeLevel> {
        vec![tier("BRONZE", 0, 0), tier("SILVER", 1000, 5), tier("GOLD", 10000, 10)]
    }

    #[test]
    fn test_highest_qualifying_tier() {
        let badge = badge_for_points(1500, &tiers());
        assert_eq!(badge.key, "SILVER");
        assert_eq!(badge.discount_percent, 5);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(badge_for_points(1000, &tiers()).key, "SILVER");
        assert_eq!(badge_for_points(999, &tiers()).key, "BRONZE");
        assert_eq!(badge_for_points(10000, &tiers()).key, "GOLD");
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut reversed = tiers();
        reversed.reverse();
        assert_eq!(badge_for_points(20000, &reversed).key, "GOLD");
    }

    #[test]
    fn test_empty_table_is_newbie() {
        let badge = badge_for_points(5000, &[]);
        assert_eq!(badge, BadgeLevel::newbie());
        assert_eq!(badge.discount_percent, 0);
    }

    #[test]
    fn test_below_lowest_tier_is_newbie() {
        let table = vec![tier("NEWBIE", 1, 0), tier("PLATINUM", 1000, 5)];
        assert_eq!(badge_for_points(0, &table).key, DEFAULT_BADGE_KEY);
        assert_eq!(badge_for_points(0, &table).min_points, 0);
    }

    #[test]
    fn test_distribution_bands() {
        let points = [0, 10, 999, 1000, 1500, 10000, 250000];
        let bands = badge_distribution(&points, &tiers());
        let counts: Vec<_> = bands.iter().map(|b| (b.key.as_str(), b.count)).collect();
        assert_eq!(counts, vec![("BRONZE", 3), ("SILVER", 2), ("GOLD", 2)]);
    }
}
