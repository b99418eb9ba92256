//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::LeaderboardEntry;
use crate::domain::badge::{BadgeBand, BadgeLevel};
use crate::domain::repository::DiscountUpdate;

// ============================================================================
// Leaderboard
// ============================================================================

/// Public leaderboard row; points stay private.
#[derive(Debug, Serialize)]
pub struct PublicLeaderboardEntry {
    pub rank: usize,
    pub name: String,
}

impl From<LeaderboardEntry> for PublicLeaderboardEntry {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            rank: entry.rank,
            name: entry.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PublicLeaderboardResponse {
    pub leaderboard: Vec<PublicLeaderboardEntry>,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Serialize)]
pub struct BadgeDistributionResponse {
    pub distribution: Vec<BadgeBand>,
}

// ============================================================================
// Discount settings
// ============================================================================

#[derive(Debug, Serialize)]
pub struct BadgeDiscountDto {
    pub key: String,
    pub display_name_en: String,
    pub display_name_bn: String,
    pub min_points: i64,
    pub discount_percent: i32,
}

impl From<BadgeLevel> for BadgeDiscountDto {
    fn from(level: BadgeLevel) -> Self {
        Self {
            key: level.key,
            display_name_en: level.display_name_en,
            display_name_bn: level.display_name_bn,
            min_points: level.min_points,
            discount_percent: level.discount_percent,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiscountsResponse {
    pub badges: Vec<BadgeDiscountDto>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateDiscountsRequest {
    pub badges: Vec<DiscountUpdate>,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
