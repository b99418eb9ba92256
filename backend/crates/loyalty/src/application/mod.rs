//! Application Layer - Use Cases

pub mod badge_report;
pub mod discount_settings;
pub mod leaderboard;
pub mod standing;

pub use badge_report::BadgeReportUseCase;
pub use discount_settings::DiscountSettingsUseCase;
pub use leaderboard::{LeaderboardEntry, LeaderboardUseCase};
pub use standing::{BadgeStanding, BuildProfileUseCase, ResolveBadgeUseCase};
