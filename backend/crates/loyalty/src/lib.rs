//! Loyalty Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Badge tiers, order pricing, profiles, repository traits
//! - `application/` - Use cases (badge lookup, profile, leaderboard, reports, discount settings)
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Points model
//! - One point per currency unit paid, credited when an order is served
//! - The badge is the highest tier whose threshold the point total reaches
//! - The badge discount is snapshotted onto an order when it is placed

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(any(test, feature = "testing"))]
pub mod memory;

#[cfg(test)]
mod tests;

pub use domain::badge::{BadgeLevel, badge_for_points};
pub use domain::pricing::{OrderTotals, PricedLine, discount_amount, order_totals};
pub use domain::profile::{BadgeView, CustomerProfile};
pub use domain::repository::{LocalLoyaltyRepository, LoyaltyRepository};
pub use error::{LoyaltyError, LoyaltyResult};
pub use infra::postgres::PgLoyaltyRepository;
pub use presentation::router::loyalty_router;
