//! Ordering Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Orders, line items, the status state machine, events, reviews
//! - `application/` - Use cases (place, accept, status, review, queries, item adjustment)
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Lifecycle
//!
//! - Placement snapshots product names, prices and the customer's badge
//!   discount; totals never change afterwards except through staff item
//!   adjustment, which keeps the snapshotted discount
//! - Every status change writes its order event in the same transaction
//! - Serving credits `points_earned` to the customer exactly once, guarded
//!   by `points_credited`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use domain::repository::{LocalOrderRepository, OrderRepository};
pub use domain::status::OrderStatus;
pub use error::{OrderError, OrderResult};
pub use infra::postgres::PgOrderRepository;
pub use presentation::router::ordering_router;
