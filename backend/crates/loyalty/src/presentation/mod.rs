//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::LoyaltyAppState;
pub use router::{loyalty_router, loyalty_router_generic};
