//! Domain Layer

pub mod event;
pub mod order;
pub mod repository;
pub mod review;
pub mod status;

pub use event::{ITEMS_ADJUSTED, OrderEvent};
pub use order::{CartLine, Order, OrderItem, Placement, ProductSnapshot, TableRef, Transition};
pub use repository::{LocalOrderRepository, OrderRepository, QueuedOrder};
pub use review::Review;
pub use status::{OrderStatus, UnknownStatus};
