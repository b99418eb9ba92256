//! Application Layer - Use Cases

pub mod adjust_items;
pub mod place_order;
pub mod queries;
pub mod review;
pub mod status;

pub use adjust_items::AdjustItemsUseCase;
pub use place_order::{PlaceOrderInput, PlaceOrderUseCase, PlacedOrder};
pub use queries::{HISTORY_LIMIT, OrderDetail, OrderQueriesUseCase, OrderView, parse_statuses};
pub use review::SubmitReviewUseCase;
pub use status::OrderStatusUseCase;

use kernel::id::ProductId;
use kernel::validation::Validator;

use crate::domain::order::{CartLine, MAX_QTY, MIN_QTY};

/// Non-empty cart with every quantity in 1..=20.
pub(crate) fn check_cart(v: &mut Validator, lines: &[CartLine]) {
    v.non_empty("items", lines);
    let qty_ok = lines.iter().all(|l| (MIN_QTY..=MAX_QTY).contains(&l.qty));
    v.check("items", qty_ok, "Each qty must be between 1 and 20");
}

pub(crate) fn distinct_products(lines: &[CartLine]) -> Vec<ProductId> {
    let mut ids: Vec<ProductId> = Vec::with_capacity(lines.len());
    for line in lines {
        if !ids.contains(&line.product_id) {
            ids.push(line.product_id);
        }
    }
    ids
}
