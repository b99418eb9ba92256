//! Order pricing
//!
//! All amounts are integer minor currency units.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub unit_price: i64,
    pub qty: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub subtotal: i64,
    pub discount_amount: i64,
    pub total_after: i64,
}

/// `round_half_up(subtotal * percent / 100)`; non-positive percent is zero.
pub fn discount_amount(subtotal: i64, discount_percent: i32) -> i64 {
    if discount_percent <= 0 || subtotal <= 0 {
        return 0;
    }
    (subtotal * i64::from(discount_percent) + 50) / 100
}

pub fn order_totals(lines: &[PricedLine], discount_percent: i32) -> OrderTotals {
    let subtotal: i64 = lines.iter().map(|line| line.unit_price * line.qty).sum();
    let discount_amount = discount_amount(subtotal, discount_percent);
    OrderTotals {
        subtotal,
        discount_amount,
        total_after: (subtotal - discount_amount).max(0),
    }
}
