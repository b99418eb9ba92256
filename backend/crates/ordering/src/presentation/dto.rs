//! Data Transfer Objects
//!
//! Order rows serialize with their column names; envelope keys are
//! camelCase.

use kernel::id::{OrderId, ProductId};
use serde::{Deserialize, Serialize};

use crate::application::{OrderDetail, OrderView, PlaceOrderInput, PlacedOrder};
use crate::domain::order::{CartLine, Order, OrderItem};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineRequest {
    pub product_id: ProductId,
    pub qty: i32,
}

impl From<CartLineRequest> for CartLine {
    fn from(line: CartLineRequest) -> Self {
        Self {
            product_id: line.product_id,
            qty: line.qty,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub table_code: String,
    pub notes: Option<String>,
    pub items: Vec<CartLineRequest>,
}

impl From<PlaceOrderRequest> for PlaceOrderInput {
    fn from(req: PlaceOrderRequest) -> Self {
        Self {
            table_code: req.table_code,
            notes: req.notes,
            items: req.items.into_iter().map(CartLine::from).collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AcceptRequest {
    pub eta_minutes: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReviewRequest {
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdjustItemsRequest {
    pub items: Vec<CartLineRequest>,
}

impl AdjustItemsRequest {
    pub fn into_lines(self) -> Vec<CartLine> {
        self.items.into_iter().map(CartLine::from).collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentOrderQuery {
    pub table_code: Option<String>,
}

/// `?status=PLACED,ACCEPTED`
#[derive(Debug, Default, Deserialize)]
pub struct StaffOrdersQuery {
    pub status: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// An order row with its items inlined.
#[derive(Debug, Serialize)]
pub struct OrderBody {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_label: Option<String>,
}

impl From<OrderView> for OrderBody {
    fn from(view: OrderView) -> Self {
        Self {
            order: view.order,
            items: view.items,
            table_label: view.table_label,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedResponse {
    pub order_id: OrderId,
    pub order_code: String,
}

impl From<PlacedOrder> for PlacedResponse {
    fn from(placed: PlacedOrder) -> Self {
        Self {
            order_id: placed.id,
            order_code: placed.order_code,
        }
    }
}

/// `{order: null}` when the table has no open order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub order: Option<OrderBody>,
}

#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    pub order: OrderBody,
    pub reviewed: bool,
}

impl From<OrderDetail> for OrderDetailResponse {
    fn from(detail: OrderDetail) -> Self {
        Self {
            order: detail.view.into(),
            reviewed: detail.reviewed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse<T> {
    pub orders: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_request_defaults_missing_fields() {
        let req: PlaceOrderRequest = serde_json::from_str(r#"{"tableCode":"T1"}"#).unwrap();
        assert_eq!(req.table_code, "T1");
        assert!(req.items.is_empty());
        assert!(req.notes.is_none());
    }

    #[test]
    fn test_cart_line_is_camel_case() {
        let id = ProductId::new();
        let json = format!(r#"{{"tableCode":"T1","items":[{{"productId":"{id}","qty":2}}]}}"#);
        let input: PlaceOrderInput = serde_json::from_str::<PlaceOrderRequest>(&json).unwrap().into();
        assert_eq!(input.items, vec![CartLine { product_id: id, qty: 2 }]);
    }

    #[test]
    fn test_placed_response_keys() {
        let body = serde_json::to_value(PlacedResponse {
            order_id: OrderId::new(),
            order_code: "ORD-20260101-0001".to_string(),
        })
        .unwrap();
        assert!(body.get("orderId").is_some());
        assert_eq!(body["orderCode"], "ORD-20260101-0001");
    }
}
