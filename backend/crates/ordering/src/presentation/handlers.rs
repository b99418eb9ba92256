//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;

use kernel::context::RequestContext;
use kernel::error::app_error::AppError;
use kernel::extract::{JsonBody, QueryParams};
use kernel::id::OrderId;
use kernel::role::UserRole;
use loyalty::LoyaltyRepository;

use crate::application::{
    AdjustItemsUseCase, OrderQueriesUseCase, OrderStatusUseCase, PlaceOrderUseCase,
    SubmitReviewUseCase, parse_statuses,
};
use crate::domain::order::Order;
use crate::domain::repository::OrderRepository;
use crate::error::OrderResult;
use crate::presentation::dto::{
    AcceptRequest, AdjustItemsRequest, CurrentOrderQuery, OkResponse, OrderBody,
    OrderDetailResponse, OrderResponse, OrdersResponse, PlaceOrderRequest, PlacedResponse,
    ReviewRequest, StaffOrdersQuery, StatusRequest,
};

/// Shared state for ordering handlers
#[derive(Clone)]
pub struct OrderingAppState<R, L>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub loyalty: Arc<L>,
}

// ============================================================================
// Customer
// ============================================================================

/// POST /api/orders
pub async fn place_order<R, L>(
    ctx: RequestContext,
    State(state): State<OrderingAppState<R, L>>,
    JsonBody(req): JsonBody<PlaceOrderRequest>,
) -> OrderResult<Json<PlacedResponse>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
{
    let customer = ctx.require_auth()?;

    let placed = PlaceOrderUseCase::new(state.repo.clone(), state.loyalty.clone())
        .execute(customer, req.into())
        .await?;

    Ok(Json(placed.into()))
}

/// GET /api/orders/current?tableCode=
pub async fn current_order<R, L>(
    ctx: RequestContext,
    State(state): State<OrderingAppState<R, L>>,
    QueryParams(query): QueryParams<CurrentOrderQuery>,
) -> OrderResult<Json<OrderResponse>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
{
    ctx.require_auth()?;

    let current = OrderQueriesUseCase::new(state.repo.clone())
        .current(query.table_code.as_deref())
        .await?;

    Ok(Json(OrderResponse {
        order: current.map(OrderBody::from),
    }))
}

/// GET /api/orders/history
pub async fn order_history<R, L>(
    ctx: RequestContext,
    State(state): State<OrderingAppState<R, L>>,
) -> OrderResult<Json<OrdersResponse<Order>>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
{
    let customer = ctx.require_auth()?;

    let orders = OrderQueriesUseCase::new(state.repo.clone())
        .history(customer)
        .await?;

    Ok(Json(OrdersResponse { orders }))
}

/// GET /api/orders/{id}
pub async fn order_detail<R, L>(
    ctx: RequestContext,
    State(state): State<OrderingAppState<R, L>>,
    Path(id): Path<String>,
) -> OrderResult<Json<OrderDetailResponse>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
{
    let viewer = ctx.require_auth()?;
    let id = id.parse::<OrderId>().map_err(AppError::from)?;

    let detail = OrderQueriesUseCase::new(state.repo.clone())
        .detail(viewer, &id)
        .await?;

    Ok(Json(detail.into()))
}

/// POST /api/orders/{id}/review
pub async fn submit_review<R, L>(
    ctx: RequestContext,
    State(state): State<OrderingAppState<R, L>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ReviewRequest>,
) -> OrderResult<Json<OkResponse>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
{
    let customer = ctx.require_auth()?;
    let id = id.parse::<OrderId>().map_err(AppError::from)?;

    SubmitReviewUseCase::new(state.repo.clone())
        .execute(customer, &id, req.rating, req.comment)
        .await?;

    Ok(Json(OkResponse::ok()))
}

// ============================================================================
// Staff
// ============================================================================

/// GET /api/staff/orders?status=
pub async fn staff_orders<R, L>(
    ctx: RequestContext,
    State(state): State<OrderingAppState<R, L>>,
    QueryParams(query): QueryParams<StaffOrdersQuery>,
) -> OrderResult<Json<OrdersResponse<OrderBody>>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
{
    ctx.require_role(UserRole::KITCHEN)?;
    let statuses = parse_statuses(query.status.as_deref())?;

    let orders = OrderQueriesUseCase::new(state.repo.clone())
        .queue(&statuses)
        .await?;

    Ok(Json(OrdersResponse {
        orders: orders.into_iter().map(OrderBody::from).collect(),
    }))
}

/// POST /api/staff/orders/{id}/accept
pub async fn accept_order<R, L>(
    ctx: RequestContext,
    State(state): State<OrderingAppState<R, L>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<AcceptRequest>,
) -> OrderResult<Json<OkResponse>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::FRONT_OF_HOUSE)?;
    let id = id.parse::<OrderId>().map_err(AppError::from)?;

    OrderStatusUseCase::new(state.repo.clone())
        .accept(actor, &id, req.eta_minutes)
        .await?;

    Ok(Json(OkResponse::ok()))
}

/// POST /api/staff/orders/{id}/status
pub async fn update_status<R, L>(
    ctx: RequestContext,
    State(state): State<OrderingAppState<R, L>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<StatusRequest>,
) -> OrderResult<Json<OkResponse>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::KITCHEN)?;
    let id = id.parse::<OrderId>().map_err(AppError::from)?;

    OrderStatusUseCase::new(state.repo.clone())
        .set_status(actor, &id, &req.status)
        .await?;

    Ok(Json(OkResponse::ok()))
}

/// PUT /api/staff/orders/{id}/items
pub async fn adjust_items<R, L>(
    ctx: RequestContext,
    State(state): State<OrderingAppState<R, L>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<AdjustItemsRequest>,
) -> OrderResult<Json<OrderResponse>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::FRONT_OF_HOUSE)?;
    let id = id.parse::<OrderId>().map_err(AppError::from)?;

    let view = AdjustItemsUseCase::new(state.repo.clone())
        .execute(actor, &id, req.into_lines())
        .await?;

    Ok(Json(OrderResponse {
        order: Some(view.into()),
    }))
}
