//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use audit::AuditLog;
use kernel::context::RequestContext;
use kernel::extract::JsonBody;
use kernel::role::UserRole;

use crate::application::{BadgeReportUseCase, DiscountSettingsUseCase, LeaderboardUseCase};
use crate::domain::repository::LoyaltyRepository;
use crate::error::LoyaltyResult;
use crate::presentation::dto::{
    BadgeDistributionResponse, DiscountsResponse, LeaderboardResponse, OkResponse,
    PublicLeaderboardResponse, UpdateDiscountsRequest,
};

/// Shared state for loyalty handlers
#[derive(Clone)]
pub struct LoyaltyAppState<R, A>
where
    R: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub audit: Arc<A>,
}

/// GET /api/leaderboard
pub async fn public_leaderboard<R, A>(
    State(state): State<LoyaltyAppState<R, A>>,
) -> LoyaltyResult<Json<PublicLeaderboardResponse>>
where
    R: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let entries = LeaderboardUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(PublicLeaderboardResponse {
        leaderboard: entries.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/admin/leaderboard
pub async fn admin_leaderboard<R, A>(
    ctx: RequestContext,
    State(state): State<LoyaltyAppState<R, A>>,
) -> LoyaltyResult<Json<LeaderboardResponse>>
where
    R: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let leaderboard = LeaderboardUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(LeaderboardResponse { leaderboard }))
}

/// GET /api/admin/reports/badges
pub async fn badge_report<R, A>(
    ctx: RequestContext,
    State(state): State<LoyaltyAppState<R, A>>,
) -> LoyaltyResult<Json<BadgeDistributionResponse>>
where
    R: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let distribution = BadgeReportUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(BadgeDistributionResponse { distribution }))
}

/// GET /api/admin/settings/discounts
pub async fn list_discounts<R, A>(
    ctx: RequestContext,
    State(state): State<LoyaltyAppState<R, A>>,
) -> LoyaltyResult<Json<DiscountsResponse>>
where
    R: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let use_case = DiscountSettingsUseCase::new(state.repo.clone(), state.audit.clone());
    let badges = use_case.list().await?;

    Ok(Json(DiscountsResponse {
        badges: badges.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/admin/settings/discounts
pub async fn update_discounts<R, A>(
    ctx: RequestContext,
    State(state): State<LoyaltyAppState<R, A>>,
    JsonBody(req): JsonBody<UpdateDiscountsRequest>,
) -> LoyaltyResult<Json<OkResponse>>
where
    R: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let use_case = DiscountSettingsUseCase::new(state.repo.clone(), state.audit.clone());
    use_case.update(actor, req.badges).await?;

    Ok(Json(OkResponse { ok: true }))
}
