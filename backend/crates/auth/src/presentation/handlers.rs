//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use audit::AuditLog;
use kernel::context::RequestContext;
use kernel::error::app_error::AppError;
use kernel::extract::{JsonBody, QueryParams};
use kernel::id::UserId;
use kernel::pagination::{PageQuery, Paginated};
use kernel::role::UserRole;
use loyalty::LoyaltyRepository;
use loyalty::application::BuildProfileUseCase;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangePasswordInput, ChangePasswordUseCase, CreateUserInput, FederatedLoginUseCase,
    ManageUsersUseCase, RegisterCustomerInput, RegisterCustomerUseCase, SignInInput,
    SignInUseCase, SignOutUseCase, UpdateUserInput,
};
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    AdminUserDto, ChangePasswordRequest, CreateUserRequest, CreatedResponse, OkResponse,
    RegisterCustomerRequest, RegisterCustomerResponse, SignInRequest, UpdateUserRequest,
    UserResponse,
};
use crate::presentation::middleware::ClientKey;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, L, A>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub loyalty: Arc<L>,
    pub audit: Arc<A>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Registration / Sign In / Sign Out
// ============================================================================

/// POST /api/auth/register-customer
pub async fn register_customer<R, L, A>(
    State(state): State<AuthAppState<R, L, A>>,
    headers: HeaderMap,
    JsonBody(req): JsonBody<RegisterCustomerRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let use_case = RegisterCustomerUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterCustomerInput {
            name: req.name,
            email: req.email,
            phone: req.phone,
        })
        .await?;

    let profile = profile_for(&state, &output.user).await?;
    let cookie = session_cookie(&state.config, &headers, &output.session_token, output.expires_at);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(RegisterCustomerResponse {
            user: profile,
            temp_password: output.temp_password.expose().to_string(),
        }),
    ))
}

/// POST /api/auth/login
pub async fn sign_in<R, L, A>(
    State(state): State<AuthAppState<R, L, A>>,
    ClientKey(client_key): ClientKey,
    headers: HeaderMap,
    JsonBody(req): JsonBody<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            identifier: req.identifier,
            phone: req.phone,
            password: req.password,
            client_key,
        })
        .await?;

    let profile = profile_for(&state, &output.user).await?;
    let cookie = session_cookie(&state.config, &headers, &output.session_token, output.expires_at);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse { user: Some(profile) }),
    ))
}

/// POST /api/auth/logout
pub async fn sign_out<R, L, A>(
    State(state): State<AuthAppState<R, L, A>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    if let Some(token) = platform::cookie::extract_cookie(&headers, state.config.session_cookie_name()) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // The cookie is cleared regardless
        if let Err(e) = use_case.execute(&token).await {
            tracing::warn!(error = %e, "Failed to revoke session");
        }
    }

    let cookie = state
        .config
        .session_cookie
        .build_delete_cookie(cookie_secure(&state.config, &headers));

    Ok(([(header::SET_COOKIE, cookie)], Json(OkResponse::ok())))
}

/// GET /api/auth/me
pub async fn me<R, L, A>(
    ctx: RequestContext,
    State(state): State<AuthAppState<R, L, A>>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let user = match ctx.user() {
        Some(current) => Some(BuildProfileUseCase::new(state.loyalty.clone()).execute(current).await?),
        None => None,
    };

    Ok(Json(UserResponse { user }))
}

/// POST /api/auth/change-password
pub async fn change_password<R, L, A>(
    ctx: RequestContext,
    State(state): State<AuthAppState<R, L, A>>,
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> AuthResult<Json<OkResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let user = ctx.require_auth()?;

    let use_case = ChangePasswordUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(
            &user.id,
            ChangePasswordInput {
                current_password: req.current_password,
                new_password: req.new_password,
            },
        )
        .await?;

    Ok(Json(OkResponse::ok()))
}

// ============================================================================
// Federated login (reserved)
// ============================================================================

/// GET /api/auth/google/start
pub async fn google_start<R, L, A>(State(state): State<AuthAppState<R, L, A>>) -> AuthResult<()>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    FederatedLoginUseCase::new(state.config.clone()).start()
}

/// GET /api/auth/google/callback
pub async fn google_callback<R, L, A>(State(state): State<AuthAppState<R, L, A>>) -> AuthResult<()>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    FederatedLoginUseCase::new(state.config.clone()).callback()
}

// ============================================================================
// Admin users
// ============================================================================

/// GET /api/admin/users
pub async fn list_users<R, L, A>(
    ctx: RequestContext,
    State(state): State<AuthAppState<R, L, A>>,
    QueryParams(query): QueryParams<PageQuery>,
) -> AuthResult<Json<Paginated<AdminUserDto>>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let use_case = ManageUsersUseCase::new(state.repo.clone(), state.audit.clone(), state.config.clone());
    let users = use_case.list(query).await?;

    Ok(Json(users.map(AdminUserDto::from)))
}

/// POST /api/admin/users
pub async fn create_user<R, L, A>(
    ctx: RequestContext,
    State(state): State<AuthAppState<R, L, A>>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> AuthResult<Json<CreatedResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;

    let use_case = ManageUsersUseCase::new(state.repo.clone(), state.audit.clone(), state.config.clone());
    let id = use_case
        .create(
            actor,
            CreateUserInput {
                name: req.name,
                phone: req.phone,
                email: req.email,
                role: req.role,
                password: req.password,
                username: req.username,
            },
        )
        .await?;

    Ok(Json(CreatedResponse { id }))
}

/// PUT /api/admin/users/{id}
pub async fn update_user<R, L, A>(
    ctx: RequestContext,
    State(state): State<AuthAppState<R, L, A>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> AuthResult<Json<OkResponse>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let actor = ctx.require_role(UserRole::ADMIN_OR_MANAGER)?;
    let id: UserId = id.parse().map_err(AppError::from)?;

    let use_case = ManageUsersUseCase::new(state.repo.clone(), state.audit.clone(), state.config.clone());
    use_case
        .update(
            actor,
            &id,
            UpdateUserInput {
                role: req.role,
                name: req.name,
                email: req.email,
                phone: req.phone,
                username: req.username,
                is_active: req.is_active,
            },
        )
        .await?;

    Ok(Json(OkResponse::ok()))
}

// ============================================================================
// Helper Functions
// ============================================================================

async fn profile_for<R, L, A>(
    state: &AuthAppState<R, L, A>,
    user: &User,
) -> AuthResult<loyalty::CustomerProfile>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
    L: LoyaltyRepository + Clone + Send + Sync + 'static,
    A: AuditLog + Clone + Send + Sync + 'static,
{
    let profile = BuildProfileUseCase::new(state.loyalty.clone())
        .execute(&user.to_current_user())
        .await?;
    Ok(profile)
}

fn cookie_secure(config: &AuthConfig, headers: &HeaderMap) -> bool {
    config.cookie_secure || platform::cookie::is_https_request(headers)
}

fn session_cookie(
    config: &AuthConfig,
    headers: &HeaderMap,
    token: &str,
    expires_at: chrono::DateTime<chrono::Utc>,
) -> String {
    config
        .session_cookie
        .build_set_cookie(token, expires_at, cookie_secure(config, headers))
}
