//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::app_error::AppError;
use kernel::id::{SessionId, UserId};
use kernel::pagination::{Page, Paginated};
use kernel::role::UserRole;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{credentials::Credentials, session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserPatch, UserRepository};
use crate::domain::value_object::{email::Email, phone::Phone};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    id,
    role,
    name,
    email,
    phone,
    username,
    must_change_password,
    is_active,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Phone collisions that slip past the existence check surface as a
/// unique violation on insert.
fn map_insert_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
        && db_err.constraint() == Some("users_phone_key")
    {
        return AuthError::PhoneTaken;
    }
    AuthError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(
        &self,
        user: &User,
        credentials: &Credentials,
        session: Option<&Session>,
    ) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                role,
                name,
                email,
                phone,
                username,
                password_hash,
                password_salt,
                must_change_password,
                is_active,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.role.code())
        .bind(&user.name)
        .bind(user.email.as_ref().map(Email::as_str))
        .bind(user.phone.as_str())
        .bind(user.username.as_deref())
        .bind(&credentials.hash)
        .bind(&credentials.salt)
        .bind(user.must_change_password)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_insert_error)?;

        sqlx::query("INSERT INTO user_points (user_id, points_total, updated_at) VALUES ($1, 0, $2)")
            .bind(user.id.as_uuid())
            .bind(user.created_at)
            .execute(&mut *tx)
            .await?;

        if let Some(session) = session {
            insert_session(&mut *tx, session).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn phone_exists(&self, phone: &Phone) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE phone = $1)")
                .bind(phone.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_active_by_login(&self, identifier: &str) -> AuthResult<Option<(User, Credentials)>> {
        let row = sqlx::query_as::<_, UserWithCredentialsRow>(&format!(
            r#"
            SELECT {USER_COLUMNS}, password_hash, password_salt
            FROM users
            WHERE (phone = $1 OR username = $1) AND is_active
            ORDER BY (phone = $1) DESC
            LIMIT 1
            "#
        ))
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| {
            let credentials = Credentials {
                salt: r.password_salt,
                hash: r.password_hash,
            };
            r.user.into_user().map(|user| (user, credentials))
        })
        .transpose()
    }

    async fn credentials_for(&self, id: &UserId) -> AuthResult<Option<Credentials>> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT password_salt, password_hash FROM users WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(salt, hash)| Credentials { salt, hash }))
    }

    async fn update_credentials(&self, id: &UserId, credentials: &Credentials) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                password_salt = $3,
                must_change_password = FALSE,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(&credentials.hash)
        .bind(&credentials.salt)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list(&self, page: Page) -> AuthResult<Paginated<User>> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let items = rows
            .into_iter()
            .map(UserRow::into_user)
            .collect::<AuthResult<Vec<_>>>()?;

        Ok(Paginated::new(items, total))
    }

    async fn apply_patch(&self, id: &UserId, patch: &UserPatch) -> AuthResult<bool> {
        let affected = sqlx::query(
            r#"
            UPDATE users SET
                role = COALESCE($2, role),
                name = COALESCE($3, name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                username = COALESCE($6, username),
                is_active = COALESCE($7, is_active),
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(patch.role.map(|r| r.code()))
        .bind(patch.name.as_deref())
        .bind(patch.email.as_ref().map(Email::as_str))
        .bind(patch.phone.as_ref().map(Phone::as_str))
        .bind(patch.username.as_deref())
        .bind(patch.is_active)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    async fn any_admin(&self) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE role = 'admin')",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

async fn insert_session<'e, E>(executor: E, session: &Session) -> Result<(), sqlx::Error>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO sessions (
            id,
            user_id,
            token_hash,
            expires_at,
            created_at,
            last_seen_at
        ) VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(session.id.as_uuid())
    .bind(session.user_id.as_uuid())
    .bind(&session.token_hash)
    .bind(session.expires_at)
    .bind(session.created_at)
    .bind(session.last_seen_at)
    .execute(executor)
    .await?;

    Ok(())
}

impl SessionRepository for PgAuthRepository {
    async fn create(&self, session: &Session) -> AuthResult<()> {
        insert_session(&self.pool, session).await?;
        Ok(())
    }

    async fn find_live(&self, token_hash: &str, now: DateTime<Utc>) -> AuthResult<Option<Session>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                id,
                user_id,
                token_hash,
                expires_at,
                created_at,
                last_seen_at
            FROM sessions
            WHERE token_hash = $1 AND expires_at > $2
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SessionRow::into_session))
    }

    async fn touch(&self, token_hash: &str, at: DateTime<Utc>) -> AuthResult<()> {
        sqlx::query("UPDATE sessions SET last_seen_at = $2 WHERE token_hash = $1")
            .bind(token_hash)
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_by_token_hash(&self, token_hash: &str) -> AuthResult<()> {
        sqlx::query("DELETE FROM sessions WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    role: String,
    name: String,
    email: Option<String>,
    phone: String,
    username: Option<String>,
    must_change_password: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_code(&self.role).ok_or_else(|| {
            AppError::internal(format!("Unknown role in store: {}", self.role))
        })?;

        Ok(User {
            id: UserId::from_uuid(self.id),
            role,
            name: self.name,
            email: self.email.map(Email::from_db),
            phone: Phone::from_db(self.phone),
            username: self.username,
            must_change_password: self.must_change_password,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct UserWithCredentialsRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
    password_salt: String,
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: Uuid,
    user_id: Uuid,
    token_hash: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    last_seen_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            id: SessionId::from_uuid(self.id),
            user_id: UserId::from_uuid(self.user_id),
            token_hash: self.token_hash,
            expires_at: self.expires_at,
            created_at: self.created_at,
            last_seen_at: self.last_seen_at,
        }
    }
}
