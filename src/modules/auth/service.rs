use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::admins::model::AdminProfile;
use crate::utils::errors::AppError;
use crate::utils::jwt::{ROLE_ADMIN, TokenKind, issue_token, verify_token};
use crate::utils::password::verify_password;

use super::model::{LoginRequest, LoginResponse, RefreshResponse};

pub struct AuthService;

impl AuthService {
    /// Checks the credentials and mints the access/refresh pair. The same
    /// "invalid credentials" rejection covers both an unknown username and
    /// a wrong password.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct AdminWithPassword {
            id: Uuid,
            username: String,
            email: String,
            password: String,
            created_at: DateTime<Utc>,
        }

        let admin = sqlx::query_as::<_, AdminWithPassword>(
            "SELECT id, username, email, password, created_at FROM admins WHERE username = $1",
        )
        .bind(&dto.username)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("invalid credentials"))?;

        if !verify_password(&dto.password, &admin.password)? {
            return Err(AppError::unauthorized("invalid credentials"));
        }

        let sub = admin.id.to_string();
        let access = issue_token(
            &sub,
            ROLE_ADMIN,
            TokenKind::Access,
            jwt_config.access_token_expiry,
            jwt_config,
        )?;
        let refresh = issue_token(
            &sub,
            ROLE_ADMIN,
            TokenKind::Refresh,
            jwt_config.refresh_token_expiry,
            jwt_config,
        )?;

        Ok(LoginResponse {
            access,
            refresh,
            admin: AdminProfile {
                id: admin.id,
                username: admin.username,
                email: admin.email,
                created_at: admin.created_at,
            },
        })
    }

    /// Exchanges a valid refresh token for a new access token under the
    /// same subject and role. The refresh token is not rotated: it stays
    /// valid and reusable until its own expiry. There is no revocation
    /// list, so early invalidation is not possible in this design.
    #[instrument(skip_all)]
    pub fn refresh(token: &str, jwt_config: &JwtConfig) -> Result<RefreshResponse, AppError> {
        let claims = verify_token(token, TokenKind::Refresh, jwt_config).map_err(|reason| {
            tracing::debug!(%reason, "refresh token rejected");
            AppError::unauthorized("invalid refresh token")
        })?;

        let access = issue_token(
            &claims.sub,
            &claims.role,
            TokenKind::Access,
            jwt_config.access_token_expiry,
            jwt_config,
        )?;

        Ok(RefreshResponse { access })
    }
}
