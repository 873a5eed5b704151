use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::admins::model::AdminProfile;
use crate::utils::errors::AppError;

pub struct AdminService;

impl AdminService {
    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, id: Uuid) -> Result<AdminProfile, AppError> {
        sqlx::query_as::<_, AdminProfile>(
            "SELECT id, username, email, created_at FROM admins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("admin not found")))
    }
}
