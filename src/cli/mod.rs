//! Command-line utilities invoked through the server binary.

use sqlx::PgPool;

use crate::utils::password::hash_password;

/// Inserts the bootstrap administrator account. Idempotent: if the
/// username is already taken the insert is a no-op.
pub async fn seed_admin(
    pool: &PgPool,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<bool> {
    let password_hash = hash_password(password).map_err(|e| e.error)?;

    let result = sqlx::query(
        r#"
        INSERT INTO admins (username, email, password)
        VALUES ($1, $2, $3)
        ON CONFLICT (username) DO NOTHING
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(&password_hash)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}
