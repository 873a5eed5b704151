use chrono::{Datelike, Utc};
use rand::Rng;
use rand::distributions::Alphanumeric;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::students::model::{
    CreateStudentDto, STUDENT_CONSTRAINTS, Student, UpdateStudentDto,
};
use crate::utils::errors::{AppError, classify_db_error};

pub struct StudentService;

impl StudentService {
    /// Generates a unique academic record `RA-<year>-<6 alphanumeric>`,
    /// retrying on the unlikely collision.
    #[instrument(skip(db))]
    async fn generate_academic_record(db: &PgPool) -> Result<String, AppError> {
        let year = Utc::now().year();
        for _ in 0..10 {
            let suffix: String = rand::thread_rng()
                .sample_iter(&Alphanumeric)
                .take(6)
                .map(|c| (c as char).to_ascii_uppercase())
                .collect();
            let candidate = format!("RA-{}-{}", year, suffix);

            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM students WHERE academic_record = $1)",
            )
            .bind(&candidate)
            .fetch_one(db)
            .await
            .map_err(AppError::database)?;

            if !exists {
                return Ok(candidate);
            }
        }
        Err(AppError::internal(anyhow::anyhow!(
            "unable to generate academic record"
        )))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let academic_record = Self::generate_academic_record(db).await?;

        sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (name, academic_record, cpf, email, class_group)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, academic_record, cpf, email, class_group, created_at
            "#,
        )
        .bind(&dto.name)
        .bind(&academic_record)
        .bind(&dto.cpf)
        .bind(&dto.email)
        .bind(&dto.class_group)
        .fetch_one(db)
        .await
        .map_err(|e| classify_db_error(e, STUDENT_CONSTRAINTS).into_app_error())
    }

    #[instrument(skip(db))]
    pub async fn get_students(db: &PgPool) -> Result<Vec<Student>, AppError> {
        sqlx::query_as::<_, Student>(
            r#"
            SELECT id, name, academic_record, cpf, email, class_group, created_at
            FROM students
            ORDER BY name ASC
            "#,
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, id: Uuid) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(
            r#"
            SELECT id, name, academic_record, cpf, email, class_group, created_at
            FROM students
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("student not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_student(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let cpf = dto.cpf.unwrap_or(existing.cpf);
        let email = dto.email.or(existing.email);
        let class_group = dto.class_group.or(existing.class_group);

        sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET name = $1, cpf = $2, email = $3, class_group = $4
            WHERE id = $5
            RETURNING id, name, academic_record, cpf, email, class_group, created_at
            "#,
        )
        .bind(&name)
        .bind(&cpf)
        .bind(&email)
        .bind(&class_group)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| classify_db_error(e, STUDENT_CONSTRAINTS).into_app_error())
    }

    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("student not found")));
        }

        Ok(())
    }

    /// Case-insensitive uniqueness probe for the name field, optionally
    /// ignoring one record (the one being edited).
    #[instrument(skip(db))]
    pub async fn name_exists(
        db: &PgPool,
        name: &str,
        ignore_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM students
                WHERE lower(name) = lower($1) AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(ignore_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn email_exists(
        db: &PgPool,
        email: &str,
        ignore_id: Option<Uuid>,
    ) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM students
                WHERE lower(email) = lower($1) AND ($2::uuid IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(ignore_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }
}
