use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};
use crate::utils::errors::AppError;

const COURSE_COLUMNS: &str =
    "id, name, status, student_limit, start_date, end_date, instructor, shift, week_days, time_slot, created_at";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db))]
    pub async fn get_courses(db: &PgPool) -> Result<Vec<Course>, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses ORDER BY name ASC",
            COURSE_COLUMNS
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, id: Uuid) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE id = $1",
            COURSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("course not found")))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_course(db: &PgPool, dto: CreateCourseDto) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"
            INSERT INTO courses
                (name, status, student_limit, start_date, end_date, instructor, shift, week_days, time_slot)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            COURSE_COLUMNS
        ))
        .bind(&dto.name)
        .bind(&dto.status)
        .bind(dto.student_limit)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .bind(&dto.instructor)
        .bind(&dto.shift)
        .bind(&dto.week_days)
        .bind(&dto.time_slot)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &PgPool,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let existing = Self::get_course(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let status = dto.status.unwrap_or(existing.status);
        let student_limit = dto.student_limit.unwrap_or(existing.student_limit);
        let start_date = dto.start_date.unwrap_or(existing.start_date);
        let end_date = dto.end_date.unwrap_or(existing.end_date);
        let instructor = dto.instructor.unwrap_or(existing.instructor);
        let shift = dto.shift.unwrap_or(existing.shift);
        let week_days = dto.week_days.unwrap_or(existing.week_days);
        let time_slot = dto.time_slot.unwrap_or(existing.time_slot);

        sqlx::query_as::<_, Course>(&format!(
            r#"
            UPDATE courses
            SET name = $1, status = $2, student_limit = $3, start_date = $4, end_date = $5,
                instructor = $6, shift = $7, week_days = $8, time_slot = $9
            WHERE id = $10
            RETURNING {}
            "#,
            COURSE_COLUMNS
        ))
        .bind(&name)
        .bind(&status)
        .bind(student_limit)
        .bind(start_date)
        .bind(end_date)
        .bind(&instructor)
        .bind(&shift)
        .bind(&week_days)
        .bind(&time_slot)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("course not found")));
        }

        Ok(())
    }
}
