use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const COURSE_STATUSES: &[&str] = &["SCHEDULED", "ONGOING", "FINISHED"];
pub const SHIFTS: &[&str] = &["MORNING", "AFTERNOON", "EVENING"];
pub const WEEK_DAYS: &[&str] = &[
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
    "SUNDAY",
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub student_limit: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub instructor: String,
    pub shift: String,
    pub week_days: Vec<String>,
    pub time_slot: String,
    pub created_at: DateTime<Utc>,
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if COURSE_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(ValidationError::new("status")
            .with_message("status must be SCHEDULED, ONGOING, or FINISHED".into()))
    }
}

fn validate_shift(shift: &str) -> Result<(), ValidationError> {
    if SHIFTS.contains(&shift) {
        Ok(())
    } else {
        Err(ValidationError::new("shift")
            .with_message("shift must be MORNING, AFTERNOON, or EVENING".into()))
    }
}

fn validate_week_days(days: &Vec<String>) -> Result<(), ValidationError> {
    if days.is_empty() {
        return Err(
            ValidationError::new("week_days").with_message("weekDays must not be empty".into())
        );
    }
    if days.iter().all(|d| WEEK_DAYS.contains(&d.as_str())) {
        Ok(())
    } else {
        Err(ValidationError::new("week_days").with_message("weekDays contains an invalid day".into()))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseDto {
    #[validate(length(min = 3, max = 120, message = "name must be 3-120 characters"))]
    pub name: String,
    #[validate(custom(function = validate_status))]
    pub status: String,
    #[validate(range(min = 1, message = "studentLimit must be positive"))]
    pub student_limit: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(min = 3, max = 120, message = "instructor must be 3-120 characters"))]
    pub instructor: String,
    #[validate(custom(function = validate_shift))]
    pub shift: String,
    #[validate(custom(function = validate_week_days))]
    pub week_days: Vec<String>,
    #[validate(length(min = 3, max = 50, message = "timeSlot must be 3-50 characters"))]
    pub time_slot: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseDto {
    #[validate(length(min = 3, max = 120, message = "name must be 3-120 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = validate_status))]
    pub status: Option<String>,
    #[validate(range(min = 1, message = "studentLimit must be positive"))]
    pub student_limit: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[validate(length(min = 3, max = 120, message = "instructor must be 3-120 characters"))]
    pub instructor: Option<String>,
    #[validate(custom(function = validate_shift))]
    pub shift: Option<String>,
    #[validate(custom(function = validate_week_days))]
    pub week_days: Option<Vec<String>>,
    #[validate(length(min = 3, max = 50, message = "timeSlot must be 3-50 characters"))]
    pub time_slot: Option<String>,
}
