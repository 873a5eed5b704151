use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Constraint map for the `students` table, used to translate unique
/// violations into field-specific conflict messages.
pub const STUDENT_CONSTRAINTS: &[(&str, &[&str])] = &[
    ("students_name_key", &["name"]),
    ("students_cpf_key", &["cpf"]),
    ("students_email_key", &["email"]),
    ("students_academic_record_key", &["academic_record"]),
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    /// Server-generated enrollment number, `RA-<year>-<6 chars>`
    pub academic_record: String,
    pub cpf: String,
    pub email: Option<String>,
    pub class_group: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn validate_cpf(cpf: &str) -> Result<(), ValidationError> {
    if cpf.len() == 11 && cpf.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("cpf").with_message("cpf must have 11 digits".into()))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[validate(length(min = 2, max = 120, message = "name must be 2-120 characters"))]
    pub name: String,
    #[validate(custom(function = validate_cpf))]
    pub cpf: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 30, message = "classGroup must be 1-30 characters"))]
    pub class_group: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    #[validate(length(min = 2, max = 120, message = "name must be 2-120 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = validate_cpf))]
    pub cpf: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 30, message = "classGroup must be 1-30 characters"))]
    pub class_group: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CheckNameQuery {
    pub name: String,
    pub ignore_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CheckEmailQuery {
    pub email: String,
    pub ignore_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ExistsResponse {
    pub exists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_must_be_eleven_digits() {
        assert!(validate_cpf("12345678901").is_ok());
        assert!(validate_cpf("1234567890").is_err());
        assert!(validate_cpf("123456789012").is_err());
        assert!(validate_cpf("1234567890a").is_err());
    }

    #[test]
    fn create_dto_rejects_short_name() {
        let dto = CreateStudentDto {
            name: "a".to_string(),
            cpf: "12345678901".to_string(),
            email: None,
            class_group: None,
        };
        assert!(dto.validate().is_err());
    }
}
