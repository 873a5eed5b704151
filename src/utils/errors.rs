use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow!("{}", msg.into()))
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, anyhow!("{}", msg.into()))
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

/// A uniqueness constraint rejected a write. `fields` names the columns
/// covered by the violated constraint, so callers can produce a
/// field-specific message without inspecting driver error strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub fields: Vec<String>,
}

#[derive(Debug)]
pub enum StoreError {
    Constraint(ConstraintViolation),
    Database(sqlx::Error),
}

/// Classifies a database error against a table's constraint map
/// (`constraint name -> covered fields`). Anything that is not a unique
/// violation passes through unchanged.
pub fn classify_db_error(err: sqlx::Error, constraints: &[(&str, &[&str])]) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let fields = db_err
                .constraint()
                .and_then(|name| {
                    constraints
                        .iter()
                        .find(|(candidate, _)| *candidate == name)
                        .map(|(_, fields)| fields.iter().map(|f| f.to_string()).collect())
                })
                .unwrap_or_default();
            return StoreError::Constraint(ConstraintViolation { fields });
        }
    }
    StoreError::Database(err)
}

impl StoreError {
    /// Maps a classified store error to the boundary error: a 409 with a
    /// field-specific message for constraint violations, a 500 otherwise.
    pub fn into_app_error(self) -> AppError {
        match self {
            StoreError::Constraint(violation) => {
                let field = violation.fields.first().map(String::as_str);
                let msg = match field {
                    Some("email") => "email already registered",
                    Some("cpf") => "cpf already registered",
                    Some("name") => "name already registered",
                    Some("username") => "username already registered",
                    _ => "record already exists",
                };
                AppError::conflict(msg)
            }
            StoreError::Database(err) => AppError::database(err),
        }
    }
}
