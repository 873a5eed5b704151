use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::RequireStudentsManage;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::students::model::{
    CheckEmailQuery, CheckNameQuery, CreateStudentDto, ExistsResponse, Student, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List students ordered by name
#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "All students", body = [Student]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn get_students(
    State(state): State<AppState>,
    _auth: RequireStudentsManage,
) -> Result<Json<Vec<Student>>, AppError> {
    let students = StudentService::get_students(&state.db).await?;
    Ok(Json(students))
}

/// Fetch one student
#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn get_student(
    State(state): State<AppState>,
    _auth: RequireStudentsManage,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

/// Create a student; the academic record is generated server-side
#[utoipa::path(
    post,
    path = "/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Name, CPF, or email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn create_student(
    State(state): State<AppState>,
    _auth: RequireStudentsManage,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create_student(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// Partially update a student
#[utoipa::path(
    patch,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Name, CPF, or email already registered", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn update_student(
    State(state): State<AppState>,
    _auth: RequireStudentsManage,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(student))
}

/// Delete a student
#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = Uuid, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn delete_student(
    State(state): State<AppState>,
    _auth: RequireStudentsManage,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    StudentService::delete_student(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Check whether a student name is taken
#[utoipa::path(
    get,
    path = "/students/check-name",
    params(CheckNameQuery),
    responses(
        (status = 200, description = "Existence flag", body = ExistsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn check_name(
    State(state): State<AppState>,
    _auth: RequireStudentsManage,
    Query(query): Query<CheckNameQuery>,
) -> Result<Json<ExistsResponse>, AppError> {
    let exists = StudentService::name_exists(&state.db, &query.name, query.ignore_id).await?;
    Ok(Json(ExistsResponse { exists }))
}

/// Check whether a student email is taken
#[utoipa::path(
    get,
    path = "/students/check-email",
    params(CheckEmailQuery),
    responses(
        (status = 200, description = "Existence flag", body = ExistsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip_all)]
pub async fn check_email(
    State(state): State<AppState>,
    _auth: RequireStudentsManage,
    Query(query): Query<CheckEmailQuery>,
) -> Result<Json<ExistsResponse>, AppError> {
    let exists = StudentService::email_exists(&state.db, &query.email, query.ignore_id).await?;
    Ok(Json(ExistsResponse { exists }))
}
