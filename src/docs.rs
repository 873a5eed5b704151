use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::admins::model::AdminProfile;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RefreshResponse};
use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};
use crate::modules::students::model::{
    CreateStudentDto, ExistsResponse, Student, UpdateStudentDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::refresh,
        crate::modules::admins::controller::get_me,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::check_name,
        crate::modules::students::controller::check_email,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            RefreshResponse,
            AdminProfile,
            ErrorResponse,
            Student,
            CreateStudentDto,
            UpdateStudentDto,
            ExistsResponse,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token refresh"),
        (name = "Admins", description = "Administrator profile endpoints"),
        (name = "Students", description = "Student management endpoints"),
        (name = "Courses", description = "Course management endpoints")
    ),
    info(
        title = "Campus Admin API",
        version = "0.1.0",
        description = "A REST API built with Rust, Axum, and PostgreSQL for managing students and courses, featuring JWT-based authentication with access and refresh tokens."
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
