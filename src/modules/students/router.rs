use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    check_email, check_name, create_student, delete_student, get_student, get_students,
    update_student,
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route("/check-name", get(check_name))
        .route("/check-email", get(check_email))
        .route(
            "/{id}",
            get(get_student).patch(update_student).delete(delete_student),
        )
}
