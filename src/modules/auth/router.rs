use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login, refresh};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}
