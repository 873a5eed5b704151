use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::middleware::auth::RequireProfileView;
use crate::modules::admins::model::AdminProfile;
use crate::modules::admins::service::AdminService;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Profile of the authenticated admin
#[utoipa::path(
    get,
    path = "/admins/me",
    responses(
        (status = 200, description = "Authenticated admin profile", body = AdminProfile),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Admin no longer exists", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Admins"
)]
#[instrument(skip_all)]
pub async fn get_me(
    State(state): State<AppState>,
    RequireProfileView(auth): RequireProfileView,
) -> Result<Json<AdminProfile>, AppError> {
    let id = auth.admin_id()?;
    let profile = AdminService::get_profile(&state.db, id).await?;
    Ok(Json(profile))
}
