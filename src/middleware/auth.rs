//! Authorization guard.
//!
//! [`AuthAdmin`] extracts and verifies the bearer access token; the
//! `require_capability!` extractors additionally check the principal's
//! capability set. Every rejection — missing header, bad signature, expiry,
//! wrong token kind, or missing capability — collapses to the same
//! `401 {"error":"unauthorized"}` body. The reason is logged but never sent
//! to the caller.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{Claims, TokenKind, verify_token};

/// Things a role may do. One role exists today, so every capability maps to
/// `ADMIN`; the guard still checks membership so that adding a second role
/// only means extending [`role_capabilities`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageStudents,
    ManageCourses,
    ViewProfile,
}

/// Capability set granted to a role. Unknown roles get nothing.
pub fn role_capabilities(role: &str) -> &'static [Capability] {
    match role {
        "ADMIN" => &[
            Capability::ManageStudents,
            Capability::ManageCourses,
            Capability::ViewProfile,
        ],
        _ => &[],
    }
}

/// Extractor that validates the bearer access token and carries the
/// resolved claims into the handler.
#[derive(Debug, Clone)]
pub struct AuthAdmin(pub Claims);

impl AuthAdmin {
    pub fn has_capability(&self, capability: Capability) -> bool {
        role_capabilities(&self.0.role).contains(&capability)
    }

    /// Subject id as UUID.
    pub fn admin_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub).map_err(|_| {
            tracing::debug!(sub = %self.0.sub, "non-uuid subject in access token");
            AppError::unauthorized("unauthorized")
        })
    }
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                tracing::debug!("missing authorization header");
                AppError::unauthorized("unauthorized")
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            tracing::debug!("authorization header is not a bearer token");
            AppError::unauthorized("unauthorized")
        })?;

        let claims = verify_token(token, TokenKind::Access, &state.jwt_config).map_err(|reason| {
            tracing::debug!(%reason, "access token rejected");
            AppError::unauthorized("unauthorized")
        })?;

        Ok(AuthAdmin(claims))
    }
}

/// Generates an extractor that requires a capability on top of [`AuthAdmin`].
/// A valid token whose role lacks the capability is rejected with the same
/// uniform 401; with a single role this is indistinguishable from any other
/// rejection, which is intentional.
#[macro_export]
macro_rules! require_capability {
    ($name:ident, $capability:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthAdmin);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::utils::errors::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_admin = <$crate::middleware::auth::AuthAdmin as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                if !auth_admin.has_capability($capability) {
                    tracing::debug!(
                        role = %auth_admin.0.role,
                        capability = ?$capability,
                        "role lacks required capability"
                    );
                    return Err($crate::utils::errors::AppError::unauthorized("unauthorized"));
                }

                Ok($name(auth_admin))
            }
        }
    };
}

require_capability!(RequireStudentsManage, Capability::ManageStudents);
require_capability!(RequireCoursesManage, Capability::ManageCourses);
require_capability!(RequireProfileView, Capability::ViewProfile);
