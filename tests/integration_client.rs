//! Client lifecycle tests against an in-process stub of the API. The stub
//! issues real tokens with the crate's own JWT utilities, so the client's
//! silent-refresh path is exercised end to end without a database.

use std::path::PathBuf;

use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router, extract::State};
use campus_admin::client::context::{AuthContext, AuthState, ClientError};
use campus_admin::client::session::SessionStore;
use campus_admin::config::jwt::JwtConfig;
use campus_admin::modules::admins::model::AdminProfile;
use campus_admin::modules::auth::model::{LoginResponse, RefreshResponse};
use campus_admin::utils::jwt::{ROLE_ADMIN, TokenKind, issue_token, verify_token};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

#[derive(Clone)]
struct StubState {
    jwt_config: JwtConfig,
    admin: AdminProfile,
    /// TTL of access tokens minted at login. Negative values simulate a
    /// session whose access token has already expired.
    login_access_ttl: i64,
    /// When false the refresh endpoint rejects everything.
    refresh_ok: bool,
}

fn stub_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "stub_server_secret_for_client_tests".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604800,
    }
}

fn stub_admin() -> AdminProfile {
    AdminProfile {
        id: Uuid::new_v4(),
        username: "admin".to_string(),
        email: "admin@admin.com".to_string(),
        created_at: Utc::now(),
    }
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn stub_login(
    State(state): State<StubState>,
    Json(body): Json<Value>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<Value>)> {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if username != "admin" || password != "admin123" {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid credentials" })),
        ));
    }

    let sub = state.admin.id.to_string();
    let access = issue_token(
        &sub,
        ROLE_ADMIN,
        TokenKind::Access,
        state.login_access_ttl,
        &state.jwt_config,
    )
    .unwrap();
    let refresh = issue_token(
        &sub,
        ROLE_ADMIN,
        TokenKind::Refresh,
        state.jwt_config.refresh_token_expiry,
        &state.jwt_config,
    )
    .unwrap();

    Ok(Json(LoginResponse {
        access,
        refresh,
        admin: state.admin.clone(),
    }))
}

async fn stub_refresh(
    State(state): State<StubState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, (StatusCode, Json<Value>)> {
    let rejected = (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "invalid refresh token" })),
    );

    if !state.refresh_ok {
        return Err(rejected);
    }

    let token = bearer(&headers).ok_or_else(|| rejected.clone())?;
    let claims = verify_token(token, TokenKind::Refresh, &state.jwt_config)
        .map_err(|_| rejected.clone())?;

    let access = issue_token(
        &claims.sub,
        &claims.role,
        TokenKind::Access,
        state.jwt_config.access_token_expiry,
        &state.jwt_config,
    )
    .unwrap();

    Ok(Json(RefreshResponse { access }))
}

async fn stub_me(
    State(state): State<StubState>,
    headers: HeaderMap,
) -> Result<Json<AdminProfile>, (StatusCode, Json<Value>)> {
    let rejected = (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "unauthorized" })),
    );

    let token = bearer(&headers).ok_or_else(|| rejected.clone())?;
    verify_token(token, TokenKind::Access, &state.jwt_config).map_err(|_| rejected.clone())?;

    Ok(Json(state.admin.clone()))
}

async fn spawn_stub(login_access_ttl: i64, refresh_ok: bool) -> (String, AdminProfile) {
    let admin = stub_admin();
    let state = StubState {
        jwt_config: stub_jwt_config(),
        admin: admin.clone(),
        login_access_ttl,
        refresh_ok,
    };

    let app = Router::new()
        .route("/auth/login", post(stub_login))
        .route("/auth/refresh", post(stub_refresh))
        .route("/admins/me", get(stub_me))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), admin)
}

fn temp_session_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("campus-client-{}-{}.json", name, Uuid::new_v4()))
}

#[tokio::test]
async fn test_login_success_persists_session() {
    let (base_url, admin) = spawn_stub(900, true).await;
    let path = temp_session_path("login-success");

    let mut ctx = AuthContext::new(base_url, SessionStore::new(path.clone()));
    assert_eq!(ctx.state(), AuthState::Anonymous);

    ctx.login("admin", "admin123").await.unwrap();
    assert_eq!(ctx.state(), AuthState::Authenticated);
    assert_eq!(ctx.admin().unwrap().username, admin.username);

    let persisted = SessionStore::new(path.clone()).load().unwrap();
    assert_eq!(persisted.admin, admin);

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_login_failure_leaves_no_session() {
    let (base_url, _) = spawn_stub(900, true).await;
    let path = temp_session_path("login-failure");

    let mut ctx = AuthContext::new(base_url, SessionStore::new(path.clone()));
    let result = ctx.login("admin", "wrong-password").await;

    assert!(matches!(result, Err(ClientError::Unauthorized)));
    assert_eq!(ctx.state(), AuthState::Anonymous);
    assert!(SessionStore::new(path).load().is_none());
}

#[tokio::test]
async fn test_session_survives_restart() {
    let (base_url, admin) = spawn_stub(900, true).await;
    let path = temp_session_path("restart");

    let mut ctx = AuthContext::new(base_url.clone(), SessionStore::new(path.clone()));
    ctx.login("admin", "admin123").await.unwrap();
    drop(ctx);

    // A fresh context picks the persisted session back up
    let mut ctx = AuthContext::new(base_url, SessionStore::new(path.clone()));
    assert_eq!(ctx.state(), AuthState::Authenticated);

    let me = ctx.get_json("/admins/me").await.unwrap();
    assert_eq!(me["username"], admin.username);

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_expired_access_token_is_refreshed_silently() {
    // Login hands out an access token that is already expired
    let (base_url, admin) = spawn_stub(-120, true).await;
    let path = temp_session_path("silent-refresh");

    let mut ctx = AuthContext::new(base_url, SessionStore::new(path.clone()));
    ctx.login("admin", "admin123").await.unwrap();

    let me = ctx.get_json("/admins/me").await.unwrap();
    assert_eq!(me["username"], admin.username);
    assert_eq!(ctx.state(), AuthState::Authenticated);

    // The refreshed access token was persisted for the next run
    let persisted = SessionStore::new(path.clone()).load().unwrap();
    let claims = verify_token(&persisted.access, TokenKind::Access, &stub_jwt_config()).unwrap();
    assert_eq!(claims.sub, admin.id.to_string());

    let _ = std::fs::remove_file(path);
}

#[tokio::test]
async fn test_failed_refresh_clears_session_and_returns_to_anonymous() {
    let (base_url, _) = spawn_stub(-120, false).await;
    let path = temp_session_path("refresh-failure");

    let mut ctx = AuthContext::new(base_url, SessionStore::new(path.clone()));
    ctx.login("admin", "admin123").await.unwrap();

    let result = ctx.get_json("/admins/me").await;

    // A rejected refresh ends the session: back to square one
    assert!(matches!(result, Err(ClientError::Unauthorized)));
    assert_eq!(ctx.state(), AuthState::Anonymous);
    assert!(ctx.admin().is_none());
    assert!(SessionStore::new(path).load().is_none());
}

#[tokio::test]
async fn test_direct_refresh_rejection_returns_to_anonymous() {
    let (base_url, _) = spawn_stub(900, false).await;
    let path = temp_session_path("direct-refresh-failure");

    let mut ctx = AuthContext::new(base_url, SessionStore::new(path.clone()));
    ctx.login("admin", "admin123").await.unwrap();
    assert_eq!(ctx.state(), AuthState::Authenticated);

    let result = ctx.refresh().await;

    assert!(matches!(result, Err(ClientError::Unauthorized)));
    assert_eq!(ctx.state(), AuthState::Anonymous);
    assert!(SessionStore::new(path).load().is_none());
}

#[tokio::test]
async fn test_logout_clears_the_session() {
    let (base_url, _) = spawn_stub(900, true).await;
    let path = temp_session_path("logout");

    let mut ctx = AuthContext::new(base_url, SessionStore::new(path.clone()));
    ctx.login("admin", "admin123").await.unwrap();
    ctx.logout();

    assert_eq!(ctx.state(), AuthState::Anonymous);
    assert!(ctx.admin().is_none());
    assert!(SessionStore::new(path).load().is_none());
}
