use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;

use crate::modules::admins::model::AdminProfile;
use crate::modules::auth::model::{LoginResponse, RefreshResponse};

use super::session::{Session, SessionStore};

/// Where the client currently stands in the authentication lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No session at all.
    Anonymous,
    /// A login request is in flight.
    Authenticating,
    /// Holding a token pair believed to be usable.
    Authenticated,
    /// A 401 revealed a stale access token; a silent refresh either
    /// recovers the session or clears it back to `Anonymous`.
    Expired,
}

#[derive(Debug)]
pub enum ClientError {
    /// The server rejected the credentials or the session could not be
    /// recovered by a refresh.
    Unauthorized,
    /// The server answered with an unexpected status.
    Api { status: StatusCode, message: String },
    /// The request never completed.
    Transport(reqwest::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Unauthorized => write!(f, "unauthorized"),
            ClientError::Api { status, message } => write!(f, "{}: {}", status, message),
            ClientError::Transport(e) => write!(f, "request failed: {}", e),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err)
    }
}

/// Explicit authentication context for the API client. Owns the HTTP
/// client, the persisted session, and the lifecycle state; every request
/// that needs credentials goes through it.
pub struct AuthContext {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore,
    session: Option<Session>,
    state: AuthState,
}

impl AuthContext {
    /// Builds a context from a previously persisted session, if one exists.
    pub fn new(base_url: impl Into<String>, store: SessionStore) -> Self {
        let session = store.load();
        let state = if session.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        };
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            store,
            session,
            state,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn admin(&self) -> Option<&AdminProfile> {
        self.session.as_ref().map(|s| &s.admin)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchanges credentials for a token pair. On success the session is
    /// persisted so later runs start authenticated.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        self.state = AuthState::Authenticating;

        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.state = AuthState::Anonymous;
            return Err(ClientError::Unauthorized);
        }
        if !response.status().is_success() {
            let status = response.status();
            let message = extract_error(response).await;
            self.state = AuthState::Anonymous;
            return Err(ClientError::Api { status, message });
        }

        let body: LoginResponse = response.json().await?;
        let session = Session {
            access: body.access,
            refresh: body.refresh,
            admin: body.admin,
        };
        if let Err(e) = self.store.save(&session) {
            tracing::warn!(error = %e, "failed to persist session");
        }
        self.session = Some(session);
        self.state = AuthState::Authenticated;
        Ok(())
    }

    /// Trades the refresh token for a new access token. A rejected refresh
    /// ends the session: the store is cleared and the state falls back to
    /// `Anonymous`, so the caller knows a fresh login is the only way on.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let refresh_token = match &self.session {
            Some(session) => session.refresh.clone(),
            None => {
                self.state = AuthState::Anonymous;
                return Err(ClientError::Unauthorized);
            }
        };

        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .bearer_auth(&refresh_token)
            .send()
            .await?;

        if !response.status().is_success() {
            self.end_session();
            return Err(ClientError::Unauthorized);
        }

        let body: RefreshResponse = response.json().await?;
        if let Some(session) = self.session.as_mut() {
            session.access = body.access;
            if let Err(e) = self.store.save(session) {
                tracing::warn!(error = %e, "failed to persist session");
            }
        }
        self.state = AuthState::Authenticated;
        Ok(())
    }

    pub fn logout(&mut self) {
        self.store.clear();
        self.session = None;
        self.state = AuthState::Anonymous;
    }

    fn end_session(&mut self) {
        self.store.clear();
        self.session = None;
        self.state = AuthState::Anonymous;
    }

    /// Authenticated GET returning the response body as JSON. A 401 moves
    /// the context to `Expired` and triggers one silent refresh followed by
    /// a single retry; if the refresh itself fails the session is cleared
    /// and the context drops back to `Anonymous`.
    pub async fn get_json(&mut self, path: &str) -> Result<Value, ClientError> {
        match self.try_get(path).await? {
            Ok(body) => Ok(body),
            Err(()) => {
                self.state = AuthState::Expired;
                self.refresh().await?;
                match self.try_get(path).await? {
                    Ok(body) => Ok(body),
                    Err(()) => {
                        self.end_session();
                        Err(ClientError::Unauthorized)
                    }
                }
            }
        }
    }

    /// One attempt: `Ok(Ok(body))` on success, `Ok(Err(()))` on a 401 that
    /// a refresh might cure.
    async fn try_get(&mut self, path: &str) -> Result<Result<Value, ()>, ClientError> {
        let access = match &self.session {
            Some(session) => session.access.clone(),
            None => return Ok(Err(())),
        };

        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&access)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(Err(()));
        }
        if !response.status().is_success() {
            let status = response.status();
            let message = extract_error(response).await;
            return Err(ClientError::Api { status, message });
        }

        Ok(Ok(response.json().await?))
    }
}

async fn extract_error(response: reqwest::Response) -> String {
    match response.json::<Value>().await {
        Ok(body) => body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error")
            .to_string(),
        Err(_) => "unknown error".to_string(),
    }
}
