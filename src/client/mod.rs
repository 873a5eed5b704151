//! API client: persisted sessions, an explicit authentication context with
//! silent token refresh, and the navigation guard used by the terminal UI.

pub mod context;
pub mod guard;
pub mod session;
