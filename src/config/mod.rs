//! Configuration, loaded from environment variables at startup.
//!
//! - [`cors`]: allowed origins for the admin frontend
//! - [`database`]: connection pool and startup migrations
//! - [`jwt`]: signing secret and token lifetimes

pub mod cors;
pub mod database;
pub mod jwt;
