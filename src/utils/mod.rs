//! Shared utilities.
//!
//! - [`errors`]: application error type and constraint-violation translation
//! - [`jwt`]: token issuance and verification
//! - [`password`]: password hashing and verification

pub mod errors;
pub mod jwt;
pub mod password;
