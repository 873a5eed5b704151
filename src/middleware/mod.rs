//! Request middleware and extractors.
//!
//! # Authentication flow
//!
//! 1. Client sends `Authorization: Bearer <access-token>`
//! 2. [`auth::AuthAdmin`] verifies the token and extracts claims
//! 3. Capability extractors check the role's capability set
//! 4. The handler runs only if every check passed

pub mod auth;
