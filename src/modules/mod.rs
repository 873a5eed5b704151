//! Feature modules. Each follows the same split: `model.rs` (DTOs and
//! database structs), `service.rs` (business logic), `controller.rs`
//! (HTTP handlers), `router.rs` (route wiring).

pub mod admins;
pub mod auth;
pub mod courses;
pub mod students;
