//! Domain layer: ordered checks, token validation and identity rewrite.

pub mod checks;
pub mod identity;
pub mod service;
pub mod token;

pub use service::{Decision, Impersonator};
