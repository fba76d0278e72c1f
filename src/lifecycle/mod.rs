//! Entity lifecycle managers: the orchestration between a validated form
//! and the stores, with timestamp stamping and upload handling.

pub mod product;
pub mod user;

pub use product::{ProductLifecycle, SaveOutcome};
pub use user::{Registration, RegistrationError};
