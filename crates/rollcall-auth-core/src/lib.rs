//! Rollcall Auth Core - Authentication business logic
//!
//! Core authentication functionality: signed-token issuance and
//! verification, password hashing, the guard chain, and the member
//! credential lifecycle (registration, login, refresh, invites,
//! password reset, role and activation management).

pub mod config;
pub mod error;
pub mod guard;
pub mod password;
pub mod service;
pub mod token;

pub use config::*;
pub use error::*;
pub use guard::*;
pub use service::*;
pub use token::*;
