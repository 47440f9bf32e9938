//! Rollcall Types - Shared domain types
//!
//! This crate contains domain types used across Rollcall services:
//! - Member identity
//! - Roles for coarse-grained authorization

pub mod member;
pub mod role;

pub use member::*;
pub use role::*;
