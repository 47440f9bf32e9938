//! HTTP request handlers

pub mod auth;
pub mod health;
pub mod invites;
pub mod members;
pub mod shared;
