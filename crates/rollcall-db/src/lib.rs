//! Rollcall DB - Database abstractions
//!
//! SQLx-based credential store for Rollcall services.
//!
//! # Example
//!
//! ```rust,ignore
//! use rollcall_db::{create_pool, MemberRepository, PgMemberRepository, PoolOptions};
//!
//! let pool = create_pool("postgres://localhost/rollcall", PoolOptions::default()).await?;
//! let members = PgMemberRepository::new(pool);
//! let member = members.find_by_email("alice@x.com").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::PgMemberRepository;
pub use pool::{create_pool, DbPool, PoolOptions};
pub use repo::*;
