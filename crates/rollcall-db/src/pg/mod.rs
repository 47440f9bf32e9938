//! PostgreSQL repository implementations

mod member;

pub use member::PgMemberRepository;
