//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument, or `&mut PgConnection` for
//! statements that must run inside a caller-owned transaction.
//!
//! Cross-request coordination (token uniqueness, vote/report/validation
//! upserts, lock acquisition) is expressed as single conditional
//! statements so it holds across stateless replicas.

pub mod level_repo;
pub mod report_repo;
pub mod session_token_repo;
pub mod user_repo;
pub mod validation_repo;
pub mod vote_repo;

pub use level_repo::LevelRepo;
pub use report_repo::ReportRepo;
pub use session_token_repo::SessionTokenRepo;
pub use user_repo::UserRepo;
pub use validation_repo::ValidationRepo;
pub use vote_repo::VoteRepo;
