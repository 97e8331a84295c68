pub mod post;
pub mod user;

pub use post::SqlitePostRepository;
pub use user::SqliteUserRepository;
