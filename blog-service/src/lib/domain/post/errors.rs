use thiserror::Error;

use crate::domain::post::models::PostId;
use crate::domain::user::models::UserId;

/// Error for post operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Post not found: {0}")]
    NotFound(PostId),

    #[error("Author does not exist: {0}")]
    AuthorNotFound(UserId),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
