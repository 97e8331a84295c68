use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::user::models::IdentityContext;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// List every post, active or not.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self) -> Result<Vec<Post>, PostError>;

    /// Retrieve a post by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: PostId) -> Result<Post, PostError>;

    /// Create a post owned by the verified caller.
    ///
    /// # Arguments
    /// * `identity` - Caller identity resolved from the access token
    /// * `command` - Title and content
    ///
    /// # Returns
    /// Created post, active, authored by `identity.user_id`
    ///
    /// # Errors
    /// * `AuthorNotFound` - The identity refers to no stored user
    /// * `DatabaseError` - Database operation failed
    async fn create_post(
        &self,
        identity: &IdentityContext,
        command: CreatePostCommand,
    ) -> Result<Post, PostError>;
}

/// Persistence operations for posts.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post.
    ///
    /// # Errors
    /// * `AuthorNotFound` - Foreign key on author rejected the row
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, post: NewPost) -> Result<Post, PostError>;

    /// Retrieve post by identifier.
    ///
    /// # Returns
    /// Optional post (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError>;

    /// Retrieve all posts ordered by id.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Post>, PostError>;
}
