use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::PostError;
use super::models::CreatePostCommand;
use super::models::NewPost;
use super::models::Post;
use super::models::PostId;
use super::ports::PostRepository;
use super::ports::PostServicePort;
use crate::domain::user::models::IdentityContext;

/// Concrete implementation of PostServicePort.
///
/// Generic over repository for testability.
pub struct PostService<PR>
where
    PR: PostRepository,
{
    post_repository: Arc<PR>,
}

impl<PR> PostService<PR>
where
    PR: PostRepository,
{
    pub fn new(post_repository: Arc<PR>) -> Self {
        Self { post_repository }
    }
}

#[async_trait]
impl<PR> PostServicePort for PostService<PR>
where
    PR: PostRepository,
{
    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        self.post_repository.list_all().await
    }

    async fn get_post(&self, id: PostId) -> Result<Post, PostError> {
        self.post_repository
            .find_by_id(id)
            .await?
            .ok_or(PostError::NotFound(id))
    }

    async fn create_post(
        &self,
        identity: &IdentityContext,
        command: CreatePostCommand,
    ) -> Result<Post, PostError> {
        let post = NewPost {
            title: command.title,
            content: command.content,
            is_active: true,
            author: identity.user_id,
            created_at: Utc::now(),
        };

        let post = self.post_repository.create(post).await?;
        tracing::info!(post_id = %post.id, author = %post.author, "Post created");

        Ok(post)
    }
}
