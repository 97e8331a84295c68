use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::UserId;

/// Blog post entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
}

/// Post unique identifier type, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostId(pub i64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Client-supplied fields of a new post. The author never comes from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
}

/// Post record ready for insertion; storage assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub is_active: bool,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn with_id(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            is_active: self.is_active,
            author: self.author,
            created_at: self.created_at,
        }
    }
}
