use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::SqliteConnection;
use sqlx::SqlitePool;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::NewPost;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::UserId;

/// SQLite-backed post store.
///
/// Same connection discipline as the user store: one pooled connection per
/// operation, returned on drop.
pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    is_active: bool,
    author: i64,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId(row.id),
            title: row.title,
            content: row.content,
            is_active: row.is_active,
            author: UserId(row.author),
            created_at: row.created_at,
        }
    }
}

async fn insert_post(conn: &mut SqliteConnection, post: &NewPost) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO posts (title, content, is_active, author, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&post.title)
    .bind(&post.content)
    .bind(post.is_active)
    .bind(post.author.0)
    .bind(post.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

async fn select_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, title, content, is_active, author, created_at
        FROM posts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
}

async fn select_all(conn: &mut SqliteConnection) -> Result<Vec<PostRow>, sqlx::Error> {
    sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, title, content, is_active, author, created_at
        FROM posts
        ORDER BY id
        "#,
    )
    .fetch_all(&mut *conn)
    .await
}

#[async_trait]
impl PostRepository for SqlitePostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let id = insert_post(&mut conn, &post).await.map_err(|e| {
            match e.as_database_error() {
                Some(db_err) if db_err.is_foreign_key_violation() => {
                    PostError::AuthorNotFound(post.author)
                }
                _ => PostError::DatabaseError(e.to_string()),
            }
        })?;

        Ok(post.with_id(PostId(id)))
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let row = select_by_id(&mut conn, id.0)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(row.map(Post::from))
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        let rows = select_all(&mut conn)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Post::from).collect())
    }
}
