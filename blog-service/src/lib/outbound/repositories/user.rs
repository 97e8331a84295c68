use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::SqliteConnection;
use sqlx::SqlitePool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// SQLite-backed credential store.
///
/// Every operation checks out one connection from the pool and hands it to the
/// query helpers; the connection goes back to the pool when it is dropped,
/// whichever way the operation returns.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    username: String,
    name: String,
    surname: String,
    role: String,
    password_hash: String,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            email: EmailAddress::new(row.email)?,
            username: Username::new(row.username)?,
            name: row.name,
            surname: row.surname,
            role: row.role,
            password_hash: row.password_hash,
            is_active: row.is_active,
            created_at: row.created_at,
        })
    }
}

async fn insert_user(conn: &mut SqliteConnection, user: &NewUser) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (email, username, name, surname, role, password_hash, is_active, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(user.email.as_str())
    .bind(user.username.as_str())
    .bind(&user.name)
    .bind(&user.surname)
    .bind(&user.role)
    .bind(&user.password_hash)
    .bind(user.is_active)
    .bind(user.created_at)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

async fn select_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<UserRow>, sqlx::Error> {
    sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, email, username, name, surname, role, password_hash, is_active, created_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(&mut *conn)
    .await
}

fn map_insert_error(e: sqlx::Error, user: &NewUser) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            // SQLite reports the offending column as "table.column"
            if db_err.message().contains("users.username") {
                return UserError::UsernameAlreadyExists(user.username.as_str().to_string());
            }
            if db_err.message().contains("users.email") {
                return UserError::EmailAlreadyExists(user.email.as_str().to_string());
            }
        }
    }
    UserError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let id = insert_user(&mut conn, &user)
            .await
            .map_err(|e| map_insert_error(e, &user))?;

        Ok(user.with_id(UserId(id)))
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let row = select_by_username(&mut conn, username.as_str())
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }
}
