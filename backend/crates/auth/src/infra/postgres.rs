//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use kernel::query::{Pagination, Predicate, QueryFilter, like_pattern};
use platform::password::HashedPassword;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, person_name::PersonName};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str =
    "user_id, first_name, last_name, email, password_hash, created_at, updated_at";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                first_name,
                last_name,
                email,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 ORDER BY created_at LIMIT 1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn search(&self, filter: &QueryFilter, page: &Pagination) -> AuthResult<Vec<User>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {USER_COLUMNS} FROM users WHERE 1=1"
        ));

        push_user_predicates(&mut qb, filter);

        qb.push(" ORDER BY created_at DESC, user_id OFFSET ");
        qb.push_bind(page.offset);
        qb.push(" LIMIT ");
        qb.push_bind(page.limit);

        let rows: Vec<UserRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        rows.into_iter().map(|r| r.into_user()).collect()
    }
}

/// Render logical filter fields onto the users table.
///
/// Unknown fields were already suppressed by the builder; anything left
/// that still has no column mapping is skipped rather than rendered.
fn push_user_predicates(qb: &mut QueryBuilder<'_, Postgres>, filter: &QueryFilter) {
    for predicate in filter.predicates() {
        let column = match predicate.field() {
            "firstName" => "first_name",
            "lastName" => "last_name",
            "email" => "email",
            "userId" => "user_id",
            _ => continue,
        };

        match predicate {
            Predicate::Equals { value, .. } if column == "user_id" => {
                match Uuid::parse_str(value) {
                    Ok(uuid) => {
                        qb.push(" AND user_id = ");
                        qb.push_bind(uuid);
                    }
                    // Non-UUID id filters match nothing
                    Err(_) => {
                        qb.push(" AND FALSE");
                    }
                }
            }
            Predicate::Equals { value, .. } => {
                qb.push(format!(" AND {column} = "));
                qb.push_bind(value.clone());
            }
            Predicate::Contains { value, .. } => {
                qb.push(format!(" AND {column} ILIKE "));
                qb.push_bind(like_pattern(value));
            }
        }
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            first_name: PersonName::from_db(self.first_name),
            last_name: PersonName::from_db(self.last_name),
            email: Email::from_db(self.email),
            password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
