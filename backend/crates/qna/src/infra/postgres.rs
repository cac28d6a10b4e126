//! PostgreSQL Repository Implementations
//!
//! Questions, votes, and answers live in three tables. Vote persistence
//! is one transaction guarded by the questions row's version column:
//! totals and the voter's membership row move together or not at all.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use kernel::id::{AnswerId, QuestionId, UserId};
use kernel::query::{Pagination, Predicate, QueryFilter, like_pattern};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::entity::answer::Answer;
use crate::domain::entity::question::Question;
use crate::domain::entity::vote::{Vote, VoteDirection};
use crate::domain::repository::{
    AnswerDetail, AnswerRepository, AnswerWithAuthor, AuthorSummary, QuestionDetail,
    QuestionRepository, QuestionSummary,
};
use crate::error::QnaResult;

/// Logical-field to column mapping for question listing
const QUESTION_COLUMNS: &[(&str, &str)] = &[
    ("text", "q.text"),
    ("questionId", "q.question_id"),
    ("authorFirstName", "u.first_name"),
    ("authorLastName", "u.last_name"),
];

/// Logical-field to column mapping for answer listing
const ANSWER_COLUMNS: &[(&str, &str)] = &[("text", "a.text"), ("answerId", "a.answer_id")];

/// PostgreSQL-backed question/answer repository
#[derive(Clone)]
pub struct PgQnaRepository {
    pool: PgPool,
}

impl PgQnaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load voter summaries and answers for a page of question ids
    async fn load_question_extras(
        &self,
        ids: &[Uuid],
    ) -> QnaResult<(
        HashMap<Uuid, (Vec<AuthorSummary>, Vec<AuthorSummary>)>,
        HashMap<Uuid, Vec<AnswerWithAuthor>>,
    )> {
        let voter_rows: Vec<VoterRow> = sqlx::query_as(
            r#"
            SELECT v.question_id, v.user_id, v.direction,
                   u.first_name, u.last_name, u.email
            FROM question_votes v
            JOIN users u ON u.user_id = v.user_id
            WHERE v.question_id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut voters: HashMap<Uuid, (Vec<AuthorSummary>, Vec<AuthorSummary>)> = HashMap::new();
        for row in voter_rows {
            let entry = voters.entry(row.question_id).or_default();
            let summary = AuthorSummary {
                user_id: UserId::from_uuid(row.user_id),
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
            };
            match VoteDirection::from_id(row.direction) {
                Some(VoteDirection::Up) => entry.0.push(summary),
                Some(VoteDirection::Down) => entry.1.push(summary),
                None => {
                    tracing::warn!(
                        question_id = %row.question_id,
                        direction = row.direction,
                        "Skipping vote row with unknown direction"
                    );
                }
            }
        }

        let answer_rows: Vec<AnswerAuthorRow> = sqlx::query_as(
            r#"
            SELECT a.answer_id, a.question_id, a.author_id, a.text,
                   a.created_at, a.updated_at,
                   u.first_name, u.last_name, u.email
            FROM answers a
            JOIN users u ON u.user_id = a.author_id
            WHERE a.question_id = ANY($1)
            ORDER BY a.created_at, a.answer_id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        let mut answers: HashMap<Uuid, Vec<AnswerWithAuthor>> = HashMap::new();
        for row in answer_rows {
            answers
                .entry(row.question_id)
                .or_default()
                .push(row.into_answer_with_author());
        }

        Ok((voters, answers))
    }

    /// Assemble details for rows sharing one page of extras
    async fn hydrate_details(
        &self,
        rows: Vec<QuestionDetailRow>,
    ) -> QnaResult<Vec<QuestionDetail>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.question_id).collect();
        let (mut voters, mut answers) = self.load_question_extras(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let (up_voters, down_voters) =
                    voters.remove(&row.question_id).unwrap_or_default();
                let answers = answers.remove(&row.question_id).unwrap_or_default();
                row.into_detail(up_voters, down_voters, answers)
            })
            .collect())
    }
}

// ============================================================================
// Question Repository Implementation
// ============================================================================

impl QuestionRepository for PgQnaRepository {
    async fn create(&self, question: &Question) -> QnaResult<()> {
        sqlx::query(
            r#"
            INSERT INTO questions (
                question_id,
                author_id,
                text,
                up_vote_total,
                down_vote_total,
                version,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(question.question_id.as_uuid())
        .bind(question.author_id.as_uuid())
        .bind(&question.text)
        .bind(question.up_vote.total() as i32)
        .bind(question.down_vote.total() as i32)
        .bind(question.version)
        .bind(question.created_at)
        .bind(question.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, question_id: &QuestionId) -> QnaResult<Option<Question>> {
        let row: Option<QuestionRow> = sqlx::query_as(
            r#"
            SELECT question_id, author_id, text, version, created_at, updated_at
            FROM questions
            WHERE question_id = $1
            "#,
        )
        .bind(question_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let votes: Vec<VoteRow> =
            sqlx::query_as("SELECT user_id, direction FROM question_votes WHERE question_id = $1")
                .bind(question_id.as_uuid())
                .fetch_all(&self.pool)
                .await?;

        let mut up = HashSet::new();
        let mut down = HashSet::new();
        for vote in votes {
            match VoteDirection::from_id(vote.direction) {
                Some(VoteDirection::Up) => {
                    up.insert(UserId::from_uuid(vote.user_id));
                }
                Some(VoteDirection::Down) => {
                    down.insert(UserId::from_uuid(vote.user_id));
                }
                None => {
                    tracing::warn!(
                        question_id = %question_id,
                        direction = vote.direction,
                        "Skipping vote row with unknown direction"
                    );
                }
            }
        }

        Ok(Some(row.into_question(up, down)))
    }

    async fn fetch_detail(&self, question_id: &QuestionId) -> QnaResult<Option<QuestionDetail>> {
        let row: Option<QuestionDetailRow> = sqlx::query_as(
            r#"
            SELECT q.question_id, q.author_id, q.text, q.version,
                   q.created_at, q.updated_at,
                   u.first_name, u.last_name, u.email
            FROM questions q
            JOIN users u ON u.user_id = q.author_id
            WHERE q.question_id = $1
            "#,
        )
        .bind(question_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(self.hydrate_details(vec![row]).await?.pop())
    }

    async fn search(
        &self,
        filter: &QueryFilter,
        page: &Pagination,
    ) -> QnaResult<Vec<QuestionDetail>> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT q.question_id, q.author_id, q.text, q.version,
                   q.created_at, q.updated_at,
                   u.first_name, u.last_name, u.email
            FROM questions q
            JOIN users u ON u.user_id = q.author_id
            WHERE 1=1
            "#,
        );

        push_predicates(&mut qb, filter, QUESTION_COLUMNS, "questionId");

        qb.push(" ORDER BY q.created_at DESC, q.question_id OFFSET ");
        qb.push_bind(page.offset);
        qb.push(" LIMIT ");
        qb.push_bind(page.limit);

        let rows: Vec<QuestionDetailRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        self.hydrate_details(rows).await
    }

    async fn store_vote_state(
        &self,
        question: &Question,
        voter: &UserId,
        expected_version: i64,
    ) -> QnaResult<bool> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE questions SET
                up_vote_total = $2,
                down_vote_total = $3,
                updated_at = $4,
                version = version + 1
            WHERE question_id = $1 AND version = $5
            "#,
        )
        .bind(question.question_id.as_uuid())
        .bind(question.up_vote.total() as i32)
        .bind(question.down_vote.total() as i32)
        .bind(question.updated_at)
        .bind(expected_version)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("DELETE FROM question_votes WHERE question_id = $1 AND user_id = $2")
            .bind(question.question_id.as_uuid())
            .bind(voter.as_uuid())
            .execute(&mut *tx)
            .await?;

        if let Some(direction) = question.vote_state(voter).direction() {
            sqlx::query(
                r#"
                INSERT INTO question_votes (question_id, user_id, direction, created_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(question.question_id.as_uuid())
            .bind(voter.as_uuid())
            .bind(direction.id())
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(true)
    }

    async fn find_author(&self, user_id: &UserId) -> QnaResult<Option<AuthorSummary>> {
        let row: Option<AuthorRow> =
            sqlx::query_as("SELECT user_id, first_name, last_name, email FROM users WHERE user_id = $1")
                .bind(user_id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|r| r.into_summary()))
    }
}

// ============================================================================
// Answer Repository Implementation
// ============================================================================

impl AnswerRepository for PgQnaRepository {
    async fn create(&self, answer: &Answer) -> QnaResult<()> {
        sqlx::query(
            r#"
            INSERT INTO answers (
                answer_id,
                question_id,
                author_id,
                text,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(answer.answer_id.as_uuid())
        .bind(answer.question_id.as_uuid())
        .bind(answer.author_id.as_uuid())
        .bind(&answer.text)
        .bind(answer.created_at)
        .bind(answer.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn fetch_detail(&self, answer_id: &AnswerId) -> QnaResult<Option<AnswerDetail>> {
        let row: Option<AnswerDetailRow> = sqlx::query_as(&format!(
            "{ANSWER_DETAIL_SELECT} WHERE a.answer_id = $1"
        ))
        .bind(answer_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_detail()))
    }

    async fn search(
        &self,
        filter: &QueryFilter,
        page: &Pagination,
    ) -> QnaResult<Vec<AnswerDetail>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("{ANSWER_DETAIL_SELECT} WHERE 1=1"));

        push_predicates(&mut qb, filter, ANSWER_COLUMNS, "answerId");

        qb.push(" ORDER BY a.created_at DESC, a.answer_id OFFSET ");
        qb.push_bind(page.offset);
        qb.push(" LIMIT ");
        qb.push_bind(page.limit);

        let rows: Vec<AnswerDetailRow> = qb.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(|r| r.into_detail()).collect())
    }
}

const ANSWER_DETAIL_SELECT: &str = r#"
    SELECT a.answer_id, a.question_id, a.author_id, a.text,
           a.created_at, a.updated_at,
           au.first_name AS author_first_name,
           au.last_name AS author_last_name,
           au.email AS author_email,
           q.text AS question_text,
           q.author_id AS question_author_id,
           q.up_vote_total, q.down_vote_total,
           qu.first_name AS question_author_first_name,
           qu.last_name AS question_author_last_name,
           qu.email AS question_author_email
    FROM answers a
    JOIN users au ON au.user_id = a.author_id
    JOIN questions q ON q.question_id = a.question_id
    JOIN users qu ON qu.user_id = q.author_id
"#;

// ============================================================================
// Filter rendering
// ============================================================================

/// Render logical filter fields onto table columns.
///
/// Unknown fields were already suppressed by the builder; anything left
/// that still has no column mapping is skipped rather than rendered. An
/// id equality whose value is not a UUID matches nothing.
fn push_predicates(
    qb: &mut QueryBuilder<'_, Postgres>,
    filter: &QueryFilter,
    columns: &[(&str, &str)],
    id_logical: &str,
) {
    for predicate in filter.predicates() {
        let field = predicate.field();
        let Some((_, column)) = columns.iter().find(|(logical, _)| *logical == field) else {
            continue;
        };

        match predicate {
            Predicate::Equals { value, .. } if field == id_logical => {
                match Uuid::parse_str(value) {
                    Ok(uuid) => {
                        qb.push(format!(" AND {column} = "));
                        qb.push_bind(uuid);
                    }
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
struct QuestionRow {
    question_id: Uuid,
    author_id: Uuid,
    text: String,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuestionRow {
    fn into_question(self, up: HashSet<UserId>, down: HashSet<UserId>) -> Question {
        Question {
            question_id: QuestionId::from_uuid(self.question_id),
            author_id: UserId::from_uuid(self.author_id),
            text: self.text,
            up_vote: Vote::from_members(up),
            down_vote: Vote::from_members(down),
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VoteRow {
    user_id: Uuid,
    direction: i16,
}

#[derive(sqlx::FromRow)]
struct VoterRow {
    question_id: Uuid,
    user_id: Uuid,
    direction: i16,
    first_name: String,
    last_name: String,
    email: String,
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    user_id: Uuid,
    first_name: String,
    last_name: String,
    email: String,
}

impl AuthorRow {
    fn into_summary(self) -> AuthorSummary {
        AuthorSummary {
            user_id: UserId::from_uuid(self.user_id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

#[derive(sqlx::FromRow)]
struct QuestionDetailRow {
    question_id: Uuid,
    author_id: Uuid,
    text: String,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    first_name: String,
    last_name: String,
    email: String,
}

impl QuestionDetailRow {
    fn into_detail(
        self,
        up_voters: Vec<AuthorSummary>,
        down_voters: Vec<AuthorSummary>,
        answers: Vec<AnswerWithAuthor>,
    ) -> QuestionDetail {
        let up = up_voters.iter().map(|v| v.user_id).collect();
        let down = down_voters.iter().map(|v| v.user_id).collect();

        let question = Question {
            question_id: QuestionId::from_uuid(self.question_id),
            author_id: UserId::from_uuid(self.author_id),
            text: self.text,
            up_vote: Vote::from_members(up),
            down_vote: Vote::from_members(down),
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };

        let author = AuthorSummary {
            user_id: question.author_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        };

        QuestionDetail {
            question,
            author,
            up_voters,
            down_voters,
            answers,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AnswerAuthorRow {
    answer_id: Uuid,
    question_id: Uuid,
    author_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    first_name: String,
    last_name: String,
    email: String,
}

impl AnswerAuthorRow {
    fn into_answer_with_author(self) -> AnswerWithAuthor {
        AnswerWithAuthor {
            answer: Answer {
                answer_id: AnswerId::from_uuid(self.answer_id),
                question_id: QuestionId::from_uuid(self.question_id),
                author_id: UserId::from_uuid(self.author_id),
                text: self.text,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author: AuthorSummary {
                user_id: UserId::from_uuid(self.author_id),
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct AnswerDetailRow {
    answer_id: Uuid,
    question_id: Uuid,
    author_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_first_name: String,
    author_last_name: String,
    author_email: String,
    question_text: String,
    question_author_id: Uuid,
    up_vote_total: i32,
    down_vote_total: i32,
    question_author_first_name: String,
    question_author_last_name: String,
    question_author_email: String,
}

impl AnswerDetailRow {
    fn into_detail(self) -> AnswerDetail {
        AnswerDetail {
            answer: Answer {
                answer_id: AnswerId::from_uuid(self.answer_id),
                question_id: QuestionId::from_uuid(self.question_id),
                author_id: UserId::from_uuid(self.author_id),
                text: self.text,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author: AuthorSummary {
                user_id: UserId::from_uuid(self.author_id),
                first_name: self.author_first_name,
                last_name: self.author_last_name,
                email: self.author_email,
            },
            question: QuestionSummary {
                question_id: QuestionId::from_uuid(self.question_id),
                text: self.question_text,
                up_vote_total: self.up_vote_total.max(0) as u32,
                down_vote_total: self.down_vote_total.max(0) as u32,
                author: AuthorSummary {
                    user_id: UserId::from_uuid(self.question_author_id),
                    first_name: self.question_author_first_name,
                    last_name: self.question_author_last_name,
                    email: self.question_author_email,
                },
            },
        }
    }
}
