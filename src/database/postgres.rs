use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::repository::Repository;
use crate::error::{Error, Result};
use crate::models::company::NewCompany;
use crate::models::posting::{
    Language, NewPosting, Posting, PostingContent, PostingStatus, PostingWithAuthor, PostType,
    Publication, ResumeContent, SalaryRange, Stats, UnknownVariant, VacancyContent,
};
use crate::models::user::{Sender, User};

const POSTING_COLUMNS: &str = r#"
    p.id, p.author_id, p.company_id, p.post_type, p.status, p.language, p.title,
    p.level, p.work_format, p.category, p.employment, p.experience_years,
    p.salary_from, p.salary_to, p.description, p.contact, p.apply_link, p.resume_link,
    p.channel_message_id, p.published_at, p.created_at,
    c.name AS company_name, u.telegram_id AS author_telegram_id
"#;

const POSTING_JOINS: &str = r#"
    FROM postings p
    JOIN users u ON u.id = p.author_id
    LEFT JOIN companies c ON c.id = p.company_id
"#;

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    telegram_id: i64,
    username: Option<String>,
    interface_language: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = Error;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(User {
            id: row.id,
            telegram_id: row.telegram_id,
            username: row.username,
            interface_language: row
                .interface_language
                .as_deref()
                .map(str::parse)
                .transpose()
                .map_err(corrupt(row.id))?,
            created_at: row.created_at,
        })
    }
}

/// Flat row shape of a posting; only the active post type's columns are set.
#[derive(Debug, FromRow)]
struct PostingRow {
    id: Uuid,
    author_id: Uuid,
    company_id: Option<Uuid>,
    post_type: String,
    status: String,
    language: String,
    title: String,
    level: Option<String>,
    work_format: String,
    category: Option<String>,
    employment: Option<String>,
    experience_years: Option<f64>,
    salary_from: Option<i32>,
    salary_to: Option<i32>,
    description: String,
    contact: String,
    apply_link: Option<String>,
    resume_link: Option<String>,
    channel_message_id: Option<i64>,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    company_name: Option<String>,
    author_telegram_id: i64,
}

fn corrupt(id: Uuid) -> impl Fn(UnknownVariant) -> Error {
    move |err| Error::Internal(format!("Stored row {} is invalid: {}", id, err))
}

fn missing(id: Uuid, column: &str) -> Error {
    Error::Internal(format!("Stored posting {} has no {}", id, column))
}

impl TryFrom<PostingRow> for PostingWithAuthor {
    type Error = Error;

    fn try_from(row: PostingRow) -> Result<Self> {
        let id = row.id;
        let salary = SalaryRange {
            from: row.salary_from,
            to: row.salary_to,
        };
        let level = row
            .level
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(corrupt(id))?;
        let work_format = row.work_format.parse().map_err(corrupt(id))?;

        let content = match row.post_type.parse::<PostType>().map_err(corrupt(id))? {
            PostType::Vacancy => PostingContent::Vacancy(VacancyContent {
                company: row.company_name.ok_or_else(|| missing(id, "company"))?,
                contact: row.contact,
                title: row.title,
                level,
                work_format,
                category: row
                    .category
                    .ok_or_else(|| missing(id, "category"))?
                    .parse()
                    .map_err(corrupt(id))?,
                salary,
                description: row.description,
                apply_link: row.apply_link.ok_or_else(|| missing(id, "apply_link"))?,
            }),
            PostType::Resume => PostingContent::Resume(ResumeContent {
                title: row.title,
                level,
                experience_years: row.experience_years,
                work_format,
                employment: row
                    .employment
                    .ok_or_else(|| missing(id, "employment"))?
                    .parse()
                    .map_err(corrupt(id))?,
                salary,
                about: row.description,
                contact: row.contact,
                resume_link: row.resume_link,
            }),
        };

        let publication = match (row.channel_message_id, row.published_at) {
            (Some(channel_message_id), Some(published_at)) => Some(Publication {
                channel_message_id,
                published_at,
            }),
            _ => None,
        };

        Ok(PostingWithAuthor {
            posting: Posting {
                id,
                author_id: row.author_id,
                company_id: row.company_id,
                status: row.status.parse().map_err(corrupt(id))?,
                language: row.language.parse::<Language>().map_err(corrupt(id))?,
                content,
                publication,
                created_at: row.created_at,
            },
            author_telegram_id: row.author_telegram_id,
        })
    }
}

fn into_postings(rows: Vec<PostingRow>) -> Result<Vec<PostingWithAuthor>> {
    rows.into_iter().map(PostingWithAuthor::try_from).collect()
}

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn get_or_create_user(&self, sender: &Sender) -> Result<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (telegram_id, username)
            VALUES ($1, $2)
            ON CONFLICT (telegram_id)
            DO UPDATE SET username = COALESCE(EXCLUDED.username, users.username)
            RETURNING id, telegram_id, username, interface_language, created_at
            "#,
        )
        .bind(sender.telegram_id)
        .bind(&sender.username)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn get_user(&self, telegram_id: i64) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, telegram_id, username, interface_language, created_at
            FROM users WHERE telegram_id = $1
            "#,
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn set_interface_language(&self, telegram_id: i64, language: Language) -> Result<()> {
        sqlx::query("UPDATE users SET interface_language = $1 WHERE telegram_id = $2")
            .bind(language.as_str())
            .bind(telegram_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn create_posting(
        &self,
        author_id: Uuid,
        company: Option<NewCompany>,
        posting: &NewPosting,
    ) -> Result<Posting> {
        let mut tx = self.pool.begin().await?;

        let company_id: Option<Uuid> = match company {
            Some(company) => Some(
                sqlx::query_scalar(
                    r#"
                    INSERT INTO companies (user_id, name, contact)
                    VALUES ($1, $2, $3)
                    RETURNING id
                    "#,
                )
                .bind(company.user_id)
                .bind(&company.name)
                .bind(&company.contact)
                .fetch_one(&mut *tx)
                .await?,
            ),
            None => None,
        };

        let (level, work_format, salary) = match &posting.content {
            PostingContent::Vacancy(v) => (v.level, v.work_format, v.salary),
            PostingContent::Resume(r) => (r.level, r.work_format, r.salary),
        };
        let (category, employment, experience_years, description, apply_link, resume_link) =
            match &posting.content {
                PostingContent::Vacancy(v) => (
                    Some(v.category.as_str()),
                    None,
                    None,
                    v.description.as_str(),
                    Some(v.apply_link.as_str()),
                    None,
                ),
                PostingContent::Resume(r) => (
                    None,
                    Some(r.employment.as_str()),
                    r.experience_years,
                    r.about.as_str(),
                    None,
                    r.resume_link.as_deref(),
                ),
            };

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO postings (
                author_id, company_id, post_type, status, language, title, level,
                work_format, category, employment, experience_years, salary_from,
                salary_to, description, contact, apply_link, resume_link
            )
            VALUES ($1, $2, $3, 'pending', $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id
            "#,
        )
        .bind(author_id)
        .bind(company_id)
        .bind(posting.content.post_type().as_str())
        .bind(posting.language.as_str())
        .bind(posting.content.title())
        .bind(level.map(|l| l.as_str()))
        .bind(work_format.as_str())
        .bind(category)
        .bind(employment)
        .bind(experience_years)
        .bind(salary.from)
        .bind(salary.to)
        .bind(description)
        .bind(posting.content.author_contact())
        .bind(apply_link)
        .bind(resume_link)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        self.get_posting(id)
            .await?
            .map(|p| p.posting)
            .ok_or_else(|| Error::Internal(format!("Posting {} vanished after insert", id)))
    }

    async fn get_posting(&self, id: Uuid) -> Result<Option<PostingWithAuthor>> {
        let sql = format!("SELECT {} {} WHERE p.id = $1", POSTING_COLUMNS, POSTING_JOINS);
        let row = sqlx::query_as::<_, PostingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(PostingWithAuthor::try_from).transpose()
    }

    async fn list_by_status(&self, status: PostingStatus) -> Result<Vec<PostingWithAuthor>> {
        let sql = format!(
            "SELECT {} {} WHERE p.status = $1 ORDER BY p.created_at ASC",
            POSTING_COLUMNS, POSTING_JOINS
        );
        let rows = sqlx::query_as::<_, PostingRow>(&sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;

        into_postings(rows)
    }

    async fn transition_status(
        &self,
        id: Uuid,
        from: PostingStatus,
        to: PostingStatus,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE postings SET status = $1, updated_at = NOW() WHERE id = $2 AND status = $3",
        )
        .bind(to.as_str())
        .bind(id)
        .bind(from.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_published(&self, id: Uuid, publication: Publication) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE postings
            SET status = 'published', channel_message_id = $1, published_at = $2, updated_at = NOW()
            WHERE id = $3 AND status = 'approved'
            "#,
        )
        .bind(publication.channel_message_id)
        .bind(publication.published_at)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_published_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<PostingWithAuthor>> {
        let sql = format!(
            "SELECT {} {} WHERE p.status = 'published' AND p.published_at < $1 ORDER BY p.published_at ASC",
            POSTING_COLUMNS, POSTING_JOINS
        );
        let rows = sqlx::query_as::<_, PostingRow>(&sql)
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await?;

        into_postings(rows)
    }

    async fn list_by_author(&self, telegram_id: i64, limit: i64) -> Result<Vec<Posting>> {
        let sql = format!(
            "SELECT {} {} WHERE u.telegram_id = $1 ORDER BY p.created_at DESC LIMIT $2",
            POSTING_COLUMNS, POSTING_JOINS
        );
        let rows = sqlx::query_as::<_, PostingRow>(&sql)
            .bind(telegram_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(into_postings(rows)?.into_iter().map(|p| p.posting).collect())
    }

    async fn stats(&self) -> Result<Stats> {
        let row: (i64, i64, i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'pending'),
                COUNT(*) FILTER (WHERE status = 'approved'),
                COUNT(*) FILTER (WHERE status = 'published'),
                COUNT(*) FILTER (WHERE status = 'rejected'),
                COUNT(*) FILTER (WHERE status = 'archived')
            FROM postings
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(Stats {
            total: row.0,
            pending: row.1,
            approved: row.2,
            published: row.3,
            rejected: row.4,
            archived: row.5,
        })
    }
}
