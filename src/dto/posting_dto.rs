use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{Error, Result};
use crate::models::posting::{
    Category, Employment, Language, Level, NewPosting, PostType, Posting, PostingContent,
    PostingStatus, PostingWithAuthor, ResumeContent, SalaryRange, VacancyContent, WorkFormat,
};
use crate::utils::validation;

/// Flat submission body. Fields of the other post type are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_salary_order"))]
pub struct CreatePostingPayload {
    pub post_type: PostType,
    pub language: Option<Language>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub level: Option<Level>,
    pub work_format: WorkFormat,
    #[validate(range(min = 0))]
    pub salary_from: Option<i32>,
    #[validate(range(min = 0))]
    pub salary_to: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub contact: String,

    #[validate(length(min = 1, max = 200))]
    pub company: Option<String>,
    pub category: Option<Category>,
    #[validate(length(min = 1, max = 4000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub apply_link: Option<String>,

    #[validate(range(min = 0.0, max = 80.0))]
    pub experience_years: Option<f64>,
    pub employment: Option<Employment>,
    #[validate(length(min = 1, max = 4000))]
    pub about: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub resume_link: Option<String>,
}

fn validate_salary_order(payload: &CreatePostingPayload) -> std::result::Result<(), ValidationError> {
    validation::check_salary_order(payload.salary_from, payload.salary_to)
        .map_err(|_| ValidationError::new("salary_to_less_than_salary_from"))
}

fn required<T>(value: Option<T>, field: &str, post_type: PostType) -> Result<T> {
    value.ok_or_else(|| {
        Error::BadRequest(format!("`{}` is required for a {}", field, post_type.as_str()))
    })
}

impl CreatePostingPayload {
    /// Call after `validate()`.
    pub fn into_new_posting(self, default_language: Language) -> Result<NewPosting> {
        let post_type = self.post_type;
        let salary = SalaryRange {
            from: self.salary_from,
            to: self.salary_to,
        };

        let content = match post_type {
            PostType::Vacancy => PostingContent::Vacancy(VacancyContent {
                company: required(self.company, "company", post_type)?,
                contact: self.contact,
                title: self.title,
                level: self.level,
                work_format: self.work_format,
                category: required(self.category, "category", post_type)?,
                salary,
                description: required(self.description, "description", post_type)?,
                apply_link: required(self.apply_link, "apply_link", post_type)?,
            }),
            PostType::Resume => {
                if let Some(link) = &self.resume_link {
                    if !validation::is_resume_link(link) {
                        return Err(Error::BadRequest(
                            "`resume_link` must be an http(s) or www. link".to_string(),
                        ));
                    }
                }
                PostingContent::Resume(ResumeContent {
                    title: self.title,
                    level: self.level,
                    experience_years: self.experience_years,
                    work_format: self.work_format,
                    employment: required(self.employment, "employment", post_type)?,
                    salary,
                    about: required(self.about, "about", post_type)?,
                    contact: self.contact,
                    resume_link: self.resume_link,
                })
            }
        };

        Ok(NewPosting {
            language: self.language.unwrap_or(default_language),
            content,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RejectPostingPayload {
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostingResponse {
    pub id: Uuid,
    pub status: PostingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingResponse {
    pub id: Uuid,
    pub status: PostingStatus,
    pub language: Language,
    #[serde(flatten)]
    pub content: PostingContent,
    pub author_telegram_id: Option<i64>,
    pub channel_message_id: Option<i64>,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Posting> for PostingResponse {
    fn from(posting: Posting) -> Self {
        Self {
            id: posting.id,
            status: posting.status,
            language: posting.language,
            content: posting.content,
            author_telegram_id: None,
            channel_message_id: posting.publication.map(|p| p.channel_message_id),
            published_at: posting.publication.map(|p| p.published_at),
            created_at: posting.created_at,
        }
    }
}

impl From<PostingWithAuthor> for PostingResponse {
    fn from(posting: PostingWithAuthor) -> Self {
        let author = posting.author_telegram_id;
        Self {
            author_telegram_id: Some(author),
            ..Self::from(posting.posting)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingListResponse {
    pub items: Vec<PostingResponse>,
    pub total: usize,
}
