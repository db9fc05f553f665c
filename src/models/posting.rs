use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Vacancy,
    Resume,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Vacancy => "vacancy",
            PostType::Resume => "resume",
        }
    }
}

impl FromStr for PostType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vacancy" => Ok(PostType::Vacancy),
            "resume" => Ok(PostType::Resume),
            other => Err(UnknownVariant::new("post type", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ru,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            other => Err(UnknownVariant::new("language", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Junior,
    Middle,
    Senior,
    Internship,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Junior, Level::Middle, Level::Senior, Level::Internship];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Junior => "junior",
            Level::Middle => "middle",
            Level::Senior => "senior",
            Level::Internship => "internship",
        }
    }
}

impl FromStr for Level {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "junior" => Ok(Level::Junior),
            "middle" => Ok(Level::Middle),
            "senior" => Ok(Level::Senior),
            "internship" => Ok(Level::Internship),
            other => Err(UnknownVariant::new("level", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkFormat {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkFormat {
    pub const ALL: [WorkFormat; 3] = [WorkFormat::Remote, WorkFormat::Hybrid, WorkFormat::Onsite];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkFormat::Remote => "remote",
            WorkFormat::Hybrid => "hybrid",
            WorkFormat::Onsite => "onsite",
        }
    }
}

impl FromStr for WorkFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Ok(WorkFormat::Remote),
            "hybrid" => Ok(WorkFormat::Hybrid),
            "onsite" => Ok(WorkFormat::Onsite),
            other => Err(UnknownVariant::new("work format", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Web2,
    Web3,
    Dev,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Web2, Category::Web3, Category::Dev];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Web2 => "web2",
            Category::Web3 => "web3",
            Category::Dev => "dev",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "web2" => Ok(Category::Web2),
            "web3" => Ok(Category::Web3),
            "dev" => Ok(Category::Dev),
            other => Err(UnknownVariant::new("category", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Employment {
    FullTime,
    PartTime,
    Contract,
    Freelance,
}

impl Employment {
    pub const ALL: [Employment; 4] = [
        Employment::FullTime,
        Employment::PartTime,
        Employment::Contract,
        Employment::Freelance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Employment::FullTime => "full-time",
            Employment::PartTime => "part-time",
            Employment::Contract => "contract",
            Employment::Freelance => "freelance",
        }
    }
}

impl FromStr for Employment {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full-time" => Ok(Employment::FullTime),
            "part-time" => Ok(Employment::PartTime),
            "contract" => Ok(Employment::Contract),
            "freelance" => Ok(Employment::Freelance),
            other => Err(UnknownVariant::new("employment type", other)),
        }
    }
}

/// Moderation status of a persisted posting.
///
/// Allowed moves: `Pending -> Approved -> Published`, `Pending -> Rejected`,
/// `Published -> Archived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostingStatus {
    Pending,
    Approved,
    Published,
    Rejected,
    Archived,
}

impl PostingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostingStatus::Pending => "pending",
            PostingStatus::Approved => "approved",
            PostingStatus::Published => "published",
            PostingStatus::Rejected => "rejected",
            PostingStatus::Archived => "archived",
        }
    }

    pub fn can_transition_to(&self, next: PostingStatus) -> bool {
        matches!(
            (self, next),
            (PostingStatus::Pending, PostingStatus::Approved)
                | (PostingStatus::Approved, PostingStatus::Published)
                | (PostingStatus::Pending, PostingStatus::Rejected)
                | (PostingStatus::Published, PostingStatus::Archived)
        )
    }
}

impl FromStr for PostingStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(PostingStatus::Pending),
            "approved" => Ok(PostingStatus::Approved),
            "published" => Ok(PostingStatus::Published),
            "rejected" => Ok(PostingStatus::Rejected),
            "archived" => Ok(PostingStatus::Archived),
            other => Err(UnknownVariant::new("status", other)),
        }
    }
}

impl fmt::Display for PostingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalaryRange {
    pub from: Option<i32>,
    pub to: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyContent {
    pub company: String,
    pub contact: String,
    pub title: String,
    pub level: Option<Level>,
    pub work_format: WorkFormat,
    pub category: Category,
    pub salary: SalaryRange,
    pub description: String,
    pub apply_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeContent {
    pub title: String,
    pub level: Option<Level>,
    pub experience_years: Option<f64>,
    pub work_format: WorkFormat,
    pub employment: Employment,
    pub salary: SalaryRange,
    pub about: String,
    pub contact: String,
    pub resume_link: Option<String>,
}

/// Content fields of a posting; only the active post type's fields exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "post_type", rename_all = "lowercase")]
pub enum PostingContent {
    Vacancy(VacancyContent),
    Resume(ResumeContent),
}

impl PostingContent {
    pub fn post_type(&self) -> PostType {
        match self {
            PostingContent::Vacancy(_) => PostType::Vacancy,
            PostingContent::Resume(_) => PostType::Resume,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            PostingContent::Vacancy(v) => &v.title,
            PostingContent::Resume(r) => &r.title,
        }
    }

    /// Contact of the author as typed in the form.
    pub fn author_contact(&self) -> &str {
        match self {
            PostingContent::Vacancy(v) => &v.contact,
            PostingContent::Resume(r) => &r.contact,
        }
    }
}

/// Channel message id and publication time, recorded together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub channel_message_id: i64,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub id: Uuid,
    pub author_id: Uuid,
    pub company_id: Option<Uuid>,
    pub status: PostingStatus,
    pub language: Language,
    pub content: PostingContent,
    pub publication: Option<Publication>,
    pub created_at: DateTime<Utc>,
}

impl Posting {
    pub fn post_type(&self) -> PostType {
        self.content.post_type()
    }

    pub fn title(&self) -> &str {
        self.content.title()
    }
}

/// A posting together with the Telegram identity of whoever submitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingWithAuthor {
    #[serde(flatten)]
    pub posting: Posting,
    pub author_telegram_id: i64,
}

/// Validated submission handed from the conversation or the API to the lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPosting {
    pub language: Language,
    pub content: PostingContent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
    pub published: i64,
    pub rejected: i64,
    pub archived: i64,
}
