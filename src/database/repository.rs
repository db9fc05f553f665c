use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::company::NewCompany;
use crate::models::posting::{
    Language, NewPosting, Posting, PostingStatus, PostingWithAuthor, Publication, Stats,
};
use crate::models::user::{Sender, User};

/// Storage used by the posting lifecycle and the bot.
///
/// `transition_status` and `set_published` are compare-and-swap updates: they
/// only write when the stored status still equals the expected one and
/// report whether they did. Concurrent moderation of the same posting relies
/// on this being atomic in the backing store.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn get_or_create_user(&self, sender: &Sender) -> Result<User>;

    async fn get_user(&self, telegram_id: i64) -> Result<Option<User>>;

    async fn set_interface_language(&self, telegram_id: i64, language: Language) -> Result<()>;

    /// Persists a new posting in `Pending`. A vacancy's company record is
    /// written in the same transaction; nothing is stored if either fails.
    async fn create_posting(
        &self,
        author_id: Uuid,
        company: Option<NewCompany>,
        posting: &NewPosting,
    ) -> Result<Posting>;

    async fn get_posting(&self, id: Uuid) -> Result<Option<PostingWithAuthor>>;

    /// Oldest first.
    async fn list_by_status(&self, status: PostingStatus) -> Result<Vec<PostingWithAuthor>>;

    async fn transition_status(
        &self,
        id: Uuid,
        from: PostingStatus,
        to: PostingStatus,
    ) -> Result<bool>;

    /// `Approved -> Published`, recording the channel message id and the
    /// publication time in the same write.
    async fn set_published(&self, id: Uuid, publication: Publication) -> Result<bool>;

    /// Published postings whose publication time is strictly before `cutoff`.
    async fn list_published_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<PostingWithAuthor>>;

    /// Newest first.
    async fn list_by_author(&self, telegram_id: i64, limit: i64) -> Result<Vec<Posting>>;

    async fn stats(&self) -> Result<Stats>;
}
