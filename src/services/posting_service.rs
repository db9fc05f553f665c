use std::sync::Arc;

use uuid::Uuid;

use crate::config::Config;
use crate::database::Repository;
use crate::error::{Error, Result};
use crate::models::company::NewCompany;
use crate::models::posting::{
    NewPosting, Posting, PostingContent, PostingStatus, PostingWithAuthor, Publication, Stats,
};
use crate::models::user::Sender;
use crate::services::notification_service::AdminNotifier;
use crate::services::publisher_service::Publisher;
use crate::services::telegram_service::ChatTransport;
use crate::utils::{render, time};

/// Postings shown by `/myjobs`.
pub const AUTHOR_LIST_LIMIT: i64 = 20;

/// Moderation lifecycle of postings.
///
/// Every status change goes through a compare-and-swap in the repository,
/// so a duplicate request for the same transition fails with
/// [`Error::InvalidTransition`] instead of repeating its side effects.
#[derive(Clone)]
pub struct PostingService {
    repo: Arc<dyn Repository>,
    publisher: Arc<dyn Publisher>,
    notifier: Arc<dyn AdminNotifier>,
    transport: Arc<dyn ChatTransport>,
    config: Arc<Config>,
}

impl PostingService {
    pub fn new(
        repo: Arc<dyn Repository>,
        publisher: Arc<dyn Publisher>,
        notifier: Arc<dyn AdminNotifier>,
        transport: Arc<dyn ChatTransport>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            repo,
            publisher,
            notifier,
            transport,
            config,
        }
    }

    pub fn is_admin(&self, telegram_id: i64) -> bool {
        self.config.is_admin(telegram_id)
    }

    fn ensure_admin(&self, telegram_id: i64) -> Result<()> {
        if self.is_admin(telegram_id) {
            Ok(())
        } else {
            tracing::warn!(admin_id = telegram_id, "Moderation attempt by non-admin");
            Err(Error::Forbidden("Admin rights required".to_string()))
        }
    }

    pub async fn submit(&self, sender: &Sender, posting: NewPosting) -> Result<Posting> {
        let author = self.repo.get_or_create_user(sender).await?;

        let company = match &posting.content {
            PostingContent::Vacancy(vacancy) => Some(NewCompany {
                user_id: author.id,
                name: vacancy.company.clone(),
                contact: vacancy.contact.clone(),
            }),
            PostingContent::Resume(_) => None,
        };

        let created = self.repo.create_posting(author.id, company, &posting).await?;
        tracing::info!(
            posting_id = %created.id,
            user_id = sender.telegram_id,
            post_type = created.post_type().as_str(),
            "Posting submitted for moderation"
        );

        self.notifier.notify_new_submission(&created).await;
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> Result<PostingWithAuthor> {
        self.repo
            .get_posting(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Posting {} not found", id)))
    }

    async fn expect_status(&self, id: Uuid, from: PostingStatus, to: PostingStatus) -> Result<PostingWithAuthor> {
        let current = self.get(id).await?;
        if current.posting.status != from {
            return Err(Error::InvalidTransition {
                from: current.posting.status,
                to,
            });
        }
        Ok(current)
    }

    /// Compare-and-swap; on a lost race the error reports the status that won.
    async fn transition(&self, id: Uuid, from: PostingStatus, to: PostingStatus) -> Result<()> {
        if self.repo.transition_status(id, from, to).await? {
            return Ok(());
        }
        let current = self.get(id).await?;
        Err(Error::InvalidTransition {
            from: current.posting.status,
            to,
        })
    }

    pub async fn approve(&self, id: Uuid, admin_id: i64) -> Result<Posting> {
        self.ensure_admin(admin_id)?;
        let mut posting = self
            .expect_status(id, PostingStatus::Pending, PostingStatus::Approved)
            .await?;
        self.transition(id, PostingStatus::Pending, PostingStatus::Approved)
            .await?;
        posting.posting.status = PostingStatus::Approved;
        tracing::info!(posting_id = %id, admin_id, "Posting approved");

        let channel_message_id = match self.publisher.publish(&posting).await {
            Ok(message_id) => message_id,
            Err(e) => {
                tracing::error!(posting_id = %id, error = %e, "Publishing failed, posting stays approved");
                return Err(e);
            }
        };

        let publication = Publication {
            channel_message_id,
            published_at: time::now(),
        };
        if !self.repo.set_published(id, publication).await? {
            // Someone moved the posting while it was being published.
            if let Err(e) = self.publisher.delete(channel_message_id).await {
                tracing::warn!(posting_id = %id, error = %e, "Failed to retract orphaned channel post");
            }
            let current = self.get(id).await?;
            return Err(Error::InvalidTransition {
                from: current.posting.status,
                to: PostingStatus::Published,
            });
        }
        posting.posting.status = PostingStatus::Published;
        posting.posting.publication = Some(publication);
        tracing::info!(posting_id = %id, channel_message_id, "Posting published");

        self.notify_author(&posting, render::approved_notice(&posting.posting))
            .await;
        Ok(posting.posting)
    }

    pub async fn reject(&self, id: Uuid, admin_id: i64, reason: Option<&str>) -> Result<Posting> {
        self.ensure_admin(admin_id)?;
        let mut posting = self
            .expect_status(id, PostingStatus::Pending, PostingStatus::Rejected)
            .await?;
        self.transition(id, PostingStatus::Pending, PostingStatus::Rejected)
            .await?;
        posting.posting.status = PostingStatus::Rejected;
        tracing::info!(posting_id = %id, admin_id, "Posting rejected");

        self.notify_author(&posting, render::rejected_notice(&posting.posting, reason))
            .await;
        Ok(posting.posting)
    }

    pub async fn archive(&self, id: Uuid, admin_id: i64) -> Result<Posting> {
        self.ensure_admin(admin_id)?;
        let posting = self
            .expect_status(id, PostingStatus::Published, PostingStatus::Archived)
            .await?;
        let archived = self.retire(posting).await?;
        tracing::info!(posting_id = %id, admin_id, "Posting archived by admin");
        Ok(archived)
    }

    /// Published -> Archived without an admin check; used by the expiry sweep.
    pub(crate) async fn archive_expired(&self, posting: PostingWithAuthor) -> Result<Posting> {
        let id = posting.posting.id;
        let archived = self.retire(posting).await?;
        tracing::info!(posting_id = %id, "Expired posting archived");
        Ok(archived)
    }

    /// The status swap happens before the channel delete so that only the
    /// caller that won the swap ever deletes the message.
    async fn retire(&self, mut posting: PostingWithAuthor) -> Result<Posting> {
        let id = posting.posting.id;
        self.transition(id, PostingStatus::Published, PostingStatus::Archived)
            .await?;
        posting.posting.status = PostingStatus::Archived;

        if let Some(publication) = posting.posting.publication {
            if let Err(e) = self.publisher.delete(publication.channel_message_id).await {
                tracing::warn!(
                    posting_id = %id,
                    channel_message_id = publication.channel_message_id,
                    error = %e,
                    "Failed to delete channel message"
                );
            }
        }

        self.notify_author(&posting, render::removed_notice(&posting.posting))
            .await;
        Ok(posting.posting)
    }

    async fn notify_author(&self, posting: &PostingWithAuthor, text: String) {
        if let Err(e) = self
            .transport
            .send_text(posting.author_telegram_id, &text)
            .await
        {
            tracing::warn!(
                posting_id = %posting.posting.id,
                user_id = posting.author_telegram_id,
                error = %e,
                "Failed to notify author"
            );
        }
    }

    pub async fn list_pending(&self, admin_id: i64) -> Result<Vec<PostingWithAuthor>> {
        self.ensure_admin(admin_id)?;
        self.repo.list_by_status(PostingStatus::Pending).await
    }

    pub async fn list_by_author(&self, telegram_id: i64) -> Result<Vec<Posting>> {
        self.repo
            .list_by_author(telegram_id, AUTHOR_LIST_LIMIT)
            .await
    }

    pub async fn stats(&self, admin_id: i64) -> Result<Stats> {
        self.ensure_admin(admin_id)?;
        self.repo.stats().await
    }

    pub(crate) fn repository(&self) -> &Arc<dyn Repository> {
        &self.repo
    }

    pub(crate) fn config(&self) -> &Arc<Config> {
        &self.config
    }
}
