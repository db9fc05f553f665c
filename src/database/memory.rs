use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::repository::Repository;
use crate::error::{Error, Result};
use crate::models::company::{Company, NewCompany};
use crate::models::posting::{
    Language, NewPosting, Posting, PostingStatus, PostingWithAuthor, Publication, Stats,
};
use crate::models::user::{Sender, User};
use crate::utils::time::now;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    companies: HashMap<Uuid, Company>,
    postings: HashMap<Uuid, Posting>,
    // insertion order, so equal timestamps still list deterministically
    posting_order: Vec<Uuid>,
}

impl Tables {
    fn with_author(&self, posting: &Posting) -> Option<PostingWithAuthor> {
        let author = self.users.get(&posting.author_id)?;
        Some(PostingWithAuthor {
            posting: posting.clone(),
            author_telegram_id: author.telegram_id,
        })
    }

    fn postings_in_order(&self) -> impl DoubleEndedIterator<Item = &Posting> {
        self.posting_order
            .iter()
            .filter_map(|id| self.postings.get(id))
    }

    fn user_by_telegram_id(&self, telegram_id: i64) -> Option<&User> {
        self.users.values().find(|u| u.telegram_id == telegram_id)
    }
}

/// Process-local [`Repository`]. All writes happen under one lock, so the
/// compare-and-swap updates are atomic.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn companies(&self) -> Vec<Company> {
        self.tables.read().await.companies.values().cloned().collect()
    }

    /// Overwrites the publication time; lets tests age a posting.
    pub async fn backdate_publication(&self, id: Uuid, published_at: DateTime<Utc>) {
        let mut tables = self.tables.write().await;
        if let Some(publication) = tables
            .postings
            .get_mut(&id)
            .and_then(|p| p.publication.as_mut())
        {
            publication.published_at = published_at;
        }
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn get_or_create_user(&self, sender: &Sender) -> Result<User> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables
            .users
            .values_mut()
            .find(|u| u.telegram_id == sender.telegram_id)
        {
            if sender.username.is_some() && user.username != sender.username {
                user.username = sender.username.clone();
            }
            return Ok(user.clone());
        }

        let user = User {
            id: Uuid::new_v4(),
            telegram_id: sender.telegram_id,
            username: sender.username.clone(),
            interface_language: None,
            created_at: now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, telegram_id: i64) -> Result<Option<User>> {
        Ok(self.tables.read().await.user_by_telegram_id(telegram_id).cloned())
    }

    async fn set_interface_language(&self, telegram_id: i64, language: Language) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(user) = tables
            .users
            .values_mut()
            .find(|u| u.telegram_id == telegram_id)
        {
            user.interface_language = Some(language);
        }
        Ok(())
    }

    async fn create_posting(
        &self,
        author_id: Uuid,
        company: Option<NewCompany>,
        posting: &NewPosting,
    ) -> Result<Posting> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&author_id) {
            return Err(Error::Internal(format!("Unknown author {}", author_id)));
        }

        let company = company.map(|company| Company {
            id: Uuid::new_v4(),
            user_id: company.user_id,
            name: company.name,
            contact: company.contact,
            created_at: now(),
        });
        let posting = Posting {
            id: Uuid::new_v4(),
            author_id,
            company_id: company.as_ref().map(|c| c.id),
            status: PostingStatus::Pending,
            language: posting.language,
            content: posting.content.clone(),
            publication: None,
            created_at: now(),
        };
        if let Some(company) = company {
            tables.companies.insert(company.id, company);
        }
        tables.posting_order.push(posting.id);
        tables.postings.insert(posting.id, posting.clone());
        Ok(posting)
    }

    async fn get_posting(&self, id: Uuid) -> Result<Option<PostingWithAuthor>> {
        let tables = self.tables.read().await;
        Ok(tables.postings.get(&id).and_then(|p| tables.with_author(p)))
    }

    async fn list_by_status(&self, status: PostingStatus) -> Result<Vec<PostingWithAuthor>> {
        let tables = self.tables.read().await;
        let mut found: Vec<PostingWithAuthor> = tables
            .postings_in_order()
            .filter(|p| p.status == status)
            .filter_map(|p| tables.with_author(p))
            .collect();
        found.sort_by_key(|p| p.posting.created_at);
        Ok(found)
    }

    async fn transition_status(
        &self,
        id: Uuid,
        from: PostingStatus,
        to: PostingStatus,
    ) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.postings.get_mut(&id) {
            Some(posting) if posting.status == from => {
                posting.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn set_published(&self, id: Uuid, publication: Publication) -> Result<bool> {
        let mut tables = self.tables.write().await;
        match tables.postings.get_mut(&id) {
            Some(posting) if posting.status == PostingStatus::Approved => {
                posting.status = PostingStatus::Published;
                posting.publication = Some(publication);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_published_before(&self, cutoff: DateTime<Utc>) -> Result<Vec<PostingWithAuthor>> {
        let tables = self.tables.read().await;
        Ok(tables
            .postings_in_order()
            .filter(|p| p.status == PostingStatus::Published)
            .filter(|p| matches!(p.publication, Some(publication) if publication.published_at < cutoff))
            .filter_map(|p| tables.with_author(p))
            .collect())
    }

    async fn list_by_author(&self, telegram_id: i64, limit: i64) -> Result<Vec<Posting>> {
        let tables = self.tables.read().await;
        let Some(author) = tables.user_by_telegram_id(telegram_id) else {
            return Ok(Vec::new());
        };
        let mut found: Vec<Posting> = tables
            .postings_in_order()
            .rev()
            .filter(|p| p.author_id == author.id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(found)
    }

    async fn stats(&self) -> Result<Stats> {
        let tables = self.tables.read().await;
        let mut stats = Stats::default();
        for posting in tables.postings.values() {
            stats.total += 1;
            match posting.status {
                PostingStatus::Pending => stats.pending += 1,
                PostingStatus::Approved => stats.approved += 1,
                PostingStatus::Published => stats.published += 1,
                PostingStatus::Rejected => stats.rejected += 1,
                PostingStatus::Archived => stats.archived += 1,
            }
        }
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::posting::{
        Employment, PostingContent, ResumeContent, SalaryRange, WorkFormat,
    };

    fn resume() -> NewPosting {
        NewPosting {
            language: Language::Ru,
            content: PostingContent::Resume(ResumeContent {
                title: "Designer".into(),
                level: None,
                experience_years: Some(2.0),
                work_format: WorkFormat::Hybrid,
                employment: Employment::Freelance,
                salary: SalaryRange::default(),
                about: "Figma".into(),
                contact: "@me".into(),
                resume_link: None,
            }),
        }
    }

    #[tokio::test]
    async fn compare_and_swap_only_moves_from_expected_status() {
        let repo = InMemoryRepository::new();
        let user = repo.get_or_create_user(&Sender::new(7, None)).await.unwrap();
        let posting = repo.create_posting(user.id, None, &resume()).await.unwrap();

        assert!(!repo
            .transition_status(posting.id, PostingStatus::Approved, PostingStatus::Published)
            .await
            .unwrap());
        assert!(repo
            .transition_status(posting.id, PostingStatus::Pending, PostingStatus::Rejected)
            .await
            .unwrap());
        assert!(!repo
            .transition_status(posting.id, PostingStatus::Pending, PostingStatus::Approved)
            .await
            .unwrap());

        let stored = repo.get_posting(posting.id).await.unwrap().unwrap();
        assert_eq!(stored.posting.status, PostingStatus::Rejected);
        assert_eq!(stored.author_telegram_id, 7);
    }

    #[tokio::test]
    async fn failed_posting_insert_leaves_no_company_behind() {
        let repo = InMemoryRepository::new();
        let company = NewCompany {
            user_id: Uuid::new_v4(),
            name: "Acme".into(),
            contact: "@acme_hr".into(),
        };

        let result = repo
            .create_posting(Uuid::new_v4(), Some(company.clone()), &resume())
            .await;
        assert!(result.is_err());
        assert!(repo.companies().await.is_empty());

        let user = repo.get_or_create_user(&Sender::new(3, None)).await.unwrap();
        let posting = repo
            .create_posting(user.id, Some(NewCompany { user_id: user.id, ..company }), &resume())
            .await
            .unwrap();
        let companies = repo.companies().await;
        assert_eq!(companies.len(), 1);
        assert_eq!(posting.company_id, Some(companies[0].id));
    }

    #[tokio::test]
    async fn users_are_created_once_per_telegram_id() {
        let repo = InMemoryRepository::new();
        let first = repo.get_or_create_user(&Sender::new(1, None)).await.unwrap();
        let second = repo
            .get_or_create_user(&Sender::new(1, Some("alice".into())))
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.username.as_deref(), Some("alice"));
    }
}
