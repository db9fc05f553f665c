#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use bridgejob_backend::config::Config;
use bridgejob_backend::database::InMemoryRepository;
use bridgejob_backend::error::{Error, Result};
use bridgejob_backend::models::keyboard::Keyboard;
use bridgejob_backend::models::posting::{
    Category, Employment, Language, Level, NewPosting, Posting, PostingContent, PostingWithAuthor,
    ResumeContent, SalaryRange, VacancyContent, WorkFormat,
};
use bridgejob_backend::models::user::Sender;
use bridgejob_backend::services::notification_service::AdminNotifier;
use bridgejob_backend::services::publisher_service::Publisher;
use bridgejob_backend::services::telegram_service::ChatTransport;
use bridgejob_backend::AppState;

pub const ADMIN_ID: i64 = 900;
pub const AUTHOR_ID: i64 = 501;
pub const STRANGER_ID: i64 = 777;

#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edit {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: String,
    pub keyboard: Keyboard,
}

/// Chat transport that remembers everything it was asked to do.
#[derive(Default)]
pub struct RecordingTransport {
    next_id: AtomicI64,
    sent: Mutex<Vec<Sent>>,
    edits: Mutex<Vec<Edit>>,
    answers: Mutex<Vec<(String, Option<String>)>>,
}

impl RecordingTransport {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: i64) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| s.chat_id == chat_id)
            .collect()
    }

    pub fn last_to(&self, chat_id: i64) -> Option<Sent> {
        self.sent_to(chat_id).pop()
    }

    pub fn edits(&self) -> Vec<Edit> {
        self.edits.lock().unwrap().clone()
    }

    pub fn answers(&self) -> Vec<(String, Option<String>)> {
        self.answers.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
        self.edits.lock().unwrap().clear();
        self.answers.lock().unwrap().clear();
    }

    fn record(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> i64 {
        let message_id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent.lock().unwrap().push(Sent {
            chat_id,
            message_id,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        message_id
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i64> {
        Ok(self.record(chat_id, text, None))
    }

    async fn send_with_controls(&self, chat_id: i64, text: &str, keyboard: &Keyboard) -> Result<i64> {
        Ok(self.record(chat_id, text, Some(keyboard)))
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: &Keyboard,
    ) -> Result<()> {
        self.edits.lock().unwrap().push(Edit {
            chat_id,
            message_id,
            text: text.to_string(),
            keyboard: keyboard.clone(),
        });
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, text: Option<&str>) -> Result<()> {
        self.answers
            .lock()
            .unwrap()
            .push((callback_id.to_string(), text.map(str::to_string)));
        Ok(())
    }
}

/// Channel stand-in with a switch to make publishing fail.
pub struct RecordingPublisher {
    next_id: AtomicI64,
    failing: AtomicBool,
    published: Mutex<Vec<(Uuid, i64)>>,
    deleted: Mutex<Vec<i64>>,
}

impl Default for RecordingPublisher {
    fn default() -> Self {
        Self {
            next_id: AtomicI64::new(1000),
            failing: AtomicBool::new(false),
            published: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingPublisher {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn published(&self) -> Vec<(Uuid, i64)> {
        self.published.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<i64> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, posting: &PostingWithAuthor) -> Result<i64> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Telegram("Bad Request: chat not found".to_string()));
        }
        let message_id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.published
            .lock()
            .unwrap()
            .push((posting.posting.id, message_id));
        Ok(message_id)
    }

    async fn delete(&self, channel_message_id: i64) -> Result<()> {
        self.deleted.lock().unwrap().push(channel_message_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notified: Mutex<Vec<Uuid>>,
}

impl RecordingNotifier {
    pub fn notified(&self) -> Vec<Uuid> {
        self.notified.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdminNotifier for RecordingNotifier {
    async fn notify_new_submission(&self, posting: &Posting) {
        self.notified.lock().unwrap().push(posting.id);
    }
}

pub fn config_with(overrides: &[(&str, &str)]) -> Arc<Config> {
    let mut vars: Vec<(String, String)> = vec![
        ("SERVER_ADDRESS", "127.0.0.1:0"),
        ("DATABASE_URL", "postgres://localhost/unused"),
        ("TELEGRAM_BOT_TOKEN", "123:test-token"),
        ("CHANNEL_ID", "-1001234567890"),
        ("ADMIN_TELEGRAM_IDS", "900"),
        ("DEFAULT_LANGUAGE", "en"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    for (key, value) in overrides {
        vars.retain(|(k, _)| k != key);
        vars.push((key.to_string(), value.to_string()));
    }
    let config = Config::from_lookup(|name| {
        vars.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    })
    .expect("test config");
    Arc::new(config)
}

pub fn config() -> Arc<Config> {
    config_with(&[])
}

pub struct Harness {
    pub state: AppState,
    pub repo: Arc<InMemoryRepository>,
    pub transport: Arc<RecordingTransport>,
    pub publisher: Arc<RecordingPublisher>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(config())
    }

    pub fn with_config(config: Arc<Config>) -> Self {
        let repo = Arc::new(InMemoryRepository::new());
        let transport = Arc::new(RecordingTransport::default());
        let publisher = Arc::new(RecordingPublisher::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let state = AppState::from_parts(
            repo.clone(),
            publisher.clone(),
            notifier.clone(),
            transport.clone(),
            config,
        );
        Self {
            state,
            repo,
            transport,
            publisher,
            notifier,
        }
    }

    pub async fn submit(&self, posting: NewPosting) -> Posting {
        self.state
            .postings
            .submit(&author(), posting)
            .await
            .expect("submit")
    }

    /// Submitted and approved, i.e. live in the channel.
    pub async fn published(&self, posting: NewPosting) -> Posting {
        let created = self.submit(posting).await;
        self.state
            .postings
            .approve(created.id, ADMIN_ID)
            .await
            .expect("approve")
    }
}

pub fn author() -> Sender {
    Sender::new(AUTHOR_ID, Some("jobposter".to_string()))
}

pub fn vacancy() -> NewPosting {
    NewPosting {
        language: Language::En,
        content: PostingContent::Vacancy(VacancyContent {
            company: "Acme".to_string(),
            contact: "@acme_hr".to_string(),
            title: "Backend Engineer".to_string(),
            level: Some(Level::Senior),
            work_format: WorkFormat::Remote,
            category: Category::Web2,
            salary: SalaryRange {
                from: Some(4000),
                to: Some(6000),
            },
            description: "Build and run payment services in Rust.".to_string(),
            apply_link: "https://acme.example/apply".to_string(),
        }),
    }
}

pub fn resume(language: Language) -> NewPosting {
    NewPosting {
        language,
        content: PostingContent::Resume(ResumeContent {
            title: "Product Designer".to_string(),
            level: Some(Level::Middle),
            experience_years: Some(3.5),
            work_format: WorkFormat::Hybrid,
            employment: Employment::FullTime,
            salary: SalaryRange {
                from: Some(2000),
                to: None,
            },
            about: "Figma, design systems, user research.".to_string(),
            contact: "@designer".to_string(),
            resume_link: Some("https://cv.example/designer".to_string()),
        }),
    }
}
