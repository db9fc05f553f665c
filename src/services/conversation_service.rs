//! Posting form conversation.
//!
//! [`advance`] is the whole state machine: it takes one input, mutates the
//! session and says what to answer. It performs no I/O, which keeps the
//! per-user lock short. [`ConversationService`] wraps it with the lookups,
//! sends and the hand-off to the posting lifecycle.

use std::sync::Arc;

use crate::error::Result;
use crate::models::callback::UserAction;
use crate::models::draft::Draft;
use crate::models::keyboard::Keyboard;
use crate::models::posting::{Language, NewPosting, PostType};
use crate::models::session::{next_step, step_number, track, ConversationState, Step, UserSession};
use crate::models::user::Sender;
use crate::services::posting_service::PostingService;
use crate::services::session_store::{SessionHandle, SessionStore};
use crate::services::telegram_service::ChatTransport;
use crate::utils::i18n::{fill, messages, Messages};
use crate::utils::render;
use crate::utils::validation::{self, StepError};

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// `/post_job` or `/post`
    Start,
    /// `/cancel`
    Cancel,
    Text(String),
    /// Photo, document or any other non-text message.
    Attachment,
    Action(UserAction),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// The user confirmed the preview. `draft` is kept so the session can be
    /// restored if persisting fails.
    Submit { draft: Draft, posting: NewPosting },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    pub replies: Vec<Reply>,
    pub effect: Option<Effect>,
}

impl Outcome {
    fn reply(reply: Reply) -> Self {
        Self {
            replies: vec![reply],
            effect: None,
        }
    }
}

enum Rejection {
    Invalid(StepError),
    /// Draft does not belong to the track the step came from.
    OutOfSync,
}

impl From<StepError> for Rejection {
    fn from(err: StepError) -> Self {
        Rejection::Invalid(err)
    }
}

fn step_error_text(m: &Messages, err: StepError) -> &'static str {
    match err {
        StepError::ChooseFromButtons => m.choose_from_buttons,
        StepError::InvalidNumber => m.invalid_number,
        StepError::InvalidExperience => m.invalid_experience,
        StepError::SalaryToLessThanFrom => m.salary_to_less_than_from,
        StepError::OnlyLinksAllowed => m.only_links_allowed,
        StepError::EmptyText => m.empty_text,
        StepError::TextExpected => m.text_expected,
    }
}

fn step_keyboard(step: Step, lang: Language) -> Option<Keyboard> {
    match step {
        Step::Level => Some(render::level_keyboard(lang)),
        Step::WorkFormat => Some(render::work_format_keyboard()),
        Step::Category => Some(render::category_keyboard(lang)),
        Step::Employment => Some(render::employment_keyboard(lang)),
        Step::ResumeLink => Some(render::resume_link_keyboard(lang)),
        _ => None,
    }
}

fn step_text(m: &Messages, post_type: PostType, step: Step) -> &'static str {
    let vacancy = post_type == PostType::Vacancy;
    match step {
        Step::Company => m.vac_company,
        Step::AuthorContact => m.vac_contact,
        Step::Title if vacancy => m.vac_title,
        Step::Title => m.res_title,
        Step::Level if vacancy => m.vac_level,
        Step::Level => m.res_level,
        Step::WorkFormat if vacancy => m.vac_format,
        Step::WorkFormat => m.res_format,
        Step::Category => m.vac_category,
        Step::Description => m.vac_description,
        Step::SalaryFrom if vacancy => m.vac_salary_from,
        Step::SalaryFrom => m.res_salary_from,
        Step::SalaryTo if vacancy => m.vac_salary_to,
        Step::SalaryTo => m.res_salary_to,
        Step::ApplyLink => m.vac_apply_link,
        Step::ExperienceYears => m.res_experience,
        Step::Employment => m.res_employment,
        Step::About => m.res_about,
        Step::Contact => m.res_contact,
        Step::ResumeLink => m.res_link,
    }
}

fn prompt(post_type: PostType, step: Step, lang: Language) -> Reply {
    let m = messages(lang);
    let text = render::step_prompt(m, step_number(post_type, step), step_text(m, post_type, step));
    Reply {
        text,
        keyboard: step_keyboard(step, lang),
    }
}

fn apply_text(draft: &mut Draft, step: Step, text: &str) -> std::result::Result<(), Rejection> {
    match step {
        Step::Title => draft.title = Some(validation::require_text(text)?),
        Step::Level => draft.level = validation::parse_level(text)?,
        Step::WorkFormat => draft.work_format = Some(validation::parse_work_format(text)?),
        Step::SalaryFrom => draft.salary.from = validation::parse_salary(text)?,
        Step::SalaryTo => {
            let to = validation::parse_salary(text)?;
            validation::check_salary_order(draft.salary.from, to)?;
            draft.salary.to = to;
        }
        Step::Company | Step::AuthorContact | Step::Category | Step::Description | Step::ApplyLink => {
            let vacancy = draft.vacancy_mut().ok_or(Rejection::OutOfSync)?;
            match step {
                Step::Company => vacancy.company = Some(validation::require_text(text)?),
                Step::AuthorContact => vacancy.contact = Some(validation::require_text(text)?),
                Step::Category => vacancy.category = Some(validation::parse_category(text)?),
                Step::Description => vacancy.description = Some(validation::require_text(text)?),
                _ => vacancy.apply_link = Some(validation::require_text(text)?),
            }
        }
        Step::ExperienceYears | Step::Employment | Step::About | Step::Contact | Step::ResumeLink => {
            let resume = draft.resume_mut().ok_or(Rejection::OutOfSync)?;
            match step {
                Step::ExperienceYears => resume.experience_years = validation::parse_experience(text)?,
                Step::Employment => resume.employment = Some(validation::parse_employment(text)?),
                Step::About => resume.about = Some(validation::require_text(text)?),
                Step::Contact => resume.contact = Some(validation::require_text(text)?),
                _ => resume.resume_link = validation::parse_resume_link(text)?,
            }
        }
    }
    Ok(())
}

/// Applies a button choice. `Ok(false)` means the button does not belong to
/// the current step.
fn apply_action(draft: &mut Draft, step: Step, action: UserAction) -> std::result::Result<bool, Rejection> {
    match (step, action) {
        (Step::Level, UserAction::ChooseLevel(level)) => draft.level = level,
        (Step::WorkFormat, UserAction::ChooseWorkFormat(format)) => draft.work_format = Some(format),
        (Step::Category, UserAction::ChooseCategory(category)) => {
            draft.vacancy_mut().ok_or(Rejection::OutOfSync)?.category = Some(category)
        }
        (Step::Employment, UserAction::ChooseEmployment(employment)) => {
            draft.resume_mut().ok_or(Rejection::OutOfSync)?.employment = Some(employment)
        }
        (Step::ResumeLink, UserAction::SkipResumeLink) => {
            draft.resume_mut().ok_or(Rejection::OutOfSync)?.resume_link = None
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn restart(session: &mut UserSession, m: &Messages) -> Outcome {
    session.reset();
    Outcome::reply(Reply::text(m.session_expired))
}

/// Moves the session past `step`: either to the next prompt or to the preview.
fn step_completed(session: &mut UserSession, step: Step) -> Outcome {
    let Some(draft) = session.draft.as_ref() else {
        return restart(session, messages(session.language));
    };
    let lang = draft.language;
    let post_type = draft.post_type();

    if let Some(next) = next_step(post_type, step) {
        session.state = ConversationState::Collecting(next);
        return Outcome::reply(prompt(post_type, next, lang));
    }

    match draft.to_new_posting() {
        Ok(posting) => {
            session.state = ConversationState::Preview;
            Outcome::reply(Reply::with_keyboard(
                render::preview(&posting.content, lang),
                render::preview_keyboard(lang),
            ))
        }
        Err(err) => {
            tracing::warn!(error = %err, "Draft incomplete at preview");
            restart(session, messages(lang))
        }
    }
}

fn collecting(session: &mut UserSession, step: Step, input: Input) -> Outcome {
    let Some(draft) = session.draft.as_mut() else {
        return restart(session, messages(session.language));
    };
    let lang = draft.language;
    let m = messages(lang);

    let applied = match input {
        Input::Text(text) => apply_text(draft, step, &text).map(|_| true),
        Input::Attachment if step == Step::ResumeLink => {
            Err(Rejection::Invalid(StepError::OnlyLinksAllowed))
        }
        Input::Attachment => Err(Rejection::Invalid(StepError::TextExpected)),
        Input::Action(action) => apply_action(draft, step, action),
        Input::Start | Input::Cancel => Ok(false),
    };

    match applied {
        Ok(true) => step_completed(session, step),
        Ok(false) => Outcome::reply(Reply::text(m.stale_action)),
        Err(Rejection::Invalid(err)) => {
            let mut reply = Reply::text(step_error_text(m, err));
            if err == StepError::ChooseFromButtons {
                reply.keyboard = step_keyboard(step, lang);
            }
            Outcome::reply(reply)
        }
        Err(Rejection::OutOfSync) => restart(session, m),
    }
}

/// Feeds one input into the session. `interface_language` is the user's
/// current UI language; an active draft keeps the language it started with.
pub fn advance(session: &mut UserSession, input: Input, interface_language: Language) -> Outcome {
    match input {
        Input::Start => {
            session.reset();
            session.language = interface_language;
            session.state = ConversationState::AwaitingPostType;
            let m = messages(interface_language);
            return Outcome::reply(Reply::with_keyboard(
                m.choose_post_type,
                render::post_type_keyboard(interface_language),
            ));
        }
        Input::Cancel => {
            let lang = session
                .draft
                .as_ref()
                .map(|d| d.language)
                .unwrap_or(interface_language);
            session.reset();
            return Outcome::reply(Reply::text(messages(lang).cancelled));
        }
        _ => {}
    }

    match session.state {
        ConversationState::Idle => idle(session, input, interface_language),
        ConversationState::AwaitingPostType => awaiting_post_type(session, input, interface_language),
        ConversationState::Collecting(step) => collecting(session, step, input),
        ConversationState::Preview => preview(session, input),
    }
}

fn idle(session: &mut UserSession, input: Input, lang: Language) -> Outcome {
    let m = messages(lang);
    match input {
        // A confirmation button from a preview whose session is gone.
        Input::Action(UserAction::Submit) => restart(session, m),
        Input::Action(_) => Outcome::reply(Reply::text(m.stale_action)),
        _ => Outcome::reply(Reply::text(m.idle_hint)),
    }
}

fn awaiting_post_type(session: &mut UserSession, input: Input, lang: Language) -> Outcome {
    match input {
        Input::Action(UserAction::ChoosePostType(post_type)) => {
            session.language = lang;
            session.draft = Some(Draft::new(post_type, lang));
            let first = track(post_type)[0];
            session.state = ConversationState::Collecting(first);
            Outcome::reply(prompt(post_type, first, lang))
        }
        Input::Action(_) => Outcome::reply(Reply::text(messages(session.language).stale_action)),
        _ => {
            let lang = session.language;
            Outcome::reply(Reply::with_keyboard(
                messages(lang).use_type_buttons,
                render::post_type_keyboard(lang),
            ))
        }
    }
}

fn preview(session: &mut UserSession, input: Input) -> Outcome {
    let lang = session
        .draft
        .as_ref()
        .map(|d| d.language)
        .unwrap_or(session.language);
    let m = messages(lang);

    match input {
        Input::Action(UserAction::Submit) => {
            let Some(draft) = session.draft.take() else {
                return restart(session, m);
            };
            session.reset();
            match draft.to_new_posting() {
                Ok(posting) => Outcome {
                    replies: Vec::new(),
                    effect: Some(Effect::Submit { draft, posting }),
                },
                Err(err) => {
                    tracing::warn!(error = %err, "Draft incomplete at submit");
                    Outcome::reply(Reply::text(m.session_expired))
                }
            }
        }
        Input::Action(UserAction::CancelSubmit) => {
            session.reset();
            Outcome::reply(Reply::text(m.cancelled))
        }
        Input::Action(_) => Outcome::reply(Reply::text(m.stale_action)),
        _ => Outcome::reply(Reply::text(m.use_preview_buttons)),
    }
}

/// Runs the conversation for inbound chat events.
#[derive(Clone)]
pub struct ConversationService {
    sessions: Arc<SessionStore>,
    postings: PostingService,
    transport: Arc<dyn ChatTransport>,
}

impl ConversationService {
    pub fn new(
        sessions: Arc<SessionStore>,
        postings: PostingService,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            sessions,
            postings,
            transport,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Stored preference, or the configured default.
    pub async fn interface_language(&self, telegram_id: i64) -> Language {
        let default = self.postings.config().default_language;
        match self.postings.repository().get_user(telegram_id).await {
            Ok(user) => user.and_then(|u| u.interface_language).unwrap_or(default),
            Err(e) => {
                tracing::warn!(user_id = telegram_id, error = %e, "Failed to load interface language");
                default
            }
        }
    }

    pub async fn handle(&self, sender: &Sender, chat_id: i64, input: Input) -> Result<()> {
        let user_id = sender.telegram_id;
        let lang = self.interface_language(user_id).await;

        let handle = self.sessions.handle(user_id, lang);
        let outcome = {
            let mut session = handle.lock().await;
            advance(&mut session, input, lang)
        };

        self.send_replies(chat_id, &outcome.replies).await;

        if let Some(Effect::Submit { draft, posting }) = outcome.effect {
            self.submit(sender, chat_id, &handle, draft, posting).await;
        }

        drop(handle);
        self.sessions.release(user_id);
        Ok(())
    }

    async fn submit(
        &self,
        sender: &Sender,
        chat_id: i64,
        handle: &SessionHandle,
        draft: Draft,
        posting: NewPosting,
    ) {
        let lang = draft.language;
        let m = messages(lang);
        match self.postings.submit(sender, posting).await {
            Ok(created) => {
                let template = match created.post_type() {
                    PostType::Vacancy => m.submit_vacancy_success,
                    PostType::Resume => m.submit_resume_success,
                };
                let text = fill(template, &[("id", &created.id.to_string())]);
                self.send_replies(chat_id, &[Reply::text(text)]).await;
            }
            Err(e) => {
                tracing::error!(user_id = sender.telegram_id, error = %e, "Failed to persist submission");
                {
                    let mut session = handle.lock().await;
                    // Keep whatever the user started in the meantime.
                    if session.is_idle() {
                        session.language = lang;
                        session.draft = Some(draft);
                        session.state = ConversationState::Preview;
                    }
                }
                self.send_replies(
                    chat_id,
                    &[Reply::with_keyboard(m.submit_error, render::preview_keyboard(lang))],
                )
                .await;
            }
        }
    }

    async fn send_replies(&self, chat_id: i64, replies: &[Reply]) {
        for reply in replies {
            let sent = match &reply.keyboard {
                Some(keyboard) => {
                    self.transport
                        .send_with_controls(chat_id, &reply.text, keyboard)
                        .await
                }
                None => self.transport.send_text(chat_id, &reply.text).await,
            };
            if let Err(e) = sent {
                tracing::warn!(chat_id, error = %e, "Failed to send reply");
            }
        }
    }
}
