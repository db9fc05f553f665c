mod common;

use bridgejob_backend::dto::telegram_dto::TelegramUpdate;
use bridgejob_backend::models::callback::{CallbackAction, UserAction};
use bridgejob_backend::models::draft::DraftKind;
use bridgejob_backend::models::posting::{
    Category, Language, Level, PostType, PostingContent, PostingStatus, WorkFormat,
};
use bridgejob_backend::models::session::{ConversationState, Step};
use bridgejob_backend::utils::i18n::{EN, RU};
use common::{config_with, vacancy, Harness, AUTHOR_ID};
use serde_json::json;

fn text_update(user_id: i64, text: &str) -> TelegramUpdate {
    serde_json::from_value(json!({
        "update_id": 1,
        "message": {
            "message_id": 10,
            "from": { "id": user_id, "first_name": "Ann", "username": "jobposter" },
            "chat": { "id": user_id, "type": "private" },
            "text": text,
        }
    }))
    .unwrap()
}

fn document_update(user_id: i64) -> TelegramUpdate {
    serde_json::from_value(json!({
        "update_id": 2,
        "message": {
            "message_id": 11,
            "from": { "id": user_id, "first_name": "Ann" },
            "chat": { "id": user_id, "type": "private" },
            "document": { "file_id": "cv.pdf" },
        }
    }))
    .unwrap()
}

fn button_update(user_id: i64, action: CallbackAction) -> TelegramUpdate {
    serde_json::from_value(json!({
        "update_id": 3,
        "callback_query": {
            "id": format!("cb-{}", user_id),
            "from": { "id": user_id, "first_name": "Ann", "username": "jobposter" },
            "message": {
                "message_id": 12,
                "chat": { "id": user_id, "type": "private" },
                "text": "prompt",
            },
            "data": action.encode(),
        }
    }))
    .unwrap()
}

async fn say(h: &Harness, text: &str) {
    h.state.bot.handle_update(text_update(AUTHOR_ID, text)).await.unwrap();
}

async fn press(h: &Harness, action: UserAction) {
    h.state
        .bot
        .handle_update(button_update(AUTHOR_ID, CallbackAction::Conversation(action)))
        .await
        .unwrap();
}

fn last_text(h: &Harness) -> String {
    h.transport.last_to(AUTHOR_ID).expect("a reply").text
}

async fn state(h: &Harness) -> ConversationState {
    h.state
        .conversation
        .sessions()
        .snapshot(AUTHOR_ID)
        .await
        .map(|s| s.state)
        .unwrap_or_default()
}

async fn vacancy_up_to_salary_to(h: &Harness) {
    say(h, "/post_job").await;
    press(h, UserAction::ChoosePostType(PostType::Vacancy)).await;
    say(h, "Acme").await;
    say(h, "@acme_hr").await;
    say(h, "Backend Engineer").await;
    press(h, UserAction::ChooseLevel(Some(Level::Senior))).await;
    press(h, UserAction::ChooseWorkFormat(WorkFormat::Remote)).await;
    press(h, UserAction::ChooseCategory(Category::Web2)).await;
    say(h, "Build and run payment services in Rust.").await;
    say(h, "4000").await;
    assert_eq!(state(h).await, ConversationState::Collecting(Step::SalaryTo));
}

#[tokio::test]
async fn vacancy_conversation_submits_exactly_what_was_typed() {
    let h = Harness::new();
    vacancy_up_to_salary_to(&h).await;
    say(&h, "6000").await;
    say(&h, "https://acme.example/apply").await;

    assert_eq!(state(&h).await, ConversationState::Preview);
    let preview = h.transport.last_to(AUTHOR_ID).unwrap();
    assert!(preview.text.contains("Backend Engineer"));
    assert!(preview.keyboard.is_some());

    press(&h, UserAction::Submit).await;

    let mine = h.state.postings.list_by_author(AUTHOR_ID).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].status, PostingStatus::Pending);
    assert_eq!(mine[0].content, vacancy().content);
    assert_eq!(h.notifier.notified(), vec![mine[0].id]);
    assert!(last_text(&h).contains(&mine[0].id.to_string()));

    // idle sessions are dropped
    assert!(h.state.conversation.sessions().is_empty());
}

#[tokio::test]
async fn salary_to_below_from_reprompts_and_keeps_from() {
    let h = Harness::new();
    vacancy_up_to_salary_to(&h).await;

    say(&h, "3000").await;
    assert_eq!(last_text(&h), EN.salary_to_less_than_from);
    let session = h.state.conversation.sessions().snapshot(AUTHOR_ID).await.unwrap();
    assert_eq!(session.state, ConversationState::Collecting(Step::SalaryTo));
    let draft = session.draft.unwrap();
    assert_eq!(draft.salary.from, Some(4000));
    assert_eq!(draft.salary.to, None);
    assert!(h.state.postings.list_by_author(AUTHOR_ID).await.unwrap().is_empty());

    say(&h, "6000").await;
    assert_eq!(state(&h).await, ConversationState::Collecting(Step::ApplyLink));
}

#[tokio::test]
async fn resume_link_must_be_a_link_or_skipped() {
    let h = Harness::new();
    say(&h, "/post").await;
    press(&h, UserAction::ChoosePostType(PostType::Resume)).await;
    say(&h, "Product Designer").await;
    say(&h, "skip").await;
    say(&h, "3.5").await;
    say(&h, "hybrid").await;
    say(&h, "full-time").await;
    say(&h, "-").await;
    assert_eq!(last_text(&h), EN.invalid_number);
    say(&h, "пропустить").await;
    say(&h, "Skip").await;
    say(&h, "Figma, design systems").await;
    say(&h, "@designer").await;
    assert_eq!(state(&h).await, ConversationState::Collecting(Step::ResumeLink));

    say(&h, "not-a-url").await;
    assert_eq!(last_text(&h), EN.only_links_allowed);
    h.state.bot.handle_update(document_update(AUTHOR_ID)).await.unwrap();
    assert_eq!(last_text(&h), EN.only_links_allowed);

    let session = h.state.conversation.sessions().snapshot(AUTHOR_ID).await.unwrap();
    assert_eq!(session.state, ConversationState::Collecting(Step::ResumeLink));
    let draft = session.draft.unwrap();
    assert_eq!(draft.title.as_deref(), Some("Product Designer"));
    assert_eq!(draft.level, None);
    match &draft.kind {
        DraftKind::Resume(resume) => {
            assert_eq!(resume.experience_years, Some(3.5));
            assert_eq!(resume.contact.as_deref(), Some("@designer"));
            assert!(resume.resume_link.is_none());
        }
        DraftKind::Vacancy(_) => panic!("resume draft expected"),
    }

    press(&h, UserAction::SkipResumeLink).await;
    assert_eq!(state(&h).await, ConversationState::Preview);

    say(&h, "looks good").await;
    assert_eq!(last_text(&h), EN.use_preview_buttons);
    assert_eq!(state(&h).await, ConversationState::Preview);

    press(&h, UserAction::Submit).await;
    let mine = h.state.postings.list_by_author(AUTHOR_ID).await.unwrap();
    match &mine[0].content {
        PostingContent::Resume(resume) => {
            assert!(resume.resume_link.is_none());
            assert_eq!(resume.salary.from, None);
            assert_eq!(resume.salary.to, None);
        }
        PostingContent::Vacancy(_) => panic!("resume expected"),
    }
}

#[tokio::test]
async fn cancel_discards_the_draft_from_any_step() {
    let h = Harness::new();
    vacancy_up_to_salary_to(&h).await;
    say(&h, "/cancel").await;

    assert_eq!(last_text(&h), EN.cancelled);
    assert_eq!(state(&h).await, ConversationState::Idle);
    assert!(h.state.conversation.sessions().is_empty());
    assert!(h.notifier.notified().is_empty());
}

#[tokio::test]
async fn stale_buttons_and_expired_previews_are_harmless() {
    let h = Harness::new();

    press(&h, UserAction::ChooseWorkFormat(WorkFormat::Remote)).await;
    assert_eq!(last_text(&h), EN.stale_action);

    press(&h, UserAction::Submit).await;
    assert_eq!(last_text(&h), EN.session_expired);
    assert!(h.notifier.notified().is_empty());

    say(&h, "/post_job").await;
    press(&h, UserAction::ChoosePostType(PostType::Vacancy)).await;
    press(&h, UserAction::ChooseCategory(Category::Web3)).await;
    assert_eq!(last_text(&h), EN.stale_action);
    assert_eq!(state(&h).await, ConversationState::Collecting(Step::Company));

    // every button press is acknowledged
    assert_eq!(h.transport.answers().len(), 4);
}

#[tokio::test]
async fn info_commands_follow_language_and_configured_contacts() {
    let h = Harness::with_config(config_with(&[("SUPPORT_CONTACTS", "@hr_lead, ops_desk")]));
    h.state
        .bot
        .handle_update(button_update(AUTHOR_ID, CallbackAction::InterfaceLanguage(Language::Ru)))
        .await
        .unwrap();

    say(&h, "/contact").await;
    let contact = last_text(&h);
    assert!(contact.starts_with("📩 *Связь с администратором:*"));
    assert!(contact.contains("👤 @hr\\_lead\n👤 @ops\\_desk"));

    say(&h, "/pricing").await;
    assert!(last_text(&h).contains("@hr\\_lead | @ops\\_desk"));

    say(&h, "/faq").await;
    assert_eq!(last_text(&h), RU.faq);
}

#[tokio::test]
async fn language_preference_drives_the_conversation() {
    let h = Harness::new();
    h.state
        .bot
        .handle_update(button_update(AUTHOR_ID, CallbackAction::InterfaceLanguage(Language::Ru)))
        .await
        .unwrap();
    assert_eq!(last_text(&h), RU.language_set);

    say(&h, "/post_job").await;
    assert_eq!(last_text(&h), RU.choose_post_type);
    press(&h, UserAction::ChoosePostType(PostType::Resume)).await;

    let session = h.state.conversation.sessions().snapshot(AUTHOR_ID).await.unwrap();
    assert_eq!(session.draft.unwrap().language, Language::Ru);
}

#[tokio::test]
async fn commands_outside_the_form() {
    let h = Harness::new();

    say(&h, "/start").await;
    assert_eq!(last_text(&h), EN.welcome);

    say(&h, "/myjobs").await;
    assert_eq!(last_text(&h), EN.no_posts);

    say(&h, "/stats").await;
    assert_eq!(last_text(&h), EN.no_permission);

    say(&h, "/faq").await;
    assert_eq!(last_text(&h), EN.faq);

    say(&h, "/about").await;
    assert_eq!(last_text(&h), EN.about);

    say(&h, "/prices").await;
    let prices = last_text(&h);
    say(&h, "/pricing").await;
    assert_eq!(last_text(&h), prices);
    assert!(prices.contains("$25"));
    assert!(prices.contains("@BridgeJob"));

    say(&h, "/contact").await;
    assert!(last_text(&h).contains("👤 @BridgeJob"));

    say(&h, "/help").await;
    for command in ["/pricing", "/faq", "/about", "/contact"] {
        assert!(last_text(&h).contains(command), "{command} listed in help");
    }

    say(&h, "/frobnicate").await;
    assert_eq!(last_text(&h), EN.unknown_command);

    say(&h, "hello").await;
    assert_eq!(last_text(&h), EN.idle_hint);
}
