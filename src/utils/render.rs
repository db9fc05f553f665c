//! Text and keyboard rendering for everything the bot shows.
//!
//! User-typed values are always passed through [`escape_markdown`] before
//! they are placed into a Markdown template.

use uuid::Uuid;

use crate::models::callback::{CallbackAction, ModerationAction, ModerationKind, UserAction};
use crate::models::keyboard::{Button, Keyboard};
use crate::models::posting::{
    Category, Employment, Language, Level, PostType, Posting, PostingContent, ResumeContent,
    SalaryRange, Stats, VacancyContent, WorkFormat,
};
use crate::utils::i18n::{self, fill, messages, Messages};

pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '_' | '*' | '[' | ']' | '`') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

pub fn salary_display(salary: &SalaryRange, m: &Messages) -> String {
    match (salary.from, salary.to) {
        (Some(from), Some(to)) => format!("${} – ${}", from, to),
        (Some(from), None) => fill(m.salary_from, &[("value", &from.to_string())]),
        (None, Some(to)) => fill(m.salary_to, &[("value", &to.to_string())]),
        (None, None) => m.salary_not_specified.to_string(),
    }
}

pub fn level_display(level: Option<Level>, m: &Messages) -> String {
    match level {
        Some(level) => capitalize(level.as_str()),
        None => m.not_specified.to_string(),
    }
}

pub fn experience_display(years: Option<f64>, m: &Messages) -> String {
    match years {
        Some(years) => format!("{:.1} {}", years, m.years),
        None => m.not_specified.to_string(),
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn level_emoji(level: Option<Level>) -> &'static str {
    match level {
        Some(Level::Junior) => "🌱",
        Some(Level::Middle) => "🌿",
        Some(Level::Senior) => "🌳",
        Some(Level::Internship) => "🎓",
        None => "📊",
    }
}

fn work_format_emoji(format: WorkFormat) -> &'static str {
    match format {
        WorkFormat::Remote => "🌍",
        WorkFormat::Hybrid => "🏢🏠",
        WorkFormat::Onsite => "🏢",
    }
}

fn category_emoji(category: Category) -> &'static str {
    match category {
        Category::Web2 => "🌐",
        Category::Web3 => "⛓️",
        Category::Dev => "💻",
    }
}

fn language_flag(lang: Language) -> &'static str {
    match lang {
        Language::Ru => "🇷🇺 RU",
        Language::En => "🇬🇧 EN",
    }
}

/// "*Step 3/10:* prompt"
pub fn step_prompt(m: &Messages, position: Option<(usize, usize)>, prompt: &str) -> String {
    match position {
        Some((n, total)) => format!("*{} {}/{}:* {}", m.step, n, total, prompt),
        None => prompt.to_string(),
    }
}

/// Summary shown before the user confirms a submission.
pub fn preview(content: &PostingContent, lang: Language) -> String {
    let m = messages(lang);
    match content {
        PostingContent::Vacancy(v) => format!(
            "{}\n\n🏢 *{}:* {}\n📧 *{}:* {}\n💼 *{}:* {}\n📊 *{}:* {}\n🌍 *{}:* {}\n🏷️ *{}:* {}\n💰 *{}:* {}\n🔗 *{}:* {}\n\n📝 *{}:*\n{}\n\n———\n{}",
            m.vac_preview_title,
            m.company_label, escape_markdown(&v.company),
            m.contact_label, escape_markdown(&v.contact),
            m.title_label, escape_markdown(&v.title),
            m.level_label, level_display(v.level, m),
            m.format_label, v.work_format.as_str(),
            m.category_label, v.category.as_str(),
            m.salary_label, salary_display(&v.salary, m),
            m.apply_link_label, escape_markdown(&v.apply_link),
            m.description_label, escape_markdown(&v.description),
            m.preview_confirm,
        ),
        PostingContent::Resume(r) => format!(
            "{}\n\n💼 *{}:* {}\n📊 *{}:* {}\n⏱ *{}:* {}\n🌍 *{}:* {}\n🕒 *{}:* {}\n💰 *{}:* {}\n\n🧑‍💻 *{}:*\n{}\n\n📄 *{}:* {}\n🔗 *{}:* {}\n\n———\n{}",
            m.res_preview_title,
            m.title_label, escape_markdown(&r.title),
            m.level_label, level_display(r.level, m),
            m.experience_label, experience_display(r.experience_years, m),
            m.format_label, r.work_format.as_str(),
            m.employment_label, r.employment.as_str(),
            m.expectations_label, salary_display(&r.salary, m),
            m.about_label, escape_markdown(&r.about),
            m.resume_link_label, resume_link_display(r, m),
            m.contact_label, escape_markdown(&r.contact),
            m.preview_confirm,
        ),
    }
}

fn resume_link_display(resume: &ResumeContent, m: &Messages) -> String {
    match &resume.resume_link {
        Some(link) => escape_markdown(link),
        None => m.not_specified.to_string(),
    }
}

/// Moderation card sent to every admin for a fresh submission.
pub fn admin_card(posting: &Posting, lang: Language) -> String {
    let m = messages(lang);
    let body = match &posting.content {
        PostingContent::Vacancy(v) => vacancy_admin_body(v, m),
        PostingContent::Resume(r) => resume_admin_body(r, m),
    };
    let heading = match posting.post_type() {
        PostType::Vacancy => m.admin_new_vacancy,
        PostType::Resume => m.admin_new_resume,
    };
    format!(
        "{}\n\n🌐 *{}:* {}\n{}\n\n———\nID: `{}`",
        heading,
        m.language_label,
        language_flag(posting.language),
        body,
        posting.id
    )
}

fn vacancy_admin_body(v: &VacancyContent, m: &Messages) -> String {
    format!(
        "🏢 *{}:* {}\n💼 *{}:* {}\n📊 *{}:* {}\n🌍 *{}:* {}\n🏷️ *{}:* {}\n💰 *{}:* {}\n🔗 *{}:* {}\n📞 *{}:* {}\n\n📝 *{}:*\n{}",
        m.company_label, escape_markdown(&v.company),
        m.title_label, escape_markdown(&v.title),
        m.level_label, level_display(v.level, m),
        m.format_label, v.work_format.as_str(),
        m.category_label, v.category.as_str(),
        m.salary_label, salary_display(&v.salary, m),
        m.apply_link_label, escape_markdown(&v.apply_link),
        m.admin_author_contact, escape_markdown(&v.contact),
        m.description_label, escape_markdown(&v.description),
    )
}

fn resume_admin_body(r: &ResumeContent, m: &Messages) -> String {
    format!(
        "💼 *{}:* {}\n📊 *{}:* {}\n⏱ *{}:* {}\n🌍 *{}:* {}\n🕒 *{}:* {}\n💰 *{}:* {}\n📄 *{}:* {}\n📞 *{}:* {}\n\n🧑‍💻 *{}:*\n{}",
        m.position_label, escape_markdown(&r.title),
        m.level_label, level_display(r.level, m),
        m.experience_label, experience_display(r.experience_years, m),
        m.format_label, r.work_format.as_str(),
        m.employment_label, r.employment.as_str(),
        m.expectations_label, salary_display(&r.salary, m),
        m.resume_link_label, resume_link_display(r, m),
        m.contact_label, escape_markdown(&r.contact),
        m.about_label, escape_markdown(&r.about),
    )
}

/// Public channel post, labelled in the posting's own language.
pub fn channel_post(posting: &Posting) -> String {
    let m = messages(posting.language);
    match &posting.content {
        PostingContent::Vacancy(v) => format!(
            "{}\n\n*{}: {}*\n\n🏢 *{}:* {}\n{} *{}:* {}\n{} *{}:* {}\n{} *{}:* {}\n💰 *{}:* {}\n\n📝 *{}:*\n{}\n\n🔗 *{}:* {}\n\n———\n{}",
            m.channel_vacancy_tags,
            m.channel_vacancy_heading, escape_markdown(&v.title),
            m.company_label, escape_markdown(&v.company),
            level_emoji(v.level), m.level_label, level_display(v.level, m),
            work_format_emoji(v.work_format), m.format_label, v.work_format.as_str(),
            category_emoji(v.category), m.category_label, v.category.as_str(),
            m.salary_label, salary_display(&v.salary, m),
            m.description_label, escape_markdown(&v.description),
            m.apply_label, escape_markdown(&v.apply_link),
            m.channel_footer,
        ),
        PostingContent::Resume(r) => format!(
            "{}\n\n*{}: {}*\n\n{} *{}:* {}\n⏱ *{}:* {}\n{} *{}:* {}\n🕒 *{}:* {}\n💰 *{}:* {}\n\n🧑‍💻 *{}:*\n{}\n\n📄 *{}:* {}\n📞 *{}:* {}\n\n———\n{}",
            m.channel_resume_tags,
            m.channel_resume_heading, escape_markdown(&r.title),
            level_emoji(r.level), m.level_label, level_display(r.level, m),
            m.experience_label, experience_display(r.experience_years, m),
            work_format_emoji(r.work_format), m.format_label, r.work_format.as_str(),
            m.employment_label, r.employment.as_str(),
            m.expectations_label, salary_display(&r.salary, m),
            m.about_label, escape_markdown(&r.about),
            m.resume_link_label, resume_link_display(r, m),
            m.contact_label, escape_markdown(&r.contact),
            m.channel_footer,
        ),
    }
}

pub fn approved_notice(posting: &Posting) -> String {
    let m = messages(posting.language);
    let template = match posting.post_type() {
        PostType::Vacancy => m.vacancy_approved,
        PostType::Resume => m.resume_approved,
    };
    fill(template, &[("title", &escape_markdown(posting.title()))])
}

pub fn rejected_notice(posting: &Posting, reason: Option<&str>) -> String {
    let m = messages(posting.language);
    let template = match posting.post_type() {
        PostType::Vacancy => m.vacancy_rejected,
        PostType::Resume => m.resume_rejected,
    };
    let mut text = fill(template, &[("title", &escape_markdown(posting.title()))]);
    if let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) {
        text.push_str(&format!("\n\n*{}:* {}", m.rejection_reason, escape_markdown(reason)));
    }
    text
}

pub fn removed_notice(posting: &Posting) -> String {
    let m = messages(posting.language);
    let template = match posting.post_type() {
        PostType::Vacancy => m.vacancy_removed,
        PostType::Resume => m.resume_removed,
    };
    fill(template, &[("title", &escape_markdown(posting.title()))])
}

/// One line per posting for `/myjobs`.
pub fn posting_list(postings: &[Posting], lang: Language) -> String {
    let m = messages(lang);
    if postings.is_empty() {
        return m.no_posts.to_string();
    }
    let mut text = String::from(m.your_posts);
    text.push('\n');
    for posting in postings {
        let kind = match posting.post_type() {
            PostType::Vacancy => "🏢",
            PostType::Resume => "👤",
        };
        text.push_str(&format!(
            "\n{} {} *{}* — {} ({})",
            i18n::status_emoji(posting.status),
            kind,
            escape_markdown(posting.title()),
            i18n::status_text(posting.status, lang),
            posting.created_at.format("%d.%m.%Y"),
        ));
    }
    text
}

pub fn stats(stats: &Stats, lang: Language) -> String {
    let values = [
        ("total", stats.total.to_string()),
        ("pending", stats.pending.to_string()),
        ("approved", stats.approved.to_string()),
        ("published", stats.published.to_string()),
        ("rejected", stats.rejected.to_string()),
        ("archived", stats.archived.to_string()),
    ];
    let pairs: Vec<(&str, &str)> = values.iter().map(|(k, v)| (*k, v.as_str())).collect();
    fill(messages(lang).stats, &pairs)
}

/// Admin message after a moderation action: the original card plus a
/// status line. Edits of admin messages are sent without Markdown.
pub fn annotate(original: &str, annotation: &str) -> String {
    format!("{}\n\n{}", original, annotation)
}

pub fn pricing(contacts: &[String], lang: Language) -> String {
    let inline: Vec<String> = contacts.iter().map(|c| escape_markdown(c)).collect();
    fill(messages(lang).pricing, &[("contacts", &inline.join(" | "))])
}

pub fn contact_info(contacts: &[String], lang: Language) -> String {
    let lines: Vec<String> = contacts
        .iter()
        .map(|c| format!("👤 {}", escape_markdown(c)))
        .collect();
    fill(messages(lang).contact, &[("contacts", &lines.join("\n"))])
}

// keyboards

fn conversation(action: UserAction) -> CallbackAction {
    CallbackAction::Conversation(action)
}

fn moderation(kind: ModerationKind, posting_id: Uuid) -> CallbackAction {
    CallbackAction::Moderation(ModerationAction::new(kind, posting_id))
}

pub fn post_type_keyboard(lang: Language) -> Keyboard {
    let m = messages(lang);
    Keyboard::new(vec![vec![
        Button::callback(m.btn_vacancy, conversation(UserAction::ChoosePostType(PostType::Vacancy))),
        Button::callback(m.btn_resume, conversation(UserAction::ChoosePostType(PostType::Resume))),
    ]])
}

pub fn level_keyboard(lang: Language) -> Keyboard {
    let m = messages(lang);
    let levels: Vec<Button> = Level::ALL
        .iter()
        .map(|l| Button::callback(i18n::level_button(*l), conversation(UserAction::ChooseLevel(Some(*l)))))
        .collect();
    let (first, second) = levels.split_at(2);
    Keyboard::new(vec![
        first.to_vec(),
        second.to_vec(),
        vec![Button::callback(m.btn_level_skip, conversation(UserAction::ChooseLevel(None)))],
    ])
}

pub fn work_format_keyboard() -> Keyboard {
    Keyboard::new(vec![WorkFormat::ALL
        .iter()
        .map(|f| Button::callback(i18n::work_format_button(*f), conversation(UserAction::ChooseWorkFormat(*f))))
        .collect()])
}

pub fn category_keyboard(lang: Language) -> Keyboard {
    Keyboard::new(vec![Category::ALL
        .iter()
        .map(|c| Button::callback(i18n::category_button(*c, lang), conversation(UserAction::ChooseCategory(*c))))
        .collect()])
}

pub fn employment_keyboard(lang: Language) -> Keyboard {
    let buttons: Vec<Button> = Employment::ALL
        .iter()
        .map(|e| Button::callback(i18n::employment_button(*e, lang), conversation(UserAction::ChooseEmployment(*e))))
        .collect();
    Keyboard::new(buttons.chunks(2).map(|row| row.to_vec()).collect())
}

pub fn resume_link_keyboard(lang: Language) -> Keyboard {
    Keyboard::new(vec![vec![Button::callback(
        messages(lang).btn_skip,
        conversation(UserAction::SkipResumeLink),
    )]])
}

pub fn preview_keyboard(lang: Language) -> Keyboard {
    let m = messages(lang);
    Keyboard::new(vec![vec![
        Button::callback(m.btn_submit, conversation(UserAction::Submit)),
        Button::callback(m.btn_cancel, conversation(UserAction::CancelSubmit)),
    ]])
}

pub fn language_keyboard(lang: Language) -> Keyboard {
    let m = messages(lang);
    Keyboard::new(vec![vec![
        Button::callback(m.btn_russian, CallbackAction::InterfaceLanguage(Language::Ru)),
        Button::callback(m.btn_english, CallbackAction::InterfaceLanguage(Language::En)),
    ]])
}

/// `https://t.me/<handle>` for contacts given as `@handle`.
pub fn contact_url(contact: &str) -> Option<String> {
    let handle = contact.trim().strip_prefix('@')?;
    if handle.is_empty() || handle.contains(char::is_whitespace) {
        return None;
    }
    Some(format!("https://t.me/{}", handle))
}

pub fn moderation_keyboard(posting: &Posting, lang: Language) -> Keyboard {
    let m = messages(lang);
    let mut rows = vec![vec![
        Button::callback(m.btn_approve, moderation(ModerationKind::Approve, posting.id)),
        Button::callback(m.btn_reject, moderation(ModerationKind::Reject, posting.id)),
    ]];
    if let Some(url) = contact_url(posting.content.author_contact()) {
        rows.push(vec![Button::url(m.btn_contact_author, url)]);
    }
    Keyboard::new(rows)
}

pub fn delete_keyboard(posting_id: Uuid, lang: Language) -> Keyboard {
    Keyboard::new(vec![vec![Button::callback(
        messages(lang).btn_delete,
        moderation(ModerationKind::RequestDelete, posting_id),
    )]])
}

pub fn confirm_delete_keyboard(posting_id: Uuid, lang: Language) -> Keyboard {
    let m = messages(lang);
    Keyboard::new(vec![vec![
        Button::callback(m.btn_confirm_delete, moderation(ModerationKind::ConfirmDelete, posting_id)),
        Button::callback(m.btn_cancel_delete, moderation(ModerationKind::CancelDelete, posting_id)),
    ]])
}
