//! Localized message templates.
//!
//! Templates are Telegram Markdown. Placeholders such as `{id}` are filled
//! with [`fill`]; user-supplied values must be escaped by the caller.

use crate::models::posting::{Category, Employment, Language, Level, PostingStatus, WorkFormat};

pub struct Messages {
    pub welcome: &'static str,
    pub help: &'static str,
    pub help_admin: &'static str,
    pub pricing: &'static str,
    pub faq: &'static str,
    pub about: &'static str,
    pub contact: &'static str,
    pub unknown_command: &'static str,
    pub language_set: &'static str,
    pub choose_language: &'static str,
    pub no_posts: &'static str,
    pub your_posts: &'static str,
    pub no_permission: &'static str,
    pub no_pending: &'static str,
    pub pending_count: &'static str,
    pub stats: &'static str,
    pub admins_title: &'static str,
    pub generic_error: &'static str,

    pub choose_post_type: &'static str,
    pub idle_hint: &'static str,
    pub use_type_buttons: &'static str,
    pub use_preview_buttons: &'static str,
    pub stale_action: &'static str,
    pub session_expired: &'static str,
    pub cancelled: &'static str,
    pub submit_vacancy_success: &'static str,
    pub submit_resume_success: &'static str,
    pub submit_error: &'static str,

    pub step: &'static str,
    pub vac_company: &'static str,
    pub vac_contact: &'static str,
    pub vac_title: &'static str,
    pub vac_level: &'static str,
    pub vac_format: &'static str,
    pub vac_category: &'static str,
    pub vac_description: &'static str,
    pub vac_salary_from: &'static str,
    pub vac_salary_to: &'static str,
    pub vac_apply_link: &'static str,
    pub res_title: &'static str,
    pub res_level: &'static str,
    pub res_experience: &'static str,
    pub res_format: &'static str,
    pub res_employment: &'static str,
    pub res_salary_from: &'static str,
    pub res_salary_to: &'static str,
    pub res_about: &'static str,
    pub res_contact: &'static str,
    pub res_link: &'static str,

    pub choose_from_buttons: &'static str,
    pub invalid_number: &'static str,
    pub invalid_experience: &'static str,
    pub salary_to_less_than_from: &'static str,
    pub only_links_allowed: &'static str,
    pub empty_text: &'static str,
    pub text_expected: &'static str,

    pub vac_preview_title: &'static str,
    pub res_preview_title: &'static str,
    pub preview_confirm: &'static str,
    pub company_label: &'static str,
    pub contact_label: &'static str,
    pub title_label: &'static str,
    pub position_label: &'static str,
    pub level_label: &'static str,
    pub format_label: &'static str,
    pub category_label: &'static str,
    pub salary_label: &'static str,
    pub expectations_label: &'static str,
    pub description_label: &'static str,
    pub apply_link_label: &'static str,
    pub apply_label: &'static str,
    pub experience_label: &'static str,
    pub employment_label: &'static str,
    pub about_label: &'static str,
    pub resume_link_label: &'static str,
    pub language_label: &'static str,
    pub not_specified: &'static str,
    pub salary_not_specified: &'static str,
    pub salary_from: &'static str,
    pub salary_to: &'static str,
    pub years: &'static str,

    pub btn_vacancy: &'static str,
    pub btn_resume: &'static str,
    pub btn_submit: &'static str,
    pub btn_cancel: &'static str,
    pub btn_skip: &'static str,
    pub btn_level_skip: &'static str,
    pub btn_russian: &'static str,
    pub btn_english: &'static str,
    pub btn_approve: &'static str,
    pub btn_reject: &'static str,
    pub btn_delete: &'static str,
    pub btn_confirm_delete: &'static str,
    pub btn_cancel_delete: &'static str,
    pub btn_contact_author: &'static str,

    pub admin_new_vacancy: &'static str,
    pub admin_new_resume: &'static str,
    pub admin_author_contact: &'static str,
    pub admin_approved: &'static str,
    pub admin_rejected: &'static str,
    pub admin_confirm_delete: &'static str,
    pub admin_removed: &'static str,
    pub admin_not_authorized: &'static str,
    pub admin_action_failed: &'static str,

    pub vacancy_approved: &'static str,
    pub resume_approved: &'static str,
    pub vacancy_rejected: &'static str,
    pub resume_rejected: &'static str,
    pub rejection_reason: &'static str,
    pub vacancy_removed: &'static str,
    pub resume_removed: &'static str,

    pub channel_vacancy_tags: &'static str,
    pub channel_resume_tags: &'static str,
    pub channel_vacancy_heading: &'static str,
    pub channel_resume_heading: &'static str,
    pub channel_footer: &'static str,
}

pub static RU: Messages = Messages {
    welcome: "👋 *Добро пожаловать в BridgeJob!*\n\nЭто сервис для публикации Web2 и Web3 вакансий и резюме с ручной модерацией.\n\n*Что вы можете сделать:*\n• /post\\_job — добавить публикацию\n• /myjobs — посмотреть свои публикации\n• /language — сменить язык\n• /help — справка\n\n📢 Канал: @BridgeJob",
    help: "📖 *Справка по боту*\n\n*Доступные команды:*\n• /post\\_job — добавить вакансию или резюме\n• /myjobs — мои публикации и статусы\n• /cancel — отменить заполнение\n• /language — сменить язык\n• /pricing — стоимость размещения\n• /faq — частые вопросы\n• /about — о сервисе\n• /contact — связь с администратором",
    pricing: "💰 *Стоимость размещения*\n\n📌 *Стандартное размещение*: *$25*\n1 пост в канале\n\n⭐ *Featured*: *$65*\nПост + закреп 48ч\n\n📦 *Пакет 5 вакансий*: *$100*\n5 стандартных постов\n\n💳 *Оплата:* USDT / Wise / PayPal\n\n📞 *Контакт:* {contacts}",
    faq: "❓ *Частые вопросы*\n\n*Как быстро публикуется вакансия?*\nОбычно в течение 24 часов после модерации.\n\n*Можно ли указать Telegram контакт?*\nДа, @username допускается.\n\n*Обязательна ли вилка зарплаты?*\nЖелательно, но не обязательно.\n\n*Как проходит оплата?*\nПосле одобрения админ свяжется с вами.",
    about: "ℹ️ *О сервисе*\n\nМы публикуем проверенные Web2 и Web3 вакансии с ручной модерацией, чтобы сохранить качество канала.\n\nЦель сервиса: соединять компании и специалистов без спама и скама.\n\n📢 Канал: @BridgeJob",
    contact: "📩 *Связь с администратором:*\n\n{contacts}\n\n📢 Канал: @BridgeJob",
    help_admin: "\n\n👮 *Админ-команды:*\n• /pending — публикации на модерации\n• /stats — статистика\n• /admins — список админов",
    unknown_command: "Неизвестная команда. Используйте /help для справки.",
    language_set: "✅ Язык интерфейса установлен: Русский 🇷🇺",
    choose_language: "🌐 Выберите язык интерфейса:",
    no_posts: "У вас пока нет публикаций.\nИспользуйте /post\\_job, чтобы добавить первую.",
    your_posts: "📄 *Ваши публикации:*",
    no_permission: "⛔ Недостаточно прав",
    no_pending: "✅ Нет публикаций на модерации.",
    pending_count: "📋 Публикаций на модерации: {count}\n\nОтправляю по одной...",
    stats: "📊 *Статистика сервиса*\n\n• Всего публикаций: {total}\n• На модерации: {pending}\n• Одобрено: {approved}\n• Опубликовано: {published}\n• Отклонено: {rejected}\n• В архиве: {archived}",
    admins_title: "👮 *Администраторы сервиса:*",
    generic_error: "Произошла ошибка. Попробуйте позже.",

    choose_post_type: "Что вы хотите опубликовать?",
    idle_hint: "Используйте /post\\_job чтобы добавить публикацию.",
    use_type_buttons: "Выберите тип публикации кнопками выше.",
    use_preview_buttons: "Используйте кнопки под предпросмотром.",
    stale_action: "Эта кнопка больше не активна.",
    session_expired: "Ошибка. Начните заново: /post\\_job",
    cancelled: "Отменено. Используйте /post\\_job чтобы начать заново.",
    submit_vacancy_success: "✅ *Вакансия отправлена на модерацию!*\n\nID вакансии: `{id}`\n\nАдминистратор рассмотрит вашу заявку в ближайшее время.\nВы получите уведомление после публикации.\n\n📢 Канал: @BridgeJob",
    submit_resume_success: "✅ *Резюме отправлено на модерацию!*\n\nID резюме: `{id}`\n\nАдминистратор рассмотрит вашу заявку в ближайшее время.\nВы получите уведомление после публикации.\n\n📢 Канал: @BridgeJob",
    submit_error: "Ошибка при отправке. Попробуйте ещё раз.",

    step: "Шаг",
    vac_company: "Как называется ваша компания?",
    vac_contact: "Укажите ваш Telegram для связи.\n\nЭто ваш контакт как автора вакансии. Админы свяжутся с вами по вопросам публикации.\n\nФормат: @username",
    vac_title: "Укажите название вакансии.\n\nПример: Backend Developer, iOS Developer, Data Analyst",
    vac_level: "Выберите уровень:",
    vac_format: "Выберите формат работы:",
    vac_category: "Выберите категорию:",
    vac_description: "Опишите вакансию:",
    vac_salary_from: "Минимальная зарплата (USD, только цифры или 'skip'):",
    vac_salary_to: "Максимальная зарплата (USD, только цифры или 'skip'):",
    vac_apply_link: "Куда кандидаты будут откликаться?\n\nСсылка на форму, сайт компании или Telegram (например @username).",
    res_title: "Какую должность вы ищете?\n\nПример: Backend Developer, Product Designer",
    res_level: "Выберите ваш уровень:",
    res_experience: "Сколько лет опыта? (число, например 2.5, или 'skip')",
    res_format: "Предпочитаемый формат работы:",
    res_employment: "Выберите тип занятости:",
    res_salary_from: "Ожидаемая зарплата от (USD, только цифры или 'skip'):",
    res_salary_to: "Ожидаемая зарплата до (USD, только цифры или 'skip'):",
    res_about: "Расскажите о себе: навыки, опыт, проекты.",
    res_contact: "Как с вами связаться? (Telegram @username, email)",
    res_link: "Пришлите ссылку на резюме (Google Drive, LinkedIn, сайт) или нажмите «Пропустить».\n\nФайлы не принимаются — только ссылки.",

    choose_from_buttons: "Выберите вариант кнопками.",
    invalid_number: "Введите корректное число или 'skip' / 'скип':",
    invalid_experience: "Введите количество лет числом (например 2.5) или 'skip':",
    salary_to_less_than_from: "Максимальная зарплата не может быть меньше минимальной. Введите корректное число:",
    only_links_allowed: "Принимаются только ссылки (http://, https://, www.) или 'skip'.",
    empty_text: "Значение не может быть пустым.",
    text_expected: "Отправьте текстовое сообщение.",

    vac_preview_title: "*Предпросмотр вакансии:*",
    res_preview_title: "*Предпросмотр резюме:*",
    preview_confirm: "Всё верно?",
    company_label: "Компания",
    contact_label: "Контакт",
    title_label: "Должность",
    position_label: "Позиция",
    level_label: "Уровень",
    format_label: "Формат",
    category_label: "Категория",
    salary_label: "Зарплата",
    expectations_label: "Ожидания",
    description_label: "Описание",
    apply_link_label: "Ссылка для кандидатов",
    apply_label: "Откликнуться",
    experience_label: "Опыт",
    employment_label: "Занятость",
    about_label: "О кандидате",
    resume_link_label: "Резюме",
    language_label: "Язык",
    not_specified: "Не указан",
    salary_not_specified: "Не указана",
    salary_from: "От ${value}",
    salary_to: "До ${value}",
    years: "лет",

    btn_vacancy: "🏢 Вакансия",
    btn_resume: "👤 Резюме",
    btn_submit: "✅ Отправить",
    btn_cancel: "❌ Отмена",
    btn_skip: "⏭️ Пропустить",
    btn_level_skip: "⏭️ Не указать",
    btn_russian: "🇷🇺 Русский",
    btn_english: "🇬🇧 English",
    btn_approve: "✅ Одобрить",
    btn_reject: "❌ Отклонить",
    btn_delete: "🗑 Удалить из канала",
    btn_confirm_delete: "✅ Да, удалить",
    btn_cancel_delete: "❌ Отмена",
    btn_contact_author: "📞 Связаться с автором",

    admin_new_vacancy: "🏢 *Новая вакансия на модерацию*",
    admin_new_resume: "👤 *Новое резюме на модерацию*",
    admin_author_contact: "Контакт автора",
    admin_approved: "✅ ОДОБРЕНО И ОПУБЛИКОВАНО",
    admin_rejected: "❌ ОТКЛОНЕНО",
    admin_confirm_delete: "⚠️ Вы уверены, что хотите удалить?",
    admin_removed: "🗑 УДАЛЕНО ИЗ КАНАЛА",
    admin_not_authorized: "⛔ Недостаточно прав",
    admin_action_failed: "Не удалось выполнить действие: {error}",

    vacancy_approved: "✅ *Ваша вакансия одобрена!*\n\nВакансия *{title}* опубликована в канале @BridgeJob\n\n📢 Смотреть: https://t.me/BridgeJob",
    resume_approved: "✅ *Ваше резюме одобрено!*\n\nРезюме *{title}* опубликовано в канале @BridgeJob\n\n📢 Смотреть: https://t.me/BridgeJob",
    vacancy_rejected: "❌ *Ваша вакансия отклонена*\n\nВакансия *{title}* не прошла модерацию.\n\nПопробуйте отправить заново с корректными данными: /post\\_job",
    resume_rejected: "❌ *Ваше резюме отклонено*\n\nРезюме *{title}* не прошло модерацию.\n\nПопробуйте отправить заново с корректными данными: /post\\_job",
    rejection_reason: "Причина",
    vacancy_removed: "🗑 *Ваша вакансия удалена из канала*\n\nВакансия *{title}* была удалена из @BridgeJob\n\nЕсли хотите разместить новую: /post\\_job",
    resume_removed: "🗑 *Ваше резюме удалено из канала*\n\nРезюме *{title}* было удалено из @BridgeJob\n\nЕсли хотите разместить новое: /post\\_job",

    channel_vacancy_tags: "#vacancy #вакансия",
    channel_resume_tags: "#resume #резюме",
    channel_vacancy_heading: "Вакансия",
    channel_resume_heading: "Резюме",
    channel_footer: "📮 _Разместить публикацию: @BridgeJobsBot_",
};

pub static EN: Messages = Messages {
    welcome: "👋 *Welcome to BridgeJob!*\n\nThis is a service for posting Web2 and Web3 jobs and resumes with manual moderation.\n\n*What you can do:*\n• /post\\_job — add a posting\n• /myjobs — view your postings\n• /language — change language\n• /help — help\n\n📢 Channel: @BridgeJob",
    help: "📖 *Bot Help*\n\n*Available commands:*\n• /post\\_job — add a job or a resume\n• /myjobs — my postings and statuses\n• /cancel — abort the current form\n• /language — change language\n• /pricing — posting prices\n• /faq — frequently asked questions\n• /about — about the service\n• /contact — contact an admin",
    pricing: "💰 *Posting Prices*\n\n📌 *Standard Posting*: *$25*\n1 post in channel\n\n⭐ *Featured*: *$65*\nPost + 48h pin\n\n📦 *5 Jobs Package*: *$100*\n5 standard posts\n\n💳 *Payment:* USDT / Wise / PayPal\n\n📞 *Contact:* {contacts}",
    faq: "❓ *FAQ*\n\n*How fast is a job published?*\nUsually within 24 hours after moderation.\n\n*Can I use a Telegram contact?*\nYes, @username is allowed.\n\n*Is salary range required?*\nPreferred, but not required.\n\n*How does payment work?*\nAfter approval, an admin will contact you.",
    about: "ℹ️ *About the Service*\n\nWe publish verified Web2 and Web3 jobs with manual moderation to maintain channel quality.\n\nOur goal is to connect companies and professionals without spam and scam.\n\n📢 Channel: @BridgeJob",
    contact: "📩 *Contact Admin:*\n\n{contacts}\n\n📢 Channel: @BridgeJob",
    help_admin: "\n\n👮 *Admin commands:*\n• /pending — postings awaiting moderation\n• /stats — statistics\n• /admins — list of admins",
    unknown_command: "Unknown command. Use /help for help.",
    language_set: "✅ Interface language set to: English 🇬🇧",
    choose_language: "🌐 Choose interface language:",
    no_posts: "You don't have any postings yet.\nUse /post\\_job to add your first one.",
    your_posts: "📄 *Your postings:*",
    no_permission: "⛔ Access denied",
    no_pending: "✅ No postings awaiting moderation.",
    pending_count: "📋 Postings awaiting moderation: {count}\n\nSending one by one...",
    stats: "📊 *Service Statistics*\n\n• Total posts: {total}\n• Pending: {pending}\n• Approved: {approved}\n• Published: {published}\n• Rejected: {rejected}\n• Archived: {archived}",
    admins_title: "👮 *Service Administrators:*",
    generic_error: "Something went wrong. Please try again later.",

    choose_post_type: "What would you like to post?",
    idle_hint: "Use /post\\_job to submit a posting.",
    use_type_buttons: "Please select the posting type using the buttons above.",
    use_preview_buttons: "Use the buttons below the preview.",
    stale_action: "This button is no longer active.",
    session_expired: "Error. Please start over with /post\\_job",
    cancelled: "Cancelled. Use /post\\_job to start again.",
    submit_vacancy_success: "✅ *Job submitted for moderation!*\n\nJob ID: `{id}`\n\nAn admin will review your submission shortly.\nYou'll receive a notification once it's published.\n\n📢 Channel: @BridgeJob",
    submit_resume_success: "✅ *Resume submitted for moderation!*\n\nResume ID: `{id}`\n\nAn admin will review your submission shortly.\nYou'll receive a notification once it's published.\n\n📢 Channel: @BridgeJob",
    submit_error: "Error submitting. Please try again.",

    step: "Step",
    vac_company: "What is your company name?",
    vac_contact: "Enter your Telegram for contact.\n\nThis is your contact as the job author. Admins will reach out regarding publication.\n\nFormat: @username",
    vac_title: "Enter the job title.\n\nExample: Backend Developer, iOS Developer, Data Analyst",
    vac_level: "Select experience level:",
    vac_format: "Select work format:",
    vac_category: "Select category:",
    vac_description: "Describe the position:",
    vac_salary_from: "Minimum salary (USD, numbers only or 'skip'):",
    vac_salary_to: "Maximum salary (USD, numbers only or 'skip'):",
    vac_apply_link: "Where should candidates apply?\n\nApplication form link, company website or Telegram (e.g. @username).",
    res_title: "What position are you looking for?\n\nExample: Backend Developer, Product Designer",
    res_level: "Select your level:",
    res_experience: "Years of experience? (a number such as 2.5, or 'skip')",
    res_format: "Preferred work format:",
    res_employment: "Select employment type:",
    res_salary_from: "Expected salary from (USD, numbers only or 'skip'):",
    res_salary_to: "Expected salary up to (USD, numbers only or 'skip'):",
    res_about: "Tell about yourself: skills, experience, projects.",
    res_contact: "How can employers reach you? (Telegram @username, email)",
    res_link: "Send a link to your CV (Google Drive, LinkedIn, website) or press \"Skip\".\n\nFiles are not accepted — links only.",

    choose_from_buttons: "Please choose using the buttons.",
    invalid_number: "Enter a valid number or 'skip' / 'скип':",
    invalid_experience: "Enter the number of years (e.g. 2.5) or 'skip':",
    salary_to_less_than_from: "Maximum salary cannot be less than minimum. Enter a valid number:",
    only_links_allowed: "Only links are accepted (http://, https://, www.) or 'skip'.",
    empty_text: "The value must not be empty.",
    text_expected: "Please send a text message.",

    vac_preview_title: "*Job Preview:*",
    res_preview_title: "*Resume Preview:*",
    preview_confirm: "Is this correct?",
    company_label: "Company",
    contact_label: "Contact",
    title_label: "Title",
    position_label: "Position",
    level_label: "Level",
    format_label: "Format",
    category_label: "Category",
    salary_label: "Salary",
    expectations_label: "Expectations",
    description_label: "Description",
    apply_link_label: "Apply link",
    apply_label: "Apply",
    experience_label: "Experience",
    employment_label: "Employment",
    about_label: "About",
    resume_link_label: "Resume",
    language_label: "Language",
    not_specified: "Not specified",
    salary_not_specified: "Not specified",
    salary_from: "From ${value}",
    salary_to: "Up to ${value}",
    years: "years",

    btn_vacancy: "🏢 Vacancy",
    btn_resume: "👤 Resume",
    btn_submit: "✅ Submit",
    btn_cancel: "❌ Cancel",
    btn_skip: "⏭️ Skip",
    btn_level_skip: "⏭️ Not specified",
    btn_russian: "🇷🇺 Русский",
    btn_english: "🇬🇧 English",
    btn_approve: "✅ Approve",
    btn_reject: "❌ Reject",
    btn_delete: "🗑 Remove from channel",
    btn_confirm_delete: "✅ Yes, remove",
    btn_cancel_delete: "❌ Cancel",
    btn_contact_author: "📞 Contact author",

    admin_new_vacancy: "🏢 *New job awaiting moderation*",
    admin_new_resume: "👤 *New resume awaiting moderation*",
    admin_author_contact: "Author contact",
    admin_approved: "✅ APPROVED AND PUBLISHED",
    admin_rejected: "❌ REJECTED",
    admin_confirm_delete: "⚠️ Are you sure you want to remove it?",
    admin_removed: "🗑 REMOVED FROM CHANNEL",
    admin_not_authorized: "You are not authorized",
    admin_action_failed: "Action failed: {error}",

    vacancy_approved: "✅ *Your job has been approved!*\n\nJob *{title}* is now published in @BridgeJob channel\n\n📢 View: https://t.me/BridgeJob",
    resume_approved: "✅ *Your resume has been approved!*\n\nResume *{title}* is now published in @BridgeJob channel\n\n📢 View: https://t.me/BridgeJob",
    vacancy_rejected: "❌ *Your job has been rejected*\n\nJob *{title}* did not pass moderation.\n\nPlease try again with correct data: /post\\_job",
    resume_rejected: "❌ *Your resume has been rejected*\n\nResume *{title}* did not pass moderation.\n\nPlease try again with correct data: /post\\_job",
    rejection_reason: "Reason",
    vacancy_removed: "🗑 *Your job has been removed from channel*\n\nJob *{title}* was removed from @BridgeJob\n\nTo post a new job: /post\\_job",
    resume_removed: "🗑 *Your resume has been removed from channel*\n\nResume *{title}* was removed from @BridgeJob\n\nTo post again: /post\\_job",

    channel_vacancy_tags: "#vacancy #job",
    channel_resume_tags: "#resume #cv",
    channel_vacancy_heading: "Job",
    channel_resume_heading: "Resume",
    channel_footer: "📮 _Post yours: @BridgeJobsBot_",
};

pub fn messages(lang: Language) -> &'static Messages {
    match lang {
        Language::Ru => &RU,
        Language::En => &EN,
    }
}

/// Replaces `{key}` placeholders in `template`.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |text, (key, value)| {
        text.replace(&format!("{{{}}}", key), value)
    })
}

pub fn level_button(level: Level) -> &'static str {
    match level {
        Level::Junior => "🌱 Junior",
        Level::Middle => "🌿 Middle",
        Level::Senior => "🌳 Senior",
        Level::Internship => "🎓 Internship",
    }
}

pub fn work_format_button(format: WorkFormat) -> &'static str {
    match format {
        WorkFormat::Remote => "🌍 Remote",
        WorkFormat::Hybrid => "🏢🏠 Hybrid",
        WorkFormat::Onsite => "🏢 Onsite",
    }
}

pub fn category_button(category: Category, lang: Language) -> &'static str {
    match (category, lang) {
        (Category::Web2, _) => "🌐 Web2",
        (Category::Web3, _) => "⛓️ Web3",
        (Category::Dev, Language::Ru) => "💼 Другое",
        (Category::Dev, Language::En) => "💼 Other",
    }
}

pub fn employment_button(employment: Employment, lang: Language) -> &'static str {
    match (employment, lang) {
        (Employment::FullTime, Language::Ru) => "Полная занятость",
        (Employment::FullTime, Language::En) => "Full-time",
        (Employment::PartTime, Language::Ru) => "Частичная занятость",
        (Employment::PartTime, Language::En) => "Part-time",
        (Employment::Contract, Language::Ru) => "Контракт",
        (Employment::Contract, Language::En) => "Contract",
        (Employment::Freelance, Language::Ru) => "Фриланс",
        (Employment::Freelance, Language::En) => "Freelance",
    }
}

pub fn status_text(status: PostingStatus, lang: Language) -> &'static str {
    match (status, lang) {
        (PostingStatus::Pending, Language::Ru) => "На модерации",
        (PostingStatus::Approved, Language::Ru) => "Одобрена",
        (PostingStatus::Published, Language::Ru) => "Опубликована",
        (PostingStatus::Rejected, Language::Ru) => "Отклонена",
        (PostingStatus::Archived, Language::Ru) => "В архиве",
        (PostingStatus::Pending, Language::En) => "Pending",
        (PostingStatus::Approved, Language::En) => "Approved",
        (PostingStatus::Published, Language::En) => "Published",
        (PostingStatus::Rejected, Language::En) => "Rejected",
        (PostingStatus::Archived, Language::En) => "Archived",
    }
}

pub fn status_emoji(status: PostingStatus) -> &'static str {
    match status {
        PostingStatus::Pending => "🕒",
        PostingStatus::Approved => "✅",
        PostingStatus::Published => "📢",
        PostingStatus::Rejected => "❌",
        PostingStatus::Archived => "🗑",
    }
}
