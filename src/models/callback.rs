//! Inline-button payloads.
//!
//! Telegram hands callback data back as an opaque string of at most 64 bytes.
//! It is decoded exactly once, at the webhook boundary, into [`CallbackAction`].

use std::str::FromStr;

use uuid::Uuid;

use crate::models::posting::{Category, Employment, Language, Level, PostType, WorkFormat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    ChoosePostType(PostType),
    /// `None` is the explicit "not specified" choice.
    ChooseLevel(Option<Level>),
    ChooseWorkFormat(WorkFormat),
    ChooseCategory(Category),
    ChooseEmployment(Employment),
    SkipResumeLink,
    Submit,
    CancelSubmit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationKind {
    Approve,
    Reject,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
}

impl ModerationKind {
    fn prefix(&self) -> &'static str {
        match self {
            ModerationKind::Approve => "approve",
            ModerationKind::Reject => "reject",
            ModerationKind::RequestDelete => "delete",
            ModerationKind::ConfirmDelete => "confirm_delete",
            ModerationKind::CancelDelete => "cancel_delete",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "approve" => Some(ModerationKind::Approve),
            "reject" => Some(ModerationKind::Reject),
            "delete" => Some(ModerationKind::RequestDelete),
            "confirm_delete" => Some(ModerationKind::ConfirmDelete),
            "cancel_delete" => Some(ModerationKind::CancelDelete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModerationAction {
    pub kind: ModerationKind,
    pub posting_id: Uuid,
}

impl ModerationAction {
    pub fn new(kind: ModerationKind, posting_id: Uuid) -> Self {
        Self { kind, posting_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    InterfaceLanguage(Language),
    Conversation(UserAction),
    Moderation(ModerationAction),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised callback data: {0}")]
pub struct UnknownCallback(pub String);

impl CallbackAction {
    pub fn encode(&self) -> String {
        match self {
            CallbackAction::InterfaceLanguage(lang) => format!("interface_lang:{}", lang.as_str()),
            CallbackAction::Conversation(action) => match action {
                UserAction::ChoosePostType(t) => format!("post_type:{}", t.as_str()),
                UserAction::ChooseLevel(Some(level)) => format!("level:{}", level.as_str()),
                UserAction::ChooseLevel(None) => "level:skip".to_string(),
                UserAction::ChooseWorkFormat(f) => format!("type:{}", f.as_str()),
                UserAction::ChooseCategory(c) => format!("category:{}", c.as_str()),
                UserAction::ChooseEmployment(e) => format!("employment:{}", e.as_str()),
                UserAction::SkipResumeLink => "resume_link:skip".to_string(),
                UserAction::Submit => "submit".to_string(),
                UserAction::CancelSubmit => "cancel_submit".to_string(),
            },
            CallbackAction::Moderation(action) => {
                format!("{}:{}", action.kind.prefix(), action.posting_id)
            }
        }
    }
}

impl FromStr for CallbackAction {
    type Err = UnknownCallback;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownCallback(data.to_string());

        match data {
            // "submit_resume" is what older preview messages still carry
            "submit" | "submit_resume" => {
                return Ok(CallbackAction::Conversation(UserAction::Submit))
            }
            "cancel_submit" => return Ok(CallbackAction::Conversation(UserAction::CancelSubmit)),
            "resume_link:skip" => {
                return Ok(CallbackAction::Conversation(UserAction::SkipResumeLink))
            }
            _ => {}
        }

        let (prefix, value) = data.split_once(':').ok_or_else(unknown)?;

        if let Some(kind) = ModerationKind::from_prefix(prefix) {
            let posting_id = Uuid::parse_str(value).map_err(|_| unknown())?;
            return Ok(CallbackAction::Moderation(ModerationAction::new(kind, posting_id)));
        }

        let action = match prefix {
            "interface_lang" => {
                let lang = value.parse().map_err(|_| unknown())?;
                return Ok(CallbackAction::InterfaceLanguage(lang));
            }
            "post_type" => UserAction::ChoosePostType(value.parse().map_err(|_| unknown())?),
            "level" if value == "skip" => UserAction::ChooseLevel(None),
            "level" => UserAction::ChooseLevel(Some(value.parse().map_err(|_| unknown())?)),
            "type" => UserAction::ChooseWorkFormat(value.parse().map_err(|_| unknown())?),
            "category" => UserAction::ChooseCategory(value.parse().map_err(|_| unknown())?),
            "employment" => UserAction::ChooseEmployment(value.parse().map_err(|_| unknown())?),
            _ => return Err(unknown()),
        };
        Ok(CallbackAction::Conversation(action))
    }
}
