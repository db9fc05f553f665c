use crate::models::draft::Draft;
use crate::models::posting::{Language, PostType};

/// A data-collection step of either track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Company,
    AuthorContact,
    Title,
    Level,
    WorkFormat,
    Category,
    Description,
    SalaryFrom,
    SalaryTo,
    ApplyLink,
    ExperienceYears,
    Employment,
    About,
    Contact,
    ResumeLink,
}

pub const VACANCY_TRACK: [Step; 10] = [
    Step::Company,
    Step::AuthorContact,
    Step::Title,
    Step::Level,
    Step::WorkFormat,
    Step::Category,
    Step::Description,
    Step::SalaryFrom,
    Step::SalaryTo,
    Step::ApplyLink,
];

pub const RESUME_TRACK: [Step; 10] = [
    Step::Title,
    Step::Level,
    Step::ExperienceYears,
    Step::WorkFormat,
    Step::Employment,
    Step::SalaryFrom,
    Step::SalaryTo,
    Step::About,
    Step::Contact,
    Step::ResumeLink,
];

pub fn track(post_type: PostType) -> &'static [Step] {
    match post_type {
        PostType::Vacancy => &VACANCY_TRACK,
        PostType::Resume => &RESUME_TRACK,
    }
}

/// Step following `step` on the track, `None` once the track is exhausted.
pub fn next_step(post_type: PostType, step: Step) -> Option<Step> {
    let steps = track(post_type);
    let position = steps.iter().position(|s| *s == step)?;
    steps.get(position + 1).copied()
}

/// 1-based position of `step` on its track, for the "Step n/N" prompt header.
pub fn step_number(post_type: PostType, step: Step) -> Option<(usize, usize)> {
    let steps = track(post_type);
    steps
        .iter()
        .position(|s| *s == step)
        .map(|i| (i + 1, steps.len()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingPostType,
    Collecting(Step),
    Preview,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserSession {
    pub state: ConversationState,
    pub language: Language,
    pub draft: Option<Draft>,
}

impl UserSession {
    pub fn new(language: Language) -> Self {
        Self {
            state: ConversationState::Idle,
            language,
            draft: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == ConversationState::Idle && self.draft.is_none()
    }

    pub fn reset(&mut self) {
        self.state = ConversationState::Idle;
        self.draft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_end_after_their_last_step() {
        assert_eq!(next_step(PostType::Vacancy, Step::Company), Some(Step::AuthorContact));
        assert_eq!(next_step(PostType::Vacancy, Step::SalaryTo), Some(Step::ApplyLink));
        assert_eq!(next_step(PostType::Vacancy, Step::ApplyLink), None);
        assert_eq!(next_step(PostType::Resume, Step::Level), Some(Step::ExperienceYears));
        assert_eq!(next_step(PostType::Resume, Step::ResumeLink), None);
    }

    #[test]
    fn steps_foreign_to_a_track_have_no_successor() {
        assert_eq!(next_step(PostType::Resume, Step::Company), None);
        assert_eq!(step_number(PostType::Vacancy, Step::About), None);
    }

    #[test]
    fn step_numbers_are_one_based() {
        assert_eq!(step_number(PostType::Vacancy, Step::Company), Some((1, 10)));
        assert_eq!(step_number(PostType::Resume, Step::ResumeLink), Some((10, 10)));
    }
}
