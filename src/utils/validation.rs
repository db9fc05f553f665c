//! Input rules for the conversation steps.
//!
//! Every rule is a pure function over the raw text a user typed. Skip tokens
//! are recognised only where a step allows leaving the field empty.

use crate::models::posting::{Category, Employment, Level, WorkFormat};

const SKIP_TOKENS: [&str; 3] = ["skip", "скип", "пропустить"];

/// Why a step rejected the input. The user sees a localized hint and stays on
/// the same step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    #[error("value must be chosen from the offered buttons")]
    ChooseFromButtons,
    #[error("expected a non-negative whole number")]
    InvalidNumber,
    #[error("expected a non-negative number of years")]
    InvalidExperience,
    #[error("maximum salary is below the minimum")]
    SalaryToLessThanFrom,
    #[error("only links are accepted")]
    OnlyLinksAllowed,
    #[error("value must not be empty")]
    EmptyText,
    #[error("a text message was expected")]
    TextExpected,
}

pub fn is_skip(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    SKIP_TOKENS.contains(&lower.as_str())
}

/// Free-form fields accept anything that is not blank.
pub fn require_text(text: &str) -> Result<String, StepError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(StepError::EmptyText);
    }
    Ok(trimmed.to_string())
}

/// `Ok(None)` is the explicit "not specified" choice.
pub fn parse_level(text: &str) -> Result<Option<Level>, StepError> {
    if is_skip(text) {
        return Ok(None);
    }
    text.parse::<Level>()
        .map(Some)
        .map_err(|_| StepError::ChooseFromButtons)
}

pub fn parse_work_format(text: &str) -> Result<WorkFormat, StepError> {
    text.parse().map_err(|_| StepError::ChooseFromButtons)
}

pub fn parse_category(text: &str) -> Result<Category, StepError> {
    text.parse().map_err(|_| StepError::ChooseFromButtons)
}

pub fn parse_employment(text: &str) -> Result<Employment, StepError> {
    text.parse().map_err(|_| StepError::ChooseFromButtons)
}

pub fn parse_salary(text: &str) -> Result<Option<i32>, StepError> {
    if is_skip(text) {
        return Ok(None);
    }
    match text.trim().parse::<i32>() {
        Ok(value) if value >= 0 => Ok(Some(value)),
        _ => Err(StepError::InvalidNumber),
    }
}

/// The upper bound may not undercut the lower one. Nothing to compare when
/// either side was skipped.
pub fn check_salary_order(from: Option<i32>, to: Option<i32>) -> Result<(), StepError> {
    match (from, to) {
        (Some(from), Some(to)) if to < from => Err(StepError::SalaryToLessThanFrom),
        _ => Ok(()),
    }
}

pub fn parse_experience(text: &str) -> Result<Option<f64>, StepError> {
    if is_skip(text) {
        return Ok(None);
    }
    let normalized = text.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(years) if years.is_finite() && years >= 0.0 => Ok(Some(years)),
        _ => Err(StepError::InvalidExperience),
    }
}

pub fn is_resume_link(text: &str) -> bool {
    let text = text.trim();
    if text.contains(char::is_whitespace) {
        return false;
    }
    if let Some(rest) = text.strip_prefix("www.") {
        return rest.contains('.');
    }
    match url::Url::parse(text) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
        }
        Err(_) => false,
    }
}

pub fn parse_resume_link(text: &str) -> Result<Option<String>, StepError> {
    if is_skip(text) {
        return Ok(None);
    }
    let trimmed = text.trim();
    if !is_resume_link(trimmed) {
        return Err(StepError::OnlyLinksAllowed);
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_tokens_in_both_languages() {
        assert!(is_skip("skip"));
        assert!(is_skip("  SKIP "));
        assert!(is_skip("Скип"));
        assert!(is_skip("пропустить"));
        assert!(!is_skip("skipper"));
    }

    #[test]
    fn level_accepts_skip_as_unspecified() {
        assert_eq!(parse_level("skip"), Ok(None));
        assert_eq!(parse_level("Middle"), Ok(Some(Level::Middle)));
        assert_eq!(parse_level("guru"), Err(StepError::ChooseFromButtons));
    }

    #[test]
    fn closed_vocabularies_reject_unknown_values() {
        assert_eq!(parse_work_format("onsite"), Ok(WorkFormat::Onsite));
        assert_eq!(parse_work_format("office"), Err(StepError::ChooseFromButtons));
        assert_eq!(parse_category("WEB3"), Ok(Category::Web3));
        assert_eq!(parse_employment("gig"), Err(StepError::ChooseFromButtons));
        // skip is not an escape hatch for required enums
        assert_eq!(parse_work_format("skip"), Err(StepError::ChooseFromButtons));
    }

    #[test]
    fn salary_parsing() {
        assert_eq!(parse_salary(" 4000 "), Ok(Some(4000)));
        assert_eq!(parse_salary("скип"), Ok(None));
        assert_eq!(parse_salary("4k"), Err(StepError::InvalidNumber));
        assert_eq!(parse_salary("-10"), Err(StepError::InvalidNumber));
    }

    #[test]
    fn salary_order_only_checked_when_both_present() {
        assert_eq!(check_salary_order(Some(4000), Some(6000)), Ok(()));
        assert_eq!(check_salary_order(Some(4000), Some(4000)), Ok(()));
        assert_eq!(
            check_salary_order(Some(4000), Some(3000)),
            Err(StepError::SalaryToLessThanFrom)
        );
        assert_eq!(check_salary_order(None, Some(1)), Ok(()));
        assert_eq!(check_salary_order(Some(1), None), Ok(()));
    }

    #[test]
    fn experience_parsing() {
        assert_eq!(parse_experience("3.5"), Ok(Some(3.5)));
        assert_eq!(parse_experience("1,5"), Ok(Some(1.5)));
        assert_eq!(parse_experience("skip"), Ok(None));
        assert_eq!(parse_experience("-1"), Err(StepError::InvalidExperience));
        assert_eq!(parse_experience("NaN"), Err(StepError::InvalidExperience));
        assert_eq!(parse_experience("a lot"), Err(StepError::InvalidExperience));
    }

    #[test]
    fn resume_link_shape() {
        assert!(is_resume_link("https://cv.example/me"));
        assert!(is_resume_link("http://example.org"));
        assert!(is_resume_link("www.example.org/cv"));
        assert!(!is_resume_link("not-a-url"));
        assert!(!is_resume_link("ftp://example.org/cv"));
        assert!(!is_resume_link("https://exa mple.org"));
        assert_eq!(parse_resume_link("skip"), Ok(None));
        assert_eq!(parse_resume_link("not-a-url"), Err(StepError::OnlyLinksAllowed));
    }

    #[test]
    fn free_text_must_not_be_blank() {
        assert_eq!(require_text("  Acme "), Ok("Acme".to_string()));
        assert_eq!(require_text("   "), Err(StepError::EmptyText));
    }
}
