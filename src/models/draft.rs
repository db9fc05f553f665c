use crate::models::posting::{
    Category, Employment, Language, Level, NewPosting, PostType, PostingContent, ResumeContent,
    SalaryRange, VacancyContent, WorkFormat,
};

/// In-progress answers of one user. Fields shared by both tracks live here;
/// track-only fields live in [`DraftKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub language: Language,
    pub title: Option<String>,
    pub level: Option<Level>,
    pub work_format: Option<WorkFormat>,
    pub salary: SalaryRange,
    pub kind: DraftKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftKind {
    Vacancy(VacancyDraft),
    Resume(ResumeDraft),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VacancyDraft {
    pub company: Option<String>,
    pub contact: Option<String>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub apply_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeDraft {
    pub experience_years: Option<f64>,
    pub employment: Option<Employment>,
    pub about: Option<String>,
    pub contact: Option<String>,
    pub resume_link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("draft is missing required field `{0}`")]
pub struct IncompleteDraft(pub &'static str);

impl Draft {
    pub fn new(post_type: PostType, language: Language) -> Self {
        let kind = match post_type {
            PostType::Vacancy => DraftKind::Vacancy(VacancyDraft::default()),
            PostType::Resume => DraftKind::Resume(ResumeDraft::default()),
        };
        Self {
            language,
            title: None,
            level: None,
            work_format: None,
            salary: SalaryRange::default(),
            kind,
        }
    }

    pub fn post_type(&self) -> PostType {
        match self.kind {
            DraftKind::Vacancy(_) => PostType::Vacancy,
            DraftKind::Resume(_) => PostType::Resume,
        }
    }

    pub fn vacancy_mut(&mut self) -> Option<&mut VacancyDraft> {
        match &mut self.kind {
            DraftKind::Vacancy(v) => Some(v),
            DraftKind::Resume(_) => None,
        }
    }

    pub fn resume_mut(&mut self) -> Option<&mut ResumeDraft> {
        match &mut self.kind {
            DraftKind::Resume(r) => Some(r),
            DraftKind::Vacancy(_) => None,
        }
    }

    /// Converts a finished draft into a submission. Fails if a required step
    /// was never answered, which means the session got out of sync.
    pub fn to_new_posting(&self) -> Result<NewPosting, IncompleteDraft> {
        let title = required(&self.title, "title")?;
        let work_format = self.work_format.ok_or(IncompleteDraft("work_format"))?;

        let content = match &self.kind {
            DraftKind::Vacancy(v) => PostingContent::Vacancy(VacancyContent {
                company: required(&v.company, "company")?,
                contact: required(&v.contact, "contact")?,
                title,
                level: self.level,
                work_format,
                category: v.category.ok_or(IncompleteDraft("category"))?,
                salary: self.salary,
                description: required(&v.description, "description")?,
                apply_link: required(&v.apply_link, "apply_link")?,
            }),
            DraftKind::Resume(r) => PostingContent::Resume(ResumeContent {
                title,
                level: self.level,
                experience_years: r.experience_years,
                work_format,
                employment: r.employment.ok_or(IncompleteDraft("employment"))?,
                salary: self.salary,
                about: required(&r.about, "about")?,
                contact: required(&r.contact, "contact")?,
                resume_link: r.resume_link.clone(),
            }),
        };

        Ok(NewPosting {
            language: self.language,
            content,
        })
    }
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, IncompleteDraft> {
    value.clone().ok_or(IncompleteDraft(field))
}
