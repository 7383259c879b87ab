//! Admin form state. Every field is what the user typed; conversion to a draft does the
//! parsing (lists, dates, blank optionals).

use crate::models::{
    Experience, ExperienceDraft, Profile, ProfileDraft, Project, ProjectDraft, Skill,
    SkillCategory, SkillDraft,
};
use crate::service::shaping::split_list;
use chrono::NaiveDate;
use thiserror::Error;

/// A form field that cannot become part of a draft.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("{field} must be a date (YYYY-MM-DD), got \"{value}\"")]
    InvalidDate { field: &'static str, value: String },
}

fn optional(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn text(s: &Option<String>) -> String {
    s.clone().unwrap_or_default()
}

/// Blank is "no date"; anything else must parse.
fn date(field: &'static str, s: &str) -> Result<Option<NaiveDate>, FormError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FormError::InvalidDate {
            field,
            value: s.to_string(),
        })
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub email: String,
    pub full_name: String,
    pub bio: String,
    pub avatar_url: String,
    pub location: String,
    pub github_url: String,
    pub linkedin_url: String,
    pub twitter_url: String,
    pub resume_url: String,
}

impl ProfileForm {
    pub fn from_row(p: &Profile) -> Self {
        ProfileForm {
            email: p.email.clone(),
            full_name: p.full_name.clone(),
            bio: text(&p.bio),
            avatar_url: text(&p.avatar_url),
            location: text(&p.location),
            github_url: text(&p.github_url),
            linkedin_url: text(&p.linkedin_url),
            twitter_url: text(&p.twitter_url),
            resume_url: text(&p.resume_url),
        }
    }

    pub fn draft(&self) -> ProfileDraft {
        ProfileDraft {
            email: self.email.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            bio: optional(&self.bio),
            avatar_url: optional(&self.avatar_url),
            location: optional(&self.location),
            github_url: optional(&self.github_url),
            linkedin_url: optional(&self.linkedin_url),
            twitter_url: optional(&self.twitter_url),
            resume_url: optional(&self.resume_url),
        }
    }
}

/// `category` holds the stored text. It is normally one of [`SkillCategory::ALL`], but a value
/// outside that set is kept as-is so saving the dialog does not rewrite it.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillForm {
    pub name: String,
    pub category: String,
    pub icon: String,
    pub order_index: i32,
}

impl Default for SkillForm {
    fn default() -> Self {
        SkillForm {
            name: String::new(),
            category: SkillCategory::Other.to_string(),
            icon: String::new(),
            order_index: 0,
        }
    }
}

impl SkillForm {
    pub fn from_row(s: &Skill) -> Self {
        SkillForm {
            name: s.name.clone(),
            category: s.category.clone(),
            icon: text(&s.icon),
            order_index: s.order_index,
        }
    }

    pub fn select_category(&mut self, category: SkillCategory) {
        self.category = category.to_string();
    }

    /// The category as the select shows it; unknown text reads as `Other`.
    pub fn selected_category(&self) -> SkillCategory {
        SkillCategory::parse(&self.category)
    }

    pub fn draft(&self) -> SkillDraft {
        let category = match self.category.trim() {
            "" => SkillCategory::Other.to_string(),
            c => c.to_string(),
        };
        SkillDraft {
            name: self.name.trim().to_string(),
            category,
            icon: optional(&self.icon),
            order_index: self.order_index,
        }
    }
}

/// Technologies are typed as one comma-separated string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub image_url: String,
    pub demo_url: String,
    pub github_url: String,
    pub technologies: String,
    pub featured: bool,
    pub order_index: i32,
}

impl ProjectForm {
    pub fn from_row(p: &Project) -> Self {
        ProjectForm {
            title: p.title.clone(),
            description: p.description.clone(),
            long_description: text(&p.long_description),
            image_url: text(&p.image_url),
            demo_url: text(&p.demo_url),
            github_url: text(&p.github_url),
            technologies: p.technologies.join(", "),
            featured: p.featured,
            order_index: p.order_index,
        }
    }

    pub fn draft(&self) -> ProjectDraft {
        ProjectDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            long_description: optional(&self.long_description),
            image_url: optional(&self.image_url),
            demo_url: optional(&self.demo_url),
            github_url: optional(&self.github_url),
            technologies: split_list(&self.technologies),
            featured: self.featured,
            order_index: self.order_index,
        }
    }
}

/// Dates are typed as `YYYY-MM-DD`; an empty end date means the position is ongoing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperienceForm {
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub company_url: String,
    pub order_index: i32,
}

impl ExperienceForm {
    pub fn from_row(e: &Experience) -> Self {
        ExperienceForm {
            company: e.company.clone(),
            position: e.position.clone(),
            description: e.description.clone(),
            start_date: e.start_date.format("%Y-%m-%d").to_string(),
            end_date: e.end_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            location: text(&e.location),
            company_url: text(&e.company_url),
            order_index: e.order_index,
        }
    }

    pub fn draft(&self) -> Result<ExperienceDraft, FormError> {
        Ok(ExperienceDraft {
            company: self.company.trim().to_string(),
            position: self.position.trim().to_string(),
            description: self.description.trim().to_string(),
            start_date: date("start_date", &self.start_date)?,
            end_date: date("end_date", &self.end_date)?,
            location: optional(&self.location),
            company_url: optional(&self.company_url),
            order_index: self.order_index,
        })
    }
}
