//! The public portfolio: aggregate load, section rendering and the contact form.

use super::display::{self, group_by_category};
use super::{Notice, PortfolioSource};
use crate::client::HttpApi;
use crate::models::{ContactDraft, Experience, Profile, Project, Skill};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub const NO_ABOUT: &str = "No about information to display yet.";
pub const NO_PROJECTS: &str = "No projects to display yet.";
pub const NO_EXPERIENCES: &str = "No experiences to display yet.";

/// Everything the public page shows, fetched in one all-or-nothing batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct PortfolioView {
    pub profile: Option<Profile>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub experiences: Vec<Experience>,
}

impl PortfolioView {
    /// Issue the four list calls concurrently. The first failure fails the whole load.
    pub async fn load<S>(source: &S) -> Result<Self, S::Error>
    where
        S: PortfolioSource + ?Sized,
    {
        let (profile, skills, projects, experiences) = tokio::try_join!(
            source.profile(),
            source.skills(),
            source.projects(),
            source.experiences(),
        )?;
        Ok(PortfolioView {
            profile,
            skills,
            projects,
            experiences,
        })
    }

    /// Like `load`, but a failure is logged and yields the empty view.
    pub async fn load_or_empty<S>(source: &S) -> Self
    where
        S: PortfolioSource + ?Sized,
    {
        match Self::load(source).await {
            Ok(view) => view,
            Err(e) => {
                tracing::warn!(error = %e, "portfolio load failed; showing empty page");
                PortfolioView::default()
            }
        }
    }

    pub fn page(&self, now: DateTime<Utc>) -> PortfolioPage {
        let about = match &self.profile {
            Some(profile) if !self.skills.is_empty() => Section::Shown(About {
                profile: profile.clone(),
                skill_groups: group_by_category(&self.skills),
            }),
            _ => Section::empty(NO_ABOUT),
        };
        let projects = if self.projects.is_empty() {
            Section::empty(NO_PROJECTS)
        } else {
            Section::Shown(self.projects.clone())
        };
        let experience = if self.experiences.is_empty() {
            Section::empty(NO_EXPERIENCES)
        } else {
            Section::Shown(
                self.experiences
                    .iter()
                    .map(|e| TimelineEntry {
                        period: display::period(e),
                        ongoing: e.is_ongoing(),
                        experience: e.clone(),
                    })
                    .collect(),
            )
        };
        let owner = self.profile.as_ref().map(|p| p.full_name.as_str()).unwrap_or_default();
        PortfolioPage {
            hero: self.profile.clone(),
            about,
            projects,
            experience,
            footer: display::copyright(owner, now),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Shown(T),
    Empty { message: &'static str },
}

impl<T> Section<T> {
    fn empty(message: &'static str) -> Self {
        Section::Empty { message }
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, Section::Shown(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct About {
    pub profile: Profile,
    pub skill_groups: Vec<(String, Vec<Skill>)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub experience: Experience,
    pub period: String,
    pub ongoing: bool,
}

/// Rendered sections of the public page. The hero is omitted when there is no profile.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioPage {
    pub hero: Option<Profile>,
    pub about: Section<About>,
    pub projects: Section<Vec<Project>>,
    pub experience: Section<Vec<TimelineEntry>>,
    pub footer: String,
}

pub const SENT: &str = "Message sent successfully! I will get back to you soon.";
pub const NOT_SENT: &str = "Failed to send message. Please try again.";

/// The public contact form. Cleared after a successful send, kept on failure.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub draft: ContactDraft,
}

impl ContactForm {
    pub async fn submit(&mut self, api: &HttpApi) -> Notice {
        match api.send_message(&self.draft).await {
            Ok(_) => {
                self.draft = ContactDraft::default();
                Notice::success(SENT)
            }
            Err(e) => {
                tracing::warn!(error = %e, "contact submission failed");
                Notice::error(NOT_SENT)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    #[derive(Debug, thiserror::Error)]
    #[error("projects unavailable")]
    struct Down;

    #[derive(Default)]
    struct Fixture {
        fail_projects: bool,
        calls: AtomicUsize,
    }

    fn profile() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: "ada@example.com".into(),
            full_name: "Ada Lovelace".into(),
            bio: Some("Analyst".into()),
            avatar_url: None,
            location: None,
            github_url: None,
            linkedin_url: None,
            twitter_url: None,
            resume_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[async_trait]
    impl PortfolioSource for Fixture {
        type Error = Down;

        async fn profile(&self) -> Result<Option<Profile>, Down> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(profile()))
        }

        async fn skills(&self) -> Result<Vec<Skill>, Down> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Skill {
                id: 1,
                name: "Rust".into(),
                category: "Backend".into(),
                icon: None,
                order_index: 0,
                created_at: Utc::now(),
            }])
        }

        async fn projects(&self) -> Result<Vec<Project>, Down> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_projects {
                return Err(Down);
            }
            Ok(vec![])
        }

        async fn experiences(&self) -> Result<Vec<Experience>, Down> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Experience {
                id: Uuid::new_v4(),
                company: "Acme".into(),
                position: "Engineer".into(),
                description: "Built things".into(),
                start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                end_date: None,
                location: None,
                company_url: None,
                order_index: 0,
                created_at: Utc::now(),
            }])
        }
    }

    #[tokio::test]
    async fn one_failure_renders_nothing() {
        let source = Fixture {
            fail_projects: true,
            ..Default::default()
        };
        assert!(PortfolioView::load(&source).await.is_err());

        let view = PortfolioView::load_or_empty(&source).await;
        assert_eq!(view, PortfolioView::default());
        let page = view.page(Utc::now());
        assert!(page.hero.is_none());
        assert_eq!(page.about, Section::Empty { message: NO_ABOUT });
        assert_eq!(page.experience, Section::Empty { message: NO_EXPERIENCES });
    }

    #[tokio::test]
    async fn successful_load_renders_sections() {
        let source = Fixture::default();
        let view = PortfolioView::load(&source).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 4);

        let page = view.page(Utc::now());
        assert!(page.hero.is_some());
        assert!(page.about.is_shown());
        assert_eq!(page.projects, Section::Empty { message: NO_PROJECTS });
        match page.experience {
            Section::Shown(entries) => {
                assert_eq!(entries[0].period, "Jan 2020 - Present");
                assert!(entries[0].ongoing);
            }
            Section::Empty { .. } => panic!("experience section should be shown"),
        }
        assert!(page.footer.contains("Ada Lovelace"));
    }
}
