//! Typed description of each HTTP resource: its path, row, write payload and form.

use crate::models::{
    ContactDraft, ContactMessage, Experience, ExperienceDraft, Profile, ProfileDraft, Project,
    ProjectDraft, Skill, SkillDraft,
};
use crate::view::forms::{ExperienceForm, FormError, ProfileForm, ProjectForm, SkillForm};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use uuid::Uuid;

pub trait Resource: Send + Sync + 'static {
    /// Segment under `/api`.
    const PATH: &'static str;
    /// Capitalized name used in notices.
    const LABEL: &'static str;

    type Row: DeserializeOwned + Clone + Send + Sync;
    type Draft: Serialize + Send + Sync;
    type Form: Default + Clone + Send + Sync;
    type Id: Display + Serialize + Clone + PartialEq + Send + Sync;

    fn id(row: &Self::Row) -> Self::Id;
    fn form(row: &Self::Row) -> Self::Form;
    /// Parse the form into a write payload; fails on fields that cannot be sent as typed.
    fn draft(form: &Self::Form) -> Result<Self::Draft, FormError>;
}

pub struct Profiles;
pub struct Skills;
pub struct Projects;
pub struct Experiences;
pub struct Messages;

impl Resource for Profiles {
    const PATH: &'static str = "profiles";
    const LABEL: &'static str = "Profile";
    type Row = Profile;
    type Draft = ProfileDraft;
    type Form = ProfileForm;
    type Id = Uuid;

    fn id(row: &Profile) -> Uuid {
        row.id
    }

    fn form(row: &Profile) -> ProfileForm {
        ProfileForm::from_row(row)
    }

    fn draft(form: &ProfileForm) -> Result<ProfileDraft, FormError> {
        Ok(form.draft())
    }
}

impl Resource for Skills {
    const PATH: &'static str = "skills";
    const LABEL: &'static str = "Skill";
    type Row = Skill;
    type Draft = SkillDraft;
    type Form = SkillForm;
    type Id = i64;

    fn id(row: &Skill) -> i64 {
        row.id
    }

    fn form(row: &Skill) -> SkillForm {
        SkillForm::from_row(row)
    }

    fn draft(form: &SkillForm) -> Result<SkillDraft, FormError> {
        Ok(form.draft())
    }
}

impl Resource for Projects {
    const PATH: &'static str = "projects";
    const LABEL: &'static str = "Project";
    type Row = Project;
    type Draft = ProjectDraft;
    type Form = ProjectForm;
    type Id = Uuid;

    fn id(row: &Project) -> Uuid {
        row.id
    }

    fn form(row: &Project) -> ProjectForm {
        ProjectForm::from_row(row)
    }

    fn draft(form: &ProjectForm) -> Result<ProjectDraft, FormError> {
        Ok(form.draft())
    }
}

impl Resource for Experiences {
    const PATH: &'static str = "experiences";
    const LABEL: &'static str = "Experience";
    type Row = Experience;
    type Draft = ExperienceDraft;
    type Form = ExperienceForm;
    type Id = Uuid;

    fn id(row: &Experience) -> Uuid {
        row.id
    }

    fn form(row: &Experience) -> ExperienceForm {
        ExperienceForm::from_row(row)
    }

    fn draft(form: &ExperienceForm) -> Result<ExperienceDraft, FormError> {
        form.draft()
    }
}

/// Contact messages: created by the public form, read and deleted by the admin.
impl Resource for Messages {
    const PATH: &'static str = "contact";
    const LABEL: &'static str = "Message";
    type Row = ContactMessage;
    type Draft = ContactDraft;
    type Form = ContactDraft;
    type Id = Uuid;

    fn id(row: &ContactMessage) -> Uuid {
        row.id
    }

    fn form(row: &ContactMessage) -> ContactDraft {
        ContactDraft {
            name: row.name.clone(),
            email: row.email.clone(),
            subject: row.subject.clone(),
            message: row.message.clone(),
        }
    }

    fn draft(form: &ContactDraft) -> Result<ContactDraft, FormError> {
        Ok(form.clone())
    }
}
