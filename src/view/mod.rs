//! Presentation layer: the public portfolio view, admin screen state and display helpers.

pub mod admin;
pub mod display;
pub mod forms;
pub mod public;

pub use admin::{ManagerScreen, MessagesScreen, ProfileScreen};
pub use public::{ContactForm, PortfolioPage, PortfolioView, Section};

use crate::models::{Experience, Profile, Project, Skill};
use async_trait::async_trait;
use serde::Serialize;

/// Where the public view reads its four lists from: the store directly (server side) or the
/// HTTP endpoints (client side).
#[async_trait]
pub trait PortfolioSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn profile(&self) -> Result<Option<Profile>, Self::Error>;
    async fn skills(&self) -> Result<Vec<Skill>, Self::Error>;
    async fn projects(&self) -> Result<Vec<Project>, Self::Error>;
    async fn experiences(&self) -> Result<Vec<Experience>, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient feedback shown after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}
