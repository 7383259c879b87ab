//! Admin screen state: one self-contained container per management screen.
//!
//! Every mutation is followed by a full re-list, so `items` always mirrors the store.

use super::display::unread_count;
use super::Notice;
use crate::client::{HttpApi, Messages, Profiles, Resource};
use crate::models::{ContactMessage, Profile};
use crate::view::forms::ProfileForm;
use serde_json::{Map, Value};
use uuid::Uuid;

/// List plus create/edit dialog for one resource.
pub struct ManagerScreen<R: Resource> {
    pub items: Vec<R::Row>,
    pub dialog_open: bool,
    /// Row being edited; `None` while creating.
    pub editing: Option<R::Id>,
    pub form: R::Form,
}

impl<R: Resource> Default for ManagerScreen<R> {
    fn default() -> Self {
        ManagerScreen {
            items: Vec::new(),
            dialog_open: false,
            editing: None,
            form: R::Form::default(),
        }
    }
}

impl<R: Resource> ManagerScreen<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the list. A failed fetch is logged and leaves the list empty.
    pub async fn refresh(&mut self, api: &HttpApi) {
        self.items = match api.list::<R>().await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(resource = R::PATH, error = %e, "list failed");
                Vec::new()
            }
        };
    }

    pub fn open_new(&mut self) {
        self.editing = None;
        self.form = R::Form::default();
        self.dialog_open = true;
    }

    pub fn edit(&mut self, row: &R::Row) {
        self.editing = Some(R::id(row));
        self.form = R::form(row);
        self.dialog_open = true;
    }

    pub fn close(&mut self) {
        self.dialog_open = false;
        self.editing = None;
        self.form = R::Form::default();
    }

    /// Create or update from the form. On success the dialog closes and the list reloads;
    /// on failure the dialog stays open with the form intact.
    pub async fn submit(&mut self, api: &HttpApi) -> Notice {
        let draft = match R::draft(&self.form) {
            Ok(draft) => draft,
            Err(e) => return Notice::error(e.to_string()),
        };
        let (result, verb) = match &self.editing {
            Some(id) => (api.update::<R>(id, &draft).await, "updated"),
            None => (api.create::<R>(&draft).await, "created"),
        };
        match result {
            Ok(_) => {
                self.close();
                self.refresh(api).await;
                Notice::success(format!("{} {} successfully", R::LABEL, verb))
            }
            Err(e) => {
                tracing::warn!(resource = R::PATH, error = %e, "save failed");
                Notice::error(format!("Failed to save {}", R::LABEL.to_lowercase()))
            }
        }
    }

    pub async fn delete(&mut self, api: &HttpApi, id: &R::Id) -> Notice {
        match api.delete::<R>(id).await {
            Ok(()) => {
                self.refresh(api).await;
                Notice::success(format!("{} deleted successfully", R::LABEL))
            }
            Err(e) => {
                tracing::warn!(resource = R::PATH, error = %e, "delete failed");
                Notice::error(format!("Failed to delete {}", R::LABEL.to_lowercase()))
            }
        }
    }
}

/// The singleton profile editor: saving creates the first profile, then updates it.
#[derive(Default)]
pub struct ProfileScreen {
    pub profile: Option<Profile>,
    pub form: ProfileForm,
}

impl ProfileScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, api: &HttpApi) {
        match api.profile().await {
            Ok(profile) => {
                self.form = profile.as_ref().map(ProfileForm::from_row).unwrap_or_default();
                self.profile = profile;
            }
            Err(e) => tracing::warn!(error = %e, "profile load failed"),
        }
    }

    pub async fn save(&mut self, api: &HttpApi) -> Notice {
        let draft = self.form.draft();
        let result = match &self.profile {
            Some(existing) => api.update::<Profiles>(&existing.id, &draft).await,
            None => api.create::<Profiles>(&draft).await,
        };
        match result {
            Ok(saved) => {
                self.form = ProfileForm::from_row(&saved);
                self.profile = Some(saved);
                Notice::success("Profile saved successfully")
            }
            Err(e) => {
                tracing::warn!(error = %e, "profile save failed");
                Notice::error("Failed to save profile")
            }
        }
    }
}

/// Contact inbox: read/unread toggling and deletion.
#[derive(Default)]
pub struct MessagesScreen {
    pub messages: Vec<ContactMessage>,
}

impl MessagesScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn refresh(&mut self, api: &HttpApi) {
        self.messages = match api.list::<Messages>().await {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!(error = %e, "message list failed");
                Vec::new()
            }
        };
    }

    /// Flip the read flag of `id`. Only `read` is sent; the rest of the message is untouched.
    pub async fn toggle_read(&mut self, api: &HttpApi, id: &Uuid) -> Notice {
        let Some(current) = self.messages.iter().find(|m| m.id == *id).map(|m| m.read) else {
            return Notice::error("Failed to update message");
        };
        let mut fields = Map::new();
        fields.insert("read".into(), Value::Bool(!current));
        match api.patch::<Messages>(id, fields).await {
            Ok(_) => {
                self.refresh(api).await;
                Notice::success(format!("Message marked as {}", if current { "unread" } else { "read" }))
            }
            Err(e) => {
                tracing::warn!(error = %e, "message update failed");
                Notice::error("Failed to update message")
            }
        }
    }

    pub async fn delete(&mut self, api: &HttpApi, id: &Uuid) -> Notice {
        match api.delete::<Messages>(id).await {
            Ok(()) => {
                self.refresh(api).await;
                Notice::success("Message deleted successfully")
            }
            Err(e) => {
                tracing::warn!(error = %e, "message delete failed");
                Notice::error("Failed to delete message")
            }
        }
    }

    pub fn unread_count(&self) -> usize {
        unread_count(&self.messages)
    }
}
