//! Server-side `PortfolioSource`: reads straight from the store through `CrudService`.

use crate::config::ResolvedModel;
use crate::error::AppError;
use crate::models::{Experience, Profile, Project, Skill};
use crate::service::CrudService;
use crate::store::Store;
use crate::view::PortfolioSource;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct StoreSource<'a> {
    store: &'a dyn Store,
    model: &'a ResolvedModel,
}

impl<'a> StoreSource<'a> {
    pub fn new(store: &'a dyn Store, model: &'a ResolvedModel) -> Self {
        StoreSource { store, model }
    }

    async fn rows<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, AppError> {
        let table = self
            .model
            .table_by_path(path)
            .ok_or_else(|| AppError::Internal(format!("resource {} is not configured", path)))?;
        CrudService::list_rows(self.store, table)
            .await?
            .into_iter()
            .map(|row| {
                serde_json::from_value(Value::Object(row))
                    .map_err(|e| AppError::Internal(format!("malformed {} row: {}", path, e)))
            })
            .collect()
    }
}

#[async_trait]
impl PortfolioSource for StoreSource<'_> {
    type Error = AppError;

    async fn profile(&self) -> Result<Option<Profile>, AppError> {
        Ok(self.rows("profiles").await?.into_iter().next())
    }

    async fn skills(&self) -> Result<Vec<Skill>, AppError> {
        self.rows("skills").await
    }

    async fn projects(&self) -> Result<Vec<Project>, AppError> {
        self.rows("projects").await
    }

    async fn experiences(&self) -> Result<Vec<Experience>, AppError> {
        self.rows("experiences").await
    }
}
