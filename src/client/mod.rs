//! HTTP client for the resource endpoints, used by the admin screens and the public view.

mod resource;

pub use resource::{Experiences, Messages, Profiles, Projects, Resource, Skills};

use crate::error::ErrorBody;
use crate::models::{ContactDraft, ContactMessage, Experience, Profile, Project, Skill};
use crate::response::Ack;
use crate::view::PortfolioSource;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx answer; `message` is the server's `{error}` text when it sent one.
    #[error("{status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// List endpoints answer with an array, except singletons which answer with an object or null.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Many(Vec<T>),
    One(Option<T>),
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Many(rows) => rows,
            Listing::One(row) => row.into_iter().collect(),
        }
    }
}

#[derive(Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl HttpApi {
    /// `base` is the server origin, e.g. `http://127.0.0.1:3000`.
    pub fn new(base: impl Into<String>) -> Self {
        HttpApi {
            http: reqwest::Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api/{}", self.base, path);
        let rb = self.http.request(method, url);
        match &self.token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    async fn send<T: DeserializeOwned>(rb: RequestBuilder) -> Result<T, ClientError> {
        let response = rb.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.canonical_reason().unwrap_or("error").to_string(),
            };
            tracing::debug!(status = %status, error = %message, "api call rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn list<R: Resource>(&self) -> Result<Vec<R::Row>, ClientError> {
        let listing: Listing<R::Row> = Self::send(self.request(Method::GET, R::PATH)).await?;
        Ok(listing.into_vec())
    }

    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R::Row, ClientError> {
        Self::send(self.request(Method::POST, R::PATH).json(draft)).await
    }

    /// Replace the editable fields of row `id` with `draft`.
    pub async fn update<R: Resource>(&self, id: &R::Id, draft: &R::Draft) -> Result<R::Row, ClientError> {
        let fields = match serde_json::to_value(draft)? {
            Value::Object(map) => map,
            other => return Err(ClientError::Decode(format!("draft is not an object: {}", other))),
        };
        self.patch::<R>(id, fields).await
    }

    /// Send only `fields`; the others keep their stored values.
    pub async fn patch<R: Resource>(&self, id: &R::Id, mut fields: Map<String, Value>) -> Result<R::Row, ClientError> {
        fields.insert("id".into(), serde_json::to_value(id)?);
        Self::send(self.request(Method::PUT, R::PATH).json(&fields)).await
    }

    pub async fn delete<R: Resource>(&self, id: &R::Id) -> Result<(), ClientError> {
        let path = format!("{}?id={}", R::PATH, id);
        let ack: Ack = Self::send(self.request(Method::DELETE, &path)).await?;
        if ack.success {
            Ok(())
        } else {
            Err(ClientError::Decode("delete not acknowledged".into()))
        }
    }

    /// The singleton profile, `None` before one has been saved.
    pub async fn profile(&self) -> Result<Option<Profile>, ClientError> {
        Ok(self.list::<Profiles>().await?.into_iter().next())
    }

    pub async fn send_message(&self, draft: &ContactDraft) -> Result<ContactMessage, ClientError> {
        self.create::<Messages>(draft).await
    }

    /// Raw JSON call, for endpoints without a typed resource.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        Self::send(self.request(Method::GET, path)).await
    }
}

#[async_trait]
impl PortfolioSource for HttpApi {
    type Error = ClientError;

    async fn profile(&self) -> Result<Option<Profile>, ClientError> {
        HttpApi::profile(self).await
    }

    async fn skills(&self) -> Result<Vec<Skill>, ClientError> {
        self.list::<Skills>().await
    }

    async fn projects(&self) -> Result<Vec<Project>, ClientError> {
        self.list::<Projects>().await
    }

    async fn experiences(&self) -> Result<Vec<Experience>, ClientError> {
        self.list::<Experiences>().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_accepts_array_object_and_null() {
        let many: Listing<u32> = serde_json::from_value(json!([1, 2])).unwrap();
        assert_eq!(many.into_vec(), vec![1, 2]);
        let one: Listing<u32> = serde_json::from_value(json!(7)).unwrap();
        assert_eq!(one.into_vec(), vec![7]);
        let none: Listing<u32> = serde_json::from_value(Value::Null).unwrap();
        assert!(none.into_vec().is_empty());
    }

    #[test]
    fn base_url_is_normalized() {
        let api = HttpApi::new("http://localhost:3000/");
        assert_eq!(api.base, "http://localhost:3000");
    }
}
