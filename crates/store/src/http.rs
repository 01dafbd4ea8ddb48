//! HTTP implementation of [`DocumentStore`] against the document-store API.
//!
//! Collections are addressed as `{base_url}/groups/{id}` and
//! `{base_url}/users/{id}`. A 404 is the store's "no such document" answer
//! and maps to `Ok(None)`; every other non-2xx status is an error.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crescendo_common::error::AppError;
use crescendo_common::types::{Group, User};

use crate::DocumentStore;

pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, AppError> {
        let url = format!("{}/{}/{}", self.base_url, collection, id);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let document = response.error_for_status()?.json::<T>().await?;
        tracing::debug!(collection, id, "Fetched document");
        Ok(Some(document))
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, AppError> {
        self.fetch("groups", group_id).await
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.fetch("users", user_id).await
    }
}
