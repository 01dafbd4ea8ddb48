//! Read-only client for the external document store holding group and user
//! records. The dispatcher only ever needs two lookups, both keyed by id, so
//! the whole collaborator is captured by the [`DocumentStore`] trait.

pub mod http;
pub mod memory;

use async_trait::async_trait;

use crescendo_common::error::AppError;
use crescendo_common::types::{Group, User};

pub use http::HttpStore;
pub use memory::MemoryStore;

/// Lookup interface over the external document store.
///
/// `Ok(None)` means the record does not exist; transport and decode problems
/// surface as `Err`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, AppError>;

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError>;
}
