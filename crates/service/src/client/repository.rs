use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::domain::{Client, ClientSortField};
use crate::pagination::{Page, PageRequest};

pub type ClientPageRequest = PageRequest<ClientSortField>;
pub type ClientPage<T> = Page<T, ClientSortField>;

/// Failures a repository reports to the service layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("no client with id {0}")]
    NotFound(i64),
    /// Removal blocked by another record depending on the target.
    #[error("integrity conflict: {0}")]
    IntegrityConflict(String),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Persistence abstraction for client records.
///
/// Implementations own durability and id assignment; any engine honouring this contract can back
/// [`super::ClientService`].
///
/// Paged queries order names case-insensitively. Accented letters follow code point order in
/// memory and the column collation in Postgres, which agree under the `C` collation.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, RepositoryError>;

    /// Every client, in the store's native order.
    async fn find_all(&self) -> Result<Vec<Client>, RepositoryError>;

    async fn find_all_paged(&self, request: ClientPageRequest) -> Result<ClientPage<Client>, RepositoryError>;

    /// Clients whose income is greater than or equal to `min_income`.
    async fn find_by_income(&self, min_income: f64, request: ClientPageRequest) -> Result<ClientPage<Client>, RepositoryError>;

    /// Case-insensitive substring match on the name; `""` matches all clients.
    async fn find_by_name_containing_ignore_case(&self, name: &str) -> Result<Vec<Client>, RepositoryError>;

    /// Clients born on the same month and day as `reference`, any year.
    async fn find_by_birth_date_same_calendar_day(&self, reference: DateTime<Utc>) -> Result<Vec<Client>, RepositoryError>;

    /// Insert when `client.id` is `None`, otherwise update; returns the stored form.
    async fn save(&self, client: Client) -> Result<Client, RepositoryError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}
