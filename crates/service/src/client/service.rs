use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use super::dto::ClientDto;
use super::repository::{ClientPage, ClientPageRequest, ClientRepository};
use crate::errors::ServiceError;

/// Application service for client records.
///
/// Owns DTO <-> entity mapping and the not-found policy; holds no state besides the repository
/// handle, so one instance can serve concurrent callers.
pub struct ClientService<R: ClientRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ClientRepository + ?Sized> Clone for ClientService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: ClientRepository + ?Sized> ClientService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn find_all_paged(&self, request: ClientPageRequest) -> Result<ClientPage<ClientDto>, ServiceError> {
        let page = self.repo.find_all_paged(request).await?;
        Ok(page.map(ClientDto::from))
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<ClientDto>, ServiceError> {
        let rows = self.repo.find_all().await?;
        Ok(rows.into_iter().map(ClientDto::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn find_by_income(&self, min_income: f64, request: ClientPageRequest) -> Result<ClientPage<ClientDto>, ServiceError> {
        let page = self.repo.find_by_income(min_income, request).await?;
        Ok(page.map(ClientDto::from))
    }

    #[instrument(skip(self))]
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<ClientDto>, ServiceError> {
        let rows = self.repo.find_by_name_containing_ignore_case(name).await?;
        Ok(rows.into_iter().map(ClientDto::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn find_by_birth_day(&self, reference: DateTime<Utc>) -> Result<Vec<ClientDto>, ServiceError> {
        let rows = self.repo.find_by_birth_date_same_calendar_day(reference).await?;
        Ok(rows.into_iter().map(ClientDto::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<ClientDto, ServiceError> {
        let found = self.repo.find_by_id(id).await?;
        found
            .map(ClientDto::from)
            .ok_or_else(|| ServiceError::not_found("Entity not found"))
    }

    #[instrument(skip(self, dto), fields(name = %dto.name))]
    pub async fn insert(&self, dto: ClientDto) -> Result<ClientDto, ServiceError> {
        let mut entity = dto.to_entity();
        entity.id = None;
        let saved = self.repo.save(entity).await?;
        info!(id = ?saved.id, "client inserted");
        Ok(ClientDto::from(saved))
    }

    /// Overwrites every mutable field of client `id` with the values from `dto`.
    #[instrument(skip(self, dto))]
    pub async fn update(&self, id: i64, dto: ClientDto) -> Result<ClientDto, ServiceError> {
        let Some(mut entity) = self.repo.find_by_id(id).await? else {
            warn!(id, "update of unknown client");
            return Err(ServiceError::not_found(format!("Id not found {id}")));
        };
        dto.copy_onto(&mut entity);
        let saved = self.repo.save(entity).await?;
        info!(id, "client updated");
        Ok(ClientDto::from(saved))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        match self.repo.delete_by_id(id).await {
            Ok(()) => {
                info!(id, "client deleted");
                Ok(())
            }
            Err(e) => {
                warn!(id, error = %e, "client delete rejected");
                Err(e.into())
            }
        }
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(self.repo.count().await?)
    }
}
