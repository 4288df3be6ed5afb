//! Client records: entity, transfer object, repository contract and the application service.

pub mod domain;
pub mod dto;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Client, ClientSortField};
pub use dto::ClientDto;
pub use repository::{ClientPageRequest, ClientRepository, RepositoryError};
pub use service::ClientService;
