//! Service layer for client records.
//! - Maps between transfer objects and persisted entities.
//! - Defines the repository contract and ships in-memory and SeaORM implementations.
//! - Translates storage failures into [`errors::ServiceError`].

pub mod errors;
pub mod pagination;
pub mod client;
pub mod test_support;
