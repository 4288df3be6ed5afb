//! Persistence models (SeaORM entities) and connection helpers.

pub mod db;
pub mod client;
