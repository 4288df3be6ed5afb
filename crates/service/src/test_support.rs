//! Fixtures for this crate's tests and for the server's integration tests.
//!
//! Every call builds fresh values; stores seeded from them never share state.

use chrono::{DateTime, TimeZone, Utc};

use crate::client::{Client, ClientDto};

pub const SEED_COUNT: u64 = 12;
/// Seeded clients with income >= 4000.0.
pub const SEED_INCOME_AT_LEAST_4000: u64 = 5;
pub const CAROLINA_ID: i64 = 4;
pub const SILVIO_ID: i64 = 11;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap_or_default()
}

fn seeded(id: i64, name: &str, cpf: &str, income: f64, birth_date: DateTime<Utc>, children: i32) -> Client {
    Client { id: Some(id), name: name.into(), cpf: cpf.into(), income, birth_date, children }
}

/// Twelve clients with ids 1..=12. Exactly one is born on December 23rd (1996).
pub fn seed_clients() -> Vec<Client> {
    vec![
        seeded(1, "Conceição Evaristo", "10619244881", 1500.0, at(1955, 7, 13, 20, 50), 2),
        seeded(2, "Lázaro Ramos", "10619244881", 2500.0, at(1996, 12, 21, 7, 0), 2),
        seeded(3, "Clarice Lispector", "10919444522", 4800.0, at(1960, 4, 13, 7, 50), 2),
        seeded(CAROLINA_ID, "Carolina Maria de Jesus", "10419244771", 7500.0, at(1996, 12, 23, 7, 0), 0),
        seeded(5, "Gilberto Gil", "10419344882", 2500.0, at(1949, 5, 5, 7, 0), 4),
        seeded(6, "Djamila Ribeiro", "10619244884", 4500.0, at(1975, 11, 10, 7, 0), 1),
        seeded(7, "Jose Saramago", "10239254871", 3800.0, at(1996, 12, 24, 7, 0), 1),
        seeded(8, "Toni Morrison", "10219344681", 10000.0, at(1940, 2, 23, 7, 0), 0),
        seeded(9, "Yuval Noah Harari", "10619244881", 1500.0, at(1956, 9, 23, 7, 0), 2),
        seeded(10, "Chimamanda Adichie", "10114274861", 1500.0, at(1956, 9, 23, 7, 0), 2),
        seeded(SILVIO_ID, "Silvio Almeida", "10164334861", 4000.0, at(1976, 7, 23, 7, 0), 2),
        seeded(12, "Jorge Amado", "10124544861", 3000.0, at(1912, 8, 10, 7, 0), 3),
    ]
}

/// A client that has not been stored yet.
pub fn new_client(name: &str) -> Client {
    Client {
        id: None,
        name: name.into(),
        cpf: "10212012020".into(),
        income: 2000.0,
        birth_date: at(1958, 9, 20, 8, 0),
        children: 1,
    }
}

pub fn new_client_dto(name: &str) -> ClientDto {
    ClientDto::from(new_client(name))
}

/// Postgres connection with migrations applied, or `None` when DB tests are disabled.
#[cfg(test)]
pub async fn get_db() -> Result<Option<sea_orm::DatabaseConnection>, anyhow::Error> {
    use migration::MigratorTrait;

    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(Some(db))
}
