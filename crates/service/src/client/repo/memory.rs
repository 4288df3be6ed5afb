//! In-memory repository for tests, demos and running the server without a database.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::client::domain::Client;
use crate::client::repository::{ClientPage, ClientPageRequest, ClientRepository, RepositoryError};
use crate::pagination::Page;

#[derive(Default)]
struct State {
    rows: BTreeMap<i64, Client>,
    // never decremented, so deleted ids are not reused
    last_id: i64,
    dependents: HashSet<i64>,
}

/// `BTreeMap`-backed store; native order is ascending id.
#[derive(Default)]
pub struct InMemoryClientRepository {
    state: RwLock<State>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self { Self::default() }

    /// Fresh store holding `clients`; clients without an id get one assigned in order.
    pub fn with_clients(clients: impl IntoIterator<Item = Client>) -> Self {
        let mut state = State::default();
        for mut c in clients {
            let id = match c.id {
                Some(id) => id,
                None => state.last_id + 1,
            };
            c.id = Some(id);
            state.last_id = state.last_id.max(id);
            state.rows.insert(id, c);
        }
        Self { state: RwLock::new(state) }
    }

    /// Mark `id` as referenced elsewhere so deleting it hits an integrity conflict.
    pub async fn add_dependent(&self, id: i64) {
        self.state.write().await.dependents.insert(id);
    }

    async fn sorted_matching(&self, request: &ClientPageRequest, keep: impl Fn(&Client) -> bool) -> Vec<Client> {
        let state = self.state.read().await;
        let mut rows: Vec<Client> = state.rows.values().filter(|&c| keep(c)).cloned().collect();
        rows.sort_by(|a, b| a.compare(b, &request.sort));
        rows
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, RepositoryError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Client>, RepositoryError> {
        Ok(self.state.read().await.rows.values().cloned().collect())
    }

    async fn find_all_paged(&self, request: ClientPageRequest) -> Result<ClientPage<Client>, RepositoryError> {
        let request = request.normalize();
        let rows = self.sorted_matching(&request, |_| true).await;
        Ok(Page::from_sorted(rows, request))
    }

    async fn find_by_income(&self, min_income: f64, request: ClientPageRequest) -> Result<ClientPage<Client>, RepositoryError> {
        let request = request.normalize();
        let rows = self.sorted_matching(&request, |c| c.income >= min_income).await;
        Ok(Page::from_sorted(rows, request))
    }

    async fn find_by_name_containing_ignore_case(&self, name: &str) -> Result<Vec<Client>, RepositoryError> {
        let needle = name.to_lowercase();
        let state = self.state.read().await;
        Ok(state.rows.values().filter(|c| c.name_contains_ignore_case(&needle)).cloned().collect())
    }

    async fn find_by_birth_date_same_calendar_day(&self, reference: DateTime<Utc>) -> Result<Vec<Client>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.rows.values().filter(|c| c.born_on_same_calendar_day(reference)).cloned().collect())
    }

    async fn save(&self, mut client: Client) -> Result<Client, RepositoryError> {
        let mut state = self.state.write().await;
        match client.id {
            Some(id) => {
                let slot = state.rows.get_mut(&id).ok_or(RepositoryError::NotFound(id))?;
                *slot = client.clone();
            }
            None => {
                state.last_id += 1;
                let id = state.last_id;
                client.id = Some(id);
                state.rows.insert(id, client.clone());
            }
        }
        Ok(client)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        if !state.rows.contains_key(&id) {
            return Err(RepositoryError::NotFound(id));
        }
        if state.dependents.contains(&id) {
            return Err(RepositoryError::IntegrityConflict(format!("client {id} is still referenced")));
        }
        state.rows.remove(&id);
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.state.read().await.rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::domain::ClientSortField;
    use crate::pagination::{Direction, PageRequest, Sort};
    use crate::test_support::{new_client, seed_clients, CAROLINA_ID, SEED_COUNT};
    use chrono::TimeZone;

    fn repo() -> InMemoryClientRepository {
        InMemoryClientRepository::with_clients(seed_clients())
    }

    #[tokio::test]
    async fn delete_removes_existing_row() {
        let repo = repo();
        repo.delete_by_id(1).await.unwrap();
        assert!(repo.find_by_id(1).await.unwrap().is_none());
        assert_eq!(repo.count().await.unwrap(), SEED_COUNT - 1);
    }

    #[tokio::test]
    async fn delete_missing_id_reports_not_found() {
        let repo = repo();
        assert_eq!(repo.delete_by_id(i64::MAX).await, Err(RepositoryError::NotFound(i64::MAX)));
        assert_eq!(repo.count().await.unwrap(), SEED_COUNT);
    }

    #[tokio::test]
    async fn delete_with_dependents_reports_conflict() {
        let repo = repo();
        repo.add_dependent(4).await;
        assert!(matches!(repo.delete_by_id(4).await, Err(RepositoryError::IntegrityConflict(_))));
        assert!(repo.find_by_id(4).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn save_without_id_assigns_next_id() {
        let repo = repo();
        let saved = repo.save(new_client("Pablo Alberto")).await.unwrap();
        assert_eq!(saved.id, Some(SEED_COUNT as i64 + 1));
        assert_eq!(repo.find_by_id(saved.id.unwrap()).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = repo();
        repo.delete_by_id(SEED_COUNT as i64).await.unwrap();
        let saved = repo.save(new_client("Late Arrival")).await.unwrap();
        assert_eq!(saved.id, Some(SEED_COUNT as i64 + 1));
    }

    #[tokio::test]
    async fn save_with_unknown_id_is_not_found() {
        let repo = repo();
        let mut ghost = new_client("Ghost");
        ghost.id = Some(i64::MAX);
        assert_eq!(repo.save(ghost).await, Err(RepositoryError::NotFound(i64::MAX)));
    }

    #[tokio::test]
    async fn find_by_income_is_inclusive() {
        let repo = repo();
        let page = repo.find_by_income(4000.0, PageRequest::new(0, 10, Sort::default())).await.unwrap();
        assert_eq!(page.total_elements, 5);
        assert!(page.content.iter().all(|c| c.income >= 4000.0));
        assert!(page.content.iter().any(|c| c.income == 4000.0));
    }

    #[tokio::test]
    async fn find_all_paged_sorts_and_slices() {
        let repo = repo();
        let req = PageRequest::new(0, 3, Sort::new(ClientSortField::Income, Direction::Desc));
        let page = repo.find_all_paged(req).await.unwrap();
        assert_eq!(page.content.len(), 3);
        assert_eq!(page.total_elements, SEED_COUNT);
        assert_eq!(page.total_pages, 4);
        let incomes: Vec<f64> = page.content.iter().map(|c| c.income).collect();
        assert!(incomes.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn name_lookup_ignores_case() {
        let repo = repo();
        let found = repo.find_by_name_containing_ignore_case("cARoLiNa").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, Some(CAROLINA_ID));
    }

    #[tokio::test]
    async fn empty_name_matches_find_all() {
        let repo = repo();
        let by_name = repo.find_by_name_containing_ignore_case("").await.unwrap();
        assert_eq!(by_name, repo.find_all().await.unwrap());
    }

    #[tokio::test]
    async fn birthday_lookup_matches_month_and_day_only() {
        let repo = repo();
        let hit = repo
            .find_by_birth_date_same_calendar_day(Utc.with_ymd_and_hms(1996, 12, 23, 0, 0, 0).unwrap())
            .await
            .unwrap();
        assert!(!hit.is_empty());
        let miss = repo
            .find_by_birth_date_same_calendar_day(Utc.with_ymd_and_hms(1997, 12, 22, 0, 0, 0).unwrap())
            .await
            .unwrap();
        assert!(miss.is_empty());
    }
}
