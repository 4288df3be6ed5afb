//! Postgres-backed repository built on SeaORM.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use models::client::{self, Entity as ClientEntity};
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, Order,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set, SqlErr,
};
use tracing::debug;

use crate::client::domain::{Client, ClientSortField};
use crate::client::repository::{ClientPage, ClientPageRequest, ClientRepository, RepositoryError};
use crate::pagination::{Direction, Page};

pub struct SeaOrmClientRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmClientRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn fetch_page(&self, select: Select<ClientEntity>, request: ClientPageRequest) -> Result<ClientPage<Client>, RepositoryError> {
        let request = request.normalize();
        let paginator = apply_sort(select, &request).paginate(&self.db, request.size);
        let total = paginator.num_items().await.map_err(storage)?;
        if request.starts_past(total) {
            return Ok(Page::new(Vec::new(), request, total));
        }
        let rows = paginator.fetch_page(request.page).await.map_err(storage)?;
        debug!(page = request.page, size = request.size, total, "fetched client page");
        Ok(Page::new(rows.into_iter().map(Client::from).collect(), request, total))
    }
}

fn storage(e: DbErr) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}

fn column(field: ClientSortField) -> client::Column {
    match field {
        ClientSortField::Id => client::Column::Id,
        ClientSortField::Name => client::Column::Name,
        ClientSortField::Cpf => client::Column::Cpf,
        ClientSortField::Income => client::Column::Income,
        ClientSortField::BirthDate => client::Column::BirthDate,
        ClientSortField::Children => client::Column::Children,
    }
}

fn apply_sort(select: Select<ClientEntity>, request: &ClientPageRequest) -> Select<ClientEntity> {
    let order = match request.sort.direction {
        Direction::Asc => Order::Asc,
        Direction::Desc => Order::Desc,
    };
    let select = match request.sort.field {
        ClientSortField::Name => select.order_by(SimpleExpr::from(Func::lower(Expr::col(client::Column::Name))), order),
        field => select.order_by(column(field), order),
    };
    if request.sort.field == ClientSortField::Id {
        select
    } else {
        select.order_by_asc(client::Column::Id)
    }
}

/// `%needle%` with LIKE metacharacters escaped by `\`.
fn contains_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for ch in needle.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

impl From<client::Model> for Client {
    fn from(m: client::Model) -> Self {
        Self {
            id: Some(m.id),
            name: m.name,
            cpf: m.cpf,
            income: m.income,
            birth_date: m.birth_date.with_timezone(&Utc),
            children: m.children,
        }
    }
}

fn active_model(c: Client) -> client::ActiveModel {
    client::ActiveModel {
        id: match c.id {
            Some(id) => Set(id),
            None => NotSet,
        },
        name: Set(c.name),
        cpf: Set(c.cpf),
        income: Set(c.income),
        birth_date: Set(c.birth_date.into()),
        children: Set(c.children),
    }
}

#[async_trait]
impl ClientRepository for SeaOrmClientRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Client>, RepositoryError> {
        let found = ClientEntity::find_by_id(id).one(&self.db).await.map_err(storage)?;
        Ok(found.map(Client::from))
    }

    async fn find_all(&self) -> Result<Vec<Client>, RepositoryError> {
        let rows = ClientEntity::find()
            .order_by_asc(client::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage)?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn find_all_paged(&self, request: ClientPageRequest) -> Result<ClientPage<Client>, RepositoryError> {
        self.fetch_page(ClientEntity::find(), request).await
    }

    async fn find_by_income(&self, min_income: f64, request: ClientPageRequest) -> Result<ClientPage<Client>, RepositoryError> {
        let select = ClientEntity::find().filter(client::Column::Income.gte(min_income));
        self.fetch_page(select, request).await
    }

    async fn find_by_name_containing_ignore_case(&self, name: &str) -> Result<Vec<Client>, RepositoryError> {
        let pattern = LikeExpr::new(contains_pattern(name)).escape('\\');
        let rows = ClientEntity::find()
            .filter(Expr::expr(Func::lower(Expr::col(client::Column::Name))).like(pattern))
            .order_by_asc(client::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage)?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn find_by_birth_date_same_calendar_day(&self, reference: DateTime<Utc>) -> Result<Vec<Client>, RepositoryError> {
        let month = reference.month() as i32;
        let day = reference.day() as i32;
        let rows = ClientEntity::find()
            .filter(Expr::cust_with_values(
                "EXTRACT(MONTH FROM birth_date AT TIME ZONE 'UTC') = $1 AND EXTRACT(DAY FROM birth_date AT TIME ZONE 'UTC') = $2",
                [month, day],
            ))
            .order_by_asc(client::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage)?;
        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn save(&self, client: Client) -> Result<Client, RepositoryError> {
        let id = client.id;
        let am = active_model(client);
        let saved = match id {
            None => am.insert(&self.db).await.map_err(storage)?,
            Some(id) => am.update(&self.db).await.map_err(|e| match e {
                DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepositoryError::NotFound(id),
                other => storage(other),
            })?,
        };
        Ok(Client::from(saved))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let res = ClientEntity::delete_by_id(id).exec(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => RepositoryError::IntegrityConflict(detail),
            _ => storage(e),
        })?;
        if res.rows_affected == 0 {
            return Err(RepositoryError::NotFound(id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        ClientEntity::find().count(&self.db).await.map_err(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{PageRequest, Sort};
    use crate::test_support::{get_db, new_client};
    use chrono::TimeZone;

    #[test]
    fn contains_pattern_escapes_like_metacharacters() {
        assert_eq!(contains_pattern(""), "%%");
        assert_eq!(contains_pattern("CaR"), "%car%");
        assert_eq!(contains_pattern("50%_a\\b"), "%50\\%\\_a\\\\b%");
    }

    #[tokio::test]
    async fn seaorm_repository_round_trip() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmClientRepository::new(db);

        let before = repo.count().await?;
        let mut fresh = new_client("Zuleica Integration");
        fresh.income = 987_654.0;
        fresh.birth_date = Utc.with_ymd_and_hms(1961, 2, 27, 12, 0, 0).unwrap();
        let saved = repo.save(fresh).await?;
        let id = saved.id.expect("store assigns id");
        assert_eq!(repo.count().await?, before + 1);

        let by_name = repo.find_by_name_containing_ignore_case("zULEICA integ").await?;
        assert!(by_name.iter().any(|c| c.id == Some(id)));

        let by_day = repo
            .find_by_birth_date_same_calendar_day(Utc.with_ymd_and_hms(2030, 2, 27, 0, 0, 0).unwrap())
            .await?;
        assert!(by_day.iter().any(|c| c.id == Some(id)));

        let rich = repo.find_by_income(987_654.0, PageRequest::new(0, 10, Sort::default())).await?;
        assert!(rich.content.iter().all(|c| c.income >= 987_654.0));
        assert!(rich.content.iter().any(|c| c.id == Some(id)));

        let mut changed = saved.clone();
        changed.children = 4;
        assert_eq!(repo.save(changed).await?.children, 4);

        repo.delete_by_id(id).await?;
        assert_eq!(repo.delete_by_id(id).await, Err(RepositoryError::NotFound(id)));
        assert_eq!(repo.save(saved).await, Err(RepositoryError::NotFound(id)));
        assert_eq!(repo.count().await?, before);
        Ok(())
    }
}
