use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use service::client::{ClientPageRequest, ClientSortField};
use service::pagination::{Direction, PageRequest, Sort, DEFAULT_PAGE_SIZE};
use tracing::info;
use utoipa::IntoParams;

use crate::{
    errors::JsonApiError,
    openapi::{ClientDto, ClientPage},
    state::ServerState,
};

type Dto = service::client::ClientDto;
type DtoPage = service::client::repository::ClientPage<Dto>;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 0-based page index (default 0)
    pub page: Option<u64>,
    /// Page size (default 12, max 100)
    pub lines_per_page: Option<u64>,
    /// `ASC` or `DESC` (default `ASC`)
    pub direction: Option<String>,
    /// id, name, cpf, income, birthDate or children (default `name`)
    pub order_by: Option<String>,
}

impl PageQuery {
    fn into_request(self) -> Result<ClientPageRequest, JsonApiError> {
        let direction = match self.direction.as_deref() {
            Some(d) => d.parse::<Direction>().map_err(|e| JsonApiError::bad_request(e.to_string()))?,
            None => Direction::Asc,
        };
        let field = match self.order_by.as_deref() {
            Some(f) => f.parse::<ClientSortField>().map_err(|e| JsonApiError::bad_request(e.to_string()))?,
            None => ClientSortField::Name,
        };
        Ok(PageRequest::new(
            self.page.unwrap_or(0),
            self.lines_per_page.unwrap_or(DEFAULT_PAGE_SIZE),
            Sort::new(field, direction),
        ))
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct IncomeQuery {
    /// Minimum income, inclusive
    pub income: f64,
    pub page: Option<u64>,
    pub lines_per_page: Option<u64>,
    pub direction: Option<String>,
    pub order_by: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Case-insensitive fragment; empty or missing matches everyone
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BirthdayQuery {
    /// RFC 3339 instant or `YYYY-MM-DD`; only month and day are compared
    pub date: String,
}

fn parse_reference_date(raw: &str) -> Result<DateTime<Utc>, JsonApiError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| JsonApiError::bad_request(format!("invalid date `{raw}`")))
}

#[utoipa::path(
    get, path = "/clients", tag = "clients",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of clients", body = ClientPage),
        (status = 400, description = "Bad sort or paging parameters")
    )
)]
pub async fn find_all_paged(
    State(state): State<ServerState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<DtoPage>, JsonApiError> {
    let Query(q) = query?;
    let request = q.into_request()?;
    Ok(Json(state.clients.find_all_paged(request).await?))
}

#[utoipa::path(
    get, path = "/clients/all", tag = "clients",
    responses((status = 200, description = "Every client", body = [ClientDto]))
)]
pub async fn find_all(State(state): State<ServerState>) -> Result<Json<Vec<Dto>>, JsonApiError> {
    let all = state.clients.find_all().await?;
    info!(count = all.len(), "list all clients");
    Ok(Json(all))
}

#[utoipa::path(
    get, path = "/clients/income", tag = "clients",
    params(IncomeQuery),
    responses(
        (status = 200, description = "Clients with income at or above the threshold", body = ClientPage),
        (status = 400, description = "Bad parameters")
    )
)]
pub async fn find_by_income(
    State(state): State<ServerState>,
    query: Result<Query<IncomeQuery>, QueryRejection>,
) -> Result<Json<DtoPage>, JsonApiError> {
    let Query(q) = query?;
    let paging = PageQuery { page: q.page, lines_per_page: q.lines_per_page, direction: q.direction, order_by: q.order_by };
    let request = paging.into_request()?;
    Ok(Json(state.clients.find_by_income(q.income, request).await?))
}

#[utoipa::path(
    get, path = "/clients/name", tag = "clients",
    params(NameQuery),
    responses((status = 200, description = "Clients whose name contains the fragment", body = [ClientDto]))
)]
pub async fn find_by_name(
    State(state): State<ServerState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Json<Vec<Dto>>, JsonApiError> {
    let Query(q) = query?;
    Ok(Json(state.clients.find_by_name(&q.name).await?))
}

#[utoipa::path(
    get, path = "/clients/birthday", tag = "clients",
    params(BirthdayQuery),
    responses(
        (status = 200, description = "Clients born on the same month and day", body = [ClientDto]),
        (status = 400, description = "Unparseable date")
    )
)]
pub async fn find_by_birthday(
    State(state): State<ServerState>,
    query: Result<Query<BirthdayQuery>, QueryRejection>,
) -> Result<Json<Vec<Dto>>, JsonApiError> {
    let Query(q) = query?;
    let reference = parse_reference_date(&q.date)?;
    Ok(Json(state.clients.find_by_birth_day(reference).await?))
}

#[utoipa::path(
    get, path = "/clients/{id}", tag = "clients",
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 200, description = "OK", body = ClientDto),
        (status = 404, description = "Not Found")
    )
)]
pub async fn find_by_id(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Dto>, JsonApiError> {
    let Path(id) = id?;
    Ok(Json(state.clients.find_by_id(id).await?))
}

#[utoipa::path(
    post, path = "/clients", tag = "clients",
    request_body = ClientDto,
    responses(
        (status = 201, description = "Created", body = ClientDto),
        (status = 500, description = "Insert Failed")
    )
)]
pub async fn insert(
    State(state): State<ServerState>,
    body: Result<Json<Dto>, JsonRejection>,
) -> Result<impl IntoResponse, JsonApiError> {
    let Json(input) = body?;
    let created = state.clients.insert(input).await?;
    let location = created.id.map(|id| format!("/clients/{id}")).unwrap_or_default();
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

#[utoipa::path(
    put, path = "/clients/{id}", tag = "clients",
    params(("id" = i64, Path, description = "Client ID")),
    request_body = ClientDto,
    responses(
        (status = 200, description = "Updated", body = ClientDto),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Dto>, JsonRejection>,
) -> Result<Json<Dto>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = body?;
    Ok(Json(state.clients.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/clients/{id}", tag = "clients",
    params(("id" = i64, Path, description = "Client ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Referenced by other records")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.clients.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn reference_date_accepts_rfc3339_and_plain_dates() {
        let expected = Utc.with_ymd_and_hms(1996, 12, 23, 0, 0, 0).unwrap();
        assert_eq!(parse_reference_date("1996-12-23").unwrap(), expected);
        assert_eq!(parse_reference_date("1996-12-23T00:00:00Z").unwrap(), expected);
        assert_eq!(parse_reference_date("1996-12-23T02:00:00+02:00").unwrap(), expected);
        assert!(parse_reference_date("23/12/1996").is_err());
    }

    #[test]
    fn page_query_defaults_to_name_ascending() {
        let req = PageQuery::default().into_request().unwrap();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, DEFAULT_PAGE_SIZE);
        assert_eq!(req.sort, Sort::new(ClientSortField::Name, Direction::Asc));
    }

    #[test]
    fn page_query_rejects_unknown_sort() {
        let q = PageQuery { order_by: Some("salary".into()), ..PageQuery::default() };
        assert_eq!(q.into_request().unwrap_err().status, StatusCode::BAD_REQUEST);
    }
}
