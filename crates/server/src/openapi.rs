//! OpenAPI schemas. Names match the JSON bodies the handlers produce.

use chrono::{DateTime, Utc};
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ClientDto {
    pub id: Option<i64>,
    pub name: String,
    pub cpf: String,
    pub income: f64,
    pub birth_date: DateTime<Utc>,
    pub children: i32,
}

#[derive(ToSchema)]
pub struct PageSort {
    /// id, name, cpf, income, birthDate or children
    pub field: String,
    /// ASC or DESC
    pub direction: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ClientPage {
    pub content: Vec<ClientDto>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub sort: PageSort,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::clients::find_all_paged,
        crate::clients::find_all,
        crate::clients::find_by_income,
        crate::clients::find_by_name,
        crate::clients::find_by_birthday,
        crate::clients::find_by_id,
        crate::clients::insert,
        crate::clients::update,
        crate::clients::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ClientDto,
            PageSort,
            ClientPage,
        )
    ),
    tags(
        (name = "health"),
        (name = "clients")
    )
)]
pub struct ApiDoc;
