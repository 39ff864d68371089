use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::Message;
use models::company;
use serde::Serialize;
use service::company::domain::{CreateCompanyInput, UpdateCompanyInput};

use crate::{errors::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct CompaniesBody {
    pub companies: Vec<company::Summary>,
}

#[derive(Debug, Serialize)]
pub struct CompanyBody<T> {
    pub company: T,
}

#[utoipa::path(
    get, path = "/companies", tag = "companies",
    responses((status = 200, description = "All companies as {code, name}"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<CompaniesBody>, ApiError> {
    let companies = state.companies.list().await?;
    Ok(Json(CompaniesBody { companies }))
}

#[utoipa::path(
    get, path = "/companies/{code}", tag = "companies",
    params(("code" = String, Path, description = "Company code")),
    responses(
        (status = 200, description = "Company with invoice ids", body = crate::openapi::CompanyDetailDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<CompanyBody<company::Detail>>, ApiError> {
    let company = state.companies.get(&code).await?;
    Ok(Json(CompanyBody { company }))
}

#[utoipa::path(
    post, path = "/companies", tag = "companies",
    request_body = crate::openapi::CreateCompanyInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 409, description = "Code already taken", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCompanyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CompanyBody<company::Model>>), ApiError> {
    let Json(input) = payload?;
    let company = state.companies.create(input).await?;
    Ok((StatusCode::CREATED, Json(CompanyBody { company })))
}

#[utoipa::path(
    put, path = "/companies/{code}", tag = "companies",
    params(("code" = String, Path, description = "Company code")),
    request_body = crate::openapi::UpdateCompanyInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    payload: Result<Json<UpdateCompanyInput>, JsonRejection>,
) -> Result<Json<CompanyBody<company::Model>>, ApiError> {
    let Json(input) = payload?;
    let company = state.companies.update(&code, input).await?;
    Ok(Json(CompanyBody { company }))
}

#[utoipa::path(
    delete, path = "/companies/{code}", tag = "companies",
    params(("code" = String, Path, description = "Company code")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc),
        (status = 409, description = "Company still has invoices", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Message>, ApiError> {
    state.companies.delete(&code).await?;
    Ok(Json(Message::deleted()))
}
