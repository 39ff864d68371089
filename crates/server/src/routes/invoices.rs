use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::Message;
use models::invoice;
use serde::Serialize;
use service::invoice::domain::{CreateInvoiceInput, UpdateInvoiceInput};

use crate::{errors::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct InvoicesBody {
    pub invoices: Vec<invoice::Summary>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceBody<T> {
    pub invoice: T,
}

// Ids are extracted as strings: a non-integer id is a 400 in the JSON error
// body, not axum's plain-text path rejection.

#[utoipa::path(
    get, path = "/invoices", tag = "invoices",
    responses((status = 200, description = "All invoices as {id, comp_code}"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<InvoicesBody>, ApiError> {
    let invoices = state.invoices.list().await?;
    Ok(Json(InvoicesBody { invoices }))
}

#[utoipa::path(
    get, path = "/invoices/{id}", tag = "invoices",
    params(("id" = String, Path, description = "Invoice id (integer)")),
    responses(
        (status = 200, description = "Invoice with nested company", body = crate::openapi::InvoiceDetailDoc),
        (status = 400, description = "Non-integer id", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InvoiceBody<invoice::Detail>>, ApiError> {
    let invoice = state.invoices.get(&id).await?;
    Ok(Json(InvoiceBody { invoice }))
}

#[utoipa::path(
    post, path = "/invoices", tag = "invoices",
    request_body = crate::openapi::CreateInvoiceInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::InvoiceDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateInvoiceInput>, JsonRejection>,
) -> Result<(StatusCode, Json<InvoiceBody<invoice::Model>>), ApiError> {
    let Json(input) = payload?;
    let invoice = state.invoices.create(input).await?;
    Ok((StatusCode::CREATED, Json(InvoiceBody { invoice })))
}

#[utoipa::path(
    put, path = "/invoices/{id}", tag = "invoices",
    params(("id" = String, Path, description = "Invoice id (integer)")),
    request_body = crate::openapi::UpdateInvoiceInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::InvoiceDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateInvoiceInput>, JsonRejection>,
) -> Result<Json<InvoiceBody<invoice::Model>>, ApiError> {
    let Json(input) = payload?;
    let invoice = state.invoices.update(&id, input).await?;
    Ok(Json(InvoiceBody { invoice }))
}

#[utoipa::path(
    delete, path = "/invoices/{id}", tag = "invoices",
    params(("id" = String, Path, description = "Invoice id (integer)")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Non-integer id", body = crate::openapi::ErrorResponseDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponseDoc)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    state.invoices.delete(&id).await?;
    Ok(Json(Message::deleted()))
}
