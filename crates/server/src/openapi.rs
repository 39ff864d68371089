use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorResponseDoc { pub error: ErrorDetailDoc }

#[derive(ToSchema)]
pub struct ErrorDetailDoc { pub message: String, pub status: u16 }

#[derive(ToSchema)]
pub struct CreateCompanyInputDoc { pub code: String, pub name: String, pub description: String }

#[derive(ToSchema)]
pub struct UpdateCompanyInputDoc { pub name: String, pub description: String }

#[derive(ToSchema)]
pub struct CompanyDoc { pub code: String, pub name: String, pub description: String }

#[derive(ToSchema)]
pub struct CompanyDetailDoc {
    pub code: String,
    pub name: String,
    pub description: String,
    pub invoices: Vec<i32>,
}

#[derive(ToSchema)]
pub struct CreateInvoiceInputDoc {
    pub comp_code: String,
    /// Number or numeric string.
    pub amt: String,
}

#[derive(ToSchema)]
pub struct UpdateInvoiceInputDoc {
    /// Number or numeric string.
    pub amt: String,
    pub paid: Option<bool>,
}

#[derive(ToSchema)]
pub struct InvoiceDoc {
    pub id: i32,
    pub comp_code: String,
    pub amt: f64,
    pub paid: bool,
    pub add_date: chrono::NaiveDate,
    pub paid_date: Option<chrono::NaiveDate>,
}

#[derive(ToSchema)]
pub struct InvoiceDetailDoc {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: chrono::NaiveDate,
    pub paid_date: Option<chrono::NaiveDate>,
    pub company: CompanyDoc,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::companies::list,
        crate::routes::companies::get,
        crate::routes::companies::create,
        crate::routes::companies::update,
        crate::routes::companies::delete,
        crate::routes::invoices::list,
        crate::routes::invoices::get,
        crate::routes::invoices::create,
        crate::routes::invoices::update,
        crate::routes::invoices::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponseDoc,
            ErrorDetailDoc,
            CreateCompanyInputDoc,
            UpdateCompanyInputDoc,
            CompanyDoc,
            CompanyDetailDoc,
            CreateInvoiceInputDoc,
            UpdateInvoiceInputDoc,
            InvoiceDoc,
            InvoiceDetailDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "companies"),
        (name = "invoices")
    )
)]
pub struct ApiDoc;
