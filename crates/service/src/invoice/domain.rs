use serde::Deserialize;
use serde_json::Value;

/// Body of `POST /invoices`. `amt` is kept raw: clients send both `750` and `"750"`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateInvoiceInput {
    #[serde(default)]
    pub comp_code: Option<String>,
    #[serde(default)]
    pub amt: Option<Value>,
}

/// Body of `PUT /invoices/:id`. `paid` is kept raw so a non-boolean is reported as a 400.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateInvoiceInput {
    #[serde(default)]
    pub amt: Option<Value>,
    #[serde(default)]
    pub paid: Option<Value>,
}
