use std::num::IntErrorKind;

use sea_orm::{entity::prelude::*, FromQueryResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{company, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub comp_code: String,
    #[sea_orm(column_type = "Double")]
    pub amt: f64,
    pub paid: bool,
    pub add_date: Date,
    pub paid_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Company }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity)
                .from(Column::CompCode)
                .to(company::Column::Code)
                .into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Row shape for `GET /invoices`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromQueryResult)]
pub struct Summary {
    pub id: i32,
    pub comp_code: String,
}

/// Invoice with its owning company nested instead of `comp_code`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: Date,
    pub paid_date: Option<Date>,
    pub company: company::Model,
}

impl Detail {
    pub fn new(invoice: Model, company: company::Model) -> Self {
        Self {
            id: invoice.id,
            amt: invoice.amt,
            paid: invoice.paid,
            add_date: invoice.add_date,
            paid_date: invoice.paid_date,
            company,
        }
    }
}

/// `paid_date` after `paid` moves from `old_paid` to `new_paid`.
///
/// Paying stamps `today`, un-paying clears the date, and a repeated value
/// keeps whatever date was already stored.
pub fn paid_date_transition(
    old_paid: bool,
    new_paid: bool,
    old_paid_date: Option<Date>,
    today: Date,
) -> Option<Date> {
    match (old_paid, new_paid) {
        (false, true) => Some(today),
        (true, false) => None,
        _ => old_paid_date,
    }
}

pub fn parse_id(raw: &str) -> Result<i32, errors::ModelError> {
    raw.parse::<i32>().map_err(|e| {
        let msg = match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                format!("Invoice id out of range, got '{raw}'")
            }
            _ => format!("Invoice id must be an integer, got '{raw}'"),
        };
        errors::ModelError::Validation(msg)
    })
}

pub const MISSING_CREATE_FIELDS: &str = "Missing JSON data, must provide a comp_code and amt";
pub const MISSING_AMOUNT: &str = "Missing JSON data, must provide an amt";

/// Accepts a JSON number or a numeric string; anything else is rejected.
pub fn parse_amount(value: Option<&Value>) -> Result<f64, errors::ModelError> {
    let amt = match value {
        None | Some(Value::Null) => return Err(errors::ModelError::Validation(MISSING_AMOUNT.into())),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match amt {
        Some(a) if a.is_finite() => Ok(a),
        _ => Err(errors::ModelError::Validation("amt must be a number".into())),
    }
}

/// `paid` is optional but, when present, must be a JSON boolean.
pub fn parse_paid(value: Option<&Value>) -> Result<Option<bool>, errors::ModelError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(other) => Err(errors::ModelError::Validation(format!(
            "paid must be true or false, got {other}"
        ))),
    }
}

/// Checked fields for an insert.
#[derive(Clone, Debug, PartialEq)]
pub struct NewInvoice {
    pub comp_code: String,
    pub amt: f64,
}

impl NewInvoice {
    pub fn validate(comp_code: Option<&str>, amt: Option<&Value>) -> Result<Self, errors::ModelError> {
        let comp_code = company::require_field(comp_code)
            .ok_or_else(|| errors::ModelError::Validation(MISSING_CREATE_FIELDS.into()))?;
        let amt = match amt {
            None | Some(Value::Null) => {
                return Err(errors::ModelError::Validation(MISSING_CREATE_FIELDS.into()))
            }
            some => parse_amount(some)?,
        };
        Ok(Self { comp_code: comp_code.to_string(), amt })
    }
}

/// Checked fields for an update.
#[derive(Clone, Debug, PartialEq)]
pub struct InvoiceChanges {
    pub amt: f64,
    pub paid: Option<bool>,
}

impl InvoiceChanges {
    pub fn validate(amt: Option<&Value>, paid: Option<&Value>) -> Result<Self, errors::ModelError> {
        Ok(Self { amt: parse_amount(amt)?, paid: parse_paid(paid)? })
    }
}
