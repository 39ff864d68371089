use sea_orm::{entity::prelude::*, FromQueryResult};
use serde::{Deserialize, Serialize};

use crate::{errors, invoice};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Invoices }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Invoices => Entity::has_many(invoice::Entity).into(),
        }
    }
}

impl Related<invoice::Entity> for Entity {
    fn to() -> RelationDef { Relation::Invoices.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Row shape for `GET /companies`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromQueryResult)]
pub struct Summary {
    pub code: String,
    pub name: String,
}

/// Company with the ids of every invoice it owns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub code: String,
    pub name: String,
    pub description: String,
    pub invoices: Vec<i32>,
}

impl Detail {
    pub fn new(company: Model, mut invoices: Vec<i32>) -> Self {
        invoices.sort_unstable();
        Self { code: company.code, name: company.name, description: company.description, invoices }
    }
}

/// Present and not blank after trimming.
pub fn require_field<'a>(value: Option<&'a str>) -> Option<&'a str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Checked fields for an insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCompany {
    pub code: String,
    pub name: String,
    pub description: String,
}

pub const MISSING_CREATE_FIELDS: &str =
    "Missing JSON data, must provide a company code, name, and description";
pub const MISSING_UPDATE_FIELDS: &str =
    "Missing JSON data, must provide a company name and description";

impl NewCompany {
    pub fn validate(
        code: Option<&str>,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, errors::ModelError> {
        match (require_field(code), require_field(name), require_field(description)) {
            (Some(code), Some(name), Some(description)) => Ok(Self {
                code: code.to_string(),
                name: name.to_string(),
                description: description.to_string(),
            }),
            _ => Err(errors::ModelError::Validation(MISSING_CREATE_FIELDS.into())),
        }
    }
}

/// Checked fields for an update; the code comes from the path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanyChanges {
    pub name: String,
    pub description: String,
}

impl CompanyChanges {
    pub fn validate(name: Option<&str>, description: Option<&str>) -> Result<Self, errors::ModelError> {
        match (require_field(name), require_field(description)) {
            (Some(name), Some(description)) => Ok(Self {
                name: name.to_string(),
                description: description.to_string(),
            }),
            _ => Err(errors::ModelError::Validation(MISSING_UPDATE_FIELDS.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_every_field() {
        assert!(NewCompany::validate(Some("amazon"), Some("Amazon"), Some("We own the world")).is_ok());
        for (c, n, d) in [
            (None, Some("Amazon"), Some("x")),
            (Some("amazon"), None, Some("x")),
            (Some("amazon"), Some("Amazon"), None),
            (Some(""), Some("Amazon"), Some("x")),
            (Some("amazon"), Some("   "), Some("x")),
        ] {
            let err = NewCompany::validate(c, n, d).unwrap_err();
            assert_eq!(err, errors::ModelError::Validation(MISSING_CREATE_FIELDS.into()));
        }
    }

    #[test]
    fn update_requires_name_and_description() {
        let ok = CompanyChanges::validate(Some("SuperIKEA"), Some("Build it yourself!")).unwrap();
        assert_eq!(ok.name, "SuperIKEA");
        assert!(CompanyChanges::validate(Some("SuperIKEA"), None).is_err());
    }

    #[test]
    fn detail_sorts_invoice_ids() {
        let company = Model { code: "google".into(), name: "Google".into(), description: "Overlords".into() };
        let detail = Detail::new(company, vec![9, 2, 5]);
        assert_eq!(detail.invoices, vec![2, 5, 9]);
    }
}
