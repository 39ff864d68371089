use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect, Set,
};

use models::{
    company::{self, CompanyChanges, NewCompany},
    invoice,
};

use crate::errors::{is_foreign_key_violation, ServiceError};

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<company::Summary>, ServiceError>;
    /// Company plus its invoice ids; `None` when the code is unknown.
    async fn get(&self, code: &str) -> Result<Option<company::Detail>, ServiceError>;
    async fn create(&self, input: NewCompany) -> Result<company::Model, ServiceError>;
    /// `None` when no row matched `code`.
    async fn update(&self, code: &str, changes: CompanyChanges) -> Result<Option<company::Model>, ServiceError>;
    /// `false` when no row matched `code`.
    async fn delete(&self, code: &str) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmCompanyRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CompanyRepository for SeaOrmCompanyRepository {
    async fn list(&self) -> Result<Vec<company::Summary>, ServiceError> {
        let rows = company::Entity::find()
            .select_only()
            .column(company::Column::Code)
            .column(company::Column::Name)
            .order_by_asc(company::Column::Code)
            .into_model::<company::Summary>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn get(&self, code: &str) -> Result<Option<company::Detail>, ServiceError> {
        // LEFT JOIN: a company without invoices still comes back with an empty list.
        let found = company::Entity::find_by_id(code.to_string())
            .find_with_related(invoice::Entity)
            .all(&self.db)
            .await?;
        Ok(found.into_iter().next().map(|(c, invoices)| {
            company::Detail::new(c, invoices.into_iter().map(|i| i.id).collect())
        }))
    }

    async fn create(&self, input: NewCompany) -> Result<company::Model, ServiceError> {
        let code = input.code.clone();
        let am = company::ActiveModel {
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
        };
        am.insert(&self.db).await.map_err(|e| match ServiceError::from(e) {
            ServiceError::Conflict(_) => {
                ServiceError::Conflict(format!("A company with code of {code} already exists"))
            }
            other => other,
        })
    }

    async fn update(&self, code: &str, changes: CompanyChanges) -> Result<Option<company::Model>, ServiceError> {
        let am = company::ActiveModel {
            code: Set(code.to_string()),
            name: Set(changes.name),
            description: Set(changes.description),
        };
        match am.update(&self.db).await {
            Ok(m) => Ok(Some(m)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, code: &str) -> Result<bool, ServiceError> {
        let res = company::Entity::delete_by_id(code.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    ServiceError::Conflict(format!("Company {code} still has invoices"))
                } else {
                    e.into()
                }
            })?;
        Ok(res.rows_affected > 0)
    }
}
