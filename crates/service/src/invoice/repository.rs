use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect, Set,
};

use models::{
    company,
    invoice::{self, paid_date_transition, InvoiceChanges, NewInvoice},
};

use crate::errors::{is_foreign_key_violation, ServiceError};

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<invoice::Summary>, ServiceError>;
    /// Invoice joined to its company; `None` when the id is unknown.
    async fn get(&self, id: i32) -> Result<Option<invoice::Detail>, ServiceError>;
    /// Inserts unpaid with `add_date = today`.
    async fn create(&self, input: NewInvoice, today: NaiveDate) -> Result<invoice::Model, ServiceError>;
    /// Applies `changes` and the `paid_date` transition; `None` when no row matched.
    async fn update(&self, id: i32, changes: InvoiceChanges, today: NaiveDate) -> Result<Option<invoice::Model>, ServiceError>;
    /// `false` when no row matched `id`.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmInvoiceRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmInvoiceRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl InvoiceRepository for SeaOrmInvoiceRepository {
    async fn list(&self) -> Result<Vec<invoice::Summary>, ServiceError> {
        let rows = invoice::Entity::find()
            .select_only()
            .column(invoice::Column::Id)
            .column(invoice::Column::CompCode)
            .order_by_asc(invoice::Column::Id)
            .into_model::<invoice::Summary>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<invoice::Detail>, ServiceError> {
        let found = invoice::Entity::find_by_id(id)
            .find_also_related(company::Entity)
            .one(&self.db)
            .await?;
        Ok(match found {
            Some((inv, Some(company))) => Some(invoice::Detail::new(inv, company)),
            _ => None,
        })
    }

    async fn create(&self, input: NewInvoice, today: NaiveDate) -> Result<invoice::Model, ServiceError> {
        let comp_code = input.comp_code.clone();
        let am = invoice::ActiveModel {
            comp_code: Set(input.comp_code),
            amt: Set(input.amt),
            paid: Set(false),
            add_date: Set(today),
            paid_date: Set(None),
            ..Default::default()
        };
        am.insert(&self.db).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                ServiceError::Validation(format!("Can't find company with code of {comp_code}"))
            } else {
                e.into()
            }
        })
    }

    async fn update(&self, id: i32, changes: InvoiceChanges, today: NaiveDate) -> Result<Option<invoice::Model>, ServiceError> {
        let Some(current) = invoice::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let new_paid = changes.paid.unwrap_or(current.paid);
        let paid_date = paid_date_transition(current.paid, new_paid, current.paid_date, today);

        let mut am: invoice::ActiveModel = current.into();
        am.amt = Set(changes.amt);
        am.paid = Set(new_paid);
        am.paid_date = Set(paid_date);
        match am.update(&self.db).await {
            Ok(m) => Ok(Some(m)),
            // deleted between the read and the write
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let res = invoice::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::repository::{CompanyRepository, SeaOrmCompanyRepository};
    use crate::test_support::{get_db, unique_code};
    use models::company::NewCompany;

    #[tokio::test]
    async fn invoice_lifecycle_repository() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await else { return Ok(()) };
        let companies = SeaOrmCompanyRepository::new(db.clone());
        let repo = SeaOrmInvoiceRepository::new(db);
        let today = chrono::Utc::now().date_naive();

        let code = unique_code("repo_inv");
        companies
            .create(NewCompany { code: code.clone(), name: "Inv Co".into(), description: "Tests".into() })
            .await?;

        let inv = repo.create(NewInvoice { comp_code: code.clone(), amt: 650.0 }, today).await?;
        assert!(!inv.paid);
        assert_eq!(inv.paid_date, None);
        assert_eq!(inv.add_date, today);

        let detail = repo.get(inv.id).await?.expect("invoice present");
        assert_eq!(detail.company.code, code);
        assert_eq!(companies.get(&code).await?.expect("company").invoices, vec![inv.id]);

        // referenced company cannot be removed
        assert!(matches!(companies.delete(&code).await, Err(ServiceError::Conflict(_))));

        let paid = repo.update(inv.id, InvoiceChanges { amt: 10000.0, paid: Some(true) }, today).await?.expect("updated");
        assert_eq!(paid.paid_date, Some(today));
        let unpaid = repo.update(inv.id, InvoiceChanges { amt: 10000.0, paid: Some(false) }, today).await?.expect("updated");
        assert_eq!(unpaid.paid_date, None);

        let orphan = repo.create(NewInvoice { comp_code: unique_code("ghost"), amt: 1.0 }, today).await;
        assert!(matches!(orphan, Err(ServiceError::Validation(_))));

        assert!(repo.delete(inv.id).await?);
        assert!(!repo.delete(inv.id).await?);
        assert!(repo.update(inv.id, InvoiceChanges { amt: 1.0, paid: None }, today).await?.is_none());
        assert!(companies.delete(&code).await?);
        Ok(())
    }
}
