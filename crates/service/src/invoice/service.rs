use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};

use models::invoice::{self, InvoiceChanges, NewInvoice};

use crate::errors::ServiceError;
use crate::invoice::domain::{CreateInvoiceInput, UpdateInvoiceInput};
use crate::invoice::repository::InvoiceRepository;

/// Application service for invoices.
///
/// Path ids arrive as raw strings and are checked here, so a non-integer id is a
/// validation error rather than a routing failure.
#[derive(Clone)]
pub struct InvoiceService {
    repo: Arc<dyn InvoiceRepository>,
    today: fn() -> NaiveDate,
}

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

fn not_found(id: i32) -> ServiceError {
    ServiceError::NotFound(format!("Can't find invoice with id of {id}"))
}

impl InvoiceService {
    pub fn new(repo: Arc<dyn InvoiceRepository>) -> Self {
        Self { repo, today: utc_today }
    }

    /// Replace the date source used for `add_date` and `paid_date`.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub async fn list(&self) -> Result<Vec<invoice::Summary>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get(&self, raw_id: &str) -> Result<invoice::Detail, ServiceError> {
        let id = invoice::parse_id(raw_id)?;
        self.repo.get(id).await?.ok_or_else(|| not_found(id))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateInvoiceInput) -> Result<invoice::Model, ServiceError> {
        let new = NewInvoice::validate(input.comp_code.as_deref(), input.amt.as_ref())?;
        let created = self.repo.create(new, (self.today)()).await?;
        info!(id = created.id, comp_code = %created.comp_code, "created invoice");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, raw_id: &str, input: UpdateInvoiceInput) -> Result<invoice::Model, ServiceError> {
        let id = invoice::parse_id(raw_id)?;
        let changes = InvoiceChanges::validate(input.amt.as_ref(), input.paid.as_ref())?;
        let updated = self
            .repo
            .update(id, changes, (self.today)())
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(id, paid = updated.paid, "updated invoice");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id = invoice::parse_id(raw_id)?;
        if !self.repo.delete(id).await? {
            return Err(not_found(id));
        }
        info!(id, "deleted invoice");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::{domain::CreateCompanyInput, service::CompanyService};
    use crate::storage::MemoryStore;
    use serde_json::json;

    fn fixed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    async fn seeded() -> InvoiceService {
        let store = Arc::new(MemoryStore::new());
        CompanyService::new(store.clone())
            .create(CreateCompanyInput {
                code: Some("google".into()),
                name: Some("Google".into()),
                description: Some("Overlords".into()),
            })
            .await
            .unwrap();
        InvoiceService::new(store).with_clock(fixed_day)
    }

    fn create_input(amt: serde_json::Value) -> CreateInvoiceInput {
        CreateInvoiceInput { comp_code: Some("google".into()), amt: Some(amt) }
    }

    #[tokio::test]
    async fn created_invoice_is_unpaid() {
        let svc = seeded().await;
        let inv = svc.create(create_input(json!("750"))).await.unwrap();
        assert_eq!(inv.amt, 750.0);
        assert!(!inv.paid);
        assert_eq!(inv.paid_date, None);
        assert_eq!(inv.add_date, fixed_day());
    }

    #[tokio::test]
    async fn paying_then_unpaying_round_trips_paid_date() {
        let svc = seeded().await;
        let inv = svc.create(create_input(json!(650))).await.unwrap();
        let id = inv.id.to_string();

        let paid = svc
            .update(&id, UpdateInvoiceInput { amt: Some(json!("10000")), paid: Some(json!(true)) })
            .await
            .unwrap();
        assert_eq!(paid.paid_date, Some(fixed_day()));
        assert_eq!(paid.amt, 10000.0);

        let unpaid = svc
            .update(&id, UpdateInvoiceInput { amt: Some(json!("10000")), paid: Some(json!(false)) })
            .await
            .unwrap();
        assert!(!unpaid.paid);
        assert_eq!(unpaid.paid_date, None);
    }

    #[tokio::test]
    async fn omitted_paid_leaves_state_alone() {
        let svc = seeded().await;
        let inv = svc.create(create_input(json!(5))).await.unwrap();
        let id = inv.id.to_string();
        svc.update(&id, UpdateInvoiceInput { amt: Some(json!(5)), paid: Some(json!(true)) }).await.unwrap();
        let again = svc.update(&id, UpdateInvoiceInput { amt: Some(json!(6)), paid: None }).await.unwrap();
        assert!(again.paid);
        assert_eq!(again.paid_date, Some(fixed_day()));
    }

    #[tokio::test]
    async fn bad_ids_and_bodies_are_rejected() {
        let svc = seeded().await;
        assert!(svc.get("amazonnn").await.unwrap_err().is_validation());
        assert!(matches!(svc.get("0").await, Err(ServiceError::NotFound(_))));
        assert!(svc.delete("notNumber").await.unwrap_err().is_validation());
        assert!(matches!(svc.delete("0").await, Err(ServiceError::NotFound(_))));

        let inv = svc.create(create_input(json!(1))).await.unwrap();
        let id = inv.id.to_string();
        let blargh = svc
            .update(&id, UpdateInvoiceInput { amt: Some(json!("10000")), paid: Some(json!("blargh")) })
            .await
            .unwrap_err();
        assert!(blargh.is_validation());
        let no_amt = svc
            .update(&id, UpdateInvoiceInput { amt: None, paid: Some(json!(true)) })
            .await
            .unwrap_err();
        assert!(no_amt.is_validation());
        let missing = svc
            .update("0", UpdateInvoiceInput { amt: Some(json!("99")), paid: Some(json!(true)) })
            .await
            .unwrap_err();
        assert!(matches!(missing, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn unknown_company_is_rejected() {
        let svc = seeded().await;
        let err = svc
            .create(CreateInvoiceInput { comp_code: Some("nope".into()), amt: Some(json!(3)) })
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
