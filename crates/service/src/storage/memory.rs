use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use models::{
    company::{self, CompanyChanges, NewCompany},
    invoice::{self, paid_date_transition, InvoiceChanges, NewInvoice},
};

use crate::company::repository::CompanyRepository;
use crate::errors::ServiceError;
use crate::invoice::repository::InvoiceRepository;

#[derive(Default)]
struct Tables {
    companies: BTreeMap<String, company::Model>,
    invoices: BTreeMap<i32, invoice::Model>,
    last_invoice_id: i32,
}

/// Process-local backend implementing both repositories over one lock.
///
/// Enforces the same constraints as the Postgres schema: unique company codes,
/// `comp_code` must name a company, and referenced companies cannot be deleted.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl CompanyRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<company::Summary>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.companies
            .values()
            .map(|c| company::Summary { code: c.code.clone(), name: c.name.clone() })
            .collect())
    }

    async fn get(&self, code: &str) -> Result<Option<company::Detail>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.companies.get(code).map(|c| {
            let ids = t.invoices.values().filter(|i| i.comp_code == code).map(|i| i.id).collect();
            company::Detail::new(c.clone(), ids)
        }))
    }

    async fn create(&self, input: NewCompany) -> Result<company::Model, ServiceError> {
        let mut t = self.tables.write().await;
        if t.companies.contains_key(&input.code) {
            return Err(ServiceError::Conflict(format!(
                "A company with code of {} already exists",
                input.code
            )));
        }
        let model = company::Model { code: input.code, name: input.name, description: input.description };
        t.companies.insert(model.code.clone(), model.clone());
        Ok(model)
    }

    async fn update(&self, code: &str, changes: CompanyChanges) -> Result<Option<company::Model>, ServiceError> {
        let mut t = self.tables.write().await;
        Ok(t.companies.get_mut(code).map(|c| {
            c.name = changes.name;
            c.description = changes.description;
            c.clone()
        }))
    }

    async fn delete(&self, code: &str) -> Result<bool, ServiceError> {
        let mut t = self.tables.write().await;
        if !t.companies.contains_key(code) {
            return Ok(false);
        }
        if t.invoices.values().any(|i| i.comp_code == code) {
            return Err(ServiceError::Conflict(format!("Company {code} still has invoices")));
        }
        t.companies.remove(code);
        Ok(true)
    }
}

#[async_trait]
impl InvoiceRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<invoice::Summary>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.invoices
            .values()
            .map(|i| invoice::Summary { id: i.id, comp_code: i.comp_code.clone() })
            .collect())
    }

    async fn get(&self, id: i32) -> Result<Option<invoice::Detail>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.invoices.get(&id).and_then(|i| {
            t.companies
                .get(&i.comp_code)
                .map(|c| invoice::Detail::new(i.clone(), c.clone()))
        }))
    }

    async fn create(&self, input: NewInvoice, today: NaiveDate) -> Result<invoice::Model, ServiceError> {
        let mut t = self.tables.write().await;
        if !t.companies.contains_key(&input.comp_code) {
            return Err(ServiceError::Validation(format!(
                "Can't find company with code of {}",
                input.comp_code
            )));
        }
        t.last_invoice_id += 1;
        let model = invoice::Model {
            id: t.last_invoice_id,
            comp_code: input.comp_code,
            amt: input.amt,
            paid: false,
            add_date: today,
            paid_date: None,
        };
        t.invoices.insert(model.id, model.clone());
        Ok(model)
    }

    async fn update(&self, id: i32, changes: InvoiceChanges, today: NaiveDate) -> Result<Option<invoice::Model>, ServiceError> {
        let mut t = self.tables.write().await;
        Ok(t.invoices.get_mut(&id).map(|i| {
            let new_paid = changes.paid.unwrap_or(i.paid);
            i.paid_date = paid_date_transition(i.paid, new_paid, i.paid_date, today);
            i.paid = new_paid;
            i.amt = changes.amt;
            i.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let mut t = self.tables.write().await;
        Ok(t.invoices.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    async fn store_with_google() -> MemoryStore {
        let store = MemoryStore::new();
        CompanyRepository::create(
            &store,
            NewCompany { code: "google".into(), name: "Google".into(), description: "Overlords".into() },
        )
        .await
        .unwrap();
        store
    }

    #[tokio::test]
    async fn invoice_ids_are_monotonic() {
        let store = store_with_google().await;
        let a = InvoiceRepository::create(&store, NewInvoice { comp_code: "google".into(), amt: 1.0 }, day()).await.unwrap();
        InvoiceRepository::delete(&store, a.id).await.unwrap();
        let b = InvoiceRepository::create(&store, NewInvoice { comp_code: "google".into(), amt: 2.0 }, day()).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn company_detail_lists_its_invoices() {
        let store = store_with_google().await;
        let inv = InvoiceRepository::create(&store, NewInvoice { comp_code: "google".into(), amt: 1.0 }, day()).await.unwrap();
        let detail = CompanyRepository::get(&store, "google").await.unwrap().unwrap();
        assert_eq!(detail.invoices, vec![inv.id]);
    }

    #[tokio::test]
    async fn constraints_match_schema() {
        let store = store_with_google().await;
        let dup = CompanyRepository::create(
            &store,
            NewCompany { code: "google".into(), name: "G".into(), description: "again".into() },
        )
        .await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        InvoiceRepository::create(&store, NewInvoice { comp_code: "google".into(), amt: 1.0 }, day()).await.unwrap();
        assert!(matches!(CompanyRepository::delete(&store, "google").await, Err(ServiceError::Conflict(_))));
        assert!(!CompanyRepository::delete(&store, "apple").await.unwrap());
    }
}
