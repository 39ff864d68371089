use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::{
    company::repository::SeaOrmCompanyRepository, invoice::repository::SeaOrmInvoiceRepository,
    storage::MemoryStore, CompanyService, InvoiceService,
};

/// Handler dependencies, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub companies: CompanyService,
    pub invoices: InvoiceService,
}

impl AppState {
    pub fn new(companies: CompanyService, invoices: InvoiceService) -> Self {
        Self { companies, invoices }
    }

    /// Postgres-backed state sharing one connection pool.
    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::new(
            CompanyService::new(Arc::new(SeaOrmCompanyRepository::new(db.clone()))),
            InvoiceService::new(Arc::new(SeaOrmInvoiceRepository::new(db))),
        )
    }

    /// State over a fresh in-process store.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(CompanyService::new(store.clone()), InvoiceService::new(store))
    }
}
