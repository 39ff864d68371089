//! Migrator creating the BizTime schema. `companies` must exist before
//! `invoices` because of the `comp_code` foreign key.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_companies;
mod m20240101_000002_create_invoices;
mod m20240101_000003_widen_text_columns;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_companies::Migration),
            Box::new(m20240101_000002_create_invoices::Migration),
            Box::new(m20240101_000003_widen_text_columns::Migration),
        ]
    }
}
