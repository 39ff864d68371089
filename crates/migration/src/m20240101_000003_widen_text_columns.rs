//! Drop the length caps on company codes and names.
//! Postgres rewrites the FK on `invoices.comp_code` along with the referenced key.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Companies::Table)
                    .modify_column(ColumnDef::new(Companies::Code).string().not_null())
                    .modify_column(ColumnDef::new(Companies::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Invoices::Table)
                    .modify_column(ColumnDef::new(Invoices::CompCode).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Invoices::Table)
                    .modify_column(ColumnDef::new(Invoices::CompCode).string_len(64).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Companies::Table)
                    .modify_column(ColumnDef::new(Companies::Code).string_len(64).not_null())
                    .modify_column(ColumnDef::new(Companies::Name).string_len(255).not_null())
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Companies { Table, Code, Name }

#[derive(DeriveIden)]
enum Invoices { Table, CompCode }
