//! Service layer for BizTime.
//! - Repository traits hide the storage backend (SeaORM/Postgres or in-memory).
//! - Services validate input before any statement runs and map empty results to `NotFound`.

pub mod errors;
pub mod company;
pub mod invoice;
pub mod storage;
#[cfg(test)]
pub mod test_support;

pub use company::{repository::CompanyRepository, service::CompanyService};
pub use invoice::{repository::InvoiceRepository, service::InvoiceService};
