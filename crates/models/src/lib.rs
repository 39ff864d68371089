//! Entities and field rules for companies and invoices.

pub mod errors;
pub mod db;
pub mod company;
pub mod invoice;
