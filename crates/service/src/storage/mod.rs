//! Storage backends behind the repository traits.
//!
//! `memory` keeps everything in process and mirrors the Postgres constraints
//! (primary keys, the `comp_code` foreign key) closely enough for handler tests.

pub mod memory;

pub use memory::MemoryStore;
