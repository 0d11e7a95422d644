//! shelfdb - a strict, file-backed personal library catalog
//!
//! The catalog keeps every book record in one JSON file. The `store` module
//! owns that file and performs whole-collection read-modify-write CRUD; the
//! `catalog` module wraps records in validated entities and is the only
//! writer path into the store.

pub mod catalog;
pub mod observability;
pub mod store;
