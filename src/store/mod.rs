//! Record store for the book catalog
//!
//! The store holds the canonical persistent state of the whole collection in
//! a single JSON file. Every operation is a full load + full store round
//! trip: the dataset is assumed small, and rewriting the whole file keeps the
//! on-disk state consistent as a unit.
//!
//! # Design Principles
//!
//! - One file, one top-level `books` array
//! - Full-collection writes, replaced atomically (temp file + rename)
//! - Mutating operations serialized behind an exclusive gate
//! - Missing file reads as an empty collection; corruption handling is a
//!   configuration choice, never a crash

mod book_store;
mod errors;
mod record;

pub use book_store::{BookStore, CorruptionPolicy};
pub use errors::{StoreError, StoreResult};
pub use record::{parse_id, BookFields, BookRecord, Library};
