//! Persisted record types
//!
//! The backing file holds one top-level `books` array of record objects:
//!
//! ```json
//! {
//!   "books": [
//!     {
//!       "id": 1,
//!       "title": "The Dispossessed",
//!       "author": "Ursula K. Le Guin",
//!       "finished_date": "2025-01-01",
//!       "publisher": "Harper & Row",
//!       "isbn": "9780060125639",
//!       "price": 1200,
//!       "rating": 9
//!     }
//!   ]
//! }
//! ```
//!
//! Optional fields are omitted when absent, never written as null. Numbers
//! serialize as integers. `id` is always present on a persisted record.

use serde::{Deserialize, Serialize};

/// The full persisted collection.
///
/// Record order is insertion order; it carries no meaning but is preserved
/// so iteration is stable across reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub books: Vec<BookRecord>,
}

impl Library {
    /// Returns the highest assigned id, if any record exists.
    pub fn max_id(&self) -> Option<u64> {
        self.books.iter().map(|b| b.id).max()
    }
}

/// One persisted book record: a store-assigned id plus its payload fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: u64,
    #[serde(flatten)]
    pub fields: BookFields,
}

/// The payload of a book record, without the store-assigned id.
///
/// Absent optional fields are skipped on serialization (compact semantics).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub finished_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,
}

/// Coerces a caller-supplied textual id to a numeric one.
///
/// Route parameters and form values arrive as text; anything that is not a
/// positive integer simply resolves to no id (and therefore "not found"
/// downstream), never a panic.
pub fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}
