//! # Catalog Errors
//!
//! Validation failures are collected per field, never raised; they travel in
//! `CatalogError::Invalid` and stay queryable on the entity for field-level
//! feedback rendering. Store failures keep their typed cause instead of
//! collapsing into a bare boolean.

use std::fmt;

use thiserror::Error;

use crate::store::StoreError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// One or more field rules failed; nothing was persisted.
    #[error("book is invalid: {0}")]
    Invalid(ValidationErrors),

    /// A persisted entity's record vanished from the store underneath it.
    #[error("book {0} no longer exists")]
    NotFound(u64),

    /// The store failed; the cause was logged and is carried here.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl CatalogError {
    /// Stable code for log output
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "VALIDATION_FAILED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// Collected field validation failures.
///
/// Messages are keyed by field name and kept in the order the rules were
/// evaluated, so rendered feedback is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(&'static str, Vec<String>)>,
}

impl ValidationErrors {
    /// Records a failure message for a field.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if let Some((_, messages)) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            messages.push(message.into());
        } else {
            self.entries.push((field, vec![message.into()]));
        }
    }

    /// Returns whether any failure was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of messages across all fields.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, m)| m.len()).sum()
    }

    /// Messages recorded for one field, in evaluation order.
    pub fn on(&self, field: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_slice())
            .unwrap_or(&[])
    }

    /// Iterates fields with their messages, in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.entries.iter().map(|(f, m)| (*f, m.as_slice()))
    }

    /// Flattens to "field message" strings for display.
    pub fn full_messages(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(field, messages)| {
                messages.iter().map(move |m| format!("{} {}", field, m))
            })
            .collect()
    }

    /// Discards all recorded failures.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}
