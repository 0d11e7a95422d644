//! The `Book` entity
//!
//! Lifecycle: a book starts transient (no id), becomes persisted when the
//! first `save` adopts a store-assigned id, and is terminal once destroyed.
//! A failed validation during `update` leaves the entity persisted but
//! holding the merged, unsaved values so a caller can re-render them for
//! correction.

use super::errors::{CatalogError, CatalogResult, ValidationErrors};
use super::validator;
use crate::observability::Logger;
use crate::store::{BookFields, BookRecord, BookStore, StoreError};

/// A partial set of book fields.
///
/// Used both to construct a new entity and to patch an existing one; unset
/// fields are simply unset, not defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub finished_date: Option<String>,
    pub publisher: Option<String>,
    pub isbn: Option<String>,
    pub price: Option<i64>,
    pub rating: Option<i64>,
}

impl BookPatch {
    /// Merges a patch over this set of fields; patched fields win.
    fn merged(self, patch: BookPatch) -> BookPatch {
        BookPatch {
            title: patch.title.or(self.title),
            author: patch.author.or(self.author),
            finished_date: patch.finished_date.or(self.finished_date),
            publisher: patch.publisher.or(self.publisher),
            isbn: patch.isbn.or(self.isbn),
            price: patch.price.or(self.price),
            rating: patch.rating.or(self.rating),
        }
    }
}

impl From<BookFields> for BookPatch {
    fn from(fields: BookFields) -> Self {
        BookPatch {
            title: Some(fields.title),
            author: Some(fields.author),
            finished_date: Some(fields.finished_date),
            publisher: fields.publisher,
            isbn: fields.isbn,
            price: fields.price,
            rating: fields.rating,
        }
    }
}

/// The validated, typed view of one book record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: Option<u64>,
    fields: BookPatch,
    errors: ValidationErrors,
}

impl Book {
    /// Builds a transient entity from a partial field set.
    pub fn new(fields: BookPatch) -> Self {
        Self {
            id: None,
            fields,
            errors: ValidationErrors::default(),
        }
    }

    /// Re-hydrates an entity from a stored record.
    pub fn from_record(record: BookRecord) -> Self {
        Self {
            id: Some(record.id),
            fields: record.fields.into(),
            errors: ValidationErrors::default(),
        }
    }

    /// Wraps every stored record, in stored order.
    pub fn all(store: &BookStore) -> CatalogResult<Vec<Book>> {
        Ok(store
            .all_records()?
            .into_iter()
            .map(Book::from_record)
            .collect())
    }

    /// Looks up one record by id.
    pub fn find(store: &BookStore, id: u64) -> CatalogResult<Option<Book>> {
        Ok(store.find_record(id)?.map(Book::from_record))
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Whether this entity is backed by a stored record.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// The current working fields, including any merged-but-unsaved values.
    pub fn fields(&self) -> &BookPatch {
        &self.fields
    }

    /// Violations recorded by the last validation, keyed by field.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Runs validation and records the outcome on the entity.
    pub fn is_valid(&mut self) -> bool {
        match validator::check(&self.fields) {
            Ok(_) => {
                self.errors.clear();
                true
            }
            Err(errors) => {
                self.errors = errors;
                false
            }
        }
    }

    /// Validates and persists the entity.
    ///
    /// A transient entity is appended and adopts the store-assigned id; a
    /// persisted one replaces its record in place. Validation failure leaves
    /// the store untouched and the violations queryable via [`errors`].
    ///
    /// # Errors
    ///
    /// - `CatalogError::Invalid` when any field rule fails
    /// - `CatalogError::NotFound` when the entity's record vanished
    /// - `CatalogError::Storage` when the store fails (already logged)
    ///
    /// [`errors`]: Book::errors
    pub fn save(&mut self, store: &BookStore) -> CatalogResult<()> {
        let fields = match validator::check(&self.fields) {
            Ok(fields) => {
                self.errors.clear();
                fields
            }
            Err(errors) => {
                self.errors = errors.clone();
                return Err(CatalogError::Invalid(errors));
            }
        };
        self.persist(store, fields)
    }

    /// Merges new values into the entity, re-validates, and persists.
    ///
    /// The merge happens on a draft candidate that is validated before the
    /// store is touched. The entity adopts the merged values either way, so
    /// a caller can re-render them alongside the violations on failure.
    pub fn update(&mut self, store: &BookStore, patch: BookPatch) -> CatalogResult<()> {
        let draft = self.fields.clone().merged(patch);
        let checked = validator::check(&draft);
        self.fields = draft;
        match checked {
            Ok(fields) => {
                self.errors.clear();
                self.persist(store, fields)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(CatalogError::Invalid(errors))
            }
        }
    }

    /// Removes the entity's record from the store.
    ///
    /// A transient entity is a no-op returning `Ok(false)`. Returns whether
    /// a record was actually removed.
    pub fn destroy(&self, store: &BookStore) -> CatalogResult<bool> {
        let Some(id) = self.id else {
            return Ok(false);
        };
        store.delete_record(id).map_err(|e| {
            Logger::error(
                "book_destroy_failed",
                &[("id", &id.to_string()), ("cause", &e.to_string())],
            );
            e.into()
        })
    }

    /// Writes validated fields through to the store.
    fn persist(&mut self, store: &BookStore, fields: BookFields) -> CatalogResult<()> {
        match self.id {
            None => match store.add_record(fields) {
                Ok(record) => {
                    self.id = Some(record.id);
                    Ok(())
                }
                Err(e) => Err(self.log_store_failure(e)),
            },
            Some(id) => match store.update_record(id, fields) {
                Ok(Some(_)) => Ok(()),
                Ok(None) => Err(CatalogError::NotFound(id)),
                Err(e) => Err(self.log_store_failure(e)),
            },
        }
    }

    fn log_store_failure(&self, e: StoreError) -> CatalogError {
        Logger::error(
            "book_save_failed",
            &[
                ("id", &self.id.map_or_else(|| "new".to_string(), |id| id.to_string())),
                ("code", e.code()),
                ("cause", &e.to_string()),
            ],
        );
        e.into()
    }
}
