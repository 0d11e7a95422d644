//! Entity layer for the book catalog
//!
//! A `Book` is the validated, typed view of one record. It is the only
//! writer path into the store: every create and update is validated here
//! first, and optional fields are normalized to their compact form before
//! anything reaches the file.

mod book;
mod errors;
mod validator;

pub use book::{Book, BookPatch};
pub use errors::{CatalogError, CatalogResult, ValidationErrors};
pub use validator::{
    AUTHOR_MAX_CHARS, ISBN_MAX_CHARS, PUBLISHER_MAX_CHARS, RATING_MAX, RATING_MIN,
    TITLE_MAX_CHARS,
};
