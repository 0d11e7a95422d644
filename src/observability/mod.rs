//! Observability for shelfdb

mod logger;

pub use logger::{Logger, Severity};
