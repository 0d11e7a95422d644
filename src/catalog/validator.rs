//! Field validation rules
//!
//! Rules are evaluated independently and all violations are collected, so a
//! form with three bad fields reports all three at once. Lengths are counted
//! in characters, not bytes. A successful check yields the compact persisted
//! payload: blank optional strings are dropped, never stored as empty.

use super::book::BookPatch;
use super::errors::ValidationErrors;
use crate::store::BookFields;

pub const TITLE_MAX_CHARS: usize = 200;
pub const AUTHOR_MAX_CHARS: usize = 100;
pub const PUBLISHER_MAX_CHARS: usize = 100;
pub const ISBN_MAX_CHARS: usize = 13;
pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 10;

/// Checks every rule against the candidate fields.
///
/// Returns the normalized payload when all rules pass, or the full set of
/// violations when any fail.
pub(super) fn check(candidate: &BookPatch) -> Result<BookFields, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = required(&mut errors, "title", &candidate.title, Some(TITLE_MAX_CHARS));
    let author = required(&mut errors, "author", &candidate.author, Some(AUTHOR_MAX_CHARS));
    let finished_date = required(&mut errors, "finished_date", &candidate.finished_date, None);
    let publisher = optional(&mut errors, "publisher", &candidate.publisher, PUBLISHER_MAX_CHARS);
    let isbn = optional(&mut errors, "isbn", &candidate.isbn, ISBN_MAX_CHARS);

    if let Some(price) = candidate.price {
        if price < 0 {
            errors.add("price", "must be greater than or equal to 0");
        }
    }
    if let Some(rating) = candidate.rating {
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            errors.add(
                "rating",
                format!("must be between {} and {}", RATING_MIN, RATING_MAX),
            );
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // The required() calls above returned Some for every field or recorded
    // an error, so the unwrap_or_default branches are unreachable here.
    Ok(BookFields {
        title: title.unwrap_or_default(),
        author: author.unwrap_or_default(),
        finished_date: finished_date.unwrap_or_default(),
        publisher,
        isbn,
        price: candidate.price,
        rating: candidate.rating,
    })
}

/// A required string: present, non-blank, within the character limit if one
/// applies.
fn required(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &Option<String>,
    max_chars: Option<usize>,
) -> Option<String> {
    let value = value.as_deref().unwrap_or("");
    if value.trim().is_empty() {
        errors.add(field, "can't be blank");
        return None;
    }
    if let Some(max) = max_chars {
        if value.chars().count() > max {
            errors.add(field, format!("is too long (maximum is {} characters)", max));
            return None;
        }
    }
    Some(value.to_string())
}

/// An optional string: blank collapses to absent, present values must fit
/// the character limit.
fn optional(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &Option<String>,
    max_chars: usize,
) -> Option<String> {
    let value = value.as_deref()?;
    if value.trim().is_empty() {
        return None;
    }
    if value.chars().count() > max_chars {
        errors.add(
            field,
            format!("is too long (maximum is {} characters)", max_chars),
        );
        return None;
    }
    Some(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_patch() -> BookPatch {
        BookPatch {
            title: Some("Book A".into()),
            author: Some("Author A".into()),
            finished_date: Some("2025-01-01".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_required_fields_pass() {
        let fields = check(&valid_patch()).unwrap();
        assert_eq!(fields.title, "Book A");
        assert_eq!(fields.publisher, None);
    }

    #[test]
    fn test_all_violations_are_collected() {
        let patch = BookPatch {
            price: Some(-1),
            rating: Some(0),
            ..Default::default()
        };
        let errors = check(&patch).unwrap_err();
        assert!(!errors.on("title").is_empty());
        assert!(!errors.on("author").is_empty());
        assert!(!errors.on("finished_date").is_empty());
        assert!(!errors.on("price").is_empty());
        assert!(!errors.on("rating").is_empty());
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_blank_required_field_fails() {
        let mut patch = valid_patch();
        patch.title = Some("   ".into());
        let errors = check(&patch).unwrap_err();
        assert_eq!(errors.on("title"), ["can't be blank"]);
    }

    #[test]
    fn test_length_limits_count_characters() {
        let mut patch = valid_patch();
        patch.title = Some("あ".repeat(TITLE_MAX_CHARS));
        assert!(check(&patch).is_ok());

        patch.title = Some("あ".repeat(TITLE_MAX_CHARS + 1));
        let errors = check(&patch).unwrap_err();
        assert_eq!(errors.on("title"), ["is too long (maximum is 200 characters)"]);
    }

    #[test]
    fn test_author_and_publisher_limits() {
        let mut patch = valid_patch();
        patch.author = Some("a".repeat(AUTHOR_MAX_CHARS + 1));
        patch.publisher = Some("p".repeat(PUBLISHER_MAX_CHARS + 1));
        let errors = check(&patch).unwrap_err();
        assert!(!errors.on("author").is_empty());
        assert!(!errors.on("publisher").is_empty());
    }

    #[test]
    fn test_isbn_limit() {
        let mut patch = valid_patch();
        patch.isbn = Some("1".repeat(ISBN_MAX_CHARS));
        assert!(check(&patch).is_ok());

        patch.isbn = Some("1".repeat(ISBN_MAX_CHARS + 1));
        assert!(check(&patch).is_err());
    }

    #[test]
    fn test_rating_boundaries() {
        let mut patch = valid_patch();
        for (rating, ok) in [(0, false), (1, true), (10, true), (11, false)] {
            patch.rating = Some(rating);
            assert_eq!(check(&patch).is_ok(), ok, "rating {}", rating);
        }
    }

    #[test]
    fn test_price_boundaries() {
        let mut patch = valid_patch();
        patch.price = Some(-1);
        let errors = check(&patch).unwrap_err();
        assert_eq!(errors.on("price"), ["must be greater than or equal to 0"]);

        patch.price = Some(0);
        assert!(check(&patch).is_ok());
    }

    #[test]
    fn test_blank_optionals_collapse_to_absent() {
        let mut patch = valid_patch();
        patch.publisher = Some("".into());
        patch.isbn = Some("  ".into());
        let fields = check(&patch).unwrap();
        assert_eq!(fields.publisher, None);
        assert_eq!(fields.isbn, None);
    }
}
