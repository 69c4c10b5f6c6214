//! Field constraints for every writable entity
//!
//! Each entity has a static table of [`FieldRule`]s. The store checks a full record
//! against its table before every insert and update, so a partial update is always
//! validated on the merged result. Reference existence needs the database and is
//! checked by the repositories; this module only knows which fields are references.

use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

/// Upper bound shared by every year-like column.
pub const MAX_YEAR: i64 = 2022;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text { max_length: Option<usize> },
    Integer { min: i64, max: i64 },
    Reference { table: &'static str, key: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Text must not be blank
    pub required: bool,
    pub nullable: bool,
}

/// A single field value as seen by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Reference(i64),
    Null,
    /// Not sent by the client at all
    Missing,
}

impl<'a> From<Option<i64>> for FieldValue<'a> {
    fn from(value: Option<i64>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Integer)
    }
}

/// A full writable record of some entity.
pub trait Record {
    const RULES: &'static [FieldRule];

    fn values(&self) -> Vec<(&'static str, FieldValue<'_>)>;
}

const fn text(name: &'static str, max_length: Option<usize>) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::Text { max_length },
        required: true,
        nullable: false,
    }
}

const fn year(name: &'static str, nullable: bool) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::Integer { min: 0, max: MAX_YEAR },
        required: !nullable,
        nullable,
    }
}

const fn reference(
    name: &'static str,
    table: &'static str,
    key: &'static str,
    nullable: bool,
) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::Reference { table, key },
        required: !nullable,
        nullable,
    }
}

pub const LIBRARY_RULES: &[FieldRule] = &[
    text("title", Some(512)),
    text("address", Some(2048)),
    text("working_hours", Some(512)),
];

pub const GENRE_RULES: &[FieldRule] = &[text("title", Some(512))];

pub const AUTHOR_RULES: &[FieldRule] = &[text("full_name", Some(512)), year("birthday", false)];

pub const BOOK_RULES: &[FieldRule] = &[
    text("title", Some(512)),
    year("year", true),
    reference("author", "authors", "author_id", false),
    reference("genre", "genres", "genre_id", true),
];

pub const COMMENT_RULES: &[FieldRule] = &[
    text("text", None),
    reference("book", "books", "book_id", false),
];

fn error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(message));
    error
}

impl FieldRule {
    /// Checks one value against the rule; references are only type-checked here.
    pub fn check(&self, value: FieldValue<'_>) -> Option<ValidationError> {
        match (self.kind, value) {
            (_, FieldValue::Null | FieldValue::Missing) if self.nullable => None,
            (_, FieldValue::Null) => Some(error("null", "This field may not be null.".into())),
            (_, FieldValue::Missing) => Some(required()),
            (FieldKind::Text { max_length }, FieldValue::Text(text)) => {
                if self.required && text.trim().is_empty() {
                    return Some(error("blank", "This field may not be blank.".into()));
                }
                match max_length {
                    Some(max) if text.chars().count() > max => {
                        let mut err = error(
                            "length",
                            format!("Ensure this field has no more than {max} characters."),
                        );
                        err.add_param(Cow::Borrowed("max"), &max);
                        Some(err)
                    }
                    _ => None,
                }
            }
            (FieldKind::Integer { min, max }, FieldValue::Integer(number)) => {
                if number < min {
                    let mut err = error(
                        "range",
                        format!("Ensure this value is greater than or equal to {min}."),
                    );
                    err.add_param(Cow::Borrowed("min"), &min);
                    Some(err)
                } else if number > max {
                    let mut err = error(
                        "range",
                        format!("Ensure this value is less than or equal to {max}."),
                    );
                    err.add_param(Cow::Borrowed("max"), &max);
                    Some(err)
                } else {
                    None
                }
            }
            (FieldKind::Reference { .. }, FieldValue::Reference(_)) => None,
            _ => Some(error("invalid", "Unexpected value type.".into())),
        }
    }
}

fn required() -> ValidationError {
    error("required", "This field is required.".into())
}

fn value_of<'a>(values: &[(&'static str, FieldValue<'a>)], name: &str) -> FieldValue<'a> {
    values
        .iter()
        .find(|(field, _)| *field == name)
        .map_or(FieldValue::Null, |(_, value)| *value)
}

/// Runs every rule of the record's table; an empty result means the record is valid
/// apart from reference existence.
pub fn check<R: Record>(record: &R) -> ValidationErrors {
    let values = record.values();
    let mut errors = ValidationErrors::new();
    for rule in R::RULES {
        if let Some(err) = rule.check(value_of(&values, rule.name)) {
            errors.add(rule.name, err);
        }
    }
    errors
}

/// Only the required fields the client left out; used on request bodies before
/// they are turned into full records.
pub fn missing<R: Record>(record: &R) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for (name, value) in record.values() {
        let rule = R::RULES.iter().find(|rule| rule.name == name);
        if let (Some(rule), FieldValue::Missing) = (rule, value) {
            if !rule.nullable {
                errors.add(rule.name, required());
            }
        }
    }
    errors
}

/// Reference fields of the record that carry a key, with the table they point at.
pub fn references<R: Record>(record: &R) -> Vec<(&'static FieldRule, i64)> {
    let values = record.values();
    R::RULES
        .iter()
        .filter_map(|rule| match (rule.kind, value_of(&values, rule.name)) {
            (FieldKind::Reference { .. }, FieldValue::Reference(id)) => Some((rule, id)),
            _ => None,
        })
        .collect()
}

/// Error reported for a reference to a row that does not exist.
pub fn missing_reference(id: i64) -> ValidationError {
    let mut err = error(
        "does_not_exist",
        format!("Invalid pk \"{id}\" - object does not exist."),
    );
    err.add_param(Cow::Borrowed("pk"), &id);
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample<'a> {
        title: &'a str,
        year: Option<i64>,
        author: i64,
    }

    impl Record for Sample<'_> {
        const RULES: &'static [FieldRule] = BOOK_RULES;

        fn values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
            vec![
                ("title", FieldValue::Text(self.title)),
                ("year", self.year.into()),
                ("author", FieldValue::Reference(self.author)),
            ]
        }
    }

    #[test]
    fn test_valid_book_passes() {
        let record = Sample { title: "Книга", year: Some(1510), author: 1 };
        assert!(check(&record).is_empty());
    }

    #[test]
    fn test_year_bounds_are_inclusive() {
        for year in [0, MAX_YEAR] {
            let record = Sample { title: "t", year: Some(year), author: 1 };
            assert!(check(&record).is_empty(), "year {year} should be accepted");
        }
        for year in [-1, MAX_YEAR + 1] {
            let record = Sample { title: "t", year: Some(year), author: 1 };
            let errors = check(&record);
            assert!(errors.field_errors().contains_key("year"), "year {year} should be rejected");
        }
    }

    #[test]
    fn test_nullable_year_and_missing_genre_are_accepted() {
        let record = Sample { title: "t", year: None, author: 1 };
        assert!(check(&record).is_empty());
    }

    #[test]
    fn test_blank_and_long_title_rejected() {
        let blank = Sample { title: "   ", year: None, author: 1 };
        assert_eq!(check(&blank).field_errors()["title"][0].code, "blank");

        let long = "x".repeat(513);
        let record = Sample { title: &long, year: None, author: 1 };
        assert_eq!(check(&record).field_errors()["title"][0].code, "length");
    }

    #[test]
    fn test_required_reference_may_not_be_null() {
        let rule = BOOK_RULES[2];
        assert_eq!(rule.check(FieldValue::Null).map(|e| e.code), Some("null".into()));
    }

    #[test]
    fn test_missing_reports_only_required_fields() {
        struct Draft {
            title: Option<String>,
            author: Option<i64>,
        }

        impl Record for Draft {
            const RULES: &'static [FieldRule] = BOOK_RULES;

            fn values(&self) -> Vec<(&'static str, FieldValue<'_>)> {
                vec![
                    ("title", self.title.as_deref().map_or(FieldValue::Missing, FieldValue::Text)),
                    ("year", FieldValue::Missing),
                    ("author", self.author.map_or(FieldValue::Missing, FieldValue::Reference)),
                    ("genre", FieldValue::Missing),
                ]
            }
        }

        let draft = Draft { title: Some("Без автора".to_string()), author: None };
        let errors = missing(&draft);
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["author"][0].code, "required");
    }

    #[test]
    fn test_references_lists_only_present_keys() {
        let record = Sample { title: "t", year: None, author: 7 };
        let refs = references(&record);
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].0.name, "author");
        assert_eq!(refs[0].1, 7);
    }
}
