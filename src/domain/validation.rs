//! Field validation and uniqueness failures for record writes.

use std::fmt;

use non_empty_string::NonEmptyString;

use super::EntityKind;

/// A field failed validation on create or update.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    /// Creates a validation error for the named field.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// The field that failed validation.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// The human-readable failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn missing_reference(field: &'static str, kind: EntityKind, id: i64) -> Self {
        Self::new(
            field,
            format!("{} instance with id {id} does not exist.", kind.as_str()),
        )
    }
}

/// Checks that a text field is not blank and, once trimmed, fits in `max`
/// characters.
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    let value = NonEmptyString::new(value.trim().to_string())
        .map_err(|_| ValidationError::new(field, "This field cannot be blank."))?;
    optional_text(field, value.as_str(), max)
}

/// Checks that a text field which may be blank fits in `max` characters
/// once trimmed.
pub(crate) fn optional_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    let length = value.trim().chars().count();
    if length > max {
        return Err(ValidationError::new(
            field,
            format!("Ensure this value has at most {max} characters (it has {length})."),
        ));
    }
    Ok(())
}

/// A write would violate a record kind's uniqueness invariant.
///
/// Displays as e.g. `Period with this Period name already exists.`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct DuplicateRecord {
    kind: EntityKind,
    fields: &'static [&'static str],
}

impl DuplicateRecord {
    /// Creates the error for `kind`, naming the fields of its unique key.
    #[must_use]
    pub const fn new(kind: EntityKind, fields: &'static [&'static str]) -> Self {
        Self { kind, fields }
    }

    /// The kind of record that was duplicated.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Labels of the fields forming the unique key.
    #[must_use]
    pub const fn fields(&self) -> &'static [&'static str] {
        self.fields
    }
}

impl fmt::Display for DuplicateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with this ", self.kind.label())?;
        match self.fields.split_last() {
            Some((last, [])) => write!(f, "{last}")?,
            Some((last, init)) => write!(f, "{} and {last}", init.join(", "))?,
            None => {}
        }
        write!(f, " already exists.")
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(EntityKind::Period, &["Period name"], "Period with this Period name already exists."; "single field")]
    #[test_case(EntityKind::Semester, &["Year", "Period"], "Semester with this Year and Period already exists."; "two fields")]
    #[test_case(
        EntityKind::Student,
        &["Last name", "First name", "Disambiguator"],
        "Student with this Last name, First name and Disambiguator already exists.";
        "three fields"
    )]
    fn duplicate_message(kind: EntityKind, fields: &'static [&'static str], expected: &str) {
        assert_eq!(DuplicateRecord::new(kind, fields).to_string(), expected);
    }

    #[test]
    fn blank_text_is_rejected() {
        let error = required_text("name", "   ", 10).unwrap_err();
        assert_eq!(error.field(), "name");
        assert_eq!(error.message(), "This field cannot be blank.");
    }

    #[test]
    fn long_text_is_rejected() {
        let error = optional_text("name", "abcdef", 5).unwrap_err();
        assert_eq!(
            error.to_string(),
            "name: Ensure this value has at most 5 characters (it has 6)."
        );
    }

    #[test]
    fn surrounding_whitespace_does_not_count_towards_length() {
        assert!(required_text("name", "  abcde  ", 5).is_ok());
    }

    #[test]
    fn blank_optional_text_is_accepted() {
        assert!(optional_text("disambiguator", "", 45).is_ok());
    }
}
