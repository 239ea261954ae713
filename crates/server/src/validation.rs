//! Declarative per-entity form validation rules.
//!
//! Each entity gets one [`ConstraintSet`]; validating is a pure function
//! from a field-name→value record to a (possibly empty) list of field
//! errors. Validation always runs before persistence, and a failure
//! re-renders the originating form with these errors.

use std::sync::LazyLock;

/// A single failed constraint, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// External (form) name of the field.
    pub field: &'static str,
    /// Human-readable message for the form.
    pub message: String,
}

/// The errors produced by validating one record.
#[derive(Debug, Clone, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// True when validation passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the individual errors.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// The messages alone, in rule order, for template rendering.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(|e| e.message.clone()).collect()
    }

    fn push(&mut self, field: &'static str, message: String) {
        self.0.push(FieldError { field, message });
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One field's constraints within a set.
#[derive(Debug)]
struct FieldRule {
    field: &'static str,
    min_length: Option<MinLength>,
}

#[derive(Debug)]
struct MinLength {
    min: usize,
    message: &'static str,
}

/// A declarative constraint set for one entity's form.
#[derive(Debug)]
pub struct ConstraintSet {
    rules: Vec<FieldRule>,
}

impl ConstraintSet {
    fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Require the field to be present and non-blank.
    fn require(mut self, field: &'static str) -> Self {
        self.rules.push(FieldRule {
            field,
            min_length: None,
        });
        self
    }

    /// Require presence plus a minimum length, with a fixed message.
    fn require_min_length(
        mut self,
        field: &'static str,
        min: usize,
        message: &'static str,
    ) -> Self {
        self.rules.push(FieldRule {
            field,
            min_length: Some(MinLength { min, message }),
        });
        self
    }

    /// Validate a field-name→value record against this set.
    ///
    /// Missing fields are treated the same as blank ones. Returns an empty
    /// [`FieldErrors`] when every constraint holds.
    #[must_use]
    pub fn validate(&self, record: &[(&str, &str)]) -> FieldErrors {
        let mut errors = FieldErrors::default();

        for rule in &self.rules {
            let value = record
                .iter()
                .find(|(field, _)| *field == rule.field)
                .map_or("", |(_, value)| *value);

            if value.trim().is_empty() {
                errors.push(rule.field, format!("{} is required", rule.field));
                continue;
            }

            if let Some(min_length) = &rule.min_length
                && value.chars().count() < min_length.min
            {
                errors.push(rule.field, min_length.message.to_string());
            }
        }

        errors
    }
}

/// Constraints for the signup form.
pub fn signup() -> &'static ConstraintSet {
    static SET: LazyLock<ConstraintSet> = LazyLock::new(|| {
        ConstraintSet::new()
            .require("name")
            .require_min_length("username", 8, "username must be 8 characters or longer")
            .require_min_length("password", 8, "password must be 8 characters or longer")
    });
    &SET
}

/// Constraints for the add-book form.
pub fn add_book() -> &'static ConstraintSet {
    static SET: LazyLock<ConstraintSet> =
        LazyLock::new(|| ConstraintSet::new().require("title").require("author"));
    &SET
}

/// Constraints for the create-shelf form.
pub fn create_shelf() -> &'static ConstraintSet {
    static SET: LazyLock<ConstraintSet> =
        LazyLock::new(|| ConstraintSet::new().require("shelfTitle"));
    &SET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_valid() {
        let errors = signup().validate(&[
            ("name", "Frodo Baggins"),
            ("username", "frodo.baggins"),
            ("password", "speak friend"),
        ]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_signup_short_username_names_the_field() {
        let errors = signup().validate(&[
            ("name", "Frodo Baggins"),
            ("username", "frodo"),
            ("password", "speak friend"),
        ]);
        let errors: Vec<_> = errors.iter().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().map(|e| e.field), Some("username"));
        assert_eq!(
            errors.first().map(|e| e.message.as_str()),
            Some("username must be 8 characters or longer")
        );
    }

    #[test]
    fn test_signup_short_password_message() {
        let errors = signup().validate(&[
            ("name", "Frodo Baggins"),
            ("username", "frodo.baggins"),
            ("password", "short"),
        ]);
        assert_eq!(
            errors.messages(),
            vec!["password must be 8 characters or longer".to_string()]
        );
    }

    #[test]
    fn test_signup_all_blank() {
        let errors = signup().validate(&[]);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "username", "password"]);
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let errors = signup().validate(&[
            ("name", "   "),
            ("username", "frodo.baggins"),
            ("password", "speak friend"),
        ]);
        assert_eq!(errors.messages(), vec!["name is required".to_string()]);
    }

    #[test]
    fn test_min_length_counts_chars_not_bytes() {
        // 8 two-byte characters pass an 8-char minimum
        let errors = signup().validate(&[
            ("name", "Frodo"),
            ("username", "éééééééé"),
            ("password", "password123"),
        ]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_add_book_requires_title_and_author() {
        let errors = add_book().validate(&[("title", ""), ("author", "")]);
        assert_eq!(
            errors.messages(),
            vec!["title is required".to_string(), "author is required".to_string()]
        );

        let errors = add_book().validate(&[("title", "Dune"), ("author", "Herbert")]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_add_book_status_is_unconstrained() {
        // status is free text and never validated
        let errors = add_book().validate(&[("title", "Dune"), ("author", "Herbert"), ("status", "")]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_create_shelf_requires_title() {
        let errors = create_shelf().validate(&[("shelfTitle", "")]);
        assert_eq!(errors.messages(), vec!["shelfTitle is required".to_string()]);

        let errors = create_shelf().validate(&[("shelfTitle", "Sci-Fi")]);
        assert!(errors.is_empty());
    }
}
