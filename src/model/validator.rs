//! Value validation.
//!
//! A [`Validator`] rejects values with a [`ValidationError`] meant for the
//! user: it carries the rejected value and, once it reaches a session, the
//! session it occurred in.

use regex::Regex;

use crate::error::{Error, Result};

/// A value failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    rejected: Option<String>,
    session: Option<String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            rejected: None,
            session: None,
        }
    }

    /// Record the rejected value (builder).
    pub fn with_rejected(mut self, value: impl Into<String>) -> Self {
        self.rejected = Some(value.into());
        self
    }

    /// Record the session the failure occurred in (builder).
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn rejected(&self) -> Option<&str> {
        self.rejected.as_deref()
    }

    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }
}

/// Accepts or rejects values of type `V`. `None` is the absent value.
pub trait Validator<V: ?Sized>: Send + Sync {
    fn validate(&self, value: Option<&V>) -> std::result::Result<(), ValidationError>;

    fn is_valid(&self, value: Option<&V>) -> bool {
        self.validate(value).is_ok()
    }
}

/// Rejects absent values and empty strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredValidator;

impl Validator<String> for RequiredValidator {
    fn validate(&self, value: Option<&String>) -> std::result::Result<(), ValidationError> {
        match value {
            Some(text) if !text.is_empty() => Ok(()),
            Some(text) => Err(ValidationError::new("a value is required").with_rejected(text.as_str())),
            None => Err(ValidationError::new("a value is required")),
        }
    }
}

/// Accepts strings matching a pattern in full.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    regex: Regex,
    required: bool,
}

impl RegexValidator {
    /// Compile `pattern`, anchored at both ends.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|err| Error::invalid_argument(format!("invalid pattern {pattern:?}: {err}")))?;
        Ok(Self {
            regex,
            required: false,
        })
    }

    /// Also reject absent values (builder).
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

impl Validator<String> for RegexValidator {
    fn validate(&self, value: Option<&String>) -> std::result::Result<(), ValidationError> {
        match value {
            Some(text) if self.regex.is_match(text) => Ok(()),
            Some(text) => Err(ValidationError::new(format!(
                "{text:?} does not match {}",
                self.regex.as_str()
            ))
            .with_rejected(text.as_str())),
            None if self.required => Err(ValidationError::new("a value is required")),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_empty_and_absent() {
        let validator = RequiredValidator;
        assert!(validator.is_valid(Some(&"x".to_string())));
        let err = validator.validate(Some(&String::new())).unwrap_err();
        assert_eq!(err.rejected(), Some(""));
        assert!(!validator.is_valid(None));
    }

    #[test]
    fn regex_matches_whole_value() {
        let validator = RegexValidator::new("[0-9]+").unwrap();
        assert!(validator.is_valid(Some(&"123".to_string())));
        assert!(!validator.is_valid(Some(&"12a".to_string())));
        assert!(validator.is_valid(None));
        assert!(!validator.required(true).is_valid(None));
    }

    #[test]
    fn regex_error_carries_value() {
        let validator = RegexValidator::new("[a-z]+").unwrap();
        let err = validator.validate(Some(&"ABC".to_string())).unwrap_err();
        assert_eq!(err.rejected(), Some("ABC"));
        assert_eq!(err.session(), None);
        assert_eq!(err.with_session("s1").session(), Some("s1"));
    }

    #[test]
    fn bad_pattern_is_argument_error() {
        let err = RegexValidator::new("(").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
