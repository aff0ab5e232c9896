//! Value model: a single optional value with an optional validator.

use std::fmt;
use std::sync::Arc;

use super::validator::{ValidationError, Validator};

/// Holds the value of an editable control.
pub struct ValueModel<V> {
    value: Option<V>,
    default: Option<V>,
    validator: Option<Arc<dyn Validator<V>>>,
}

impl<V: Clone + PartialEq> ValueModel<V> {
    /// An empty model with no default.
    pub fn new() -> Self {
        Self {
            value: None,
            default: None,
            validator: None,
        }
    }

    /// Start with `default` and return to it on [`reset`](Self::reset) (builder).
    pub fn with_default(mut self, default: V) -> Self {
        self.value = Some(default.clone());
        self.default = Some(default);
        self
    }

    /// Validate every new value (builder).
    pub fn with_validator(mut self, validator: Arc<dyn Validator<V>>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn validate(&self, value: Option<&V>) -> Result<(), ValidationError> {
        match &self.validator {
            Some(validator) => validator.validate(value),
            None => Ok(()),
        }
    }

    /// Whether the current value passes validation.
    pub fn is_valid(&self) -> bool {
        self.validate(self.value.as_ref()).is_ok()
    }

    /// Validate and store `value`, returning the previous value.
    ///
    /// A rejected value leaves the model unchanged.
    pub fn set_value(&mut self, value: Option<V>) -> Result<Option<V>, ValidationError> {
        self.validate(value.as_ref())?;
        Ok(std::mem::replace(&mut self.value, value))
    }

    /// Restore the default without validating, returning the previous value.
    pub fn reset(&mut self) -> Option<V> {
        std::mem::replace(&mut self.value, self.default.clone())
    }
}

impl<V: Clone + PartialEq> Default for ValueModel<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for ValueModel<V> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            default: self.default.clone(),
            validator: self.validator.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for ValueModel<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueModel")
            .field("value", &self.value)
            .field("default", &self.default)
            .field("validated", &self.validator.is_some())
            .finish()
    }
}
