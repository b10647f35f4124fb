//! Field-level validation error accumulator.
//!
//! A [`Validator`] collects at most one message per field. Domain rules run
//! their checks against it, then convert it into
//! [`AppError::FailedValidation`] when anything failed.
//!
//! ```rust
//! use axum_helpers::validation::Validator;
//!
//! let mut v = Validator::new();
//! v.check(!"".trim().is_empty(), "name", "must be provided");
//! v.check(false, "name", "ignored, name already failed");
//! assert!(!v.valid());
//! assert_eq!(v.errors().get("name").map(String::as_str), Some("must be provided"));
//! ```

use crate::errors::AppError;
use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no errors have been recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` for `key` unless the key already has one.
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_insert_with(|| message.into());
    }

    /// Record `message` for `key` when `ok` is false.
    pub fn check(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_error(key, message);
        }
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn into_errors(self) -> BTreeMap<String, String> {
        self.errors
    }
}

impl From<Validator> for AppError {
    fn from(validator: Validator) -> Self {
        AppError::FailedValidation(validator.into_errors())
    }
}

/// True if `value` is one of `permitted`.
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.iter().any(|p| p == value)
}

/// True if no element of `values` appears twice.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v))
}
