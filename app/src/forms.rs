//! Generic controlled-form state
//!
//! Tracks values, per-field errors, touched fields and the submitting flag
//! for any form value implementing [`FormSchema`]. Submission marks every
//! field touched, re-validates, and only runs the submit action when the
//! error map is empty; a blocked submit aborts silently with the errors
//! left in place for display.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;

/// Field name to message, ordered for stable display
pub type FieldErrors = BTreeMap<&'static str, String>;

/// A form value that knows its fields and how to validate itself
pub trait FormSchema: Clone {
    /// Every field the form tracks, used to mark all touched on submit
    const FIELDS: &'static [&'static str];

    /// Full validation; an empty map means the form may submit
    fn validate(&self) -> FieldErrors;
}

/// Controlled-form state for a [`FormSchema`] value
#[derive(Debug, Clone)]
pub struct FormState<V: FormSchema> {
    values: V,
    initial: V,
    errors: FieldErrors,
    touched: BTreeSet<&'static str>,
    submitting: bool,
}

impl<V: FormSchema> FormState<V> {
    pub fn new(initial: V) -> Self {
        Self {
            values: initial.clone(),
            initial,
            errors: FieldErrors::new(),
            touched: BTreeSet::new(),
            submitting: false,
        }
    }

    pub fn values(&self) -> &V {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// The error to show for a field: only once the field was touched
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if !self.is_touched(field) {
            return None;
        }
        self.errors.get(field).map(String::as_str)
    }

    /// Update a field through a typed mutation
    pub fn change(&mut self, field: &'static str, apply: impl FnOnce(&mut V)) {
        apply(&mut self.values);
        // Re-validate so an already-visible error clears as the user types
        if self.touched.contains(field) {
            self.errors = self.values.validate();
        }
    }

    /// Mark a field touched and re-run validation
    pub fn blur(&mut self, field: &'static str) {
        self.touched.insert(field);
        self.errors = self.values.validate();
    }

    /// Touch every field and validate; returns the values only when clean.
    /// Used by callers that gate a synchronous transition on validity.
    pub fn validate_all(&mut self) -> Option<V> {
        for field in V::FIELDS.iter().copied() {
            self.touched.insert(field);
        }
        self.errors = self.values.validate();
        if self.errors.is_empty() {
            Some(self.values.clone())
        } else {
            None
        }
    }

    /// Validate and, only when clean, run the submit action. Returns `None`
    /// when validation blocked the submit.
    pub async fn submit<F, Fut, T, E>(&mut self, action: F) -> Option<Result<T, E>>
    where
        F: FnOnce(V) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let values = self.validate_all()?;
        self.submitting = true;
        let result = action(values).await;
        self.submitting = false;
        Some(result)
    }

    /// Restore initial values and clear errors and touched state
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.touched.clear();
        self.submitting = false;
    }
}
