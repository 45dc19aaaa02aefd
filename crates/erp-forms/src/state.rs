//! # Shared Form State
//!
//! Holds the "document being edited" for hosts that serve one form from
//! several handlers (a desktop shell's command handlers, a test harness).
//!
//! ## Thread Safety
//! The form is wrapped in `Arc<Mutex<T>>` because:
//! 1. Several handlers may read or edit the same form
//! 2. An edit must observe the snapshot left by the previous one
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Handler A: apply(Quantity 3) ──┐                                       │
//! │                                 ├──► lock ──► clone ──► edit ──► swap   │
//! │  Handler B: totals() ───────────┘        (B waits; never sees half)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use erp_core::{DocumentTotals, FieldErrors};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::FormResult;
use crate::form::DocumentForm;

/// Shared handle to one form. Cloning shares the same form.
#[derive(Debug, Default)]
pub struct FormState<T> {
    form: Arc<Mutex<T>>,
}

impl<T> Clone for FormState<T> {
    fn clone(&self) -> Self {
        FormState {
            form: Arc::clone(&self.form),
        }
    }
}

impl<T> FormState<T> {
    pub fn new(form: T) -> Self {
        FormState {
            form: Arc::new(Mutex::new(form)),
        }
    }

    /// Executes a function with read access to the form.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = state.with_form(|form| form.totals());
    /// ```
    pub fn with_form<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        // Edits swap whole snapshots, so a poisoned lock still guards a
        // consistent value.
        let form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        f(&form)
    }

    /// Executes a function with write access to the form.
    pub fn with_form_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut form)
    }

    /// Replaces the form wholesale, returning the previous one.
    pub fn replace(&self, form: T) -> T {
        self.with_form_mut(|current| std::mem::replace(current, form))
    }
}

impl<T: DocumentForm> FormState<T> {
    pub fn apply(&self, change: T::Change) -> FormResult<()> {
        self.with_form_mut(|form| form.apply(change))
    }

    pub fn totals(&self) -> DocumentTotals {
        self.with_form(|form| form.totals())
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        self.with_form(|form| form.validate())
    }
}

impl<T: Clone> FormState<T> {
    /// Copy of the current form.
    pub fn snapshot(&self) -> T {
        self.with_form(T::clone)
    }
}
