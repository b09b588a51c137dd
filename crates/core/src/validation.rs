//! Field-level validation results.
//!
//! Validation never fails with an error value: it returns a map of
//! field key → message, and an empty map means the candidate is valid.
//! Nested line items are addressed with path keys (`items.<index>.<field>`)
//! so a form can highlight one field on one line.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered mapping of field key to a human-readable message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record a message for `field`. The first message for a field wins.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Convert into a `Result`, treating an empty map as success.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl core::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Key for a field of one line item, e.g. `items.2.quantity`.
pub fn item_key(index: usize, field: &str) -> String {
    format!("items.{index}.{field}")
}

/// Inputs a validator may need beyond the candidate itself.
///
/// Passing "today" explicitly keeps validators pure and testable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    pub today: NaiveDate,
}

impl ValidationContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context for the current local calendar day.
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}

// =============================================================================
// Field checks
// =============================================================================

/// Require a non-blank string.
pub fn require_text(errors: &mut ValidationErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

/// Require a finite, non-negative decimal.
pub fn require_non_negative(errors: &mut ValidationErrors, field: &str, value: f64, message: &str) {
    if !value.is_finite() || value < 0.0 {
        errors.add(field, message);
    }
}

/// Require a non-negative integer count.
pub fn require_non_negative_count(
    errors: &mut ValidationErrors,
    field: &str,
    value: i64,
    message: &str,
) {
    if value < 0 {
        errors.add(field, message);
    }
}

/// Require a strictly positive integer count.
pub fn require_positive_count(errors: &mut ValidationErrors, field: &str, value: i64, message: &str) {
    if value <= 0 {
        errors.add(field, message);
    }
}
