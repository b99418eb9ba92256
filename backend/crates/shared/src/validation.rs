//! Field validation
//!
//! Request DTOs decode with serde and then run their field constraints
//! through a [`Validator`], which collects every failure before turning
//! them into a single 400 with `details.fieldErrors`.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::error::app_error::{AppError, AppResult};

/// Collects per-field constraint failures.
#[derive(Debug, Default)]
pub struct Validator {
    field_errors: BTreeMap<&'static str, Vec<Cow<'static, str>>>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless `ok` holds.
    pub fn check(&mut self, field: &'static str, ok: bool, message: impl Into<Cow<'static, str>>) -> &mut Self {
        if !ok {
            self.field_errors.entry(field).or_default().push(message.into());
        }
        self
    }

    /// At least `min` characters (not bytes).
    pub fn min_chars(&mut self, field: &'static str, value: &str, min: usize) -> &mut Self {
        let ok = value.chars().count() >= min;
        self.check(field, ok, format!("Must contain at least {min} character(s)"))
    }

    /// Inclusive integer range.
    pub fn range(&mut self, field: &'static str, value: i64, min: i64, max: i64) -> &mut Self {
        if value < min {
            self.check(field, false, format!("Must be at least {min}"));
        } else if value > max {
            self.check(field, false, format!("Must be at most {max}"));
        }
        self
    }

    /// `^\d{min,max}$`
    pub fn digits(&mut self, field: &'static str, value: &str, min: usize, max: usize) -> &mut Self {
        let ok = (min..=max).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_digit());
        self.check(field, ok, format!("Must be {min}-{max} digits"))
    }

    pub fn non_empty<T>(&mut self, field: &'static str, items: &[T]) -> &mut Self {
        self.check(field, !items.is_empty(), "Must contain at least 1 element(s)")
    }

    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// `Ok(())` when nothing failed, else a 400 carrying `message` and the
    /// collected `fieldErrors`.
    pub fn finish(&mut self, message: &'static str) -> AppResult<()> {
        if self.is_valid() {
            return Ok(());
        }
        Err(std::mem::take(self).into_error(message))
    }

    /// The 400 for whatever has been collected so far.
    pub fn into_error(self, message: &'static str) -> AppError {
        AppError::bad_request(message).with_details(serde_json::json!({
            "formErrors": [],
            "fieldErrors": self.field_errors,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_passes() {
        let mut v = Validator::new();
        v.min_chars("name", "Karim", 1)
            .digits("phone", "01711111111", 10, 15)
            .range("qty", 20, 1, 20);
        assert!(v.finish("Invalid registration").is_ok());
    }

    #[test]
    fn test_collects_all_field_errors() {
        let mut v = Validator::new();
        v.min_chars("name", "", 1)
            .digits("phone", "+8801711", 10, 15)
            .range("qty", 0, 1, 20);
        let err = v.finish("Invalid registration").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Invalid registration");
        let details = err.details().unwrap();
        assert!(details["fieldErrors"]["name"].is_array());
        assert!(details["fieldErrors"]["phone"].is_array());
        assert_eq!(details["fieldErrors"]["qty"][0], "Must be at least 1");
    }

    #[test]
    fn test_into_error_carries_field_message() {
        let mut v = Validator::new();
        v.check("status", false, "Unknown status");
        let err = v.into_error("Invalid request");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.details().unwrap()["fieldErrors"]["status"][0], "Unknown status");
    }

    #[test]
    fn test_digits_bounds() {
        let mut v = Validator::new();
        v.digits("phone", "123456789", 10, 15);
        assert!(!v.is_valid());

        let mut v = Validator::new();
        v.digits("phone", "1234567890123456", 10, 15);
        assert!(!v.is_valid());

        let mut v = Validator::new();
        v.digits("phone", "123456789012345", 10, 15);
        assert!(v.is_valid());
    }

    #[test]
    fn test_min_chars_counts_characters() {
        let mut v = Validator::new();
        v.min_chars("name_bn", "চা", 2);
        assert!(v.is_valid());
    }
}
