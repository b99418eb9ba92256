//! Phone Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

pub const PHONE_MIN_DIGITS: usize = 10;
pub const PHONE_MAX_DIGITS: usize = 15;

/// 10 to 15 ASCII digits, no separators or country prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    pub fn new(phone: impl Into<String>) -> AppResult<Self> {
        let phone = phone.into();
        if !Self::is_valid(&phone) {
            return Err(AppError::bad_request("Invalid phone"));
        }
        Ok(Self(phone))
    }

    pub fn is_valid(phone: &str) -> bool {
        (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&phone.len())
            && phone.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn from_db(phone: impl Into<String>) -> Self {
        Self(phone.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Phone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_bounds() {
        assert!(Phone::new("0171111111").is_ok());
        assert!(Phone::new("880171111111122").is_ok());
        assert!(Phone::new("017111111").is_err());
        assert!(Phone::new("8801711111111223").is_err());
        assert!(Phone::new("+8801711111111").is_err());
        assert!(Phone::new("01711-11111").is_err());
    }
}
