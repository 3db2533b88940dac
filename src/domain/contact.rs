use super::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Local part, '@', then one or more dot separated host labels.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$";

static EMAIL_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN));

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

pub enum ValidationReq {
    __,
}

impl ValidationReq {
    pub fn first_name_req() -> String {
        "First name must not be empty".to_string()
    }

    pub fn last_name_req() -> String {
        "Last name must not be empty".to_string()
    }

    pub fn email_req() -> String {
        "Email must be a valid email address, e.g. jane@example.com".to_string()
    }
}

impl Contact {
    pub fn new(first_name: String, last_name: String, email: String) -> Self {
        Contact {
            first_name,
            last_name,
            email,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        check_entry(&self.first_name, &self.last_name, &self.email)
    }
}

pub fn validate_name(name: &str) -> bool {
    !name.is_empty()
}

pub fn validate_email(email: &str) -> Result<bool, AppError> {
    let re = EMAIL_RE.as_ref().map_err(|e| AppError::Regex(e.clone()))?;
    Ok(re.is_match(email))
}

/// Checks a new or edited entry and reports the first rule it breaks.
pub fn check_entry(first_name: &str, last_name: &str, email: &str) -> Result<(), AppError> {
    if !validate_name(first_name) {
        return Err(AppError::Validation(ValidationReq::first_name_req()));
    }

    if !validate_name(last_name) {
        return Err(AppError::Validation(ValidationReq::last_name_req()));
    }

    if !validate_email(email)? {
        return Err(AppError::Validation(ValidationReq::email_req()));
    }

    Ok(())
}

/// Pure predicate over a form entry: both names present and a well-formed email.
pub fn validate(first_name: &str, last_name: &str, email: &str) -> bool {
    check_entry(first_name, last_name, email).is_ok()
}
