//! Contact addresses a code can be delivered to

use std::fmt;
use std::str::FromStr;

use ov_shared::utils::{email, mask_contact, phone};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// Delivery channel for a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    Email,
    Phone,
}

impl ContactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactType::Email => "email",
            ContactType::Phone => "phone",
        }
    }

    /// Guess the type of an undeclared contact: anything with `@` is an email
    pub fn infer(raw: &str) -> Self {
        if raw.contains('@') {
            ContactType::Email
        } else {
            ContactType::Phone
        }
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(ContactType::Email),
            "phone" => Ok(ContactType::Phone),
            other => Err(DomainError::invalid_input(format!(
                "unknown contact type {:?}, expected \"email\" or \"phone\"",
                other
            ))),
        }
    }
}

/// A validated, normalized contact address
///
/// Emails are trimmed and lower-cased; phone numbers are reduced to
/// `+<digits>`. Two spellings of the same address always produce the same
/// `Contact`, which is what the stores key records on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contact {
    value: String,
    contact_type: ContactType,
}

impl Contact {
    /// Validate `raw` against its declared type and normalize it
    pub fn parse(raw: &str, contact_type: ContactType) -> DomainResult<Self> {
        if raw.trim().is_empty() {
            return Err(DomainError::invalid_input("contact is required"));
        }

        let value = match contact_type {
            ContactType::Email => {
                let normalized = email::normalize_email(raw);
                if !email::is_valid_email(&normalized) {
                    return Err(DomainError::invalid_input(
                        "contact is not a valid email address",
                    ));
                }
                normalized
            }
            ContactType::Phone => phone::normalize_phone_number(raw).ok_or_else(|| {
                DomainError::invalid_input(
                    "contact is not a valid phone number, use international format like +2348012345678",
                )
            })?,
        };

        Ok(Self {
            value,
            contact_type,
        })
    }

    /// Parse a contact whose type was not declared by the caller
    pub fn parse_inferred(raw: &str) -> DomainResult<Self> {
        Self::parse(raw, ContactType::infer(raw))
    }

    /// Rebuild a contact from a value that was normalized before it was stored
    pub fn from_normalized(value: impl Into<String>, contact_type: ContactType) -> Self {
        Self {
            value: value.into(),
            contact_type,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn contact_type(&self) -> ContactType {
        self.contact_type
    }

    /// Masked form for logs and responses
    pub fn masked(&self) -> String {
        mask_contact(&self.value)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}
