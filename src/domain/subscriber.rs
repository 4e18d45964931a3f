//! Newsletter subscribers and email address validation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::error::HubError;

/// A syntactically valid email address.
///
/// Surrounding whitespace is trimmed and the domain part is lower-cased,
/// so `Jane@Example.COM` and `Jane@example.com` compare equal. The local
/// part keeps its case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String)]
pub struct Email(String);

impl Email {
    /// Validates and normalizes `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidEmail`] if `raw` is not a valid address.
    pub fn parse(raw: &str) -> Result<Self, HubError> {
        let trimmed = raw.trim();
        if !trimmed.validate_email() {
            return Err(HubError::InvalidEmail(trimmed.to_string()));
        }
        let Some((local, domain)) = trimmed.rsplit_once('@') else {
            return Err(HubError::InvalidEmail(trimmed.to_string()));
        };
        Ok(Self(format!("{local}@{}", domain.to_ascii_lowercase())))
    }

    /// Returns the normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A newsletter subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Subscribed address.
    pub email: Email,
    /// Subscription timestamp.
    pub subscribed_at: DateTime<Utc>,
}

impl Subscriber {
    /// Creates a subscription stamped with the current time.
    #[must_use]
    pub fn now(email: Email) -> Self {
        Self {
            email,
            subscribed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_normalizes_domain_case() {
        let Ok(email) = Email::parse("  Jane.Doe@Example.COM ") else {
            panic!("valid address rejected");
        };
        assert_eq!(email.as_str(), "Jane.Doe@example.com");
    }

    #[test]
    fn same_address_with_different_domain_case_is_equal() {
        let a = Email::parse("ops@HOMELAB.dev");
        let b = Email::parse("ops@homelab.dev");
        assert!(a.is_ok());
        assert_eq!(a.ok(), b.ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in ["", "plainaddress", "@no-local.org", "two@@ats.org", "spaces in@x.org"] {
            let result = Email::parse(raw);
            assert!(
                matches!(result, Err(HubError::InvalidEmail(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
