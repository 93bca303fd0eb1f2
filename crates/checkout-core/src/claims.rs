//! # Identity Claims
//!
//! Claims asserted by the upstream identity provider. Tokens are verified
//! before the request reaches us; this module only reads the attributes.

use serde::{Deserialize, Serialize};

/// Claim carrying the caller's user id
pub const USERNAME_CLAIM: &str = "cognito:username";
/// Claim carrying the caller's email
pub const EMAIL_CLAIM: &str = "email";
/// Claim carrying the caller's group memberships
pub const GROUPS_CLAIM: &str = "cognito:groups";

/// Group a caller must belong to in order to pay for a ticket
pub const ATTENDEE_GROUP: &str = "attendee";

/// Identity attributes of the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// User id (`cognito:username`)
    #[serde(default)]
    pub username: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Group memberships
    #[serde(default)]
    pub groups: Vec<String>,
}

impl IdentityClaims {
    /// Create claims for a user with no groups
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            email: None,
            groups: Vec::new(),
        }
    }

    /// Builder: set email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder: add a group membership
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Build from a JSON claims object, as produced by a REST API
    /// Cognito authorizer. Groups may be an array or an encoded string.
    pub fn from_json(claims: &serde_json::Map<String, serde_json::Value>) -> Self {
        let string_claim = |key: &str| {
            claims
                .get(key)
                .and_then(|v| v.as_str())
                .map(String::from)
        };

        let groups = match claims.get(GROUPS_CLAIM) {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            Some(serde_json::Value::String(raw)) => parse_groups(raw),
            _ => Vec::new(),
        };

        Self {
            username: string_claim(USERNAME_CLAIM),
            email: string_claim(EMAIL_CLAIM),
            groups,
        }
    }

    /// Exact, case-sensitive group membership check
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }

    /// Whether the caller may buy tickets
    pub fn is_attendee(&self) -> bool {
        self.has_group(ATTENDEE_GROUP)
    }

    /// Email or empty string
    pub fn email_or_default(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}

/// Parse a group claim value.
///
/// Accepts `[a b]` (API Gateway's rendering of a list claim), a JSON
/// array string, or a comma-separated list.
pub fn parse_groups(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();

    if trimmed.starts_with('[') {
        if let Ok(groups) = serde_json::from_str::<Vec<String>>(trimmed) {
            return groups.into_iter().filter(|g| !g.is_empty()).collect();
        }
    }

    trimmed
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|g| g.trim_matches('"'))
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}
