//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Maximum accepted length for a provider order identifier.
const MAX_ORDER_ID_LEN: usize = 64;

/// Order ids arrive in the `token` query/body field of the approval redirect.
const ORDER_ID_FIELD: &str = "token";

/// Opaque identifier for a server-side session, carried in the session cookie.
///
/// Generated as random v4 UUIDs; the id alone grants use of the bound token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for SessionId {
    type Err = ValidationError;

    /// Parses a cookie value. Anything but a hyphenated UUID is refused.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::try_parse(s)
            .map(Self)
            .map_err(|e| ValidationError::malformed("session_id", e.to_string()))
    }
}

/// Identifier of an order on the payment provider's side.
///
/// The value is interpolated into the capture URL path, so only
/// alphanumerics, `-` and `_` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

impl OrderId {
    /// Creates a new OrderId, returning error if empty or malformed.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::missing(ORDER_ID_FIELD));
        }
        if id.len() > MAX_ORDER_ID_LEN {
            return Err(ValidationError::too_long(ORDER_ID_FIELD, MAX_ORDER_ID_LEN));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::malformed(
                ORDER_ID_FIELD,
                "only letters, digits, '-' and '_' are allowed",
            ));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OrderId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_random() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn session_id_survives_cookie_round_trip() {
        let id = SessionId::new();
        assert_eq!(id.to_string().parse::<SessionId>(), Ok(id));
    }

    #[test]
    fn session_id_rejects_non_uuid_cookie_values() {
        for value in ["", "not-a-session", "550e8400e29b41d4a716446655440000x"] {
            let err = value.parse::<SessionId>().unwrap_err();
            assert_eq!(err.field(), "session_id");
        }
    }

    #[test]
    fn order_id_accepts_provider_style_ids() {
        let id = OrderId::new("5O190127TN364715T").unwrap();
        assert_eq!(id.as_str(), "5O190127TN364715T");
    }

    #[test]
    fn order_id_rejects_empty_string() {
        assert_eq!(OrderId::new(""), Err(ValidationError::missing("token")));
    }

    #[test]
    fn order_id_rejects_path_characters() {
        assert!(OrderId::new("../v1/oauth2/token").is_err());
        assert!(OrderId::new("abc/capture").is_err());
        assert!(OrderId::new("abc?x=1").is_err());
    }

    #[test]
    fn order_id_rejects_overlong_values() {
        assert_eq!(
            OrderId::new("A".repeat(65)),
            Err(ValidationError::too_long("token", 64))
        );
        assert!(OrderId::new("A".repeat(64)).is_ok());
    }

    #[test]
    fn order_id_deserialization_validates() {
        let ok: Result<OrderId, _> = serde_json::from_str("\"ORDER-1\"");
        assert!(ok.is_ok());

        let bad: Result<OrderId, _> = serde_json::from_str("\"a b\"");
        assert!(bad.is_err());
    }
}
