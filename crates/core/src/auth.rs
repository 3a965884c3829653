use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{AppResult, NonEmptyString};

/// Opaque actor identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(NonEmptyString);

impl ActorId {
    /// Creates a validated actor identifier.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        Ok(Self(NonEmptyString::new(value)?))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ActorId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ActorId;

    #[test]
    fn actor_id_rejects_blank_values() {
        assert!(ActorId::new("").is_err());
        assert!(ActorId::new(" \t").is_err());
    }

    #[test]
    fn actor_id_serializes_as_plain_string() {
        let actor_id = ActorId::new("ed1").unwrap_or_else(|_| unreachable!());
        let encoded = serde_json::to_string(&actor_id).unwrap_or_default();
        assert_eq!(encoded, "\"ed1\"");
    }
}
