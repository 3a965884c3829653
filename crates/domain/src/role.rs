use std::fmt::{Display, Formatter};
use std::str::FromStr;

use folio_core::AppError;
use serde::{Deserialize, Serialize};

/// Actor role, ordered by increasing privilege.
///
/// The derived ordering is the single source of truth for privilege checks:
/// `Readonly < Edit < Publish < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May read documents only.
    Readonly,
    /// May author and edit own drafts.
    Edit,
    /// May review and publish work of assigned editors.
    Publish,
    /// Unrestricted lifecycle and assignment administration.
    Admin,
}

impl Role {
    /// Returns whether this role sits at or above `threshold`.
    #[must_use]
    pub fn has_at_least(self, threshold: Role) -> bool {
        self >= threshold
    }

    /// Returns whether this role is the administrative role.
    #[must_use]
    pub fn is_admin(self) -> bool {
        self.has_at_least(Role::Admin)
    }

    /// Returns a stable storage value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Readonly => "readonly",
            Self::Edit => "edit",
            Self::Publish => "publish",
            Self::Admin => "admin",
        }
    }

    /// Returns all roles in ascending privilege order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::Readonly, Role::Edit, Role::Publish, Role::Admin];

        ALL
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| AppError::Validation(format!("unknown role value '{value}'")))
    }
}
