use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Access tiers, lowest first. A higher tier may do everything a lower one may.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Start line judge. Read access to owned data only.
    Observer,
    /// Racing team. Read access to owned data only.
    Viewer,
    /// Race control. May create, change and delete owned data.
    Editor,
    /// Bypasses every ownership check.
    Superuser,
}

impl Role {
    pub fn at_least(self, required: Role) -> bool {
        self >= required
    }

    pub fn can_mutate(self) -> bool {
        self.at_least(Role::Editor)
    }
}

/// The authenticated actor behind a request.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i32,
    pub role: Role,
}

impl Principal {
    pub fn new(id: i32, role: Role) -> Self {
        Principal { id, role }
    }

    pub fn is_superuser(&self) -> bool {
        self.role == Role::Superuser
    }

    pub fn owns(&self, owner_user_id: i32) -> bool {
        self.id == owner_user_id
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn roles_are_totally_ordered() {
        assert!(Role::Superuser > Role::Editor);
        assert!(Role::Editor > Role::Viewer);
        assert!(Role::Viewer > Role::Observer);

        assert!(Role::Superuser.at_least(Role::Editor));
        assert!(Role::Editor.at_least(Role::Editor));
        assert!(!Role::Viewer.at_least(Role::Editor));
    }

    #[test]
    fn only_editors_and_superusers_mutate() {
        assert!(Role::Superuser.can_mutate());
        assert!(Role::Editor.can_mutate());
        assert!(!Role::Viewer.can_mutate());
        assert!(!Role::Observer.can_mutate());
    }

    #[test]
    fn role_names_round_trip_through_strings() -> anyhow::Result<()> {
        assert_eq!(Role::Superuser.to_string(), "SUPERUSER");
        assert_eq!(Role::from_str("EDITOR")?, Role::Editor);
        assert!(Role::from_str("editor").is_err());
        Ok(())
    }
}
