//! User identity and roles.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable user identifier assigned by the database.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role names gating privileged actions.
///
/// Serialises as the bare role name (`"Admin"`), matching the role rows in
/// the database and the shape the client checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    /// May post into admin-write-only categories.
    Admin,
    /// Ordinary registered user.
    Member,
}

impl Role {
    /// The role's stored name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Member => "Member",
        }
    }

    /// Look a role up by its stored name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Admin" => Some(Self::Admin),
            "Member" => Some(Self::Member),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user as exposed to the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Database identifier.
    pub id: UserId,
    /// First name used as the display name; absent for accounts that never
    /// set one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Roles held by the user.
    pub roles: Vec<Role>,
}

impl User {
    /// Construct a user aggregate.
    pub fn new(id: UserId, first_name: Option<String>, roles: Vec<Role>) -> Self {
        Self {
            id,
            first_name,
            roles,
        }
    }

    /// Whether the user holds the administrator role.
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_round_trip_by_name() {
        assert_eq!(Role::from_name("Admin"), Some(Role::Admin));
        assert_eq!(Role::from_name("moderator"), None);
        assert_eq!(Role::Member.as_str(), "Member");
    }

    #[test]
    fn admin_detection_checks_held_roles() {
        let admin = User::new(UserId::new(1), Some("Alice".into()), vec![Role::Admin]);
        let member = User::new(UserId::new(2), None, vec![Role::Member]);
        assert!(admin.is_admin());
        assert!(!member.is_admin());
    }

    #[test]
    fn serialises_camel_case_with_bare_role_names() {
        let user = User::new(UserId::new(7), Some("Alice".into()), vec![Role::Admin]);
        let value = serde_json::to_value(&user).expect("serialise user");
        assert_eq!(value["firstName"], "Alice");
        assert_eq!(value["roles"][0], "Admin");
    }
}
