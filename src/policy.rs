// Role policy - pure functions, no side effects
use std::fmt;

use crate::models::Me;

pub const RANK_EDITOR: u8 = 2;
pub const RANK_ADMIN: u8 = 3;
pub const ROLE_SUPERADMIN: &str = "superadmin";

/// A user may only delete users that rank strictly below them.
pub fn can_delete(actor_rank: u8, target_rank: u8) -> bool {
    target_rank < actor_rank
}

/// What a page demands of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    /// Role name must match exactly
    Exact(&'static str),
    /// role_rank must be at least this value
    MinRank(u8),
}

impl RoleRequirement {
    pub fn is_met_by(&self, me: &Me) -> bool {
        match self {
            RoleRequirement::Exact(role) => me.role == *role,
            RoleRequirement::MinRank(rank) => me.role_rank >= *rank,
        }
    }

    /// Alert shown when the requirement fails.
    pub fn denial(&self) -> String {
        match self {
            RoleRequirement::Exact(role) => format!("Must be a {}", role),
            RoleRequirement::MinRank(_) => "Insufficient permissions".to_string(),
        }
    }
}

impl fmt::Display for RoleRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleRequirement::Exact(role) => write!(f, "role == {}", role),
            RoleRequirement::MinRank(rank) => write!(f, "role_rank >= {}", rank),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn me(role: &str, role_rank: u8) -> Me {
        Me {
            id: Some(1),
            email: "me@example.org".to_string(),
            role: role.to_string(),
            role_rank,
        }
    }

    #[test]
    fn editor_cannot_delete_admin() {
        assert!(!can_delete(2, 3));
    }

    #[test]
    fn editor_can_delete_lower_rank() {
        assert!(can_delete(2, 1));
    }

    #[test]
    fn equal_rank_cannot_delete() {
        assert!(!can_delete(3, 3));
    }

    #[test]
    fn exact_requirement_matches_role_name_only() {
        let req = RoleRequirement::Exact(ROLE_SUPERADMIN);
        assert!(req.is_met_by(&me("superadmin", 4)));
        assert!(!req.is_met_by(&me("admin", 4)));
        assert_eq!(req.denial(), "Must be a superadmin");
    }

    #[test]
    fn min_rank_requirement_compares_rank() {
        let req = RoleRequirement::MinRank(RANK_ADMIN);
        assert!(req.is_met_by(&me("admin", 3)));
        assert!(req.is_met_by(&me("superadmin", 4)));
        assert!(!req.is_met_by(&me("editor", 2)));
    }
}
