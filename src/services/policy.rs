//! Role policy
//!
//! Central authorization decisions for job postings. All rules live here
//! as pure functions so handlers and services never hand-roll role checks.
//!
//! The rules:
//! - Admins can create, and can modify or delete any posting.
//! - Employers can create, and can modify or delete only their own postings.
//! - Job seekers can only browse and search.
//! - Employers see only their own postings when listing; everyone else
//!   sees all of them.

use crate::models::UserRole;

/// Whether listing returns every posting or only the caller's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    Owned,
}

/// Can this role create postings?
pub fn can_create(role: UserRole) -> bool {
    matches!(role, UserRole::Employer | UserRole::Admin)
}

/// Can this caller modify or delete the posting owned by `owner_id`?
pub fn can_modify(role: UserRole, caller_id: i64, owner_id: i64) -> bool {
    match role {
        UserRole::Admin => true,
        UserRole::Employer => caller_id == owner_id,
        UserRole::JobSeeker => false,
    }
}

/// Listing scope for this role.
pub fn list_scope(role: UserRole) -> ListScope {
    match role {
        UserRole::Employer => ListScope::Owned,
        UserRole::JobSeeker | UserRole::Admin => ListScope::All,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_can_create() {
        assert!(can_create(UserRole::Employer));
        assert!(can_create(UserRole::Admin));
        assert!(!can_create(UserRole::JobSeeker));
    }

    #[test]
    fn test_can_modify_decision_table() {
        // Admin: any posting
        assert!(can_modify(UserRole::Admin, 1, 1));
        assert!(can_modify(UserRole::Admin, 1, 2));

        // Employer: own postings only
        assert!(can_modify(UserRole::Employer, 1, 1));
        assert!(!can_modify(UserRole::Employer, 1, 2));

        // Job seeker: never, not even "their own" id
        assert!(!can_modify(UserRole::JobSeeker, 1, 1));
        assert!(!can_modify(UserRole::JobSeeker, 1, 2));
    }

    #[test]
    fn test_list_scope() {
        assert_eq!(list_scope(UserRole::Employer), ListScope::Owned);
        assert_eq!(list_scope(UserRole::JobSeeker), ListScope::All);
        assert_eq!(list_scope(UserRole::Admin), ListScope::All);
    }

    fn any_role() -> impl Strategy<Value = UserRole> {
        prop_oneof![
            Just(UserRole::JobSeeker),
            Just(UserRole::Employer),
            Just(UserRole::Admin),
        ]
    }

    proptest! {
        // Job seekers can never modify, regardless of ids.
        #[test]
        fn prop_job_seeker_never_modifies(caller in any::<i64>(), owner in any::<i64>()) {
            prop_assert!(!can_modify(UserRole::JobSeeker, caller, owner));
        }

        // Admins can always modify, regardless of ids.
        #[test]
        fn prop_admin_always_modifies(caller in any::<i64>(), owner in any::<i64>()) {
            prop_assert!(can_modify(UserRole::Admin, caller, owner));
        }

        // Employers modify exactly when they own the posting.
        #[test]
        fn prop_employer_ownership(caller in any::<i64>(), owner in any::<i64>()) {
            prop_assert_eq!(can_modify(UserRole::Employer, caller, owner), caller == owner);
        }

        // Anyone who can modify something could also have created postings.
        #[test]
        fn prop_modify_implies_create(role in any_role(), caller in any::<i64>(), owner in any::<i64>()) {
            if can_modify(role, caller, owner) {
                prop_assert!(can_create(role));
            }
        }
    }
}
