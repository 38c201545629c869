use crate::entity::UserId;

/// Row visibility granted to an authenticated caller.
///
/// Staff see every borrowing and may narrow the listing to one user,
/// everyone else is pinned to their own rows.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AccessPolicy {
    Staff,
    OwnerOnly(UserId),
}

impl AccessPolicy {
    pub fn new(id: UserId, is_staff: bool) -> Self {
        if is_staff {
            Self::Staff
        } else {
            Self::OwnerOnly(id)
        }
    }

    pub fn narrow(&self, requested: Option<UserId>) -> Option<UserId> {
        match self {
            Self::Staff => requested,
            Self::OwnerOnly(own) => Some(own.clone()),
        }
    }

    pub fn can_write_catalog(&self) -> bool {
        matches!(self, Self::Staff)
    }
}

pub fn parse_active_filter(raw: Option<&str>) -> Option<bool> {
    match raw?.to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::entity::{parse_active_filter, AccessPolicy, UserId};

    #[test]
    fn staff_passes_requested_scope_through() {
        let policy = AccessPolicy::new(UserId::new(Uuid::new_v4()), true);
        assert_eq!(policy.narrow(None), None);
        let requested = UserId::new(Uuid::new_v4());
        assert_eq!(policy.narrow(Some(requested.clone())), Some(requested));
    }

    #[test]
    fn owner_is_pinned_to_own_rows() {
        let own = UserId::new(Uuid::new_v4());
        let policy = AccessPolicy::new(own.clone(), false);
        assert_eq!(policy.narrow(None), Some(own.clone()));
        let requested = UserId::new(Uuid::new_v4());
        assert_eq!(policy.narrow(Some(requested)), Some(own));
    }

    #[test]
    fn only_staff_writes_the_catalog() {
        assert!(AccessPolicy::new(UserId::new(Uuid::new_v4()), true).can_write_catalog());
        assert!(!AccessPolicy::new(UserId::new(Uuid::new_v4()), false).can_write_catalog());
    }

    #[test]
    fn active_filter_parses_case_insensitively() {
        assert_eq!(parse_active_filter(Some("true")), Some(true));
        assert_eq!(parse_active_filter(Some("TRUE")), Some(true));
        assert_eq!(parse_active_filter(Some("False")), Some(false));
        assert_eq!(parse_active_filter(Some("yes")), None);
        assert_eq!(parse_active_filter(None), None);
    }
}
