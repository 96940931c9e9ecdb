use bitflags::bitflags;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Roles carried by the identity provider's token claims.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct RoleSet: i64 {
        const Manager    = 0b00000001;
        const CareWorker = 0b00000010;
    }
}

impl RoleSet {
    /// Map free-form role claim strings onto the known role set. Unknown
    /// claims are ignored.
    pub fn from_claims<I, S>(claims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roles = RoleSet::empty();
        for claim in claims {
            match claim.as_ref() {
                "Manager" => roles |= RoleSet::Manager,
                "careworker" | "care" => roles |= RoleSet::CareWorker,
                _ => {}
            }
        }
        roles
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, JsonSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Clock,
    History,
    Dashboard,
}

/// Whether a session holding `roles` may open `page`. History only requires
/// an authenticated session, which holding a `Session` already implies.
pub fn can_view(roles: RoleSet, page: Page) -> bool {
    match page {
        Page::Clock => roles.intersects(RoleSet::Manager | RoleSet::CareWorker),
        Page::History => true,
        Page::Dashboard => roles.contains(RoleSet::Manager),
    }
}

pub fn allowed_pages(roles: RoleSet) -> Vec<Page> {
    [Page::Clock, Page::History, Page::Dashboard]
        .into_iter()
        .filter(|page| can_view(roles, *page))
        .collect()
}

/// Read-only view of the authenticated user, passed explicitly into every
/// consumer instead of living in shared mutable state.
#[derive(Clone, Debug)]
pub struct Session {
    pub display_name: String,
    /// Opaque bearer token; the client never interprets its claims.
    pub token: String,
    pub roles: RoleSet,
}

impl Session {
    pub fn new(display_name: impl Into<String>, token: impl Into<String>, roles: RoleSet) -> Self {
        Self {
            display_name: display_name.into(),
            token: token.into(),
            roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_from_claims() {
        let roles = RoleSet::from_claims(["Manager"]);
        assert_eq!(roles, RoleSet::Manager);

        let roles = RoleSet::from_claims(["careworker", "Manager"]);
        assert!(roles.contains(RoleSet::Manager | RoleSet::CareWorker));

        let roles = RoleSet::from_claims(["care"]);
        assert_eq!(roles, RoleSet::CareWorker);

        let roles = RoleSet::from_claims(["janitor", ""]);
        assert!(roles.is_empty());
    }

    #[test]
    fn test_manager_sees_every_page() {
        let pages = allowed_pages(RoleSet::Manager);
        assert_eq!(pages, vec![Page::Clock, Page::History, Page::Dashboard]);
    }

    #[test]
    fn test_care_worker_cannot_open_dashboard() {
        let pages = allowed_pages(RoleSet::CareWorker);
        assert_eq!(pages, vec![Page::Clock, Page::History]);
    }

    #[test]
    fn test_roleless_session_only_sees_history() {
        let pages = allowed_pages(RoleSet::empty());
        assert_eq!(pages, vec![Page::History]);
    }
}
