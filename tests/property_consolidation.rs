//! Property-based tests for privilege consolidation
//!
//! Uses proptest to verify the consolidation invariants hold across many
//! random sessions

use connection_status::auth::{
    ActionSet, ActionType, AuthenticatedUser, AuthorizationSession, GrantSource, Privilege,
    ResourcePattern, UserName,
};
use connection_status::PrivilegeConsolidator;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

fn arb_resource() -> impl Strategy<Value = ResourcePattern> {
    prop_oneof![
        Just(ResourcePattern::Cluster),
        Just(ResourcePattern::AnyResource),
        Just(ResourcePattern::AnyNormalResource),
        "[a-d]".prop_map(|db| ResourcePattern::database(db).unwrap()),
        "[a-d]".prop_map(|collection| ResourcePattern::collection(collection).unwrap()),
        ("[a-c]", "[x-z]")
            .prop_map(|(db, collection)| ResourcePattern::namespace(db, collection).unwrap()),
    ]
}

fn arb_actions() -> impl Strategy<Value = ActionSet> {
    prop::collection::vec(prop::sample::select(ActionType::ALL.to_vec()), 0..5)
        .prop_map(|actions| actions.into_iter().collect())
}

fn arb_privilege() -> impl Strategy<Value = Privilege> {
    (arb_resource(), arb_actions()).prop_map(|(r, a)| Privilege::new(r, a))
}

fn arb_session() -> impl Strategy<Value = AuthorizationSession> {
    prop::collection::vec(prop::collection::vec(arb_privilege(), 0..8), 0..5).prop_map(|users| {
        let mut session = AuthorizationSession::new();
        for (i, grants) in users.into_iter().enumerate() {
            let mut user = AuthenticatedUser::new(UserName::new(format!("u{}", i), "admin").unwrap());
            for grant in grants {
                user = user.with_privilege(grant);
            }
            session.authenticate(user);
        }
        session
    })
}

/// Every (resource, action) pair granted anywhere on the session
fn granted_pairs(session: &AuthorizationSession) -> HashMap<ResourcePattern, HashSet<ActionType>> {
    let mut pairs: HashMap<ResourcePattern, HashSet<ActionType>> = HashMap::new();
    for principal in session.authenticated_principals() {
        for privilege in session.grants_for(&principal).unwrap() {
            pairs
                .entry(privilege.resource().clone())
                .or_default()
                .extend(privilege.actions().iter());
        }
    }
    pairs
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_resources_are_unique(session in arb_session()) {
        let consolidated = PrivilegeConsolidator::consolidate(&session).unwrap();

        let mut seen = HashSet::new();
        for privilege in &consolidated {
            prop_assert!(
                seen.insert(privilege.resource().clone()),
                "resource {} appears twice",
                privilege.resource()
            );
        }
    }

    #[test]
    fn prop_no_action_lost(session in arb_session()) {
        let consolidated = PrivilegeConsolidator::consolidate(&session).unwrap();

        for (resource, actions) in granted_pairs(&session) {
            let merged = consolidated.get(&resource);
            prop_assert!(merged.is_some(), "resource {} dropped", resource);
            let merged = merged.unwrap();
            for action in actions {
                prop_assert!(merged.contains(action), "{} lost on {}", action, resource);
            }
        }
    }

    #[test]
    fn prop_no_action_fabricated(session in arb_session()) {
        let consolidated = PrivilegeConsolidator::consolidate(&session).unwrap();
        let granted = granted_pairs(&session);

        prop_assert_eq!(consolidated.len(), granted.len());
        for privilege in &consolidated {
            let allowed = &granted[privilege.resource()];
            for action in privilege.actions().iter() {
                prop_assert!(
                    allowed.contains(&action),
                    "{} was never granted on {}",
                    action,
                    privilege.resource()
                );
            }
        }
    }

    #[test]
    fn prop_duplicated_principals_are_idempotent(session in arb_session()) {
        let principals = session.authenticated_principals();
        let doubled: Vec<UserName> = principals.iter().chain(principals.iter()).cloned().collect();

        let once = PrivilegeConsolidator::consolidate_principals(&session, &principals).unwrap();
        let twice = PrivilegeConsolidator::consolidate_principals(&session, &doubled).unwrap();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_order_is_deterministic(session in arb_session()) {
        let first = PrivilegeConsolidator::consolidate(&session).unwrap();
        let second = PrivilegeConsolidator::consolidate(&session).unwrap();

        prop_assert_eq!(first.into_vec(), second.into_vec());
    }

    #[test]
    fn prop_order_follows_first_occurrence(session in arb_session()) {
        let consolidated = PrivilegeConsolidator::consolidate(&session).unwrap();

        let mut expected: Vec<ResourcePattern> = Vec::new();
        for principal in session.authenticated_principals() {
            for privilege in session.grants_for(&principal).unwrap() {
                if !expected.contains(privilege.resource()) {
                    expected.push(privilege.resource().clone());
                }
            }
        }

        let actual: Vec<ResourcePattern> =
            consolidated.iter().map(|p| p.resource().clone()).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_reply_documents_are_unique_and_reparse(session in arb_session()) {
        let consolidated = PrivilegeConsolidator::consolidate(&session).unwrap();
        let json = serde_json::to_value(&consolidated).unwrap();

        let mut documents = HashSet::new();
        for entry in json.as_array().unwrap() {
            prop_assert!(
                documents.insert(entry["resource"].to_string()),
                "resource document {} listed twice",
                entry["resource"]
            );
        }

        let reparsed: Vec<Privilege> = serde_json::from_value(json).unwrap();
        prop_assert_eq!(reparsed, consolidated.into_vec());
    }
}
