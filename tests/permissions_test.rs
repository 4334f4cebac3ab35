/*!
 * Permission Engine Integration Tests
 * Verifies resolution, filtering, and administration end to end
 */

use docgate::{
    filter_allowed, AccessDecision, DocPath, MemoryStore, PathSource, PermissionAdmin,
    PermissionLevel, PermissionStore,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use uuid::Uuid;

struct Doc {
    title: &'static str,
    path: DocPath,
}

impl Doc {
    fn new(title: &'static str) -> Self {
        Self {
            title,
            path: DocPath::parse(title).unwrap(),
        }
    }
}

impl PathSource for Doc {
    fn doc_path(&self) -> &DocPath {
        &self.path
    }
}

fn titles(docs: &[Doc]) -> Vec<&'static str> {
    docs.iter().map(|d| d.title).collect()
}

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sorted_rows(admin: &PermissionAdmin<MemoryStore>, user: Uuid) -> Vec<(String, PermissionLevel)> {
    let mut rows: Vec<(String, PermissionLevel)> = admin
        .permissions_for_user(user)
        .unwrap()
        .into_iter()
        .map(|p| (p.path.to_string(), p.level))
        .collect();
    rows.sort();
    rows
}

/// Mixed READ/DENY tree with a fail-closed default: unruled subtrees are
/// hidden, the DENY subtree is hidden, and the deeper READ exception under
/// the DENY stays visible.
#[test]
fn test_filter_with_default_deny() {
    init_logs();
    let admin = PermissionAdmin::new(Arc::new(MemoryStore::new()));
    let user = Uuid::new_v4();

    admin.grant_read(user, "Documents > Team A", None, None).unwrap();
    admin.grant_deny(user, "Documents > Team B", None).unwrap();
    admin
        .grant_read(user, "Documents > Team B > Personal", None, None)
        .unwrap();

    let perms = admin.permissions_for_user(user).unwrap();
    let candidates = vec![
        Doc::new("Documents > Team A > Minutes"),
        Doc::new("Documents > Team C > Report"),
        Doc::new("Documents > Team B > Notice"),
        Doc::new("Documents > Team B > Personal > Journal"),
    ];

    let allowed = filter_allowed(&perms, candidates, AccessDecision::Deny);
    assert_eq!(
        titles(&allowed),
        vec![
            "Documents > Team A > Minutes",
            "Documents > Team B > Personal > Journal",
        ]
    );
}

/// Same tree with a membership-backed default: the unruled Team C subtree
/// becomes visible, the explicit DENY still wins.
#[test]
fn test_filter_with_default_allow() {
    let admin = PermissionAdmin::new(Arc::new(MemoryStore::new()));
    let user = Uuid::new_v4();

    admin.grant_read(user, "Documents > Team A", None, None).unwrap();
    admin.grant_deny(user, "Documents > Team B", None).unwrap();
    admin
        .grant_read(user, "Documents > Team B > Personal", None, None)
        .unwrap();

    let perms = admin.permissions_for_user(user).unwrap();
    let candidates = vec![
        Doc::new("Documents > Team A > Minutes"),
        Doc::new("Documents > Team C > Report"),
        Doc::new("Documents > Team B > Notice"),
        Doc::new("Documents > Team B > Personal > Journal"),
    ];

    let allowed = filter_allowed(&perms, candidates, AccessDecision::Allow);
    assert_eq!(
        titles(&allowed),
        vec![
            "Documents > Team A > Minutes",
            "Documents > Team C > Report",
            "Documents > Team B > Personal > Journal",
        ]
    );
}

/// Broad READ grant collapses redundant READ descendants but keeps the DENY
/// exception carved out of the subtree.
#[test]
fn test_broad_read_grant_prunes_but_keeps_deny() {
    init_logs();
    let admin = PermissionAdmin::new(Arc::new(MemoryStore::new()));
    let user = Uuid::new_v4();

    admin.grant_read(user, "팀회의 > 2025", None, None).unwrap();
    admin.grant_read(user, "팀회의 > 2025 > 1월", None, None).unwrap();
    admin.grant_deny(user, "팀회의 > 2025 > 비밀", None).unwrap();

    admin.grant_read(user, "팀회의", None, None).unwrap();

    assert_eq!(
        sorted_rows(&admin, user),
        vec![
            ("팀회의".to_string(), PermissionLevel::Read),
            ("팀회의 > 2025 > 비밀".to_string(), PermissionLevel::Deny),
        ]
    );
}

/// DENY over an existing deeper READ leaves the exception in place, and
/// resolution honors most-specific-wins on both sides of the split.
#[test]
fn test_deny_grant_preserves_descendant_read_exception() {
    let admin = PermissionAdmin::new(Arc::new(MemoryStore::new()));
    let user = Uuid::new_v4();

    admin.grant_read(user, "업무일지 > 김종준", None, None).unwrap();
    admin.grant_deny(user, "업무일지", None).unwrap();

    assert_eq!(
        sorted_rows(&admin, user),
        vec![
            ("업무일지".to_string(), PermissionLevel::Deny),
            ("업무일지 > 김종준".to_string(), PermissionLevel::Read),
        ]
    );

    let perms = admin.permissions_for_user(user).unwrap();
    assert_eq!(
        docgate::resolve(
            &perms,
            &DocPath::parse("업무일지 > 김종준 > 2025").unwrap(),
            AccessDecision::Deny
        ),
        AccessDecision::Allow,
        "exception subtree stays readable"
    );
    assert_eq!(
        docgate::resolve(
            &perms,
            &DocPath::parse("업무일지 > 다른사람").unwrap(),
            AccessDecision::Deny
        ),
        AccessDecision::Deny,
        "sibling subtree hits the DENY"
    );
}

/// A racing duplicate insert at the store level surfaces as a conflict, not
/// a silent merge or a second row.
#[test]
fn test_store_conflict_surfaces_to_caller() {
    let store = Arc::new(MemoryStore::new());
    let admin = PermissionAdmin::new(store.clone());
    let user = Uuid::new_v4();

    admin.grant_read(user, "Documents", None, None).unwrap();

    // Simulate a racing writer that slipped past the no-op check
    let dup = docgate::NewPermission::deny(user, DocPath::parse("Documents").unwrap());
    let err = store.save(dup).unwrap_err();
    assert!(matches!(err, docgate::StoreError::Conflict { .. }));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_permissions_for_path_across_users() {
    let admin = PermissionAdmin::new(Arc::new(MemoryStore::new()));
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let charlie = Uuid::new_v4();

    admin.grant_read(alice, "Wiki > Infra", Some("INFRA"), None).unwrap();
    admin.grant_deny(bob, "Wiki > Infra", None).unwrap();
    admin.grant_read(charlie, "Wiki > Other", None, None).unwrap();

    let at_path = admin.permissions_for_path("Wiki > Infra").unwrap();
    assert_eq!(at_path.len(), 2);
    assert!(at_path.iter().all(|p| p.path.to_string() == "Wiki > Infra"));
}

#[test]
fn test_space_key_and_granted_by_are_carried_not_resolved() {
    let admin = PermissionAdmin::new(Arc::new(MemoryStore::new()));
    let user = Uuid::new_v4();
    let granter = Uuid::new_v4();

    let outcome = admin
        .grant_read(user, "Wiki > Infra", Some("INFRA"), Some(granter))
        .unwrap();
    assert_eq!(outcome.permission.space_key.as_deref(), Some("INFRA"));
    assert_eq!(outcome.permission.granted_by, Some(granter));

    // Bookkeeping fields never change the decision
    let perms = admin.permissions_for_user(user).unwrap();
    assert_eq!(
        docgate::resolve(
            &perms,
            &DocPath::parse("Wiki > Infra > Runbook").unwrap(),
            AccessDecision::Deny
        ),
        AccessDecision::Allow
    );
}

#[test]
fn test_bulk_deny_then_bulk_revoke_round_trip() {
    let admin = PermissionAdmin::new(Arc::new(MemoryStore::new()));
    let user = Uuid::new_v4();

    let granted = admin
        .grant_bulk_deny(user, &["Wiki > A", "Wiki > B", "Wiki > C"], None)
        .unwrap();
    assert_eq!(granted, 3);
    assert_eq!(admin.permissions_for_user(user).unwrap().len(), 3);

    let revoked = admin.revoke_bulk(user, &["Wiki > A", "Wiki > C"]).unwrap();
    assert_eq!(revoked, 2);
    assert_eq!(
        sorted_rows(&admin, user),
        vec![("Wiki > B".to_string(), PermissionLevel::Deny)]
    );
}

#[test]
fn test_permission_row_serializes_with_epoch_timestamp() {
    let admin = PermissionAdmin::new(Arc::new(MemoryStore::new()));
    let user = Uuid::new_v4();
    let outcome = admin.grant_read(user, "Wiki > Infra", None, None).unwrap();

    let json = serde_json::to_value(&outcome.permission).unwrap();
    assert_eq!(json["path"], "Wiki > Infra");
    assert_eq!(json["level"], "read");
    assert!(json["created_at"].is_i64(), "timestamp serializes as epoch seconds");
}
