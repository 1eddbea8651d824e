mod common;

use std::collections::HashSet;

use userbase::models::RoleSelection;
use userbase::store::UserStore;
use userbase::CachedResolver;

// ── Permission cache ────────────────────────────────────────────

#[tokio::test]
async fn role_keys_are_served_from_cache() {
    let t = common::service();
    let admin = t.seed_role("Admin", "system:admin", false, false);
    let user = t
        .create_user("alice", "secret123", RoleSelection::Replace(vec![admin]))
        .await;

    let resolver = CachedResolver::new(t.service);
    let first = resolver.role_keys(user.id).await.unwrap();
    assert_eq!(*first, HashSet::from(["system:admin".to_string()]));

    // Mutate links behind the cache's back; the stale entry survives.
    t.store.replace_role_links(user.id, &[]).await.unwrap();
    let cached = resolver.role_keys(user.id).await.unwrap();
    assert_eq!(*cached, HashSet::from(["system:admin".to_string()]));

    // Explicit invalidation picks up the new state.
    resolver.invalidate(user.id);
    let fresh = resolver.role_keys(user.id).await.unwrap();
    assert!(fresh.is_empty());
}

#[tokio::test]
async fn relink_through_resolver_invalidates() {
    let t = common::service();
    let admin = t.seed_role("Admin", "system:admin", false, false);
    let editor = t.seed_role("Editor", "content:edit", false, false);
    let user = t
        .create_user("alice", "secret123", RoleSelection::Replace(vec![admin]))
        .await;

    let resolver = CachedResolver::new(t.service);
    assert_eq!(
        *resolver.role_keys(user.id).await.unwrap(),
        HashSet::from(["system:admin".to_string()])
    );

    resolver
        .rebuild_role_links(user.id, RoleSelection::Replace(vec![editor]))
        .await
        .unwrap();

    assert_eq!(
        *resolver.role_keys(user.id).await.unwrap(),
        HashSet::from(["content:edit".to_string()])
    );
}

#[tokio::test]
async fn unchanged_relink_keeps_cache_warm() {
    let t = common::service();
    let admin = t.seed_role("Admin", "system:admin", false, false);
    let user = t
        .create_user("alice", "secret123", RoleSelection::Replace(vec![admin]))
        .await;

    let resolver = CachedResolver::new(t.service);
    let first = resolver.role_keys(user.id).await.unwrap();

    // A no-op selection must not drop the entry.
    t.store.replace_role_links(user.id, &[]).await.unwrap();
    resolver
        .rebuild_role_links(user.id, RoleSelection::Unchanged)
        .await
        .unwrap();

    assert_eq!(*resolver.role_keys(user.id).await.unwrap(), *first);
}

#[tokio::test]
async fn menu_permissions_cache_and_invalidate() {
    let t = common::service();
    let user = t.create_user("alice", "secret123", RoleSelection::Unchanged).await;
    t.store
        .set_menu_perms(user.id, vec!["system:user:list".to_string()]);

    let resolver = CachedResolver::new(t.service);
    assert_eq!(
        *resolver.menu_permissions(user.id).await.unwrap(),
        HashSet::from(["system:user:list".to_string()])
    );

    t.store.set_menu_perms(user.id, vec![]);
    // Stale until invalidated.
    assert!(!resolver.menu_permissions(user.id).await.unwrap().is_empty());
    resolver.invalidate(user.id);
    assert!(resolver.menu_permissions(user.id).await.unwrap().is_empty());
}
