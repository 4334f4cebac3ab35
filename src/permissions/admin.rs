/*!
 * Permission Administration
 * Grant/revoke workflows with redundancy pruning
 */

use crate::core::errors::PermissionResult;
use crate::core::path::DocPath;
use crate::core::types::UserId;
use super::audit::{AuditAction, AuditEvent, AuditLogger, AuditStats};
use super::traits::PermissionStore;
use super::types::{DocPathPermission, NewPermission, PermissionLevel};
use ahash::RandomState;
use dashmap::DashMap;
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::Arc;

/// Result of a single grant
#[derive(Debug, Clone)]
pub struct GrantOutcome {
    /// The row now covering the requested path
    pub permission: DocPathPermission,
    /// False when an exact row already existed and nothing was written
    pub created: bool,
    /// Redundant READ descendants removed by this grant
    pub pruned: usize,
}

impl GrantOutcome {
    fn unchanged(permission: DocPathPermission) -> Self {
        Self {
            permission,
            created: false,
            pruned: 0,
        }
    }
}

/// Central administrator for a user's permission set.
///
/// All mutations follow read-modify-write against the store and are
/// serialized per user through a lock map, so two grants for the same user
/// cannot interleave and lose updates. Resolution and filtering are pure and
/// never go through this type.
pub struct PermissionAdmin<S> {
    store: Arc<S>,
    audit: Arc<AuditLogger>,
    user_locks: DashMap<UserId, Arc<Mutex<()>>, RandomState>,
}

impl<S: PermissionStore> PermissionAdmin<S> {
    /// Create new administrator over a storage port
    pub fn new(store: Arc<S>) -> Self {
        debug!("Initializing permission administrator");
        Self {
            store,
            audit: Arc::new(AuditLogger::new()),
            user_locks: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Get audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Get audit statistics
    pub fn audit_stats(&self) -> AuditStats {
        self.audit.stats()
    }

    /// All stored rows for a user
    pub fn permissions_for_user(&self, user_id: UserId) -> PermissionResult<Vec<DocPathPermission>> {
        Ok(self.store.find_by_user(user_id)?)
    }

    /// All rows at an exact path, across users (administration/display)
    pub fn permissions_for_path(&self, path: &str) -> PermissionResult<Vec<DocPathPermission>> {
        let path = DocPath::parse(path)?;
        Ok(self.store.find_by_path(&path)?)
    }

    /// Grant READ at `path`, pruning now-redundant READ descendants.
    ///
    /// An exact `(user, path)` row of either level makes this a no-op
    /// returning the existing row. DENY descendants survive as explicit
    /// exceptions under the new broader grant.
    pub fn grant_read(
        &self,
        user_id: UserId,
        path: &str,
        space_key: Option<&str>,
        granted_by: Option<UserId>,
    ) -> PermissionResult<GrantOutcome> {
        let path = DocPath::parse(path)?;
        let lock = self.user_lock(user_id);
        let _guard = lock.lock();

        if let Some(existing) = self.store.find_by_user_and_path(user_id, &path)? {
            debug!("READ grant for user {user_id} at '{path}' is a no-op, row exists");
            return Ok(GrantOutcome::unchanged(existing));
        }

        let mut new = NewPermission::read(user_id, path.clone());
        if let Some(space_key) = space_key {
            new = new.with_space_key(space_key);
        }
        if let Some(granted_by) = granted_by {
            new = new.with_granted_by(granted_by);
        }
        let saved = self.store.save(new)?;
        self.audit
            .log(AuditEvent::new(user_id, AuditAction::GrantRead, Some(path.clone())));

        // The new ancestor grant covers every READ descendant; DENY rows stay
        // as carved-out exceptions.
        let mut pruned = 0;
        for perm in self.store.find_by_user(user_id)? {
            if perm.level == PermissionLevel::Read && path.is_strict_ancestor_of(&perm.path) {
                self.store.delete(perm.id)?;
                self.audit
                    .log(AuditEvent::new(user_id, AuditAction::Prune, Some(perm.path)));
                pruned += 1;
            }
        }

        info!("Granted READ to user {user_id} at '{path}', pruned {pruned} redundant rows");
        Ok(GrantOutcome {
            permission: saved,
            created: true,
            pruned,
        })
    }

    /// Grant DENY at `path`.
    ///
    /// An exact READ row at the same path is deleted and replaced; no
    /// descendant is ever pruned, so deeper READ rows keep overriding the
    /// new DENY under most-specific-wins.
    pub fn grant_deny(
        &self,
        user_id: UserId,
        path: &str,
        granted_by: Option<UserId>,
    ) -> PermissionResult<GrantOutcome> {
        let path = DocPath::parse(path)?;
        let lock = self.user_lock(user_id);
        let _guard = lock.lock();

        if let Some(existing) = self.store.find_by_user_and_path(user_id, &path)? {
            if existing.level == PermissionLevel::Deny {
                debug!("DENY grant for user {user_id} at '{path}' is a no-op, row exists");
                return Ok(GrantOutcome::unchanged(existing));
            }
            // Level change is delete+insert, never in-place mutation
            self.store.delete(existing.id)?;
            self.audit.log(AuditEvent::new(
                user_id,
                AuditAction::ReplaceLevel,
                Some(path.clone()),
            ));
        }

        let mut new = NewPermission::deny(user_id, path.clone());
        if let Some(granted_by) = granted_by {
            new = new.with_granted_by(granted_by);
        }
        let saved = self.store.save(new)?;
        self.audit
            .log(AuditEvent::new(user_id, AuditAction::GrantDeny, Some(path.clone())));

        info!("Granted DENY to user {user_id} at '{path}'");
        Ok(GrantOutcome {
            permission: saved,
            created: true,
            pruned: 0,
        })
    }

    /// Delete every row for a user; no-op when none exist.
    /// Returns the number of rows removed.
    pub fn revoke_all(&self, user_id: UserId) -> PermissionResult<usize> {
        let lock = self.user_lock(user_id);
        let _guard = lock.lock();

        let removed = self.store.delete_by_user(user_id)?;
        self.audit
            .log(AuditEvent::new(user_id, AuditAction::RevokeAll, None));
        info!("Revoked all permissions for user {user_id} ({removed} rows)");
        Ok(removed)
    }

    /// Delete rows whose path exactly matches any entry in `paths`.
    ///
    /// Reports the count of paths requested; deletion is idempotent per path
    /// and absent rows do not reduce the count. Empty input performs no
    /// storage call.
    pub fn revoke_bulk(&self, user_id: UserId, paths: &[&str]) -> PermissionResult<usize> {
        if paths.is_empty() {
            return Ok(0);
        }

        let parsed = paths
            .iter()
            .map(|raw| DocPath::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let lock = self.user_lock(user_id);
        let _guard = lock.lock();

        let removed = self.store.delete_by_user_and_paths(user_id, &parsed)?;
        for path in parsed {
            self.audit
                .log(AuditEvent::new(user_id, AuditAction::RevokeBulk, Some(path)));
        }
        info!(
            "Bulk revoke for user {user_id}: {} paths requested, {removed} rows removed",
            paths.len()
        );
        Ok(paths.len())
    }

    /// Apply `grant_read` once per path; reports paths processed.
    ///
    /// Each grant re-reads the permission set fresh, so one path's pruning
    /// never operates on a stale snapshot from another path in the batch.
    pub fn grant_bulk_read(
        &self,
        user_id: UserId,
        paths: &[&str],
        space_key: Option<&str>,
        granted_by: Option<UserId>,
    ) -> PermissionResult<usize> {
        for path in paths {
            self.grant_read(user_id, path, space_key, granted_by)?;
        }
        Ok(paths.len())
    }

    /// Apply `grant_deny` once per path; reports paths processed.
    pub fn grant_bulk_deny(
        &self,
        user_id: UserId,
        paths: &[&str],
        granted_by: Option<UserId>,
    ) -> PermissionResult<usize> {
        for path in paths {
            self.grant_deny(user_id, path, granted_by)?;
        }
        Ok(paths.len())
    }

    fn user_lock(&self, user_id: UserId) -> Arc<Mutex<()>> {
        self.user_locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
