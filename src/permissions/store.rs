/*!
 * In-Memory Permission Store
 * Concurrent map-backed store for tests and embedding
 */

use crate::core::errors::{StoreError, StoreResult};
use crate::core::limits::EXPECTED_PERMISSIONS_PER_USER;
use crate::core::path::DocPath;
use crate::core::types::{PermissionId, UserId};
use super::traits::PermissionStore;
use super::types::{DocPathPermission, NewPermission};
use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::SystemTime;
use uuid::Uuid;

/// In-memory store backed by concurrent maps.
///
/// Rows live in `rows` keyed by id; `index` maps each `(user, path)` identity
/// key to the row id and doubles as the uniqueness constraint: inserts go
/// through the index entry first, so a racing duplicate surfaces as
/// `StoreError::Conflict` rather than a silent double row.
pub struct MemoryStore {
    rows: DashMap<PermissionId, DocPathPermission, RandomState>,
    index: DashMap<(UserId, DocPath), PermissionId, RandomState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: DashMap::with_hasher(RandomState::new()),
            index: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Total rows stored, across users
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionStore for MemoryStore {
    fn find_by_user(&self, user_id: UserId) -> StoreResult<Vec<DocPathPermission>> {
        let mut rows = Vec::with_capacity(EXPECTED_PERMISSIONS_PER_USER);
        for entry in self.rows.iter() {
            if entry.user_id == user_id {
                rows.push(entry.value().clone());
            }
        }
        Ok(rows)
    }

    fn find_by_user_and_path(
        &self,
        user_id: UserId,
        path: &DocPath,
    ) -> StoreResult<Option<DocPathPermission>> {
        let id = match self.index.get(&(user_id, path.clone())) {
            Some(entry) => *entry.value(),
            None => return Ok(None),
        };
        Ok(self.rows.get(&id).map(|entry| entry.value().clone()))
    }

    fn find_by_path(&self, path: &DocPath) -> StoreResult<Vec<DocPathPermission>> {
        Ok(self
            .rows
            .iter()
            .filter(|entry| entry.path == *path)
            .map(|entry| entry.value().clone())
            .collect())
    }

    fn save(&self, permission: NewPermission) -> StoreResult<DocPathPermission> {
        let key = (permission.user_id, permission.path.clone());
        match self.index.entry(key) {
            Entry::Occupied(_) => Err(StoreError::Conflict {
                user_id: permission.user_id.to_string(),
                path: permission.path.to_string(),
            }),
            Entry::Vacant(vacant) => {
                let row = DocPathPermission {
                    id: Uuid::new_v4(),
                    user_id: permission.user_id,
                    path: permission.path,
                    level: permission.level,
                    space_key: permission.space_key,
                    granted_by: permission.granted_by,
                    created_at: SystemTime::now(),
                };
                vacant.insert(row.id);
                self.rows.insert(row.id, row.clone());
                Ok(row)
            }
        }
    }

    fn delete(&self, id: PermissionId) -> StoreResult<()> {
        if let Some((_, row)) = self.rows.remove(&id) {
            self.index.remove(&(row.user_id, row.path));
        }
        Ok(())
    }

    fn delete_by_user(&self, user_id: UserId) -> StoreResult<usize> {
        let ids: Vec<PermissionId> = self
            .rows
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.id)
            .collect();
        for id in &ids {
            self.delete(*id)?;
        }
        Ok(ids.len())
    }

    fn delete_by_user_and_paths(&self, user_id: UserId, paths: &[DocPath]) -> StoreResult<usize> {
        let mut removed = 0;
        for path in paths {
            if let Some((_, id)) = self.index.remove(&(user_id, path.clone())) {
                self.rows.remove(&id);
                removed += 1;
            }
        }
        Ok(removed)
    }
}
