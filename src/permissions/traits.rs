/*!
 * Permission Traits
 * Storage port and candidate-document seam
 */

use crate::core::errors::StoreResult;
use crate::core::path::DocPath;
use crate::core::types::{PermissionId, UserId};
use super::types::{DocPathPermission, NewPermission};

/// Durable keyed storage for permission rows
///
/// The engine's only boundary. Any backing (SQL table, key-value store,
/// in-memory map for tests) can satisfy it, as long as `save` enforces the
/// `(user_id, path)` uniqueness constraint.
pub trait PermissionStore: Send + Sync {
    /// All rows for a user
    fn find_by_user(&self, user_id: UserId) -> StoreResult<Vec<DocPathPermission>>;

    /// Exact `(user, path)` row, if any
    fn find_by_user_and_path(
        &self,
        user_id: UserId,
        path: &DocPath,
    ) -> StoreResult<Option<DocPathPermission>>;

    /// All rows at an exact path, across users
    fn find_by_path(&self, path: &DocPath) -> StoreResult<Vec<DocPathPermission>>;

    /// Persist a new row, assigning id and creation time
    ///
    /// Returns `StoreError::Conflict` when a `(user, path)` row already
    /// exists.
    fn save(&self, permission: NewPermission) -> StoreResult<DocPathPermission>;

    /// Delete one row by id; deleting an absent row is a no-op
    fn delete(&self, id: PermissionId) -> StoreResult<()>;

    /// Delete all rows for a user, returning the number removed
    fn delete_by_user(&self, user_id: UserId) -> StoreResult<usize>;

    /// Delete rows for a user whose path exactly matches any of `paths`,
    /// returning the number removed
    fn delete_by_user_and_paths(&self, user_id: UserId, paths: &[DocPath]) -> StoreResult<usize>;
}

/// Candidate document exposing its content-tree path
///
/// Implemented by whatever the search/ranking subsystem hands over for
/// filtering; the engine only ever looks at the path.
pub trait PathSource {
    fn doc_path(&self) -> &DocPath;
}

impl PathSource for DocPath {
    fn doc_path(&self) -> &DocPath {
        self
    }
}

impl<T: PathSource> PathSource for &T {
    fn doc_path(&self) -> &DocPath {
        (*self).doc_path()
    }
}
