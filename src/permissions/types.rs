/*!
 * Permission Types
 * Core types for the path-permission data model
 */

use crate::core::path::DocPath;
use crate::core::types::{PermissionId, SpaceKey, UserId};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::time::SystemTime;

/// Permission level attached to a stored grant
///
/// Two states only; a level change is always a delete+insert at the
/// administration layer, never an in-place mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionLevel {
    Read,
    Deny,
}

/// Resolution outcome for a candidate path
///
/// Also the type of the caller-supplied default policy: callers with no
/// membership context pass `Deny` (fail closed); callers that have already
/// verified knowledge-base membership pass `Allow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Allow,
    Deny,
}

impl AccessDecision {
    /// Check if allowed
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

impl From<PermissionLevel> for AccessDecision {
    fn from(level: PermissionLevel) -> Self {
        match level {
            PermissionLevel::Read => AccessDecision::Allow,
            PermissionLevel::Deny => AccessDecision::Deny,
        }
    }
}

/// A stored per-user path permission row
///
/// Identity key: `(user_id, path)` — the store enforces uniqueness.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DocPathPermission {
    /// Row identifier, assigned by the store
    pub id: PermissionId,
    /// Owning user (foreign reference)
    pub user_id: UserId,
    /// Document path this rule covers, including all descendants
    pub path: DocPath,
    /// READ or DENY
    pub level: PermissionLevel,
    /// Opaque tag for bookkeeping/display; never consulted by resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_key: Option<SpaceKey>,
    /// Granting actor, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted_by: Option<UserId>,
    /// When the row was created
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub created_at: SystemTime,
}

/// An unsaved permission; the store assigns `id` and `created_at` on save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NewPermission {
    pub user_id: UserId,
    pub path: DocPath,
    pub level: PermissionLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_key: Option<SpaceKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granted_by: Option<UserId>,
}

impl NewPermission {
    /// New READ grant
    pub fn read(user_id: UserId, path: DocPath) -> Self {
        Self {
            user_id,
            path,
            level: PermissionLevel::Read,
            space_key: None,
            granted_by: None,
        }
    }

    /// New DENY grant
    pub fn deny(user_id: UserId, path: DocPath) -> Self {
        Self {
            user_id,
            path,
            level: PermissionLevel::Deny,
            space_key: None,
            granted_by: None,
        }
    }

    /// Attach a space tag
    pub fn with_space_key(mut self, space_key: impl Into<SpaceKey>) -> Self {
        self.space_key = Some(space_key.into());
        self
    }

    /// Record the granting actor
    pub fn with_granted_by(mut self, granted_by: UserId) -> Self {
        self.granted_by = Some(granted_by);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_level_to_decision() {
        assert_eq!(
            AccessDecision::from(PermissionLevel::Read),
            AccessDecision::Allow
        );
        assert_eq!(
            AccessDecision::from(PermissionLevel::Deny),
            AccessDecision::Deny
        );
    }

    #[test]
    fn test_new_permission_builders() {
        let user = Uuid::new_v4();
        let admin = Uuid::new_v4();
        let path = DocPath::parse("Documents > Team A").unwrap();

        let perm = NewPermission::read(user, path)
            .with_space_key("TEAM")
            .with_granted_by(admin);
        assert_eq!(perm.level, PermissionLevel::Read);
        assert_eq!(perm.space_key.as_deref(), Some("TEAM"));
        assert_eq!(perm.granted_by, Some(admin));
    }
}
