/*!
 * Docgate Library
 * Hierarchical document-path access control exposed as a library
 */

pub mod core;
pub mod permissions;

// Re-exports
pub use crate::core::errors::{PermissionError, PermissionResult, StoreError, StoreResult};
pub use crate::core::path::DocPath;
pub use crate::core::types::{PermissionId, SpaceKey, UserId};
pub use crate::permissions::{
    filter_allowed, resolve, AccessDecision, AuditAction, AuditEvent, AuditLogger, AuditSeverity,
    AuditStats, DocPathPermission, GrantOutcome, MemoryStore, NewPermission, PathSource,
    PermissionAdmin, PermissionLevel, PermissionStore, PermissionTrie,
};
