/*!
 * Permissions Module
 * Hierarchical path-permission resolution, filtering, and administration
 *
 * This module is the single source of truth for per-user document access:
 * which READ/DENY grant applies to a candidate path, which search results a
 * user may see, and how the stored grant set stays minimal under mutation.
 *
 * ## Features
 * - Most-specific-wins resolution over segment-wise path prefixes
 * - Caller-supplied default policy (fail-closed or membership-backed)
 * - Order-preserving batch filtering with trie-backed resolution
 * - Grant/revoke administration with redundancy pruning
 * - Mutation audit trail
 *
 * ## Usage
 * ```ignore
 * use docgate::{AccessDecision, MemoryStore, PermissionAdmin};
 * use std::sync::Arc;
 *
 * let admin = PermissionAdmin::new(Arc::new(MemoryStore::new()));
 * admin.grant_read(user, "Documents > Team A", None, None)?;
 *
 * let perms = admin.permissions_for_user(user)?;
 * let visible = docgate::filter_allowed(&perms, candidates, AccessDecision::Deny);
 * ```
 */

pub mod admin;
pub mod audit;
pub mod filter;
pub mod resolver;
pub mod store;
pub mod traits;
pub mod types;

// Re-export commonly used items
pub use admin::{GrantOutcome, PermissionAdmin};
pub use audit::{AuditAction, AuditEvent, AuditLogger, AuditSeverity, AuditStats};
pub use filter::filter_allowed;
pub use resolver::{resolve, PermissionTrie};
pub use store::MemoryStore;
pub use traits::{PathSource, PermissionStore};
pub use types::{AccessDecision, DocPathPermission, NewPermission, PermissionLevel};
