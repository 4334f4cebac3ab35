/*!
 * Core Types
 * Common identifier types used across the engine
 */

use uuid::Uuid;

/// User identifier type
///
/// Opaque reference to a user entity owned by the membership subsystem;
/// the engine never dereferences it.
pub type UserId = Uuid;

/// Permission row identifier, assigned by the store on save
pub type PermissionId = Uuid;

/// Opaque space tag carried for bookkeeping/display only
pub type SpaceKey = String;
