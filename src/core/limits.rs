/*!
 * Engine Limits
 * Centralized capacity constants
 */

/// Maximum audit events kept in the global ring buffer
pub const MAX_AUDIT_EVENTS: usize = 10_000;

/// Maximum audit events kept per user
pub const MAX_AUDIT_EVENTS_PER_USER: usize = 256;

/// Capacity hint for a single user's permission set (expected tens to low
/// hundreds of rows)
pub const EXPECTED_PERMISSIONS_PER_USER: usize = 64;
