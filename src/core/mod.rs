/*!
 * Core Module
 * Shared types, errors, limits, and path handling
 */

pub mod errors;
pub mod limits;
pub mod path;
pub mod types;

pub use errors::{PermissionError, PermissionResult, StoreError, StoreResult};
pub use path::DocPath;
pub use types::{PermissionId, UserId};
