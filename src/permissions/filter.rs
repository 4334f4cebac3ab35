/*!
 * Result Filter
 * Order-preserving access filtering over candidate documents
 */

use super::resolver::PermissionTrie;
use super::traits::PathSource;
use super::types::{AccessDecision, DocPathPermission};
use log::debug;

/// Keep the candidates the user may read, preserving relative order.
///
/// Builds the trie once and resolves each candidate in O(depth). An empty
/// candidate list returns immediately without touching the permission set.
pub fn filter_allowed<T: PathSource>(
    permissions: &[DocPathPermission],
    candidates: Vec<T>,
    default: AccessDecision,
) -> Vec<T> {
    if candidates.is_empty() {
        return candidates;
    }

    let trie = PermissionTrie::build(permissions);
    let before = candidates.len();
    let allowed: Vec<T> = candidates
        .into_iter()
        .filter(|candidate| trie.resolve(candidate.doc_path(), default).is_allowed())
        .collect();

    debug!(
        "Filtered {} of {} candidates (default {:?})",
        allowed.len(),
        before,
        default
    );
    allowed
}
