/*!
 * Permission Resolver
 * Pure access decisions over a user's permission set
 */

use crate::core::path::DocPath;
use super::types::{AccessDecision, DocPathPermission, PermissionLevel};
use ahash::RandomState;
use log::debug;
use std::collections::HashMap;

/// Decide access for one candidate path.
///
/// Among the rules whose path is ancestor-or-self of `candidate`, the deepest
/// (most specific) one wins; with no applicable rule the caller-supplied
/// `default` applies. Ties are impossible: no two rules share a path for a
/// user, and ancestor chains have strictly increasing depth.
pub fn resolve(
    permissions: &[DocPathPermission],
    candidate: &DocPath,
    default: AccessDecision,
) -> AccessDecision {
    let decision = permissions
        .iter()
        .filter(|perm| perm.path.is_ancestor_or_self(candidate))
        .max_by_key(|perm| perm.path.depth())
        .map(|perm| AccessDecision::from(perm.level))
        .unwrap_or(default);

    debug!("Resolved '{}' -> {:?}", candidate, decision);
    decision
}

#[derive(Default)]
struct TrieNode {
    children: HashMap<String, TrieNode, RandomState>,
    level: Option<PermissionLevel>,
}

/// Segment-keyed trie over a permission set.
///
/// Built once per batch; each candidate then resolves in O(depth) by walking
/// its segments and keeping the deepest level encountered, which is exactly
/// the most-specific-wins rule of [`resolve`].
pub struct PermissionTrie {
    root: TrieNode,
}

impl PermissionTrie {
    /// Build from a user's full permission set
    pub fn build(permissions: &[DocPathPermission]) -> Self {
        let mut root = TrieNode::default();
        for perm in permissions {
            let mut node = &mut root;
            for segment in perm.path.segments() {
                node = node.children.entry(segment.clone()).or_default();
            }
            node.level = Some(perm.level);
        }
        Self { root }
    }

    /// Decide access for one candidate path
    pub fn resolve(&self, candidate: &DocPath, default: AccessDecision) -> AccessDecision {
        let mut node = &self.root;
        let mut deepest: Option<PermissionLevel> = None;

        for segment in candidate.segments() {
            match node.children.get(segment) {
                Some(child) => {
                    node = child;
                    if let Some(level) = node.level {
                        deepest = Some(level);
                    }
                }
                None => break,
            }
        }

        deepest.map(AccessDecision::from).unwrap_or(default)
    }
}
