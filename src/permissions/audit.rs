/*!
 * Permission Audit Trail
 * Tracks grant/revoke mutations for security monitoring
 */

use crate::core::limits::{MAX_AUDIT_EVENTS, MAX_AUDIT_EVENTS_PER_USER as MAX_USER_EVENTS};
use crate::core::path::DocPath;
use crate::core::types::UserId;
use ahash::RandomState;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::SystemTime;

/// Audit event severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
    Info,
    Warning,
}

/// Mutation performed by the administration layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    GrantRead,
    GrantDeny,
    /// READ row deleted and replaced by a DENY row at the same path
    ReplaceLevel,
    /// Redundant READ descendant removed by a broader READ grant
    Prune,
    RevokeAll,
    RevokeBulk,
}

/// Permission mutation audit event
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuditEvent {
    pub user_id: UserId,
    pub action: AuditAction,
    /// Path the mutation touched; absent for whole-user revokes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<DocPath>,
    pub severity: AuditSeverity,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub logged_at: SystemTime,
}

impl AuditEvent {
    pub fn new(user_id: UserId, action: AuditAction, path: Option<DocPath>) -> Self {
        // Mutations that remove access are more notable than widening grants
        let severity = match action {
            AuditAction::GrantRead | AuditAction::Prune => AuditSeverity::Info,
            AuditAction::GrantDeny
            | AuditAction::ReplaceLevel
            | AuditAction::RevokeAll
            | AuditAction::RevokeBulk => AuditSeverity::Warning,
        };

        Self {
            user_id,
            action,
            path,
            severity,
            logged_at: SystemTime::now(),
        }
    }
}

/// Audit logger for permission mutations
pub struct AuditLogger {
    /// Global event log (ring buffer)
    events: parking_lot::RwLock<VecDeque<AuditEvent>>,
    /// Per-user event logs
    user_events: Arc<DashMap<UserId, VecDeque<AuditEvent>, RandomState>>,
    /// Mutation counters for monitoring
    mutation_counts: Arc<DashMap<UserId, u64, RandomState>>,
}

impl AuditLogger {
    pub fn new() -> Self {
        Self {
            events: parking_lot::RwLock::new(VecDeque::with_capacity(MAX_AUDIT_EVENTS)),
            user_events: Arc::new(DashMap::with_hasher(RandomState::new())),
            mutation_counts: Arc::new(DashMap::with_hasher(RandomState::new())),
        }
    }

    /// Log a mutation
    pub fn log(&self, event: AuditEvent) {
        let user_id = event.user_id;

        // Add to global log
        {
            let mut events = self.events.write();
            if events.len() >= MAX_AUDIT_EVENTS {
                events.pop_front();
            }
            events.push_back(event.clone());
        }

        // Add to user-specific log
        self.user_events
            .entry(user_id)
            .or_insert_with(|| VecDeque::with_capacity(MAX_USER_EVENTS))
            .push_back(event);

        // Trim user log if needed
        if let Some(mut entry) = self.user_events.get_mut(&user_id) {
            if entry.len() > MAX_USER_EVENTS {
                entry.pop_front();
            }
        }

        self.mutation_counts
            .entry(user_id)
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    /// Get recent events
    pub fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        let events = self.events.read();
        events.iter().rev().take(limit).cloned().collect()
    }

    /// Get events for a specific user
    pub fn for_user(&self, user_id: UserId, limit: usize) -> Vec<AuditEvent> {
        if let Some(entry) = self.user_events.get(&user_id) {
            entry.iter().rev().take(limit).cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Get mutation count for a user
    pub fn mutation_count(&self, user_id: UserId) -> u64 {
        self.mutation_counts.get(&user_id).map(|e| *e).unwrap_or(0)
    }

    /// Clear logs for a user
    pub fn clear_user(&self, user_id: UserId) {
        self.user_events.remove(&user_id);
        self.mutation_counts.remove(&user_id);
    }

    /// Clear all logs
    pub fn clear_all(&self) {
        self.events.write().clear();
        self.user_events.clear();
        self.mutation_counts.clear();
    }

    /// Get statistics
    pub fn stats(&self) -> AuditStats {
        let total_events = self.events.read().len();
        let total_mutations: u64 = self.mutation_counts.iter().map(|e| *e.value()).sum();
        let users_tracked = self.user_events.len();

        AuditStats {
            total_events,
            total_mutations,
            users_tracked,
        }
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Audit statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditStats {
    pub total_events: usize,
    pub total_mutations: u64,
    pub users_tracked: usize,
}
