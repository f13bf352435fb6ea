//! Completeness scoring and conflict resolution
//!
//! When two reports with the same dedupe key disagree on content, the
//! winner is chosen by a total order so the outcome is deterministic
//! under any arrival order:
//!
//! 1. a currently VALID event beats any other status
//! 2. higher completeness score wins
//! 3. tie: the incoming event wins (last write wins)

use crate::types::{CanonicalEvent, EventStatus};

/// Which side of a conflict keeps the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winner {
    /// The stored event stays; the incoming report is ignored
    Existing,
    /// The incoming report supersedes the stored event
    Incoming,
}

/// Count populated informative fields
///
/// Strings count only when non-empty, mirroring how the upstream
/// payloads distinguish a missing field from a blank one.
pub fn completeness_score(event: &CanonicalEvent) -> u8 {
    let mut score = 0;

    if !event.account_id.is_empty() {
        score += 1;
    }
    score += 1; // timestamp is always present on a canonical event

    if event.amount.is_some() {
        score += 1;
    }
    if event.currency.as_deref().is_some_and(|c| !c.is_empty()) {
        score += 1;
    }
    if event.asset.as_deref().is_some_and(|a| !a.is_empty()) {
        score += 1;
    }
    if event.fiat_value.is_some() {
        score += 1;
    }
    score += 1; // event type is always present

    if event.description.as_deref().is_some_and(|d| !d.is_empty()) {
        score += 1;
    }

    score
}

/// Resolve a conflict between the stored event and an incoming report
/// with the same dedupe key but different content.
///
/// The status criterion is decisive whenever the two statuses differ,
/// so an INCOMPLETE report never defeats a VALID slot regardless of
/// its raw score.
pub fn resolve_conflict(existing: &CanonicalEvent, incoming: &CanonicalEvent) -> Winner {
    if existing.status != incoming.status {
        if existing.status == EventStatus::Valid {
            return Winner::Existing;
        }
        if incoming.status == EventStatus::Valid {
            return Winner::Incoming;
        }
    }

    let existing_score = completeness_score(existing);
    let incoming_score = completeness_score(incoming);
    if existing_score != incoming_score {
        return if existing_score > incoming_score {
            Winner::Existing
        } else {
            Winner::Incoming
        };
    }

    Winner::Incoming
}
