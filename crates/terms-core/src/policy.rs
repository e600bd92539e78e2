//! Conflict resolution.
//!
//! A conflict is a candidate question/answer that already exists, or a
//! category that does not exist yet. The session-wide [`ConflictPolicy`]
//! decides what happens to such a candidate.

use serde::{Deserialize, Serialize};

/// How conflicting candidates are handled for the whole session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
  /// Ask the user to confirm each conflicting value.
  #[default]
  Ask,
  /// Silently drop the entry being collected.
  Skip,
  /// Accept conflicting values without asking.
  Add,
}

/// Outcome of [`decide`] for a single candidate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
  Accept,
  Reject,
  /// The user must confirm; see [`is_affirmative`].
  Confirm,
  /// Nothing was entered. Not a conflict outcome: the caller restarts the
  /// current entry.
  Empty,
}

pub fn decide(conflict: bool, candidate: &str, policy: ConflictPolicy) -> Decision {
  if candidate.is_empty() {
    return Decision::Empty;
  }
  match (policy, conflict) {
    (ConflictPolicy::Add, _) | (_, false) => Decision::Accept,
    (ConflictPolicy::Skip, true) => Decision::Reject,
    (ConflictPolicy::Ask, true) => Decision::Confirm,
  }
}

/// Whether a confirmation reply means "yes".
pub fn is_affirmative(reply: &str) -> bool {
  matches!(reply.trim().to_lowercase().as_str(), "y" | "yes")
}
