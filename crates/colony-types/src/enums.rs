//! Enumeration types for the colony controller.
//!
//! All host-facing constants are closed enumerations rather than loose
//! string or integer codes, so the error classifier and the role table
//! stay exhaustive under compiler checking.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Body parts
// ---------------------------------------------------------------------------

/// A capability token in an agent's build configuration.
///
/// The ordered sequence of parts requested at spawn time determines what
/// the created agent can do and what it costs the colony's energy stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    /// Locomotion. More move parts mean faster travel.
    Move,
    /// Cargo capacity. Each carry part adds [`BodyPart::CARRY_CAPACITY`]
    /// units of storage.
    Carry,
    /// Labor. Required for gathering from resource nodes.
    Work,
}

impl BodyPart {
    /// Storage units granted by a single carry part.
    pub const CARRY_CAPACITY: u32 = 50;

    /// Energy cost of this part when a facility materializes it.
    pub const fn cost(self) -> u32 {
        match self {
            Self::Move | Self::Carry => 50,
            Self::Work => 100,
        }
    }
}

/// Total energy cost of a build configuration.
pub fn build_cost(parts: &[BodyPart]) -> u32 {
    parts
        .iter()
        .fold(0_u32, |acc, part| acc.saturating_add(part.cost()))
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Task-matching tag assigned to an agent at creation time.
///
/// Drawn from a small fixed catalog; the catalog currently holds a single
/// generic worker archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// General-purpose worker: moves, carries, and gathers.
    BasicWorker,
}

impl Role {
    /// The fixed build configuration for this role.
    pub const fn build_config(self) -> &'static [BodyPart] {
        match self {
            Self::BasicWorker => &[
                BodyPart::Move,
                BodyPart::Move,
                BodyPart::Carry,
                BodyPart::Work,
            ],
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BasicWorker => write!(f, "basicWorker"),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome codes
// ---------------------------------------------------------------------------

/// Host-reported outcome of a requested action.
///
/// The known rejection reasons form a closed set; anything the host reports
/// outside that set arrives as [`ReturnCode::Other`] with the raw code
/// preserved for diagnostics. No outcome is ever fatal to an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReturnCode {
    /// The operation was scheduled successfully.
    Ok,
    /// The requesting colony does not own the target entity.
    NotOwner,
    /// An agent with the requested name already exists.
    NameExists,
    /// The facility is already producing another agent.
    Busy,
    /// The colony stores cannot cover the request.
    NotEnoughResources,
    /// The request was malformed (empty build, missing name).
    InvalidArgs,
    /// The colony's authority level is too low for this facility.
    AuthorityTooLow,
    /// An outcome outside the known table, with the raw host code.
    Other(i8),
}

impl ReturnCode {
    /// Whether this outcome reports success.
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_worker_build_is_nonempty() {
        assert!(!Role::BasicWorker.build_config().is_empty());
    }

    #[test]
    fn basic_worker_build_cost() {
        // 2 move + 1 carry at 50 each, 1 work at 100.
        assert_eq!(build_cost(Role::BasicWorker.build_config()), 250);
    }

    #[test]
    fn role_serializes_camel_case() {
        let json = serde_json::to_string(&Role::BasicWorker).ok();
        assert_eq!(json.as_deref(), Some("\"basicWorker\""));
    }

    #[test]
    fn only_ok_is_ok() {
        assert!(ReturnCode::Ok.is_ok());
        assert!(!ReturnCode::Busy.is_ok());
        assert!(!ReturnCode::Other(-42).is_ok());
    }

    #[test]
    fn other_preserves_raw_code() {
        assert_eq!(ReturnCode::Other(-9), ReturnCode::Other(-9));
        assert_ne!(ReturnCode::Other(-9), ReturnCode::Other(-12));
    }
}
