//! The compatibility patch installer.
//!
//! One operation: [`install`] inspects a [`HostProbe`] and returns a
//! [`CompatLayer`] describing what this crate supplies on top of the host:
//!
//! - `FullPatch`: the host lacks the assertion set, so the layer provides
//!   every assertion (see [`crate::assert::CompatAssertions`]) and the
//!   group-hook suite runner (see [`crate::suite::Suite`]).
//! - `RegexAliases`: the host already has everything, but the regex
//!   assertions live under older names; the layer records the
//!   canonical-to-legacy mapping and changes no behavior.
//! - `NoOp`: the host is complete; the layer changes nothing.
//!
//! Installing on a host generation at or above
//! [`MAX_SUPPORTED_GENERATION`] is a programming/environment error and
//! panics immediately: such hosts ship the operations natively and must not
//! be patched by accident.

use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::capability::{Capability, CapabilityStatus, HostProbe};

/// First host generation with native support, where installing is refused.
pub const MAX_SUPPORTED_GENERATION: u32 = 3;

// =============================================================================
// Install Outcome
// =============================================================================

/// Which branch the installer took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallOutcome {
    /// Full assertion set and group-hook runner supplied by the layer.
    FullPatch,
    /// Canonical regex assertion names aliased onto legacy host names.
    RegexAliases,
    /// Host already complete; nothing installed.
    NoOp,
}

/// Post-install status of one operation, as seen through the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchStatus {
    /// Host-native; the layer passes through.
    Native,
    /// Supplied by this crate.
    Patched,
    /// Canonical name resolves to this legacy host name.
    Aliased(&'static str),
}

// =============================================================================
// Compat Layer
// =============================================================================

/// Result of a successful install: the per-operation status table plus the
/// alias map for legacy-named host operations.
#[derive(Debug)]
pub struct CompatLayer {
    outcome: InstallOutcome,
    table: HashMap<Capability, PatchStatus>,
    aliases: HashMap<&'static str, &'static str>,
}

impl CompatLayer {
    /// The branch the installer took.
    #[must_use]
    pub const fn outcome(&self) -> InstallOutcome {
        self.outcome
    }

    /// Post-install status for one operation.
    #[must_use]
    pub fn status(&self, cap: Capability) -> PatchStatus {
        self.table.get(&cap).copied().unwrap_or(PatchStatus::Native)
    }

    /// Resolve a canonical operation name to the host's legacy name, if the
    /// install recorded an alias for it.
    #[must_use]
    pub fn resolve_alias(&self, canonical: &str) -> Option<&'static str> {
        self.aliases.get(canonical).copied()
    }

    /// Whether the layer supplies the group-hook suite runner.
    #[must_use]
    pub fn provides_group_hooks(&self) -> bool {
        self.status(Capability::GroupHooks) == PatchStatus::Patched
    }

    /// Serializable summary of the install, ordered by operation name.
    #[must_use]
    pub fn report(&self) -> CompatReport {
        let mut capabilities: Vec<CapabilityEntry> = Capability::ALL
            .iter()
            .map(|cap| CapabilityEntry {
                operation: cap.operation_name(),
                status: self.status(*cap),
            })
            .collect();
        capabilities.sort_by_key(|entry| entry.operation);
        CompatReport {
            outcome: self.outcome,
            capabilities,
        }
    }
}

/// Serializable install summary.
#[derive(Debug, Serialize)]
pub struct CompatReport {
    pub outcome: InstallOutcome,
    pub capabilities: Vec<CapabilityEntry>,
}

/// One operation's entry in a [`CompatReport`].
#[derive(Debug, Serialize)]
pub struct CapabilityEntry {
    pub operation: &'static str,
    pub status: PatchStatus,
}

// =============================================================================
// Installer
// =============================================================================

/// Install compatibility patches for the probed host.
///
/// # Panics
///
/// Panics if the probe reports a generation at or above
/// [`MAX_SUPPORTED_GENERATION`]; those hosts provide the operations
/// natively and patching them is an environment error.
#[must_use]
pub fn install(probe: &HostProbe) -> CompatLayer {
    assert!(
        probe.generation() < MAX_SUPPORTED_GENERATION,
        "refusing to install compatibility patches on host generation {} \
         (native support expected from generation {MAX_SUPPORTED_GENERATION})",
        probe.generation(),
    );

    if probe.lacks_assertions() {
        let table = Capability::ALL
            .iter()
            .map(|cap| {
                debug!(operation = cap.operation_name(), "patching missing operation");
                (*cap, PatchStatus::Patched)
            })
            .collect();
        info!(outcome = "full_patch", "installed compatibility layer");
        return CompatLayer {
            outcome: InstallOutcome::FullPatch,
            table,
            aliases: HashMap::new(),
        };
    }

    let mut table = HashMap::new();
    let mut aliases = HashMap::new();
    for cap in Capability::ALL {
        match probe.capability(*cap) {
            CapabilityStatus::LegacyName(legacy) => {
                debug!(
                    operation = cap.operation_name(),
                    legacy, "aliasing canonical name onto legacy operation"
                );
                table.insert(*cap, PatchStatus::Aliased(legacy));
                aliases.insert(cap.operation_name(), legacy);
            }
            CapabilityStatus::Native | CapabilityStatus::Missing => {
                table.insert(*cap, PatchStatus::Native);
            }
        }
    }

    let outcome = if aliases.is_empty() {
        info!(outcome = "no_op", "host already complete, nothing installed");
        InstallOutcome::NoOp
    } else {
        info!(outcome = "regex_aliases", "installed compatibility layer");
        InstallOutcome::RegexAliases
    };
    CompatLayer {
        outcome,
        table,
        aliases,
    }
}
