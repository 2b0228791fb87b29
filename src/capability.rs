//! Host framework probing and the feature-capability table.
//!
//! The installer never compares raw version tuples. Instead, a [`HostProbe`]
//! is built once at startup and records, per operation, whether the ambient
//! harness already provides it ([`CapabilityStatus::Native`]), provides it
//! under an older name ([`CapabilityStatus::LegacyName`]), or lacks it
//! entirely ([`CapabilityStatus::Missing`]).

use serde::Serialize;
use std::collections::HashMap;

// =============================================================================
// Capability Enum
// =============================================================================

/// Operations the compatibility layer knows how to supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    AssertIn,
    AssertNotIn,
    AssertGreater,
    AssertRegex,
    AssertNotRegex,
    AssertIsInstance,
    /// Group-level setup/teardown hooks in the suite runner.
    GroupHooks,
}

impl Capability {
    /// All capabilities in display order.
    pub const ALL: &'static [Self] = &[
        Self::AssertIn,
        Self::AssertNotIn,
        Self::AssertGreater,
        Self::AssertRegex,
        Self::AssertNotRegex,
        Self::AssertIsInstance,
        Self::GroupHooks,
    ];

    /// The assertion operations (everything except the suite runner).
    pub const ASSERTIONS: &'static [Self] = &[
        Self::AssertIn,
        Self::AssertNotIn,
        Self::AssertGreater,
        Self::AssertRegex,
        Self::AssertNotRegex,
        Self::AssertIsInstance,
    ];

    /// Canonical operation name, used as the capability-table key in
    /// reports and alias lookups.
    #[must_use]
    pub const fn operation_name(self) -> &'static str {
        match self {
            Self::AssertIn => "assert_in",
            Self::AssertNotIn => "assert_not_in",
            Self::AssertGreater => "assert_greater",
            Self::AssertRegex => "assert_regex",
            Self::AssertNotRegex => "assert_not_regex",
            Self::AssertIsInstance => "assert_is_instance",
            Self::GroupHooks => "group_hooks",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.operation_name())
    }
}

// =============================================================================
// Capability Status
// =============================================================================

/// What the host framework reports for a single operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityStatus {
    /// Operation exists under its canonical name; nothing to do.
    Native,
    /// Operation is absent and must be supplied by the layer.
    #[default]
    Missing,
    /// Operation exists, but under an older name.
    LegacyName(&'static str),
}

// =============================================================================
// Host Probe
// =============================================================================

/// Snapshot of the ambient host framework, taken once at startup.
///
/// The generation number corresponds to the host's major version and only
/// feeds the installer's fatal guard; branch selection is driven entirely
/// by the capability table.
#[derive(Debug, Clone)]
pub struct HostProbe {
    generation: u32,
    table: HashMap<Capability, CapabilityStatus>,
}

impl HostProbe {
    /// Build a probe from an explicit capability table.
    #[must_use]
    pub fn new(generation: u32, table: HashMap<Capability, CapabilityStatus>) -> Self {
        Self { generation, table }
    }

    /// A legacy host: none of the operations exist yet.
    #[must_use]
    pub fn legacy() -> Self {
        let table = Capability::ALL
            .iter()
            .map(|cap| (*cap, CapabilityStatus::Missing))
            .collect();
        Self::new(1, table)
    }

    /// A transitional host: everything exists, but the regex assertions are
    /// only reachable under their older names.
    #[must_use]
    pub fn transitional() -> Self {
        let table = Capability::ALL
            .iter()
            .map(|cap| {
                let status = match cap {
                    Capability::AssertRegex => {
                        CapabilityStatus::LegacyName("assert_regexp_matches")
                    }
                    Capability::AssertNotRegex => {
                        CapabilityStatus::LegacyName("assert_not_regexp_matches")
                    }
                    _ => CapabilityStatus::Native,
                };
                (*cap, status)
            })
            .collect();
        Self::new(2, table)
    }

    /// A modern host that is still below the supported generation ceiling:
    /// every operation is native.
    #[must_use]
    pub fn modern() -> Self {
        let table = Capability::ALL
            .iter()
            .map(|cap| (*cap, CapabilityStatus::Native))
            .collect();
        Self::new(2, table)
    }

    /// Host major generation.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Status for one operation. Operations absent from the table are
    /// reported as [`CapabilityStatus::Missing`].
    #[must_use]
    pub fn capability(&self, cap: Capability) -> CapabilityStatus {
        self.table.get(&cap).copied().unwrap_or_default()
    }

    /// Whether any assertion operation is missing outright.
    #[must_use]
    pub fn lacks_assertions(&self) -> bool {
        Capability::ASSERTIONS
            .iter()
            .any(|cap| self.capability(*cap) == CapabilityStatus::Missing)
    }
}
