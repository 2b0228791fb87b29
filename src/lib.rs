//! testcompat - backported assertions and group hooks for older harnesses.
//!
//! Compatibility layer for a unit-testing harness: supplies the assertion
//! helpers (`assert_in`, `assert_not_in`, `assert_greater`, `assert_regex`,
//! `assert_not_regex`, `assert_is_instance`) and a suite runner with
//! group-level setup/teardown hooks to host generations that lack them.
//!
//! Installation is feature-detected, not version-compared: build a
//! [`HostProbe`] describing what the ambient harness already provides, then
//! call [`install`] once at startup. The returned [`CompatLayer`] reports
//! which branch applied: a full patch, canonical-name aliases for the regex
//! assertions, or nothing at all. The assertions themselves are an opt-in
//! extension trait ([`CompatAssertions`]) rather than a mutation of any
//! shared base type.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod assert;
pub mod capability;
pub mod error;
pub mod install;
pub mod suite;

pub use assert::{CompatAssertions, CompatCase, Member, PatternArg, TypeSet};
pub use capability::{Capability, CapabilityStatus, HostProbe};
pub use error::{FailureKind, Result, TestFailure};
pub use install::{
    CompatLayer, CompatReport, InstallOutcome, MAX_SUPPORTED_GENERATION, PatchStatus, install,
};
pub use suite::{Case, CaseFailure, Group, RunResult, StopHandle, Suite};
