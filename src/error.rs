//! Failure signal types for testcompat.
//!
//! Uses `thiserror` for structured failure types. A [`TestFailure`] is the
//! harness's fail-style signal: raising one fails the current test case,
//! never the process. Default messages carry representations of the values
//! that violated the expectation; a caller-supplied message replaces the
//! default entirely (see [`TestFailure::Message`]).

use thiserror::Error;

// =============================================================================
// Failure Kinds
// =============================================================================

/// High-level failure categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Membership checks (`assert_in`, `assert_not_in`).
    Membership,
    /// Ordering checks (`assert_greater`).
    Ordering,
    /// Pattern checks (`assert_regex`, `assert_not_regex`).
    Pattern,
    /// Type checks (`assert_is_instance`).
    Type,
    /// Caller-supplied message, any operation.
    Custom,
    /// Failures surfaced from arbitrary test-body errors.
    Other,
}

impl FailureKind {
    /// Returns a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Membership => "Membership failure",
            Self::Ordering => "Ordering failure",
            Self::Pattern => "Pattern failure",
            Self::Type => "Type failure",
            Self::Custom => "Assertion failure",
            Self::Other => "Test error",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

// =============================================================================
// TestFailure
// =============================================================================

/// The harness failure signal raised by every assertion helper.
///
/// Each variant carries the pre-rendered representations of the offending
/// values so the message survives without borrowing from the call site.
#[derive(Error, Debug)]
pub enum TestFailure {
    /// Membership expected but absent.
    #[error("{member} not found in {container}")]
    NotFound {
        member: String,
        container: String,
    },

    /// Membership unexpected but present.
    #[error("{member} unexpectedly found in {container}")]
    UnexpectedlyFound {
        member: String,
        container: String,
    },

    /// Left-hand side was not strictly greater.
    #[error("{lhs} not greater than {rhs}")]
    NotGreater {
        lhs: String,
        rhs: String,
    },

    /// Pattern matched nowhere in the searched text.
    #[error("pattern {pattern:?} not found in {text:?}")]
    PatternNotFound {
        pattern: String,
        text: String,
    },

    /// Pattern matched where no match was expected; `matched` is the exact
    /// matched substring.
    #[error("{matched:?} matches {pattern:?} in {text:?}")]
    PatternMatched {
        matched: String,
        pattern: String,
        text: String,
    },

    /// Value's concrete type was outside the expected set.
    #[error("{value} is not an instance of {expected}")]
    NotInstance {
        value: String,
        expected: String,
    },

    /// A literal pattern failed to compile. This is a usage error at the
    /// call site, not a violated expectation.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Caller-supplied message, replacing the generated default entirely.
    #[error("{0}")]
    Message(String),

    /// Catch-all so test bodies can propagate arbitrary errors with `?`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TestFailure {
    /// Build a failure carrying a caller-supplied message.
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Message(msg.into())
    }

    /// Returns the failure category for classification.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } | Self::UnexpectedlyFound { .. } => FailureKind::Membership,
            Self::NotGreater { .. } => FailureKind::Ordering,
            Self::PatternNotFound { .. }
            | Self::PatternMatched { .. }
            | Self::InvalidPattern(_) => FailureKind::Pattern,
            Self::NotInstance { .. } => FailureKind::Type,
            Self::Message(_) => FailureKind::Custom,
            Self::Other(_) => FailureKind::Other,
        }
    }
}

/// Result type alias for assertion operations.
pub type Result<T> = std::result::Result<T, TestFailure>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_kind_description() {
        assert_eq!(FailureKind::Membership.description(), "Membership failure");
        assert_eq!(FailureKind::Pattern.description(), "Pattern failure");
        assert_eq!(format!("{}", FailureKind::Ordering), "Ordering failure");
    }

    #[test]
    fn failures_have_correct_kind() {
        let err = TestFailure::NotFound {
            member: "'a'".to_string(),
            container: "['b']".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::Membership);

        let err = TestFailure::NotGreater {
            lhs: "1".to_string(),
            rhs: "2".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::Ordering);

        let err = TestFailure::PatternNotFound {
            pattern: "x+".to_string(),
            text: "yyy".to_string(),
        };
        assert_eq!(err.kind(), FailureKind::Pattern);

        let err = TestFailure::message("custom");
        assert_eq!(err.kind(), FailureKind::Custom);

        let err = TestFailure::Other(anyhow::anyhow!("boom"));
        assert_eq!(err.kind(), FailureKind::Other);
    }

    #[test]
    fn default_messages_carry_both_values() {
        let err = TestFailure::NotFound {
            member: "3".to_string(),
            container: "[1, 2]".to_string(),
        };
        assert_eq!(err.to_string(), "3 not found in [1, 2]");

        let err = TestFailure::UnexpectedlyFound {
            member: "2".to_string(),
            container: "[1, 2]".to_string(),
        };
        assert_eq!(err.to_string(), "2 unexpectedly found in [1, 2]");

        let err = TestFailure::NotGreater {
            lhs: "1".to_string(),
            rhs: "5".to_string(),
        };
        assert_eq!(err.to_string(), "1 not greater than 5");
    }

    #[test]
    fn pattern_matched_message_includes_matched_substring() {
        let err = TestFailure::PatternMatched {
            matched: "bcd".to_string(),
            pattern: "b.d".to_string(),
            text: "abcde".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"bcd\""));
        assert!(msg.contains("\"b.d\""));
        assert!(msg.contains("\"abcde\""));
    }

    #[test]
    fn custom_message_is_verbatim() {
        let err = TestFailure::message("exactly this");
        assert_eq!(err.to_string(), "exactly this");
    }

    #[test]
    fn invalid_pattern_from_regex_error() {
        let err: TestFailure = regex::Regex::new("(").unwrap_err().into();
        assert_eq!(err.kind(), FailureKind::Pattern);
        assert!(err.to_string().starts_with("invalid pattern:"));
    }
}
