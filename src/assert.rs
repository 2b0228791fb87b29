//! Backported assertion helpers.
//!
//! Instead of mutating a shared base class, the assertions live on the
//! [`CompatAssertions`] extension trait, which any test-case type opts into
//! with an empty `impl` block (or by using the ready-made [`CompatCase`]).
//! Every method takes an optional custom message; when supplied it replaces
//! the generated default entirely and is routed through the single
//! [`CompatAssertions::fail`] hook, mirroring how a host harness funnels
//! failures through one fail-style signal.

use regex::Regex;
use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use crate::error::{Result, TestFailure};

// =============================================================================
// Membership
// =============================================================================

/// Containment seam for [`CompatAssertions::assert_in`].
///
/// Implemented for the usual containers: sequences by element equality,
/// sets and maps by key, and strings by substring or character.
pub trait Member<M: ?Sized> {
    /// Whether `member` is an element of `self`.
    fn has_member(&self, member: &M) -> bool;
}

impl<T: PartialEq> Member<T> for [T] {
    fn has_member(&self, member: &T) -> bool {
        self.contains(member)
    }
}

impl<T: PartialEq, const N: usize> Member<T> for [T; N] {
    fn has_member(&self, member: &T) -> bool {
        self.as_slice().contains(member)
    }
}

impl<T: PartialEq> Member<T> for Vec<T> {
    fn has_member(&self, member: &T) -> bool {
        self.as_slice().contains(member)
    }
}

impl<T: Eq + Hash, S: BuildHasher> Member<T> for HashSet<T, S> {
    fn has_member(&self, member: &T) -> bool {
        self.contains(member)
    }
}

impl<T: Ord> Member<T> for BTreeSet<T> {
    fn has_member(&self, member: &T) -> bool {
        self.contains(member)
    }
}

impl<K: Eq + Hash, V, S: BuildHasher> Member<K> for HashMap<K, V, S> {
    fn has_member(&self, member: &K) -> bool {
        self.contains_key(member)
    }
}

impl<K: Ord, V> Member<K> for BTreeMap<K, V> {
    fn has_member(&self, member: &K) -> bool {
        self.contains_key(member)
    }
}

impl Member<str> for str {
    fn has_member(&self, member: &str) -> bool {
        self.contains(member)
    }
}

impl Member<char> for str {
    fn has_member(&self, member: &char) -> bool {
        self.contains(*member)
    }
}

impl Member<str> for String {
    fn has_member(&self, member: &str) -> bool {
        self.as_str().contains(member)
    }
}

impl Member<char> for String {
    fn has_member(&self, member: &char) -> bool {
        self.as_str().contains(*member)
    }
}

// =============================================================================
// Pattern Argument
// =============================================================================

/// Pattern input for the regex assertions: either a literal source string
/// (compiled on the spot) or an already-compiled [`Regex`]. Both forms
/// produce identical pass/fail outcomes for the same text.
#[derive(Debug, Clone, Copy)]
pub enum PatternArg<'p> {
    /// Pattern source text, compiled by the assertion.
    Literal(&'p str),
    /// Pre-compiled pattern, used as-is.
    Compiled(&'p Regex),
}

impl<'p> From<&'p str> for PatternArg<'p> {
    fn from(source: &'p str) -> Self {
        Self::Literal(source)
    }
}

impl<'p> From<&'p String> for PatternArg<'p> {
    fn from(source: &'p String) -> Self {
        Self::Literal(source)
    }
}

impl<'p> From<&'p Regex> for PatternArg<'p> {
    fn from(regex: &'p Regex) -> Self {
        Self::Compiled(regex)
    }
}

impl<'p> PatternArg<'p> {
    /// Compile the literal form; borrow the compiled form.
    ///
    /// # Errors
    ///
    /// Returns [`TestFailure::InvalidPattern`] when a literal fails to
    /// compile.
    pub fn compile(self) -> Result<Cow<'p, Regex>> {
        match self {
            Self::Literal(source) => Ok(Cow::Owned(Regex::new(source)?)),
            Self::Compiled(regex) => Ok(Cow::Borrowed(regex)),
        }
    }
}

// =============================================================================
// Type Set
// =============================================================================

/// One or more expected types for [`CompatAssertions::assert_is_instance`],
/// covering the "instance of a class or a set of types" form.
#[derive(Debug, Clone)]
pub struct TypeSet {
    entries: Vec<(TypeId, &'static str)>,
}

impl TypeSet {
    /// A set containing a single type.
    #[must_use]
    pub fn of<T: Any>() -> Self {
        Self {
            entries: vec![(TypeId::of::<T>(), std::any::type_name::<T>())],
        }
    }

    /// Extend the set with another accepted type.
    #[must_use]
    pub fn or<T: Any>(mut self) -> Self {
        self.entries
            .push((TypeId::of::<T>(), std::any::type_name::<T>()));
        self
    }

    /// Whether a fully erased value's concrete type is in the set.
    #[must_use]
    pub fn matches(&self, value: &dyn Any) -> bool {
        self.matches_id(value.type_id())
    }

    /// Whether the given type id is in the set.
    #[must_use]
    pub fn matches_id(&self, id: TypeId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, name) in &self.entries {
            if !first {
                write!(f, " | ")?;
            }
            write!(f, "{name}")?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// Assertions
// =============================================================================

/// Assertion helpers backported for hosts that lack them.
///
/// All methods are provided; a test-case type opts in with an empty `impl`.
/// Failure messages default to a representation of the offending values and
/// are replaced entirely by `msg` when one is supplied.
pub trait CompatAssertions {
    /// The fail-style signal. Custom messages are routed through here so an
    /// implementor can decorate or re-shape them in one place.
    fn fail(&self, message: String) -> TestFailure {
        TestFailure::Message(message)
    }

    /// Succeeds iff `member` is an element of `container`.
    ///
    /// # Errors
    ///
    /// Returns [`TestFailure::NotFound`] (or the custom message) otherwise.
    fn assert_in<M, C>(&self, member: &M, container: &C, msg: Option<&str>) -> Result<()>
    where
        M: fmt::Debug + ?Sized,
        C: Member<M> + fmt::Debug + ?Sized,
    {
        if container.has_member(member) {
            return Ok(());
        }
        match msg {
            Some(msg) => Err(self.fail(msg.to_owned())),
            None => Err(TestFailure::NotFound {
                member: format!("{member:?}"),
                container: format!("{container:?}"),
            }),
        }
    }

    /// Succeeds iff `member` is absent from `container`. Exact logical
    /// negation of [`CompatAssertions::assert_in`].
    ///
    /// # Errors
    ///
    /// Returns [`TestFailure::UnexpectedlyFound`] (or the custom message)
    /// otherwise.
    fn assert_not_in<M, C>(&self, member: &M, container: &C, msg: Option<&str>) -> Result<()>
    where
        M: fmt::Debug + ?Sized,
        C: Member<M> + fmt::Debug + ?Sized,
    {
        if !container.has_member(member) {
            return Ok(());
        }
        match msg {
            Some(msg) => Err(self.fail(msg.to_owned())),
            None => Err(TestFailure::UnexpectedlyFound {
                member: format!("{member:?}"),
                container: format!("{container:?}"),
            }),
        }
    }

    /// Succeeds iff `lhs > rhs`. Fails when `lhs <= rhs` and also when the
    /// two are incomparable (e.g. NaN), matching "not strictly greater".
    ///
    /// # Errors
    ///
    /// Returns [`TestFailure::NotGreater`] (or the custom message)
    /// otherwise.
    fn assert_greater<T>(&self, lhs: &T, rhs: &T, msg: Option<&str>) -> Result<()>
    where
        T: PartialOrd + fmt::Debug + ?Sized,
    {
        if lhs > rhs {
            return Ok(());
        }
        match msg {
            Some(msg) => Err(self.fail(msg.to_owned())),
            None => Err(TestFailure::NotGreater {
                lhs: format!("{lhs:?}"),
                rhs: format!("{rhs:?}"),
            }),
        }
    }

    /// Succeeds iff `pattern` matches somewhere within `text`.
    ///
    /// # Errors
    ///
    /// Returns [`TestFailure::PatternNotFound`] (or the custom message) on
    /// no match, and [`TestFailure::InvalidPattern`] when a literal pattern
    /// fails to compile.
    fn assert_regex<'p, P>(&self, text: &str, pattern: P, msg: Option<&str>) -> Result<()>
    where
        P: Into<PatternArg<'p>>,
    {
        let regex = pattern.into().compile()?;
        if regex.is_match(text) {
            return Ok(());
        }
        match msg {
            Some(msg) => Err(self.fail(msg.to_owned())),
            None => Err(TestFailure::PatternNotFound {
                pattern: regex.as_str().to_owned(),
                text: text.to_owned(),
            }),
        }
    }

    /// Succeeds iff `pattern` matches nowhere in `text`. Exact logical
    /// negation of [`CompatAssertions::assert_regex`]; the default failure
    /// message carries the exact matched substring.
    ///
    /// # Errors
    ///
    /// Returns [`TestFailure::PatternMatched`] (or the custom message) on a
    /// match, and [`TestFailure::InvalidPattern`] when a literal pattern
    /// fails to compile.
    fn assert_not_regex<'p, P>(&self, text: &str, pattern: P, msg: Option<&str>) -> Result<()>
    where
        P: Into<PatternArg<'p>>,
    {
        let regex = pattern.into().compile()?;
        let Some(found) = regex.find(text) else {
            return Ok(());
        };
        match msg {
            Some(msg) => Err(self.fail(msg.to_owned())),
            None => Err(TestFailure::PatternMatched {
                matched: found.as_str().to_owned(),
                pattern: regex.as_str().to_owned(),
                text: text.to_owned(),
            }),
        }
    }

    /// Succeeds iff `value`'s concrete type is in `expected`.
    ///
    /// For fully erased values (`&dyn Any`, which carries no `Debug`
    /// representation for the default message), check with
    /// [`TypeSet::matches`] directly.
    ///
    /// # Errors
    ///
    /// Returns [`TestFailure::NotInstance`] (or the custom message)
    /// otherwise.
    fn assert_is_instance<V>(&self, value: &V, expected: &TypeSet, msg: Option<&str>) -> Result<()>
    where
        V: Any + fmt::Debug,
    {
        if expected.matches_id(value.type_id()) {
            return Ok(());
        }
        match msg {
            Some(msg) => Err(self.fail(msg.to_owned())),
            None => Err(TestFailure::NotInstance {
                value: format!("{value:?}"),
                expected: expected.to_string(),
            }),
        }
    }
}

// =============================================================================
// CompatCase
// =============================================================================

/// Minimal test-case wrapper carrying the backported assertions, for
/// authors without an existing case type to extend.
#[derive(Debug, Clone)]
pub struct CompatCase {
    name: String,
}

impl CompatCase {
    /// Create a named case wrapper.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CompatAssertions for CompatCase {}
