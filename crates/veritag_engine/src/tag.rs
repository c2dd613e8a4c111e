//! Fixed-arity compound tags with wildcard and alternative-set matching.
//!
//! A [`CompoundTag`] holds [`TAG_ARITY`] slots. Each slot is a wildcard, a
//! concrete value, or a set of acceptable values. Two tags *match* when every
//! slot pair matches: a wildcard on either side always matches, and two sets
//! match when they share a member. Matching is symmetric but not transitive,
//! so it lives in [`CompoundTag::matches`] rather than in `PartialEq`, which
//! stays plain structural identity.

use crate::error::TagError;
use smallvec::SmallVec;
use std::fmt;

/// A single concrete tag component.
pub type TagValue = u32;

/// The number of slots in every compound tag.
pub const TAG_ARITY: usize = 3;

/// Lexical categories assigned by the tokenizer, stored in the first slot.
pub mod category {
    use super::TagValue;

    /// Text not yet classified by any pass.
    pub const GENERIC: TagValue = 0;
    /// A keyword from the lexicon.
    pub const KEYWORD: TagValue = 1;
    /// A line or block comment.
    pub const COMMENT: TagValue = 2;
    /// A quoted string.
    pub const STRING: TagValue = 3;
    /// A reserved symbol or punctuation sequence.
    pub const RESERVED: TagValue = 4;
    /// A run of whitespace.
    pub const WHITESPACE: TagValue = 5;
    /// A preprocessor-style macro line.
    pub const MACRO: TagValue = 6;
}

/// One slot of a [`CompoundTag`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Slot {
    /// Matches anything.
    Any,
    /// A single concrete value.
    Is(TagValue),
    /// Any one of several values.
    OneOf(SmallVec<[TagValue; 4]>),
}

impl Slot {
    /// Builds a set-valued slot.
    pub fn one_of(values: impl IntoIterator<Item = TagValue>) -> Self {
        Slot::OneOf(values.into_iter().collect())
    }

    /// Returns `true` if this slot accepts `other` under the wildcard/set rule.
    pub fn matches(&self, other: &Slot) -> bool {
        match (self, other) {
            (Slot::Any, _) | (_, Slot::Any) => true,
            (Slot::Is(a), Slot::Is(b)) => a == b,
            (Slot::Is(v), Slot::OneOf(set)) | (Slot::OneOf(set), Slot::Is(v)) => set.contains(v),
            (Slot::OneOf(a), Slot::OneOf(b)) => a.iter().any(|v| b.contains(v)),
        }
    }
}

impl From<TagValue> for Slot {
    fn from(value: TagValue) -> Self {
        Slot::Is(value)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Any => write!(f, "*"),
            Slot::Is(v) => write!(f, "{v}"),
            Slot::OneOf(set) => {
                write!(f, "{{")?;
                for (i, v) in set.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// A fixed-arity tag value. Missing trailing components are wildcards.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct CompoundTag {
    slots: [Slot; TAG_ARITY],
}

impl CompoundTag {
    /// Creates a tag from exactly [`TAG_ARITY`] slots.
    pub fn new(slots: [Slot; TAG_ARITY]) -> Self {
        Self { slots }
    }

    /// Creates a tag from up to [`TAG_ARITY`] slots, padding the rest with
    /// [`Slot::Any`].
    pub fn try_from_slots(slots: impl IntoIterator<Item = Slot>) -> Result<Self, TagError> {
        let mut out = [Slot::Any, Slot::Any, Slot::Any];
        let mut given = 0;
        for slot in slots {
            if given < TAG_ARITY {
                out[given] = slot;
            }
            given += 1;
        }
        if given > TAG_ARITY {
            return Err(TagError::ArityExceeded { given });
        }
        Ok(Self { slots: out })
    }

    /// The tag every perspective starts with: `(GENERIC)`.
    pub fn generic() -> Self {
        category::GENERIC.into()
    }

    /// A tag whose every slot is a wildcard.
    pub fn any() -> Self {
        Self::new([Slot::Any, Slot::Any, Slot::Any])
    }

    /// Returns the slots of this tag.
    pub fn slots(&self) -> &[Slot; TAG_ARITY] {
        &self.slots
    }

    /// Returns the first slot's value when it is concrete.
    pub fn category(&self) -> Option<TagValue> {
        match self.slots[0] {
            Slot::Is(v) => Some(v),
            _ => None,
        }
    }

    /// Returns `true` for the untouched `(GENERIC)` tag and nothing else.
    pub fn is_generic(&self) -> bool {
        *self == Self::generic()
    }

    /// Position-wise wildcard/alternative-set matching.
    pub fn matches(&self, other: &CompoundTag) -> bool {
        self.slots
            .iter()
            .zip(other.slots.iter())
            .all(|(a, b)| a.matches(b))
    }
}

impl From<TagValue> for CompoundTag {
    fn from(value: TagValue) -> Self {
        Self::new([Slot::Is(value), Slot::Any, Slot::Any])
    }
}

impl From<Slot> for CompoundTag {
    fn from(slot: Slot) -> Self {
        Self::new([slot, Slot::Any, Slot::Any])
    }
}

impl<A: Into<Slot>, B: Into<Slot>> From<(A, B)> for CompoundTag {
    fn from((a, b): (A, B)) -> Self {
        Self::new([a.into(), b.into(), Slot::Any])
    }
}

impl<A: Into<Slot>, B: Into<Slot>, C: Into<Slot>> From<(A, B, C)> for CompoundTag {
    fn from((a, b, c): (A, B, C)) -> Self {
        Self::new([a.into(), b.into(), c.into()])
    }
}

impl fmt::Display for CompoundTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Trailing wildcards are implicit.
        let shown = self
            .slots
            .iter()
            .rposition(|s| *s != Slot::Any)
            .map_or(1, |last| last + 1);
        write!(f, "(")?;
        for (i, slot) in self.slots[..shown].iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{slot}")?;
        }
        write!(f, ")")
    }
}

/// Opener to closer table used by `complete` mode.
///
/// Lookup is by structural identity of the opener, so the opener tag used in
/// a pattern entry must be the exact tag registered here.
#[derive(Clone, Debug, Default)]
pub struct GroupPairs {
    pairs: Vec<(CompoundTag, CompoundTag)>,
}

impl GroupPairs {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `closer` as the closing tag of `opener`, replacing any
    /// previous entry for the same opener.
    pub fn insert(&mut self, opener: impl Into<CompoundTag>, closer: impl Into<CompoundTag>) {
        let opener = opener.into();
        let closer = closer.into();
        match self.pairs.iter_mut().find(|(o, _)| *o == opener) {
            Some(entry) => entry.1 = closer,
            None => self.pairs.push((opener, closer)),
        }
    }

    /// Derives the closing tag for an opening tag.
    pub fn closer_for(&self, opener: &CompoundTag) -> Option<&CompoundTag> {
        self.pairs
            .iter()
            .find(|(o, _)| o == opener)
            .map(|(_, c)| c)
    }

    /// Appends every pair of `other`, with `other` winning on conflicts.
    pub fn extend(&mut self, other: &GroupPairs) {
        for (o, c) in &other.pairs {
            self.insert(o.clone(), c.clone());
        }
    }

    /// Returns the number of registered pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pairs are registered.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates `(opener, closer)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&CompoundTag, &CompoundTag)> {
        self.pairs.iter().map(|(o, c)| (o, c))
    }
}
