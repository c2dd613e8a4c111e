//! Declarative token-sequence patterns.
//!
//! A [`Pattern`] is an ordered list of entries. Each entry either expects a
//! tag in some [`Mode`], or nests a sub-pattern as a group:
//!
//! ```
//! use veritag_engine::{category, Pattern};
//!
//! const ASSIGN: u32 = 1;
//! const EQ: u32 = 2;
//! const SEMI: u32 = 3;
//!
//! let assign = Pattern::new()
//!     .must((category::KEYWORD, ASSIGN))
//!     .must(category::WHITESPACE)
//!     .must(category::GENERIC)
//!     .can(category::WHITESPACE)
//!     .must((category::RESERVED, EQ))
//!     .collect((category::RESERVED, SEMI));
//! assert_eq!(assign.len(), 6);
//! ```

use crate::error::PatternError;
use crate::tag::{CompoundTag, GroupPairs};
use crate::token::Token;
use std::fmt;

/// How a pattern entry treats the token stream.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Mode {
    /// Consume a hit; on a miss, move on and retry the same token.
    Optional,
    /// Consume a hit; a miss abandons the attempt.
    Mandatory,
    /// Consume every token up to and including a hit.
    Collect,
    /// Consume every token up to a hit, then drop the hit itself.
    CollectDrop,
    /// Consume a balanced region from the target tag to its closer.
    Complete,
}

/// A predicate flagging a token as a syntax error when it misses its entry.
#[derive(Clone, Copy)]
pub struct Guard(pub fn(&Token<'_>) -> bool);

impl Guard {
    /// Returns `true` if `token` should abort the attempt.
    pub fn check(&self, token: &Token<'_>) -> bool {
        (self.0)(token)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

/// An entry that expects a tag.
#[derive(Clone, Debug)]
pub struct TagEntry {
    /// The tag a token must match to count as a hit.
    pub target: CompoundTag,
    /// How hits and misses are handled.
    pub mode: Mode,
    /// Optional mismatch predicate.
    pub guard: Option<Guard>,
}

impl TagEntry {
    /// Returns `true` if skipping this entry entirely is acceptable.
    pub fn is_optional(&self) -> bool {
        self.mode == Mode::Optional
    }
}

/// One step of a [`Pattern`].
#[derive(Clone, Debug)]
pub enum Entry {
    /// Expect a tag.
    Tag(TagEntry),
    /// Match a nested pattern in place.
    Group {
        /// The nested pattern.
        pattern: Pattern,
        /// Whether the whole group may be absent.
        optional: bool,
    },
}

impl Entry {
    /// Returns `true` if the entry can match without consuming anything.
    pub fn is_optional(&self) -> bool {
        match self {
            Entry::Tag(t) => t.is_optional(),
            Entry::Group { pattern, optional } => {
                *optional || pattern.entries.iter().all(Entry::is_optional)
            }
        }
    }
}

/// An ordered sequence of entries describing one construct.
#[derive(Clone, Debug, Default)]
pub struct Pattern {
    entries: Vec<Entry>,
}

impl Pattern {
    /// Creates an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, target: impl Into<CompoundTag>, mode: Mode) -> Self {
        self.entries.push(Entry::Tag(TagEntry {
            target: target.into(),
            mode,
            guard: None,
        }));
        self
    }

    /// Appends a [`Mode::Mandatory`] entry.
    pub fn must(self, target: impl Into<CompoundTag>) -> Self {
        self.push(target, Mode::Mandatory)
    }

    /// Appends a [`Mode::Optional`] entry.
    pub fn can(self, target: impl Into<CompoundTag>) -> Self {
        self.push(target, Mode::Optional)
    }

    /// Appends a [`Mode::Collect`] entry.
    pub fn collect(self, target: impl Into<CompoundTag>) -> Self {
        self.push(target, Mode::Collect)
    }

    /// Appends a [`Mode::CollectDrop`] entry.
    pub fn collect_drop(self, target: impl Into<CompoundTag>) -> Self {
        self.push(target, Mode::CollectDrop)
    }

    /// Appends a [`Mode::Complete`] entry opening on `target`.
    pub fn complete(self, target: impl Into<CompoundTag>) -> Self {
        self.push(target, Mode::Complete)
    }

    /// Attaches a mismatch predicate to the last tag entry, descending into
    /// a trailing group. Has no effect on a pattern without tag entries.
    pub fn guard(mut self, guard: fn(&Token<'_>) -> bool) -> Self {
        if let Some(entry) = last_tag_mut(&mut self.entries) {
            entry.guard = Some(Guard(guard));
        }
        self
    }

    /// Appends a mandatory group.
    pub fn group(mut self, pattern: Pattern) -> Self {
        self.entries.push(Entry::Group {
            pattern,
            optional: false,
        });
        self
    }

    /// Appends a group that is skipped when its first entry misses.
    pub fn optional_group(mut self, pattern: Pattern) -> Self {
        self.entries.push(Entry::Group {
            pattern,
            optional: true,
        });
        self
    }

    /// Returns the top-level entries.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the pattern has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walks every tag entry depth-first, yielding its index path.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(&self.entries[..], 0)],
        }
    }

    /// Checks that every `complete` entry has a closer in `pairs`.
    pub fn validate(&self, name: &str, pairs: &GroupPairs) -> Result<(), PatternError> {
        for (_, entry) in self.walk() {
            if entry.mode == Mode::Complete && pairs.closer_for(&entry.target).is_none() {
                return Err(PatternError::UndefinedCloser {
                    pattern: name.to_string(),
                    opener: entry.target.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Finds the tag entry a depth-first walk would yield last.
fn last_tag_mut(entries: &mut [Entry]) -> Option<&mut TagEntry> {
    for entry in entries.iter_mut().rev() {
        match entry {
            Entry::Tag(tag) => return Some(tag),
            Entry::Group { pattern, .. } => {
                if let Some(tag) = last_tag_mut(&mut pattern.entries) {
                    return Some(tag);
                }
            }
        }
    }
    None
}

/// Depth-first iterator over a pattern's tag entries.
///
/// Each item is the index chain from the root through any groups, paired
/// with the entry. Created by [`Pattern::walk`]; cloning it forks the walk.
#[derive(Clone, Debug)]
pub struct Walk<'p> {
    stack: Vec<(&'p [Entry], usize)>,
}

impl<'p> Iterator for Walk<'p> {
    type Item = (Vec<usize>, &'p TagEntry);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let (entries, index) = *frame;
            if index >= entries.len() {
                self.stack.pop();
                continue;
            }
            frame.1 += 1;
            match &entries[index] {
                Entry::Tag(entry) => {
                    let path = self.stack.iter().map(|(_, next)| next - 1).collect();
                    return Some((path, entry));
                }
                Entry::Group { pattern, .. } => self.stack.push((&pattern.entries[..], 0)),
            }
        }
    }
}
