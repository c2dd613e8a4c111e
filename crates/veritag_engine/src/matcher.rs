//! The automaton that walks a token stream against one pattern.
//!
//! Tokens are fed one at a time with their index in the stream. Each token is
//! compared to the entry under the cursor, and the entry's [`Mode`] decides
//! whether it is consumed and whether the cursor moves. Some moves re-offer
//! the same token to the new entry:
//!
//! - an `optional` miss moves on and retries the token;
//! - a `mandatory` miss inside an optional group that has consumed nothing
//!   skips the group and retries the token;
//! - any other `mandatory` (or unopened `complete`) miss drops the attempt;
//!   the token is not offered to a fresh one.
//!
//! A finished pattern stores its buffer as a match and restarts on the next
//! token, even when the token that finished it was not consumed.
//!
//! Matches are stored as token indices; the [`Grouper`](crate::Grouper)
//! turns them back into tokens.

use crate::cursor::Cursor;
use crate::error::PatternError;
use crate::pattern::{Mode, Pattern};
use crate::tag::{CompoundTag, GroupPairs};
use crate::token::Token;
use tracing::trace;

/// A token that tripped a guard part way through an attempt.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Mismatch {
    /// Name of the pattern whose attempt was aborted.
    pub pattern: String,
    /// Index of the offending token in the stream.
    pub token: usize,
    /// The tag the entry was waiting for.
    pub expected: CompoundTag,
}

/// A balanced group still open when the stream ended.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Unterminated {
    /// Name of the pattern holding the group.
    pub pattern: String,
    /// Index of the token that opened the group.
    pub opener: usize,
    /// The closing tag that never arrived.
    pub expected: CompoundTag,
}

enum Step {
    Next,
    Retry,
    Mismatch(CompoundTag),
}

/// A named automaton bound to one [`Pattern`].
#[derive(Clone, Debug)]
pub struct MatchState {
    name: String,
    tag: CompoundTag,
    pattern: Pattern,
    cursor: Cursor,
    buffer: Vec<usize>,
    matches: Vec<Vec<usize>>,
    depth: usize,
    inside: bool,
    closer: Option<CompoundTag>,
    opener: usize,
    started: bool,
}

impl MatchState {
    /// Creates an automaton that labels its matches with `tag`.
    pub fn new(name: impl Into<String>, tag: impl Into<CompoundTag>, pattern: Pattern) -> Self {
        let cursor = Cursor::new(&pattern);
        Self {
            name: name.into(),
            tag: tag.into(),
            pattern,
            cursor,
            buffer: Vec::new(),
            matches: Vec::new(),
            depth: 0,
            inside: false,
            closer: None,
            opener: 0,
            started: false,
        }
    }

    /// Returns the automaton's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tag applied to completed matches.
    pub fn tag(&self) -> &CompoundTag {
        &self.tag
    }

    /// Returns the pattern being matched.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Returns `true` while inside a `complete` region.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Returns the current `complete` nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the completed matches as token-index runs.
    pub fn completed(&self) -> &[Vec<usize>] {
        &self.matches
    }

    /// Removes and returns the completed matches.
    pub fn take_completed(&mut self) -> Vec<Vec<usize>> {
        std::mem::take(&mut self.matches)
    }

    /// Clears all progress and completed matches for a fresh scan.
    pub fn reset(&mut self) {
        self.restart();
        self.matches.clear();
    }

    /// Feeds the token at index `at` of the stream.
    ///
    /// Returns the mismatch, if a guard aborted the current attempt.
    pub fn feed(
        &mut self,
        at: usize,
        token: &Token<'_>,
        pairs: &GroupPairs,
    ) -> Result<Option<Mismatch>, PatternError> {
        let mut mismatch = None;
        loop {
            match self.step(at, token, pairs)? {
                Step::Next => return Ok(mismatch),
                Step::Retry => trace!(pattern = %self.name, at, "retry"),
                Step::Mismatch(expected) => {
                    mismatch = Some(Mismatch {
                        pattern: self.name.clone(),
                        token: at,
                        expected,
                    });
                }
            }
        }
    }

    /// Ends the stream.
    ///
    /// An attempt whose remaining entries are all optional is completed.
    /// Any other partial attempt is dropped; if it was inside a balanced
    /// group, that group is reported.
    pub fn finish(&mut self) -> Option<Unterminated> {
        let open = if self.inside {
            Some(Unterminated {
                pattern: self.name.clone(),
                opener: self.opener,
                expected: self.closer.clone().unwrap_or_else(CompoundTag::any),
            })
        } else {
            if self.started && self.cursor.rest_is_optional(&self.pattern) {
                self.complete();
            }
            None
        };
        self.restart();
        open
    }

    fn step(
        &mut self,
        at: usize,
        token: &Token<'_>,
        pairs: &GroupPairs,
    ) -> Result<Step, PatternError> {
        let Some(entry) = self.cursor.current(&self.pattern) else {
            return Ok(Step::Next);
        };
        let mode = entry.mode;
        let guard = entry.guard;
        let hit = token.tag.matches(&entry.target);
        let hit_close = self.inside
            && self
                .closer
                .as_ref()
                .is_some_and(|closer| token.tag.matches(closer));

        if self.started
            && mode != Mode::Optional
            && !hit
            && !hit_close
            && guard.is_some_and(|g| g.check(token))
        {
            let expected = match &self.closer {
                Some(closer) if self.inside => closer.clone(),
                _ => entry.target.clone(),
            };
            trace!(pattern = %self.name, at, text = token.text, "mismatch");
            self.restart();
            return Ok(Step::Mismatch(expected));
        }

        let step = match mode {
            Mode::Optional => {
                if hit {
                    self.consume(at);
                }
                self.advance(hit)
            }
            Mode::Mandatory => {
                if hit {
                    self.consume(at);
                    self.advance(true)
                } else {
                    self.miss()
                }
            }
            Mode::Collect => {
                self.consume(at);
                if hit {
                    self.advance(true)
                } else {
                    Step::Next
                }
            }
            Mode::CollectDrop => {
                if hit {
                    self.started = true;
                    self.cursor.mark_consumed();
                    self.advance(true)
                } else {
                    self.consume(at);
                    Step::Next
                }
            }
            Mode::Complete if !self.inside => {
                if !hit {
                    return Ok(self.miss());
                }
                let closer = pairs.closer_for(&entry.target).cloned().ok_or_else(|| {
                    PatternError::UndefinedCloser {
                        pattern: self.name.clone(),
                        opener: entry.target.to_string(),
                    }
                })?;
                trace!(pattern = %self.name, at, "open group");
                self.inside = true;
                self.depth = 1;
                self.closer = Some(closer);
                self.opener = at;
                self.consume(at);
                Step::Next
            }
            Mode::Complete => {
                self.consume(at);
                // Any opener sharing the closer nests, so `#(` sees inner `(`.
                let nested = hit
                    || pairs
                        .closer_for(&token.tag)
                        .is_some_and(|c| self.closer.as_ref() == Some(c));
                if hit_close {
                    self.depth -= 1;
                } else if nested {
                    self.depth += 1;
                }
                if self.depth == 0 {
                    trace!(pattern = %self.name, at, "close group");
                    self.inside = false;
                    self.closer = None;
                    self.advance(true)
                } else {
                    Step::Next
                }
            }
        };
        Ok(step)
    }

    fn consume(&mut self, at: usize) {
        self.buffer.push(at);
        self.started = true;
        self.cursor.mark_consumed();
    }

    fn advance(&mut self, consumed: bool) -> Step {
        self.cursor.advance(&self.pattern);
        self.settled(consumed)
    }

    fn miss(&mut self) -> Step {
        if self.cursor.skip_optional_group(&self.pattern) {
            return self.settled(false);
        }
        if self.started {
            trace!(pattern = %self.name, "reset");
        }
        self.restart();
        Step::Next
    }

    /// Completes the match if the cursor has run off the pattern.
    fn settled(&mut self, consumed: bool) -> Step {
        if !self.cursor.is_done(&self.pattern) {
            return if consumed { Step::Next } else { Step::Retry };
        }
        self.complete();
        Step::Next
    }

    fn complete(&mut self) {
        if !self.buffer.is_empty() {
            trace!(pattern = %self.name, tokens = self.buffer.len(), "complete");
            self.matches.push(std::mem::take(&mut self.buffer));
        }
        self.restart();
    }

    fn restart(&mut self) {
        self.buffer.clear();
        self.cursor.reset(&self.pattern);
        self.depth = 0;
        self.inside = false;
        self.closer = None;
        self.started = false;
    }
}
