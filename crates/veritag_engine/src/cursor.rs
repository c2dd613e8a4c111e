//! An owned position inside a (possibly nested) pattern.

use crate::pattern::{Entry, Pattern, TagEntry};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Frame {
    index: usize,
    consumed: bool,
}

impl Frame {
    fn start() -> Self {
        Self {
            index: 0,
            consumed: false,
        }
    }
}

/// A stack of entry indices, one frame per enclosing group.
///
/// After every move the cursor is settled: it points at a tag entry, or at
/// the end of the root pattern. Groups are entered and left implicitly.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Cursor {
    frames: Vec<Frame>,
}

impl Cursor {
    /// Creates a cursor at the first tag entry of `root`.
    pub fn new(root: &Pattern) -> Self {
        let mut cursor = Self {
            frames: vec![Frame::start()],
        };
        cursor.settle(root);
        cursor
    }

    /// Moves back to the first tag entry of `root`.
    pub fn reset(&mut self, root: &Pattern) {
        self.frames.clear();
        self.frames.push(Frame::start());
        self.settle(root);
    }

    /// Returns the index chain from the root to the current entry.
    pub fn path(&self) -> Vec<usize> {
        self.frames.iter().map(|f| f.index).collect()
    }

    /// Returns the tag entry under the cursor, or `None` at the end.
    pub fn current<'p>(&self, root: &'p Pattern) -> Option<&'p TagEntry> {
        let depth = self.frames.len().checked_sub(1)?;
        let (group, _) = group_at(root, &self.frames[..depth])?;
        match group.entries().get(self.frames[depth].index) {
            Some(Entry::Tag(entry)) => Some(entry),
            _ => None,
        }
    }

    /// Returns `true` once the whole root pattern has been traversed.
    pub fn is_done(&self, root: &Pattern) -> bool {
        match self.frames.as_slice() {
            [only] => only.index >= root.len(),
            _ => false,
        }
    }

    /// Steps past the current entry.
    pub fn advance(&mut self, root: &Pattern) {
        if let Some(top) = self.frames.last_mut() {
            top.index += 1;
        }
        self.settle(root);
    }

    /// Records that a token was consumed in every enclosing group.
    pub fn mark_consumed(&mut self) {
        for frame in &mut self.frames {
            frame.consumed = true;
        }
    }

    /// Skips the innermost optional group that has consumed nothing yet.
    ///
    /// Returns `false` (and leaves the cursor alone) when there is none.
    pub fn skip_optional_group(&mut self, root: &Pattern) -> bool {
        for depth in (1..self.frames.len()).rev() {
            if self.frames[depth].consumed {
                return false;
            }
            if let Some((_, true)) = group_at(root, &self.frames[..depth]) {
                self.frames.truncate(depth);
                self.advance(root);
                return true;
            }
        }
        false
    }

    /// Returns `true` if every entry left to match may be skipped.
    pub fn rest_is_optional(&self, root: &Pattern) -> bool {
        let innermost = self.frames.len().saturating_sub(1);
        for depth in (0..self.frames.len()).rev() {
            let Some((group, optional)) = group_at(root, &self.frames[..depth]) else {
                return false;
            };
            let frame = self.frames[depth];
            if depth > 0 && optional && !frame.consumed {
                continue;
            }
            // Outer frames point at the group being explored; skip past it.
            let from = if depth == innermost {
                frame.index
            } else {
                frame.index + 1
            };
            let rest = group.entries().get(from..).unwrap_or(&[]);
            if !rest.iter().all(Entry::is_optional) {
                return false;
            }
        }
        true
    }

    /// Descends into groups and climbs out of exhausted ones until the
    /// cursor rests on a tag entry or the end of the root.
    fn settle(&mut self, root: &Pattern) {
        loop {
            let Some(depth) = self.frames.len().checked_sub(1) else {
                return;
            };
            let Some((group, _)) = group_at(root, &self.frames[..depth]) else {
                return;
            };
            match group.entries().get(self.frames[depth].index) {
                Some(Entry::Tag(_)) => return,
                Some(Entry::Group { .. }) => self.frames.push(Frame::start()),
                None if depth == 0 => return,
                None => {
                    self.frames.pop();
                    if let Some(parent) = self.frames.last_mut() {
                        parent.index += 1;
                    }
                }
            }
        }
    }
}

/// Resolves the group reached by following `frames` from `root`, along with
/// whether that group is optional.
fn group_at<'p>(root: &'p Pattern, frames: &[Frame]) -> Option<(&'p Pattern, bool)> {
    let mut group = root;
    let mut optional = false;
    for frame in frames {
        match group.entries().get(frame.index) {
            Some(Entry::Group {
                pattern,
                optional: o,
            }) => {
                group = pattern;
                optional = *o;
            }
            _ => return None,
        }
    }
    Some((group, optional))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Mode;
    use crate::tag::category::{GENERIC, KEYWORD, RESERVED, WHITESPACE};

    fn nested() -> Pattern {
        Pattern::new()
            .must(KEYWORD)
            .optional_group(Pattern::new().must(RESERVED).can(WHITESPACE))
            .must(GENERIC)
    }

    fn mode_at(cursor: &Cursor, root: &Pattern) -> Option<Mode> {
        cursor.current(root).map(|e| e.mode)
    }

    #[test]
    fn walks_into_and_out_of_groups() {
        let p = nested();
        let mut c = Cursor::new(&p);
        assert_eq!(c.path(), vec![0]);
        c.advance(&p);
        assert_eq!(c.path(), vec![1, 0]);
        c.advance(&p);
        assert_eq!(c.path(), vec![1, 1]);
        assert_eq!(mode_at(&c, &p), Some(Mode::Optional));
        c.advance(&p);
        assert_eq!(c.path(), vec![2]);
        c.advance(&p);
        assert!(c.is_done(&p));
        assert!(c.current(&p).is_none());
    }

    #[test]
    fn leading_group_is_entered_on_creation() {
        let p = Pattern::new().group(Pattern::new().must(GENERIC));
        let c = Cursor::new(&p);
        assert_eq!(c.path(), vec![0, 0]);
    }

    #[test]
    fn empty_pattern_is_done_immediately() {
        let p = Pattern::new();
        assert!(Cursor::new(&p).is_done(&p));
        let p = Pattern::new().group(Pattern::new());
        assert!(Cursor::new(&p).is_done(&p));
    }

    #[test]
    fn skip_unconsumed_optional_group() {
        let p = nested();
        let mut c = Cursor::new(&p);
        c.mark_consumed();
        c.advance(&p);
        assert!(c.skip_optional_group(&p));
        assert_eq!(c.path(), vec![2]);
    }

    #[test]
    fn consumed_group_cannot_be_skipped() {
        let p = nested();
        let mut c = Cursor::new(&p);
        c.advance(&p);
        c.mark_consumed();
        c.advance(&p);
        assert!(!c.skip_optional_group(&p));
        assert_eq!(c.path(), vec![1, 1]);
    }

    #[test]
    fn mandatory_group_cannot_be_skipped() {
        let p = Pattern::new().group(Pattern::new().must(GENERIC));
        let mut c = Cursor::new(&p);
        assert!(!c.skip_optional_group(&p));
    }

    #[test]
    fn rest_is_optional() {
        let p = Pattern::new()
            .must(KEYWORD)
            .optional_group(Pattern::new().must(RESERVED))
            .can(WHITESPACE);
        let mut c = Cursor::new(&p);
        assert!(!c.rest_is_optional(&p));
        c.advance(&p);
        assert!(c.rest_is_optional(&p));
        // Once the group has consumed, its own remainder counts.
        let q = Pattern::new()
            .optional_group(Pattern::new().must(RESERVED).must(GENERIC))
            .can(WHITESPACE);
        let mut c = Cursor::new(&q);
        c.mark_consumed();
        c.advance(&q);
        assert!(!c.rest_is_optional(&q));
        c.advance(&q);
        assert!(c.rest_is_optional(&q));
    }

    #[test]
    fn reset_returns_to_start() {
        let p = nested();
        let mut c = Cursor::new(&p);
        c.advance(&p);
        c.mark_consumed();
        c.reset(&p);
        assert_eq!(c, Cursor::new(&p));
    }
}
