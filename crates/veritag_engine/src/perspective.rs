//! Full-coverage interval tag layers.

use crate::error::TagError;
use crate::tag::CompoundTag;
use veritag_source::Span;

/// One `[start, stop)` run of a perspective carrying a single tag.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Interval {
    /// The byte range covered.
    pub span: Span,
    /// The tag applied to the whole range.
    pub tag: CompoundTag,
}

impl Interval {
    fn new(start: usize, end: usize, tag: CompoundTag) -> Self {
        Self {
            span: Span::new(start, end),
            tag,
        }
    }
}

/// An independent tag layer over a text of fixed length.
///
/// The intervals are sorted, non-overlapping, non-empty, and together cover
/// exactly `[0, len)`. Every mutation preserves this.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Perspective {
    intervals: Vec<Interval>,
    len: usize,
}

impl Perspective {
    /// Creates a perspective with one generic interval over `[0, len)`.
    pub fn new(len: usize) -> Self {
        let intervals = if len == 0 {
            Vec::new()
        } else {
            vec![Interval::new(0, len, CompoundTag::generic())]
        };
        Self { intervals, len }
    }

    /// Returns the length of the text this perspective covers.
    pub fn text_len(&self) -> usize {
        self.len
    }

    /// Returns the intervals in order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Iterates the intervals in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    /// Tags `[start, stop)` with `label`, overwriting what was there.
    ///
    /// Intervals fully covered by the range are removed; partially covered
    /// intervals at either end keep their old tag outside the range. A
    /// zero-length range is a no-op. Byte offsets only; character boundary
    /// checks are done by [`TaggedText::tag`](crate::TaggedText::tag).
    pub fn tag(&mut self, start: usize, stop: usize, label: CompoundTag) -> Result<(), TagError> {
        if start > stop || stop > self.len {
            return Err(TagError::OutOfRange {
                start,
                stop,
                len: self.len,
            });
        }
        if start == stop {
            return Ok(());
        }

        let first = self.intervals.partition_point(|iv| iv.span.end <= start);
        let end = self.intervals.partition_point(|iv| iv.span.start < stop);
        let head = &self.intervals[first];
        let tail = &self.intervals[end - 1];

        let mut replacement = Vec::with_capacity(3);
        if head.span.start < start {
            replacement.push(Interval::new(head.span.start, start, head.tag.clone()));
        }
        let tail_rest = (tail.span.end > stop).then(|| Interval::new(stop, tail.span.end, tail.tag.clone()));
        replacement.push(Interval::new(start, stop, label));
        replacement.extend(tail_rest);

        self.intervals.splice(first..end, replacement);
        Ok(())
    }

    /// Returns the tag covering the byte at `offset`.
    pub fn tag_at(&self, offset: usize) -> Option<&CompoundTag> {
        let idx = self.intervals.partition_point(|iv| iv.span.end <= offset);
        self.intervals.get(idx).map(|iv| &iv.tag)
    }

    /// Iterates the spans whose tag matches `tag` under wildcard/set matching.
    pub fn ranges_of<'a>(&'a self, tag: &'a CompoundTag) -> impl Iterator<Item = Span> + 'a {
        self.intervals
            .iter()
            .filter(move |iv| iv.tag.matches(tag))
            .map(|iv| iv.span)
    }

    /// Returns each distinct tag once, in order of first appearance.
    pub fn distinct_tags(&self) -> Vec<CompoundTag> {
        let mut seen: Vec<CompoundTag> = Vec::new();
        for iv in &self.intervals {
            if !seen.contains(&iv.tag) {
                seen.push(iv.tag.clone());
            }
        }
        seen
    }

    /// Returns the spans still tagged exactly `(GENERIC)`.
    pub fn generic_spans(&self) -> Vec<Span> {
        self.intervals
            .iter()
            .filter(|iv| iv.tag.is_generic())
            .map(|iv| iv.span)
            .collect()
    }

    /// Checks the full-coverage invariant.
    pub fn is_complete(&self) -> bool {
        let mut pos = 0;
        for iv in &self.intervals {
            if iv.span.start != pos || iv.span.is_empty() {
                return false;
            }
            pos = iv.span.end;
        }
        pos == self.len
    }
}

impl<'a> IntoIterator for &'a Perspective {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
