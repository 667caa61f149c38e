use std::ops::Range;

/// A candidate payload: the half-open byte range `[start, end)` of the data
/// section between two consecutive boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Split a section of `section_len` bytes at `offsets`.
///
/// The payloads are assumed to be tightly packed, so every boundary ends the
/// previous candidate and starts the next one. The section length is added
/// as the final boundary. Candidates shorter than `min_size` are dropped,
/// which also takes care of duplicate offsets.
///
/// Boundaries outside `0..=section_len` (negative or oversized addends) can
/// never delimit section bytes; ranges touching them are dropped.
pub fn segment(mut offsets: Vec<i64>, section_len: usize, min_size: usize) -> Vec<Segment> {
    offsets.push(section_len as i64);
    offsets.sort_unstable();

    let mut segments = Vec::new();
    let mut prev = 0i64;

    for off in offsets {
        let start = prev;
        prev = off;

        if off.saturating_sub(start) < min_size as i64 {
            continue;
        }

        let (Ok(start), Ok(end)) = (usize::try_from(start), usize::try_from(off)) else {
            continue;
        };
        if end > section_len {
            continue;
        }

        segments.push(Segment { start, end });
    }

    segments
}
