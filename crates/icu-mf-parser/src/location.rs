use serde::Serialize;

/// A single point in the message source.
///
/// `offset` counts UTF-8 bytes from the start of the message; `line` and
/// `column` are 1-based and `column` counts characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LocationDetails {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl LocationDetails {
    pub const fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl Default for LocationDetails {
    fn default() -> Self {
        Self::new(0, 1, 1)
    }
}

/// A span of source text, `start` inclusive and `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    start: LocationDetails,
    end: LocationDetails,
}

impl Location {
    pub fn new(start: LocationDetails, end: LocationDetails) -> Self {
        debug_assert!(start.offset <= end.offset, "location ends before it starts");
        Self { start, end }
    }

    pub fn start(&self) -> LocationDetails {
        self.start
    }

    pub fn end(&self) -> LocationDetails {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// The source text covered by this span, if it lies within `source`.
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start.offset..self.end.offset)
    }
}
