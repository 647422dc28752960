//! Line cursor with one line of pushback.

use std::iter::Peekable;
use std::str::Lines;

/// Forward-only cursor over the lines of a text.
///
/// The last line handed out can be given back with
/// [`push_back`](Self::push_back); the next call to
/// [`next_line`](Self::next_line) returns it again. Only one line can be
/// pending at a time.
#[derive(Debug)]
pub struct LineCursor<'a> {
    lines: Peekable<Lines<'a>>,
    last: Option<&'a str>,
    pending: bool,
    consumed: usize,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor over `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().peekable(),
            last: None,
            pending: false,
            consumed: 0,
        }
    }

    /// Whether another line is available.
    pub fn has_more(&mut self) -> bool {
        self.pending || self.lines.peek().is_some()
    }

    /// Return the next line, or the pushed-back one.
    pub fn next_line(&mut self) -> Option<&'a str> {
        if self.pending {
            self.pending = false;
            self.consumed += 1;
            return self.last;
        }
        let line = self.lines.next()?;
        self.last = Some(line);
        self.consumed += 1;
        Some(line)
    }

    /// Give the last returned line back.
    ///
    /// Does nothing if no line has been read yet or a line is already
    /// pending.
    pub fn push_back(&mut self) {
        if self.last.is_some() && !self.pending {
            self.pending = true;
            self.consumed -= 1;
        }
    }

    /// Number of lines consumed so far (pushed-back lines do not count).
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.consumed
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_back_replays_last_line() {
        let mut cursor = LineCursor::new("one\ntwo\nthree");
        assert_eq!(cursor.next_line(), Some("one"));
        assert_eq!(cursor.next_line(), Some("two"));
        cursor.push_back();
        assert_eq!(cursor.line_number(), 1);
        assert_eq!(cursor.next_line(), Some("two"));
        assert_eq!(cursor.next_line(), Some("three"));
        assert!(!cursor.has_more());
        assert_eq!(cursor.next_line(), None);
    }

    #[test]
    fn push_back_is_single_step() {
        let mut cursor = LineCursor::new("a\nb");
        cursor.push_back();
        assert_eq!(cursor.next_line(), Some("a"));
        cursor.next_line();
        cursor.push_back();
        cursor.push_back();
        assert_eq!(cursor.next_line(), Some("b"));
        assert_eq!(cursor.next_line(), None);
    }

    #[test]
    fn pending_line_counts_as_more() {
        let mut cursor = LineCursor::new("only");
        cursor.next_line();
        assert!(!cursor.has_more());
        cursor.push_back();
        assert!(cursor.has_more());
        assert_eq!(cursor.collect::<Vec<_>>(), ["only"]);
    }
}
