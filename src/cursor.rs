//! Input cursor and primitive character matchers.
//!
//! Every matcher in this crate follows one protocol: on success it returns
//! the byte position where the match started and leaves the cursor just past
//! the match; on failure it returns `None` and leaves the cursor exactly where
//! it was.
//!
//! The cursor only ever advances by whole UTF-8 characters, so every position
//! a matcher reports is a valid slice boundary of the input.

use crate::config::Classifiers;

/// A character-class recognizer following the matcher protocol.
///
/// Classifiers replace the built-in `ALPHA` and `DIGIT` classes (see
/// [`Classifiers`]). A classifier must advance the cursor and return the
/// start position on success, and must leave the cursor untouched and
/// return `None` on failure.
pub type Classifier = fn(&mut Cursor<'_>) -> Option<usize>;

/// A read position within an input being matched.
///
/// The cursor is `Copy`: speculative parsing works on a copy and commits it
/// back on success, or saves a [`Checkpoint`] and restores it on failure.
///
/// # Examples
///
/// ```
/// use uri_pathfinder::Cursor;
///
/// let mut cursor = Cursor::new("tel:+1");
/// assert_eq!(cursor.eat_str("tel:"), Some(0));
/// assert_eq!(cursor.eat_str("tel:"), None);
/// assert_eq!(cursor.position(), 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    classifiers: Classifiers,
}

/// A saved cursor position that can be restored later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// Returns the byte position this checkpoint refers to.
    #[must_use]
    pub const fn position(self) -> usize {
        self.0
    }
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `input` using ASCII classifiers.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_classifiers(input, Classifiers::ascii())
    }

    /// Creates a cursor at the start of `input` using the given classifiers.
    #[must_use]
    pub const fn with_classifiers(input: &'a str, classifiers: Classifiers) -> Self {
        Self {
            input,
            pos: 0,
            classifiers,
        }
    }

    /// Returns the whole input this cursor walks over.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the classifiers in effect for this cursor.
    #[must_use]
    pub const fn classifiers(&self) -> Classifiers {
        self.classifiers
    }

    /// Returns the unconsumed part of the input.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    /// Returns true if the whole input has been consumed.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Returns the next byte without consuming it.
    #[must_use]
    pub fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Saves the current position.
    #[must_use]
    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    /// Rewinds (or fast-forwards) to a saved position.
    ///
    /// The checkpoint must have been taken from this cursor or a copy of it.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        debug_assert!(
            self.input.is_char_boundary(checkpoint.0),
            "checkpoint {} is not a character boundary",
            checkpoint.0
        );
        self.pos = checkpoint.0;
    }

    /// Matches one ASCII byte.
    pub fn eat_byte(&mut self, byte: u8) -> Option<usize> {
        if byte.is_ascii() && self.peek_byte() == Some(byte) {
            let start = self.pos;
            self.pos += 1;
            Some(start)
        } else {
            None
        }
    }

    /// Matches a literal string, case-sensitively.
    pub fn eat_str(&mut self, literal: &str) -> Option<usize> {
        if self.remaining().starts_with(literal) {
            let start = self.pos;
            self.pos += literal.len();
            Some(start)
        } else {
            None
        }
    }

    /// Matches one character satisfying `predicate`.
    pub fn eat_if(&mut self, predicate: impl FnOnce(char) -> bool) -> Option<usize> {
        let ch = self.peek().filter(|&ch| predicate(ch))?;
        let start = self.pos;
        self.pos += ch.len_utf8();
        Some(start)
    }
}

/// `ALPHA`, as decided by the cursor's alpha classifier.
pub fn alpha(cursor: &mut Cursor<'_>) -> Option<usize> {
    let classify = cursor.classifiers.alpha;
    classify(cursor)
}

/// `DIGIT`, as decided by the cursor's digit classifier.
pub fn digit(cursor: &mut Cursor<'_>) -> Option<usize> {
    let classify = cursor.classifiers.digit;
    classify(cursor)
}

/// `HEXDIG`: ASCII hexadecimal digit in either case.
pub fn hexdig(cursor: &mut Cursor<'_>) -> Option<usize> {
    cursor.eat_if(|ch| ch.is_ascii_hexdigit())
}

/// ASCII letter classifier (the default `ALPHA`).
pub fn ascii_alpha(cursor: &mut Cursor<'_>) -> Option<usize> {
    cursor.eat_if(|ch| ch.is_ascii_alphabetic())
}

/// ASCII digit classifier (the default `DIGIT`).
pub fn ascii_digit(cursor: &mut Cursor<'_>) -> Option<usize> {
    cursor.eat_if(|ch| ch.is_ascii_digit())
}

/// Unicode letter classifier: any alphabetic code point.
///
/// Installing it as the alpha classifier lets internationalized names such
/// as `пример.рф` through the registered-name and scheme rules.
pub fn unicode_alpha(cursor: &mut Cursor<'_>) -> Option<usize> {
    cursor.eat_if(char::is_alphabetic)
}
