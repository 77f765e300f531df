//! Backtracking combinators.
//!
//! These build grammar rules out of smaller matchers. Each combinator obeys
//! the matcher protocol described in [`crate::cursor`]: on failure the cursor
//! is rewound to where the combinator started.
//!
//! Repetition is greedy and never gives characters back. A rule such as
//! `1*pchar "/"` whose tail could be eaten by the repeated part must be
//! written so the repetition excludes the tail.

use crate::cursor::Cursor;

/// A grammar rule following the matcher protocol.
pub type Matcher = fn(&mut Cursor<'_>) -> Option<usize>;

/// Matches `parser` exactly `n` times in a row.
///
/// Zero repetitions always succeed without consuming anything.
pub fn exactly<'a, P>(cursor: &mut Cursor<'a>, n: usize, parser: P) -> Option<usize>
where
    P: Fn(&mut Cursor<'a>) -> Option<usize>,
{
    let start = cursor.checkpoint();
    for _ in 0..n {
        if parser(cursor).is_none() {
            cursor.restore(start);
            return None;
        }
    }
    Some(start.position())
}

/// Matches `parser` at least `n` times, then as many more times as it will go.
pub fn at_least<'a, P>(cursor: &mut Cursor<'a>, n: usize, parser: P) -> Option<usize>
where
    P: Fn(&mut Cursor<'a>) -> Option<usize>,
{
    let start = exactly(cursor, n, &parser)?;
    repeat(cursor, usize::MAX, &parser);
    Some(start)
}

/// Matches `parser` between `min` and `max` times, greedily.
pub fn between<'a, P>(cursor: &mut Cursor<'a>, min: usize, max: usize, parser: P) -> Option<usize>
where
    P: Fn(&mut Cursor<'a>) -> Option<usize>,
{
    let start = exactly(cursor, min, &parser)?;
    repeat(cursor, max.saturating_sub(min), &parser);
    Some(start)
}

/// Optional match: succeeds at the current position when `parser` fails.
pub fn optional<'a, P>(cursor: &mut Cursor<'a>, parser: P) -> Option<usize>
where
    P: Fn(&mut Cursor<'a>) -> Option<usize>,
{
    let start = cursor.position();
    parser(cursor).or(Some(start))
}

/// Tries each alternative in order; the first that matches wins.
pub fn alternate(cursor: &mut Cursor<'_>, parsers: &[Matcher]) -> Option<usize> {
    for parser in parsers {
        let mut trial = *cursor;
        if let Some(start) = parser(&mut trial) {
            *cursor = trial;
            return Some(start);
        }
    }
    None
}

/// Matches every parser in order, or none of them.
///
/// Returns the start position of the first element.
pub fn sequence(cursor: &mut Cursor<'_>, parsers: &[Matcher]) -> Option<usize> {
    let (first, rest) = parsers.split_first()?;
    let start = cursor.checkpoint();
    let matched = first(cursor)?;
    for parser in rest {
        if parser(cursor).is_none() {
            cursor.restore(start);
            return None;
        }
    }
    Some(matched)
}

// Stops early on a match that consumed nothing, otherwise a rule that can
// match the empty string would repeat forever.
fn repeat<'a, P>(cursor: &mut Cursor<'a>, limit: usize, parser: P)
where
    P: Fn(&mut Cursor<'a>) -> Option<usize>,
{
    for _ in 0..limit {
        let before = cursor.position();
        if parser(cursor).is_none() || cursor.position() == before {
            break;
        }
    }
}
