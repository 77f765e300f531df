//! RFC 3986 generic URI grammar.
//!
//! ```text
//! URI           = scheme ":" hier-part [ "?" query ] [ "#" fragment ]
//! hier-part     = "//" authority path-abempty
//!               / path-absolute / path-rootless / path-empty
//! authority     = [ userinfo "@" ] host [ ":" port ]
//! host          = IP-literal / reg-name
//! ```
//!
//! `IPv4address` is not a separate host alternative: `reg-name` already
//! accepts every dotted-decimal string, so trying it first would not change
//! what matches.

use crate::combinator::{Matcher, alternate, at_least, between, exactly, optional, sequence};
use crate::cursor::{Cursor, alpha, digit, hexdig};
use crate::uri::{Marker, Markers};

fn colon(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_byte(b':')
}

fn slash(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_byte(b'/')
}

fn dot(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_byte(b'.')
}

fn at_sign(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_byte(b'@')
}

fn percent(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_byte(b'%')
}

fn question(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_byte(b'?')
}

fn hash(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_byte(b'#')
}

fn left_bracket(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_byte(b'[')
}

fn right_bracket(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_byte(b']')
}

fn empty(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_str("")
}

/// `pct-encoded = "%" HEXDIG HEXDIG`
pub(crate) fn pct_encoded(c: &mut Cursor<'_>) -> Option<usize> {
    sequence(c, &[percent, hexdig, hexdig])
}

fn unreserved_mark(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_if(|ch| matches!(ch, '-' | '.' | '_' | '~'))
}

/// `unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"`
fn unreserved(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[alpha, digit, unreserved_mark])
}

/// `sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
fn sub_delims(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_if(|ch| {
        matches!(
            ch,
            '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '='
        )
    })
}

/// `pchar = unreserved / pct-encoded / sub-delims / ":" / "@"`
fn pchar(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[unreserved, pct_encoded, sub_delims, colon, at_sign])
}

fn scheme_mark(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_if(|ch| matches!(ch, '+' | '-' | '.'))
}

fn scheme_char(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[alpha, digit, scheme_mark])
}

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
pub(crate) fn scheme(c: &mut Cursor<'_>) -> Option<usize> {
    let start = alpha(c)?;
    at_least(c, 0, scheme_char);
    Some(start)
}

fn userinfo_char(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[unreserved, pct_encoded, sub_delims, colon])
}

fn reg_name_char(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[unreserved, pct_encoded, sub_delims])
}

/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
fn reg_name(c: &mut Cursor<'_>) -> Option<usize> {
    at_least(c, 0, reg_name_char)
}

/// `dec-octet`: 0-255 without leading zeros.
///
/// Matches greedily and stops early instead of failing: `256` matches `25`
/// and `01` matches `0`, leaving the rest for the caller to reject.
pub(crate) fn dec_octet(c: &mut Cursor<'_>) -> Option<usize> {
    let first = c.peek_byte();
    let start = digit(c)?;
    if first == Some(b'0') {
        return Some(start);
    }
    let second = c.peek_byte();
    if digit(c).is_none() {
        return Some(start);
    }
    let third_at = c.checkpoint();
    let third = c.peek_byte();
    if digit(c).is_some() {
        let in_range = matches!(
            (first, second, third),
            (Some(b'1'), _, _)
                | (Some(b'2'), Some(b'0'..=b'4'), _)
                | (Some(b'2'), Some(b'5'), Some(b'0'..=b'5'))
        );
        if !in_range {
            c.restore(third_at);
        }
    }
    Some(start)
}

/// `IPv4address = dec-octet "." dec-octet "." dec-octet "." dec-octet`
fn ipv4_address(c: &mut Cursor<'_>) -> Option<usize> {
    sequence(c, &[dec_octet, dot, dec_octet, dot, dec_octet, dot, dec_octet])
}

/// `h16 = 1*4HEXDIG`
fn h16(c: &mut Cursor<'_>) -> Option<usize> {
    between(c, 1, 4, hexdig)
}

fn h16_colon(c: &mut Cursor<'_>) -> Option<usize> {
    sequence(c, &[h16, colon])
}

fn colon_h16(c: &mut Cursor<'_>) -> Option<usize> {
    sequence(c, &[colon, h16])
}

fn h16_pair(c: &mut Cursor<'_>) -> Option<usize> {
    sequence(c, &[h16, colon, h16])
}

/// `ls32 = ( h16 ":" h16 ) / IPv4address`
fn ls32(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[h16_pair, ipv4_address])
}

/// What precedes the explicit `h16 ":"` groups of an IPv6 form.
#[derive(Debug, Clone, Copy)]
enum Lead {
    /// No `::` at all.
    Full,
    /// A bare `::`.
    Elided,
    /// `[ *n( h16 ":" ) h16 ] "::"`.
    ElidedAfter(usize),
}

fn elided_prefix(c: &mut Cursor<'_>, extra_groups: usize) -> Option<usize> {
    let start = c.checkpoint();
    if h16(c).is_some() {
        between(c, 0, extra_groups, colon_h16);
    }
    if c.eat_str("::").is_none() {
        c.restore(start);
        return None;
    }
    Some(start.position())
}

fn ipv6_parts(c: &mut Cursor<'_>, lead: Lead, groups: usize, tail: Matcher) -> Option<()> {
    match lead {
        Lead::Full => {}
        Lead::Elided => {
            c.eat_str("::")?;
        }
        Lead::ElidedAfter(extra) => {
            elided_prefix(c, extra)?;
        }
    }
    exactly(c, groups, h16_colon)?;
    tail(c)?;
    // Only a form that spans the whole literal counts.
    (c.peek_byte() == Some(b']')).then_some(())
}

fn ipv6_form(c: &mut Cursor<'_>, lead: Lead, groups: usize, tail: Matcher) -> Option<usize> {
    let start = c.checkpoint();
    if ipv6_parts(c, lead, groups, tail).is_none() {
        c.restore(start);
        return None;
    }
    Some(start.position())
}

fn ipv6_full(c: &mut Cursor<'_>) -> Option<usize> {
    ipv6_form(c, Lead::Full, 6, ls32)
}

fn ipv6_leading(c: &mut Cursor<'_>) -> Option<usize> {
    ipv6_form(c, Lead::Elided, 5, ls32)
}

fn ipv6_after_1(c: &mut Cursor<'_>) -> Option<usize> {
    ipv6_form(c, Lead::ElidedAfter(0), 4, ls32)
}

fn ipv6_after_2(c: &mut Cursor<'_>) -> Option<usize> {
    ipv6_form(c, Lead::ElidedAfter(1), 3, ls32)
}

fn ipv6_after_3(c: &mut Cursor<'_>) -> Option<usize> {
    ipv6_form(c, Lead::ElidedAfter(2), 2, ls32)
}

fn ipv6_after_4(c: &mut Cursor<'_>) -> Option<usize> {
    ipv6_form(c, Lead::ElidedAfter(3), 1, ls32)
}

fn ipv6_after_5(c: &mut Cursor<'_>) -> Option<usize> {
    ipv6_form(c, Lead::ElidedAfter(4), 0, ls32)
}

fn ipv6_after_6(c: &mut Cursor<'_>) -> Option<usize> {
    ipv6_form(c, Lead::ElidedAfter(5), 0, h16)
}

fn ipv6_after_7(c: &mut Cursor<'_>) -> Option<usize> {
    ipv6_form(c, Lead::ElidedAfter(6), 0, empty)
}

/// `IPv6address`: the nine RFC 3986 forms, tried in order.
fn ipv6_address(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(
        c,
        &[
            ipv6_full,
            ipv6_leading,
            ipv6_after_1,
            ipv6_after_2,
            ipv6_after_3,
            ipv6_after_4,
            ipv6_after_5,
            ipv6_after_6,
            ipv6_after_7,
        ],
    )
}

fn future_char(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[unreserved, sub_delims, colon])
}

/// `IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`
fn ipv_future(c: &mut Cursor<'_>) -> Option<usize> {
    let start = c.checkpoint();
    let matched = c.eat_if(|ch| ch == 'v' || ch == 'V')?;
    if at_least(c, 1, hexdig).is_none() || dot(c).is_none() || at_least(c, 1, future_char).is_none()
    {
        c.restore(start);
        return None;
    }
    Some(matched)
}

fn ip_address(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[ipv6_address, ipv_future])
}

/// `IP-literal = "[" ( IPv6address / IPvFuture ) "]"`
fn ip_literal(c: &mut Cursor<'_>) -> Option<usize> {
    sequence(c, &[left_bracket, ip_address, right_bracket])
}

/// `host = IP-literal / reg-name`; always matches, possibly empty.
fn host(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[ip_literal, reg_name])
}

/// `port = *DIGIT`
fn port(c: &mut Cursor<'_>) -> Option<usize> {
    at_least(c, 0, digit)
}

/// `authority = [ userinfo "@" ] host [ ":" port ]`
///
/// Userinfo and host share most of their characters, so the authority is
/// scanned once as userinfo. If an `@` follows, the scan was the userinfo;
/// otherwise it was the host, cut back at its first `:` when there is one.
fn authority(c: &mut Cursor<'_>, marks: &mut Markers) {
    let run_start = c.checkpoint();
    let mut first_colon = None;
    loop {
        let here = c.checkpoint();
        let is_colon = c.peek_byte() == Some(b':');
        if userinfo_char(c).is_none() {
            break;
        }
        if is_colon && first_colon.is_none() {
            first_colon = Some(here);
        }
    }

    if let Some(at) = at_sign(c) {
        marks.set(Marker::Userinfo, run_start.position());
        marks.set(Marker::AtSign, at);
        marks.set_opt(Marker::Host, host(c));
    } else if c.position() == run_start.position() {
        marks.set_opt(Marker::Host, host(c));
    } else {
        marks.set(Marker::Host, run_start.position());
        if let Some(colon_at) = first_colon {
            c.restore(colon_at);
        }
    }

    if let Some(colon_at) = colon(c) {
        marks.set(Marker::PortColon, colon_at);
        marks.set_opt(Marker::Port, port(c));
    }
}

/// `segment = *pchar`
fn segment(c: &mut Cursor<'_>) -> Option<usize> {
    at_least(c, 0, pchar)
}

fn slash_segment(c: &mut Cursor<'_>) -> Option<usize> {
    sequence(c, &[slash, segment])
}

/// `path-abempty = *( "/" segment )`
fn path_abempty(c: &mut Cursor<'_>) -> Option<usize> {
    at_least(c, 0, slash_segment)
}

/// `path-rootless = segment-nz *( "/" segment )`
fn path_rootless(c: &mut Cursor<'_>) -> Option<usize> {
    let start = at_least(c, 1, pchar)?;
    path_abempty(c);
    Some(start)
}

/// `path-absolute = "/" [ segment-nz *( "/" segment ) ]`
fn path_absolute(c: &mut Cursor<'_>) -> Option<usize> {
    let start = slash(c)?;
    optional(c, path_rootless);
    Some(start)
}

/// `hier-part`, recording authority markers on the way; returns the path start.
fn hier_part(c: &mut Cursor<'_>, marks: &mut Markers) -> Option<usize> {
    if let Some(slashes) = c.eat_str("//") {
        marks.set(Marker::DoubleSlash, slashes);
        authority(c, marks);
        return path_abempty(c);
    }
    alternate(c, &[path_absolute, path_rootless, empty])
}

fn query_char(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[pchar, slash, question])
}

/// `query = *( pchar / "/" / "?" )`; `fragment` has the same form.
fn query(c: &mut Cursor<'_>) -> Option<usize> {
    at_least(c, 0, query_char)
}

/// Matches the `URI` rule and returns its markers.
///
/// Fails only when the input does not begin with `scheme ":"`. Everything
/// after that always matches some prefix; the caller decides whether the
/// whole input was consumed.
pub(crate) fn uri(c: &mut Cursor<'_>) -> Option<Markers> {
    let start = c.checkpoint();
    let mut marks = Markers::default();
    let scheme_start = scheme(c)?;
    let Some(scheme_colon) = colon(c) else {
        c.restore(start);
        return None;
    };
    marks.set(Marker::Scheme, scheme_start);
    marks.set(Marker::SchemeColon, scheme_colon);
    let path = hier_part(c, &mut marks);
    marks.set_opt(Marker::Path, path);

    if let Some(mark) = question(c) {
        marks.set(Marker::Question, mark);
        marks.set_opt(Marker::Query, query(c));
    }
    if let Some(mark) = hash(c) {
        marks.set(Marker::Hash, mark);
        marks.set_opt(Marker::Fragment, query(c));
    }
    marks.set(Marker::End, c.position());
    Some(marks)
}
