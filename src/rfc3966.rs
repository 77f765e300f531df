//! RFC 3966 `telephone-subscriber` grammar.
//!
//! ```text
//! telephone-subscriber = global-number / local-number
//! global-number        = global-number-digits *par
//! local-number         = local-number-digits *par context *par
//! par                  = parameter / extension / isdn-subaddress
//! ```
//!
//! `context` is folded into the parameter loop: the three reserved
//! parameters are tried before the generic `parameter` rule, which would
//! otherwise claim their names.

use tracing::trace;

use crate::combinator::{Matcher, alternate, at_least, sequence};
use crate::config::TelOptions;
use crate::constants::{EXTENSION, ISDN_SUBADDRESS, MAX_PARAMETER_RUNS, PHONE_CONTEXT};
use crate::cursor::{Checkpoint, Cursor, alpha, digit, hexdig};
use crate::error::TelErrorKind;
use crate::name_set::{InsertError, NameSet};
use crate::rfc3986::pct_encoded;
use crate::tel::{NumberKind, Params, Span};

fn dash(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_byte(b'-')
}

fn equals(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_byte(b'=')
}

/// `alphanum = ALPHA / DIGIT`
fn alphanum(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[alpha, digit])
}

/// `visual-separator = "-" / "." / "(" / ")"`
fn visual_separator(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_if(|ch| matches!(ch, '-' | '.' | '(' | ')'))
}

fn star_or_pound(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_if(|ch| matches!(ch, '*' | '#'))
}

/// `phonedigit = DIGIT / visual-separator`
fn phonedigit(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[digit, visual_separator])
}

/// `phonedigit-hex = HEXDIG / "*" / "#" / visual-separator`
fn phonedigit_hex(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[hexdig, star_or_pound, visual_separator])
}

/// `mark = "-" / "_" / "." / "!" / "~" / "*" / "'" / "(" / ")"`
fn mark(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_if(|ch| matches!(ch, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')'))
}

/// `unreserved = alphanum / mark`
fn unreserved(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[alphanum, mark])
}

/// `reserved` without `;`, so a subaddress ends at the next parameter.
fn reserved(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_if(|ch| matches!(ch, '/' | '?' | ':' | '@' | '&' | '=' | '+' | '$' | ','))
}

/// `uric = reserved / unreserved / pct-encoded`
fn uric(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[reserved, unreserved, pct_encoded])
}

/// `param-unreserved = "[" / "]" / "/" / ":" / "&" / "+" / "$"`
fn param_unreserved(c: &mut Cursor<'_>) -> Option<usize> {
    c.eat_if(|ch| matches!(ch, '[' | ']' | '/' | ':' | '&' | '+' | '$'))
}

/// `paramchar = param-unreserved / unreserved / pct-encoded`
fn paramchar(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[param_unreserved, unreserved, pct_encoded])
}

/// `pvalue = 1*paramchar`
fn pvalue(c: &mut Cursor<'_>) -> Option<usize> {
    at_least(c, 1, paramchar)
}

fn pname_char(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[alphanum, dash])
}

/// `pname = 1*( alphanum / "-" )`
fn pname(c: &mut Cursor<'_>) -> Option<usize> {
    at_least(c, 1, pname_char)
}

fn pvalue_assignment(c: &mut Cursor<'_>) -> Option<usize> {
    sequence(c, &[equals, pvalue])
}

/// `domainlabel = alphanum / alphanum *( alphanum / "-" ) alphanum`
///
/// Scans alphanumerics and dashes, then gives back any trailing dashes.
fn domainlabel(c: &mut Cursor<'_>) -> Option<usize> {
    let start = alphanum(c)?;
    let mut last_alphanum = c.checkpoint();
    loop {
        if alphanum(c).is_some() {
            last_alphanum = c.checkpoint();
        } else if dash(c).is_none() {
            break;
        }
    }
    c.restore(last_alphanum);
    Some(start)
}

fn starts_with_digit(c: &Cursor<'_>, label: Checkpoint) -> bool {
    let mut probe = *c;
    probe.restore(label);
    digit(&mut probe).is_some()
}

/// `domainname = *( domainlabel "." ) toplabel [ "." ]`
///
/// A `toplabel` is a `domainlabel` that starts with a letter. Labels are
/// scanned in one pass, remembering where the last label that could be a
/// top label ended (with its optional dot). The cursor is then put back
/// there.
fn domainname(c: &mut Cursor<'_>) -> Option<usize> {
    let start = c.checkpoint();
    let mut label = c.checkpoint();
    domainlabel(c)?;
    let mut top_end = None;
    loop {
        let dot = c.eat_byte(b'.');
        if !starts_with_digit(c, label) {
            top_end = Some(c.checkpoint());
        }
        if dot.is_none() {
            break;
        }
        label = c.checkpoint();
        if domainlabel(c).is_none() {
            break;
        }
    }

    if let Some(end) = top_end {
        c.restore(end);
        Some(start.position())
    } else {
        c.restore(start);
        None
    }
}

/// `global-number-digits = "+" *phonedigit DIGIT *phonedigit`
fn global_number_digits(c: &mut Cursor<'_>) -> Option<usize> {
    let start = c.checkpoint();
    let plus = c.eat_byte(b'+')?;
    // Separators first, so the next character must be the mandatory DIGIT.
    at_least(c, 0, visual_separator);
    if at_least(c, 1, phonedigit).is_none() {
        c.restore(start);
        return None;
    }
    Some(plus)
}

/// `local-number-digits = *phonedigit-hex ( HEXDIG / "*" / "#" ) *phonedigit-hex`
fn local_number_digits(c: &mut Cursor<'_>) -> Option<usize> {
    let start = c.checkpoint();
    at_least(c, 0, visual_separator);
    if at_least(c, 1, phonedigit_hex).is_none() {
        c.restore(start);
        return None;
    }
    Some(start.position())
}

/// `descriptor = domainname / global-number-digits`
fn descriptor(c: &mut Cursor<'_>) -> Option<usize> {
    alternate(c, &[domainname, global_number_digits])
}

fn extension_value(c: &mut Cursor<'_>) -> Option<usize> {
    at_least(c, 1, phonedigit)
}

fn isdn_subaddress_value(c: &mut Cursor<'_>) -> Option<usize> {
    at_least(c, 1, uric)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamKind {
    Extension,
    IsdnSubaddress,
    PhoneContext,
    Generic,
}

impl ParamKind {
    /// Position class under strict ordering.
    const fn rank(self) -> u8 {
        match self {
            Self::Extension | Self::IsdnSubaddress => 0,
            Self::PhoneContext => 1,
            Self::Generic => 2,
        }
    }
}

/// One parameter as matched: its kind, its whole span from `;`, and its name.
#[derive(Debug, Clone, Copy)]
struct Parameter {
    kind: ParamKind,
    span: Span,
    name: Span,
}

/// `";" name "=" value` for a reserved name; returns the name's span.
fn reserved_parameter(c: &mut Cursor<'_>, name: &str, value: Matcher) -> Option<Span> {
    let start = c.checkpoint();
    let name_start = c.eat_str(name)?;
    let name_stop = c.position();
    if equals(c).is_none() || value(c).is_none() {
        c.restore(start);
        return None;
    }
    Some(Span {
        start: name_start,
        stop: name_stop,
    })
}

fn parameter(c: &mut Cursor<'_>) -> Option<Parameter> {
    let start = c.checkpoint();
    let semicolon = c.eat_byte(b';')?;
    let (kind, name) = if let Some(name) = reserved_parameter(c, EXTENSION, extension_value) {
        (ParamKind::Extension, name)
    } else if let Some(name) = reserved_parameter(c, ISDN_SUBADDRESS, isdn_subaddress_value) {
        (ParamKind::IsdnSubaddress, name)
    } else if let Some(name) = reserved_parameter(c, PHONE_CONTEXT, descriptor) {
        (ParamKind::PhoneContext, name)
    } else if let Some(name_start) = pname(c) {
        let name = Span {
            start: name_start,
            stop: c.position(),
        };
        pvalue_assignment(c);
        (ParamKind::Generic, name)
    } else {
        c.restore(start);
        return None;
    };
    Some(Parameter {
        kind,
        span: Span {
            start: semicolon,
            stop: c.position(),
        },
        name,
    })
}

impl Params {
    fn fill(slot: &mut Option<Span>, span: Span, name: &str) -> Result<(), TelErrorKind> {
        if slot.is_some() {
            return Err(TelErrorKind::DuplicateParameter {
                name: name.to_string(),
            });
        }
        *slot = Some(span);
        Ok(())
    }

    /// Adds a generic parameter, either extending the last run or opening
    /// a new one.
    fn push_generic(&mut self, span: Span, extends_run: bool) -> Result<(), TelErrorKind> {
        if extends_run
            && let Some(run) = self.runs.iter_mut().rev().find_map(Option::as_mut)
        {
            run.stop = span.stop;
            return Ok(());
        }
        let slot = self
            .runs
            .iter_mut()
            .find(|run| run.is_none())
            .ok_or(TelErrorKind::TooManyRuns {
                max: MAX_PARAMETER_RUNS,
            })?;
        *slot = Some(span);
        Ok(())
    }
}

/// Accumulates a parameter list into [`Params`].
struct ParamList<'a> {
    input: &'a str,
    names: NameSet<'a>,
    params: Params,
    previous: Option<ParamKind>,
    last_generic: Option<&'a str>,
    strict_ordering: bool,
}

impl<'a> ParamList<'a> {
    fn new(input: &'a str, options: &TelOptions) -> Self {
        Self {
            input,
            names: NameSet::with_capacity(options.parameter_capacity),
            params: Params::default(),
            previous: None,
            last_generic: None,
            strict_ordering: options.strict_ordering,
        }
    }

    fn accept(&mut self, parameter: Parameter) -> Result<(), TelErrorKind> {
        let name = self
            .input
            .get(parameter.name.start..parameter.name.stop)
            .unwrap_or_default();

        if parameter.kind == ParamKind::Generic
            && matches!(name, EXTENSION | ISDN_SUBADDRESS | PHONE_CONTEXT)
        {
            return Err(TelErrorKind::MalformedParameter {
                name: name.to_string(),
            });
        }

        self.names
            .insert(name.as_bytes())
            .map_err(|err| match err {
                InsertError::Duplicate => TelErrorKind::DuplicateParameter {
                    name: name.to_string(),
                },
                InsertError::Full => TelErrorKind::ParameterLimit {
                    max: self.names.capacity(),
                },
            })?;

        if self.strict_ordering {
            self.check_order(parameter.kind, name)?;
        }

        match parameter.kind {
            ParamKind::Extension => {
                Params::fill(&mut self.params.extension, parameter.span, name)?;
            }
            ParamKind::IsdnSubaddress => {
                Params::fill(&mut self.params.isdn_subaddress, parameter.span, name)?;
            }
            ParamKind::PhoneContext => {
                Params::fill(&mut self.params.phone_context, parameter.span, name)?;
            }
            ParamKind::Generic => {
                let extends_run = self.previous == Some(ParamKind::Generic);
                self.params.push_generic(parameter.span, extends_run)?;
            }
        }
        self.previous = Some(parameter.kind);
        Ok(())
    }

    /// `ext`/`isub` first, then `phone-context`, then generic parameters
    /// in strictly increasing case-insensitive name order.
    fn check_order(&mut self, kind: ParamKind, name: &'a str) -> Result<(), TelErrorKind> {
        let rank_regressed = self
            .previous
            .is_some_and(|previous| previous.rank() > kind.rank());
        let name_regressed = kind == ParamKind::Generic
            && self
                .last_generic
                .is_some_and(|previous| !name_precedes(previous, name));
        if rank_regressed || name_regressed {
            return Err(TelErrorKind::OutOfOrder {
                name: name.to_string(),
            });
        }
        if kind == ParamKind::Generic {
            self.last_generic = Some(name);
        }
        Ok(())
    }
}

fn name_precedes(a: &str, b: &str) -> bool {
    a.bytes()
        .map(|byte| byte.to_ascii_lowercase())
        .lt(b.bytes().map(|byte| byte.to_ascii_lowercase()))
}

/// `*par`, with `context` accepted among the parameters.
fn parameters(c: &mut Cursor<'_>, options: &TelOptions) -> Result<Params, TelErrorKind> {
    let mut list = ParamList::new(c.input(), options);
    while let Some(parameter) = parameter(c) {
        list.accept(parameter)?;
    }
    trace!(
        parameters = list.names.len(),
        runs = list.params.runs.iter().flatten().count(),
        "parameter list matched"
    );
    Ok(list.params)
}

/// A matched `telephone-subscriber`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Subscriber {
    pub(crate) kind: NumberKind,
    pub(crate) number: Span,
    pub(crate) params: Params,
}

fn global_number(c: &mut Cursor<'_>, options: &TelOptions) -> Result<Subscriber, TelErrorKind> {
    let start = global_number_digits(c).ok_or(TelErrorKind::InvalidNumber)?;
    let number = Span {
        start,
        stop: c.position(),
    };
    let params = parameters(c, options)?;
    if params.phone_context.is_some() {
        return Err(TelErrorKind::PhoneContextForbidden);
    }
    Ok(Subscriber {
        kind: NumberKind::Global,
        number,
        params,
    })
}

fn local_number(c: &mut Cursor<'_>, options: &TelOptions) -> Result<Subscriber, TelErrorKind> {
    let start = local_number_digits(c).ok_or(TelErrorKind::InvalidNumber)?;
    let number = Span {
        start,
        stop: c.position(),
    };
    let params = parameters(c, options)?;
    if params.phone_context.is_none() {
        return Err(TelErrorKind::PhoneContextRequired);
    }
    Ok(Subscriber {
        kind: NumberKind::Local,
        number,
        params,
    })
}

/// `telephone-subscriber = global-number / local-number`
///
/// When both forms fail, the reported reason is the local form's unless the
/// input got far enough to be recognizably global.
pub(crate) fn telephone_subscriber(
    c: &mut Cursor<'_>,
    options: &TelOptions,
) -> Result<Subscriber, TelErrorKind> {
    let start = c.checkpoint();
    global_number(c, options).or_else(|global| {
        c.restore(start);
        local_number(c, options).map_err(|local| {
            c.restore(start);
            if global == TelErrorKind::InvalidNumber {
                local
            } else {
                global
            }
        })
    })
}
