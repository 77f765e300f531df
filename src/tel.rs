//! Zero-copy telephone URI view.

use std::cmp::Ordering;
use std::fmt;

use tracing::trace;

use crate::config::TelOptions;
use crate::constants::{MAX_PARAMETER_RUNS, TEL_PREFIX};
use crate::cursor::Cursor;
use crate::error::{FieldError, TelError, TelErrorKind};
use crate::field::{copy_field, copy_parts, field_accessors};
use crate::rfc3966::{self, Subscriber};

/// A half-open byte range `start..stop` of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// First byte of the range
    pub start: usize,
    /// One past the last byte of the range
    pub stop: usize,
}

impl Span {
    /// Returns the number of bytes covered, or 0 if `stop` precedes `start`.
    #[must_use]
    pub const fn len(self) -> usize {
        self.stop.saturating_sub(self.start)
    }

    /// Returns true if the range covers nothing.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// Which form of `telephone-subscriber` matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumberKind {
    /// `+` and an E.164 number, valid without context
    Global,
    /// A number that is only meaningful within its `phone-context`
    Local,
}

/// Parameter positions of a telephone view.
///
/// Every span starts at the parameter's leading `;`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Params {
    pub(crate) extension: Option<Span>,
    pub(crate) isdn_subaddress: Option<Span>,
    pub(crate) phone_context: Option<Span>,
    pub(crate) runs: [Option<Span>; MAX_PARAMETER_RUNS],
}

/// A telephone URI component that [`Tel`] can measure and copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TelField {
    /// The number of a global-number form, including the `+`
    GlobalNumber,
    /// The number of a local-number form
    LocalNumber,
    /// The `;ext=` parameter
    Extension,
    /// The `;isub=` parameter
    IsdnSubaddress,
    /// The `;phone-context=` parameter
    PhoneContext,
    /// One run of consecutive generic parameters, by slot index
    Run(usize),
}

/// A `tel:` URI matched against the RFC 3966 grammar.
///
/// Parameter fields include their leading `;`. Generic (non-special)
/// parameters are grouped into runs of adjacent parameters; a special
/// parameter between two generic ones starts a new run.
///
/// # Examples
///
/// ```
/// use uri_pathfinder::{NumberKind, parse_telephone};
///
/// let tel = parse_telephone("tel:+1-201-555-0123;ext=42;foo=bar;baz");
/// assert_eq!(tel.number_kind(), Some(NumberKind::Global));
/// assert_eq!(tel.global_number(), Some("+1-201-555-0123"));
/// assert_eq!(tel.extension(), Some(";ext=42"));
/// assert_eq!(tel.run(0), Some(";foo=bar;baz"));
///
/// let tel = parse_telephone("tel:7042;phone-context=example.com");
/// assert_eq!(tel.local_number(), Some("7042"));
/// assert_eq!(tel.phone_context(), Some(";phone-context=example.com"));
///
/// assert!(!parse_telephone("tel:1234567890").is_match());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tel<'a> {
    input: &'a str,
    number: Option<(NumberKind, Span)>,
    params: Params,
}

impl<'a> Tel<'a> {
    /// Parses a telephone URI with default options.
    ///
    /// # Errors
    ///
    /// Returns `TelError` if:
    /// - The input is empty or lacks the `tel:` prefix
    /// - Neither a global nor a local number follows
    /// - A parameter name repeats, or a reserved name is misused
    /// - A global number has a `phone-context`, or a local number lacks one
    /// - Anything is left over after the last parameter
    pub fn parse(input: &'a str) -> Result<Self, TelError> {
        Self::parse_with(input, &TelOptions::default())
    }

    /// Parses a telephone URI with the given options.
    ///
    /// # Errors
    ///
    /// See [`Tel::parse`]. With strict ordering enabled, parameters out of
    /// RFC 3966 order are also rejected.
    pub fn parse_with(input: &'a str, options: &TelOptions) -> Result<Self, TelError> {
        Self::parse_inner(input, options)
            .map(|subscriber| Self::from_subscriber(input, subscriber))
            .map_err(|kind| TelError {
                input: input.to_string(),
                kind,
            })
    }

    /// A view of `input` with every component absent.
    #[must_use]
    pub fn unmatched(input: &'a str) -> Self {
        Self {
            input,
            number: None,
            params: Params::default(),
        }
    }

    const fn from_subscriber(input: &'a str, subscriber: Subscriber) -> Self {
        Self {
            input,
            number: Some((subscriber.kind, subscriber.number)),
            params: subscriber.params,
        }
    }

    fn parse_inner(input: &str, options: &TelOptions) -> Result<Subscriber, TelErrorKind> {
        if input.is_empty() {
            return Err(TelErrorKind::Empty);
        }

        let mut cursor = Cursor::with_classifiers(input, options.classifiers);
        if cursor.eat_str(TEL_PREFIX).is_none() {
            trace!(input, "missing tel: prefix");
            return Err(TelErrorKind::MissingPrefix);
        }

        let subscriber = rfc3966::telephone_subscriber(&mut cursor, options).inspect_err(|kind| {
            trace!(input, reason = %kind, "telephone URI rejected");
        })?;

        if let Some(char) = cursor.peek() {
            let position = cursor.position();
            trace!(input, position, %char, "telephone URI rejected");
            return Err(TelErrorKind::UnexpectedChar { char, position });
        }
        Ok(subscriber)
    }

    /// Returns true if the input matched the grammar.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.number.is_some()
    }

    /// Returns the text this view was parsed from.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.input
    }

    /// Returns which number form matched.
    #[must_use]
    pub fn number_kind(&self) -> Option<NumberKind> {
        self.number.map(|(kind, _)| kind)
    }

    /// Returns the number of whichever form matched.
    #[must_use]
    pub fn number(&self) -> Option<&'a str> {
        self.slice(self.number.map(|(_, span)| span))
    }

    /// Returns the number if it is global.
    #[must_use]
    pub fn global_number(&self) -> Option<&'a str> {
        self.field(TelField::GlobalNumber)
    }

    /// Returns the number if it is local.
    #[must_use]
    pub fn local_number(&self) -> Option<&'a str> {
        self.field(TelField::LocalNumber)
    }

    /// Returns the `;ext=` parameter.
    #[must_use]
    pub fn extension(&self) -> Option<&'a str> {
        self.field(TelField::Extension)
    }

    /// Returns the `;isub=` parameter.
    #[must_use]
    pub fn isdn_subaddress(&self) -> Option<&'a str> {
        self.field(TelField::IsdnSubaddress)
    }

    /// Returns the `;phone-context=` parameter.
    #[must_use]
    pub fn phone_context(&self) -> Option<&'a str> {
        self.field(TelField::PhoneContext)
    }

    /// Returns generic-parameter run `index` (0 to 3).
    #[must_use]
    pub fn run(&self, index: usize) -> Option<&'a str> {
        self.field(TelField::Run(index))
    }

    /// Iterates over the generic-parameter runs in input order.
    pub fn runs(&self) -> impl Iterator<Item = &'a str> + Clone + '_ {
        self.params.runs.iter().filter_map(|span| self.slice(*span))
    }

    /// Returns all generic parameters, the runs concatenated in input order.
    #[must_use]
    pub fn params(&self) -> Option<String> {
        let mut runs = self.runs().peekable();
        runs.peek()?;
        Some(runs.collect())
    }

    /// Returns the slice of `field`, if present.
    #[must_use]
    pub fn field(&self, field: TelField) -> Option<&'a str> {
        let span = match field {
            TelField::GlobalNumber => self.number_of(NumberKind::Global),
            TelField::LocalNumber => self.number_of(NumberKind::Local),
            TelField::Extension => self.params.extension,
            TelField::IsdnSubaddress => self.params.isdn_subaddress,
            TelField::PhoneContext => self.params.phone_context,
            TelField::Run(index) => self.params.runs.get(index).copied().flatten(),
        };
        self.slice(span)
    }

    fn number_of(&self, kind: NumberKind) -> Option<Span> {
        self.number
            .filter(|(found, _)| *found == kind)
            .map(|(_, span)| span)
    }

    fn slice(&self, span: Option<Span>) -> Option<&'a str> {
        span.and_then(|span| self.input.get(span.start..span.stop))
    }

    /// Returns the length in bytes of `field`, or 0 if absent.
    #[must_use]
    pub fn len(&self, field: TelField) -> usize {
        self.field(field).map_or(0, str::len)
    }

    /// Copies `field` into `buf` and terminates it with a `0` byte.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Absent`] if the field is absent and
    /// [`FieldError::BufferTooSmall`] if `buf` is not longer than the field.
    pub fn get<'b>(&self, field: TelField, buf: &'b mut [u8]) -> Result<&'b str, FieldError> {
        copy_field(self.field(field), buf)
    }

    field_accessors!(TelField {
        len_global_number, get_global_number => GlobalNumber, "global number";
        len_local_number, get_local_number => LocalNumber, "local number";
        len_extension, get_extension => Extension, "extension parameter";
        len_isdn_subaddress, get_isdn_subaddress => IsdnSubaddress, "ISDN subaddress parameter";
        len_phone_context, get_phone_context => PhoneContext, "phone context parameter";
    });

    /// Returns the length in bytes of run `index`, or 0 if absent.
    #[must_use]
    pub fn len_run(&self, index: usize) -> usize {
        self.len(TelField::Run(index))
    }

    /// Copies run `index` into `buf` and terminates it with a `0` byte.
    ///
    /// # Errors
    ///
    /// See [`Tel::get`].
    pub fn get_run<'b>(&self, index: usize, buf: &'b mut [u8]) -> Result<&'b str, FieldError> {
        self.get(TelField::Run(index), buf)
    }

    /// Returns the total length in bytes of all runs.
    #[must_use]
    pub fn len_params(&self) -> usize {
        self.runs().map(str::len).sum()
    }

    /// Copies all runs, concatenated, into `buf` and terminates them with a
    /// `0` byte.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Absent`] if there are no generic parameters and
    /// [`FieldError::BufferTooSmall`] if `buf` is not longer than
    /// [`Tel::len_params`].
    pub fn get_params<'b>(&self, buf: &'b mut [u8]) -> Result<&'b str, FieldError> {
        copy_parts(self.runs(), buf)
    }
}

/// Matches `text` against the RFC 3966 `telephone-uri` rule.
///
/// Never fails: text that does not match yields a view with every component
/// absent. Use [`Tel::parse`] to learn why a match failed.
#[must_use]
pub fn parse_telephone(text: &str) -> Tel<'_> {
    parse_telephone_with(text, &TelOptions::default())
}

/// Matches `text` against the RFC 3966 `telephone-uri` rule with options.
#[must_use]
pub fn parse_telephone_with<'a>(text: &'a str, options: &TelOptions) -> Tel<'a> {
    Tel::parse_inner(text, options).map_or_else(
        |_| Tel::unmatched(text),
        |subscriber| Tel::from_subscriber(text, subscriber),
    )
}

impl fmt::Display for Tel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.input)
    }
}

impl AsRef<str> for Tel<'_> {
    fn as_ref(&self) -> &str {
        self.input
    }
}

impl<'a> TryFrom<&'a str> for Tel<'a> {
    type Error = TelError;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialOrd for Tel<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tel<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.input
            .cmp(other.input)
            .then_with(|| self.number.cmp(&other.number))
            .then_with(|| self.params.cmp(&other.params))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Tel<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.input)
    }
}

#[cfg(feature = "serde")]
impl<'de: 'a, 'a> serde::Deserialize<'de> for Tel<'a> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: &'de str = serde::Deserialize::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}
