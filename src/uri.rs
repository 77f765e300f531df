//! Zero-copy URI view.

use std::cmp::Ordering;
use std::fmt;

use tracing::trace;

use crate::config::Classifiers;
use crate::cursor::Cursor;
use crate::error::{FieldError, ParseError, ParseErrorKind};
use crate::field::{copy_field, field_accessors};
use crate::rfc3986;

/// Positions recorded while matching a URI.
///
/// Variants are listed in input order. A field runs from its own marker to
/// the next marker that is present, so absent optional parts never need
/// special handling when measuring a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Marker {
    /// Start of the scheme
    Scheme,
    /// The `:` after the scheme
    SchemeColon,
    /// The `//` that introduces an authority
    DoubleSlash,
    /// Start of the userinfo
    Userinfo,
    /// The `@` after the userinfo
    AtSign,
    /// Start of the host
    Host,
    /// The `:` before the port
    PortColon,
    /// Start of the port
    Port,
    /// Start of the path
    Path,
    /// The `?` before the query
    Question,
    /// Start of the query
    Query,
    /// The `#` before the fragment
    Hash,
    /// Start of the fragment
    Fragment,
    /// One past the last matched byte
    End,
}

impl Marker {
    /// Every marker, in input order.
    pub const ALL: [Self; 14] = [
        Self::Scheme,
        Self::SchemeColon,
        Self::DoubleSlash,
        Self::Userinfo,
        Self::AtSign,
        Self::Host,
        Self::PortColon,
        Self::Port,
        Self::Path,
        Self::Question,
        Self::Query,
        Self::Hash,
        Self::Fragment,
        Self::End,
    ];

    const fn index(self) -> usize {
        self as usize
    }
}

/// The marker table of one URI view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Markers([Option<usize>; 14]);

impl Markers {
    pub(crate) const fn get(&self, marker: Marker) -> Option<usize> {
        self.0[marker.index()]
    }

    pub(crate) const fn set(&mut self, marker: Marker, position: usize) {
        self.0[marker.index()] = Some(position);
    }

    pub(crate) const fn set_opt(&mut self, marker: Marker, position: Option<usize>) {
        self.0[marker.index()] = position;
    }

    /// The first present marker after `marker`.
    fn next_after(&self, marker: Marker) -> Option<usize> {
        self.0[marker.index() + 1..].iter().find_map(|position| *position)
    }
}

/// A URI component that [`Uri`] can measure and copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UriField {
    /// `scheme`
    Scheme,
    /// `userinfo`, without the trailing `@`
    Userinfo,
    /// `host`, including the brackets of an IP literal
    Host,
    /// `port`, without the leading `:`
    Port,
    /// `path`
    Path,
    /// `query`, without the leading `?`
    Query,
    /// `fragment`, without the leading `#`
    Fragment,
}

impl UriField {
    const fn marker(self) -> Marker {
        match self {
            Self::Scheme => Marker::Scheme,
            Self::Userinfo => Marker::Userinfo,
            Self::Host => Marker::Host,
            Self::Port => Marker::Port,
            Self::Path => Marker::Path,
            Self::Query => Marker::Query,
            Self::Fragment => Marker::Fragment,
        }
    }
}

/// A URI matched against the RFC 3986 grammar.
///
/// The view borrows the input and records where each component starts; it
/// never copies or normalizes anything. A view of text that does not match
/// has every component absent.
///
/// # Examples
///
/// ```
/// use uri_pathfinder::parse_uri;
///
/// let uri = parse_uri("http://example.com:80/path?query#fragment");
/// assert!(uri.is_match());
/// assert_eq!(uri.scheme(), Some("http"));
/// assert_eq!(uri.host(), Some("example.com"));
/// assert_eq!(uri.port(), Some("80"));
/// assert_eq!(uri.path(), Some("/path"));
/// assert_eq!(uri.query(), Some("query"));
/// assert_eq!(uri.fragment(), Some("fragment"));
///
/// let mut buf = [0u8; 16];
/// assert_eq!(uri.get_host(&mut buf), Ok("example.com"));
///
/// assert!(!parse_uri("://example.com").is_match());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uri<'a> {
    input: &'a str,
    markers: Markers,
}

impl<'a> Uri<'a> {
    /// Parses a URI with ASCII character classes.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The input is empty
    /// - The input does not start with `scheme ":"`
    /// - Any character after that does not fit the grammar
    pub fn parse(input: &'a str) -> Result<Self, ParseError> {
        Self::parse_with(input, &Classifiers::ascii())
    }

    /// Parses a URI with the given character classes.
    ///
    /// # Errors
    ///
    /// See [`Uri::parse`].
    pub fn parse_with(input: &'a str, classifiers: &Classifiers) -> Result<Self, ParseError> {
        Self::parse_inner(input, classifiers)
            .map(|markers| Self { input, markers })
            .map_err(|kind| ParseError {
                input: input.to_string(),
                kind,
            })
    }

    /// A view of `input` with every component absent.
    #[must_use]
    pub fn unmatched(input: &'a str) -> Self {
        Self {
            input,
            markers: Markers::default(),
        }
    }

    fn parse_inner(input: &str, classifiers: &Classifiers) -> Result<Markers, ParseErrorKind> {
        if input.is_empty() {
            return Err(ParseErrorKind::Empty);
        }

        let mut cursor = Cursor::with_classifiers(input, *classifiers);
        let Some(markers) = rfc3986::uri(&mut cursor) else {
            trace!(input, "no scheme");
            return Err(ParseErrorKind::InvalidScheme);
        };

        if let Some(char) = cursor.peek() {
            let position = cursor.position();
            trace!(input, position, %char, "URI rejected");
            return Err(ParseErrorKind::UnexpectedChar { char, position });
        }
        Ok(markers)
    }

    /// Returns true if the input matched the grammar.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.markers.get(Marker::End).is_some()
    }

    /// Returns the text this view was parsed from.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.input
    }

    /// Returns the byte position of `marker`, if present.
    #[must_use]
    pub const fn marker(&self, marker: Marker) -> Option<usize> {
        self.markers.get(marker)
    }

    /// Returns true if the URI has an authority (`//` after the scheme).
    #[must_use]
    pub const fn has_authority(&self) -> bool {
        self.markers.get(Marker::DoubleSlash).is_some()
    }

    /// Returns the slice of `field`, if present.
    #[must_use]
    pub fn field(&self, field: UriField) -> Option<&'a str> {
        let marker = field.marker();
        let start = self.markers.get(marker)?;
        let end = self.markers.next_after(marker)?;
        self.input.get(start..end)
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> Option<&'a str> {
        self.field(UriField::Scheme)
    }

    /// Returns the userinfo.
    #[must_use]
    pub fn userinfo(&self) -> Option<&'a str> {
        self.field(UriField::Userinfo)
    }

    /// Returns the host. It is present, possibly empty, whenever the URI
    /// has an authority.
    #[must_use]
    pub fn host(&self) -> Option<&'a str> {
        self.field(UriField::Host)
    }

    /// Returns the port digits.
    #[must_use]
    pub fn port(&self) -> Option<&'a str> {
        self.field(UriField::Port)
    }

    /// Returns the path. Every matched URI has one, possibly empty.
    #[must_use]
    pub fn path(&self) -> Option<&'a str> {
        self.field(UriField::Path)
    }

    /// Returns the query.
    #[must_use]
    pub fn query(&self) -> Option<&'a str> {
        self.field(UriField::Query)
    }

    /// Returns the fragment.
    #[must_use]
    pub fn fragment(&self) -> Option<&'a str> {
        self.field(UriField::Fragment)
    }

    /// Returns the length in bytes of `field`, or 0 if absent.
    #[must_use]
    pub fn len(&self, field: UriField) -> usize {
        self.field(field).map_or(0, str::len)
    }

    /// Copies `field` into `buf` and terminates it with a `0` byte.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Absent`] if the field is absent and
    /// [`FieldError::BufferTooSmall`] if `buf` is not longer than the field.
    pub fn get<'b>(&self, field: UriField, buf: &'b mut [u8]) -> Result<&'b str, FieldError> {
        copy_field(self.field(field), buf)
    }

    field_accessors!(UriField {
        len_scheme, get_scheme => Scheme, "scheme";
        len_userinfo, get_userinfo => Userinfo, "userinfo";
        len_host, get_host => Host, "host";
        len_port, get_port => Port, "port";
        len_path, get_path => Path, "path";
        len_query, get_query => Query, "query";
        len_fragment, get_fragment => Fragment, "fragment";
    });
}

/// Matches `text` against the RFC 3986 `URI` rule with ASCII classes.
///
/// Never fails: text that does not match yields a view with every component
/// absent. Use [`Uri::parse`] to learn why a match failed.
#[must_use]
pub fn parse_uri(text: &str) -> Uri<'_> {
    parse_uri_with(text, &Classifiers::ascii())
}

/// Matches `text` against the RFC 3986 `URI` rule with the given classes.
#[must_use]
pub fn parse_uri_with<'a>(text: &'a str, classifiers: &Classifiers) -> Uri<'a> {
    Uri::parse_inner(text, classifiers).map_or_else(
        |_| Uri::unmatched(text),
        |markers| Uri {
            input: text,
            markers,
        },
    )
}

impl fmt::Display for Uri<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.input)
    }
}

impl AsRef<str> for Uri<'_> {
    fn as_ref(&self) -> &str {
        self.input
    }
}

impl<'a> TryFrom<&'a str> for Uri<'a> {
    type Error = ParseError;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialOrd for Uri<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uri<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.input
            .cmp(other.input)
            .then_with(|| self.markers.cmp(&other.markers))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.input)
    }
}

#[cfg(feature = "serde")]
impl<'de: 'a, 'a> serde::Deserialize<'de> for Uri<'a> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: &'de str = serde::Deserialize::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}
