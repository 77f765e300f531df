//! Zero-copy grammar-conformance parser for RFC 3986 URIs and RFC 3966
//! `tel:` URIs.
//!
//! # Overview
//!
//! Both parsers check a complete input against its grammar and, on success,
//! return a view whose components are byte ranges of the input. Nothing is
//! copied, decoded, or normalized. When a caller needs an owned copy, each
//! component has a length accessor and a copy accessor that writes into a
//! caller-supplied buffer.
//!
//! The grammars are assembled from small backtracking matchers (see
//! [`Cursor`] and the combinators in [`combinator`]).
//!
//! # Quick Start
//!
//! ```rust
//! use uri_pathfinder::{parse_telephone, parse_uri};
//!
//! // Parse a URI
//! let uri = parse_uri("https://user@example.com:8443/a/b?q=1#top");
//! assert_eq!(uri.userinfo(), Some("user"));
//! assert_eq!(uri.host(), Some("example.com"));
//! assert_eq!(uri.port(), Some("8443"));
//! assert_eq!(uri.path(), Some("/a/b"));
//!
//! // Parse a telephone URI
//! let tel = parse_telephone("tel:+1-201-555-0123;ext=1234");
//! assert_eq!(tel.global_number(), Some("+1-201-555-0123"));
//! assert_eq!(tel.extension(), Some(";ext=1234"));
//!
//! // Non-matching input gives a view with nothing in it
//! assert!(!parse_uri("no scheme here").is_match());
//! ```
//!
//! # Errors
//!
//! `parse_uri` and `parse_telephone` never fail; they report a mismatch
//! with an empty view. [`Uri::parse`] and [`Tel::parse`] run the same
//! grammars and return a [`ParseError`] or [`TelError`] saying why.
//!
//! ```rust
//! use uri_pathfinder::{Tel, TelErrorKind};
//!
//! let err = Tel::parse("tel:+12345;foo=bar;foo=baz").unwrap_err();
//! assert!(matches!(err.kind, TelErrorKind::DuplicateParameter { .. }));
//! ```
//!
//! # Copying Fields
//!
//! A buffer must be longer than the field, since a `0` terminator is written
//! after the copied bytes. When it is too short the error carries the length
//! needed:
//!
//! ```rust
//! use uri_pathfinder::parse_uri;
//!
//! let uri = parse_uri("http://example.com/");
//! let required = uri.get_host(&mut [0u8; 4]).unwrap_err().required();
//! let mut buf = vec![0u8; required + 1];
//! assert_eq!(uri.get_host(&mut buf), Ok("example.com"));
//! ```
//!
//! # Grammar Coverage
//!
//! | Grammar | Rules |
//! |---------|-------|
//! | RFC 3986 | `URI` with authority, IPv6 and `IPvFuture` literals, all path forms |
//! | RFC 3966 | `telephone-uri` with `ext`, `isub`, `phone-context` and generic parameters |
//!
//! Relative references, percent-decoding, and normalization are out of
//! scope.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod combinator;
mod config;
mod constants;
mod cursor;
mod error;
mod field;
#[cfg(kani)]
mod kani_proofs;
mod name_set;
pub mod prelude;
mod rfc3966;
mod rfc3986;
mod tel;
mod uri;

pub use config::{Classifiers, TelOptions};
pub use constants::{
    DEFAULT_PARAMETER_CAPACITY, EXTENSION, ISDN_SUBADDRESS, MAX_PARAMETER_RUNS, PHONE_CONTEXT,
    TEL_PREFIX,
};
pub use cursor::{
    Checkpoint, Classifier, Cursor, alpha, ascii_alpha, ascii_digit, digit, hexdig, unicode_alpha,
};
pub use error::{FieldError, ParseError, ParseErrorKind, TelError, TelErrorKind};
pub use name_set::{InsertError, NameSet};
pub use tel::{NumberKind, Span, Tel, TelField, parse_telephone, parse_telephone_with};
pub use uri::{Marker, Uri, UriField, parse_uri, parse_uri_with};
