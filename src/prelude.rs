//! Convenient re-exports for glob imports.
//!
//! This module provides a single import for the public types and constants,
//! making it easy to get started with the crate:
//!
//! ```rust
//! use uri_pathfinder::prelude::*;
//!
//! let uri = parse_uri("urn:example:animal");
//! assert_eq!(uri.path(), Some("example:animal"));
//! ```
//!
//! The combinators and character-class matchers are not included; import
//! them directly when writing new grammar rules.

pub use crate::{
    // Views
    Marker, NumberKind, Span, Tel, TelField, Uri, UriField,
    // Entry points
    parse_telephone, parse_telephone_with, parse_uri, parse_uri_with,
    // Configuration
    Classifier, Classifiers, TelOptions,
    // Grammar building blocks
    Checkpoint, Cursor, NameSet,
    // Errors
    FieldError, InsertError, ParseError, ParseErrorKind, TelError, TelErrorKind,
    // Constants
    DEFAULT_PARAMETER_CAPACITY, EXTENSION, ISDN_SUBADDRESS, MAX_PARAMETER_RUNS, PHONE_CONTEXT,
    TEL_PREFIX,
};
