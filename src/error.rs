//! Error types for URI and telephone URI parsing.

use std::fmt;

/// Errors that can occur when parsing a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

/// Specific URI parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// URI is empty
    Empty,
    /// Missing or malformed `scheme ":"` prefix
    InvalidScheme,
    /// The grammar stopped matching before the end of the input
    UnexpectedChar {
        /// The unexpected character
        char: char,
        /// Byte position in the input
        position: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse URI '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::Empty => write!(f, "input is empty"),
            ParseErrorKind::InvalidScheme => {
                write!(f, "missing scheme; URI must start with a letter followed by ':'")
            }
            ParseErrorKind::UnexpectedChar { char, position } => {
                write!(f, "unexpected character '{char}' at position {position}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors that can occur when parsing a telephone URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: TelErrorKind,
}

/// Specific telephone URI parsing error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelErrorKind {
    /// Input is empty
    Empty,
    /// Input does not start with `tel:`
    MissingPrefix,
    /// No global or local number follows the prefix
    InvalidNumber,
    /// The grammar stopped matching before the end of the input
    UnexpectedChar {
        /// The unexpected character
        char: char,
        /// Byte position in the input
        position: usize,
    },
    /// A parameter name occurs twice
    DuplicateParameter {
        /// The repeated name
        name: String,
    },
    /// More distinct parameter names than the configured capacity
    ParameterLimit {
        /// Configured capacity
        max: usize,
    },
    /// More generic parameter runs than a view can record
    TooManyRuns {
        /// Number of run slots
        max: usize,
    },
    /// A reserved parameter name used without its required value
    MalformedParameter {
        /// The reserved name
        name: String,
    },
    /// A local number without a `phone-context` parameter
    PhoneContextRequired,
    /// A global number with a `phone-context` parameter
    PhoneContextForbidden,
    /// A parameter out of RFC 3966 order (strict ordering only)
    OutOfOrder {
        /// Name of the misplaced parameter
        name: String,
    },
}

impl fmt::Display for TelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse telephone URI '{}': ", self.input)?;
        fmt::Display::fmt(&self.kind, f)
    }
}

impl fmt::Display for TelErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "input is empty"),
            Self::MissingPrefix => write!(f, "telephone URI must start with 'tel:'"),
            Self::InvalidNumber => {
                write!(f, "expected a global number ('+' and digits) or a local number")
            }
            Self::UnexpectedChar { char, position } => {
                write!(f, "unexpected character '{char}' at position {position}")
            }
            Self::DuplicateParameter { name } => {
                write!(f, "parameter '{name}' appears more than once")
            }
            Self::ParameterLimit { max } => {
                write!(f, "more than {max} distinct parameter names")
            }
            Self::TooManyRuns { max } => {
                write!(f, "generic parameters split into more than {max} runs")
            }
            Self::MalformedParameter { name } => {
                write!(f, "parameter '{name}' is reserved and needs a valid value")
            }
            Self::PhoneContextRequired => {
                write!(f, "local numbers require a phone-context parameter")
            }
            Self::PhoneContextForbidden => {
                write!(f, "global numbers must not carry a phone-context parameter")
            }
            Self::OutOfOrder { name } => write!(f, "parameter '{name}' is out of order"),
        }
    }
}

impl std::error::Error for TelError {}

/// Errors for copying a view field into a caller buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldError {
    /// The field is absent from the view
    Absent,
    /// The buffer cannot hold the field and its terminator
    BufferTooSmall {
        /// Bytes needed for the field, not counting the terminator
        required: usize,
    },
}

impl FieldError {
    /// Returns the field length the caller needs room for.
    ///
    /// This is `0` for an absent field.
    #[must_use]
    pub const fn required(self) -> usize {
        match self {
            Self::Absent => 0,
            Self::BufferTooSmall { required } => required,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "field is absent"),
            Self::BufferTooSmall { required } => {
                write!(f, "buffer needs room for {required} bytes plus a terminator")
            }
        }
    }
}

impl std::error::Error for FieldError {}
