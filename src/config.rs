//! Parser configuration.
//!
//! Configuration is passed explicitly to each parse; there is no
//! process-wide state.

use crate::constants::DEFAULT_PARAMETER_CAPACITY;
use crate::cursor::{Classifier, ascii_alpha, ascii_digit, unicode_alpha};

/// The character classifiers used for `ALPHA` and `DIGIT`.
///
/// `HEXDIG` is always ASCII and is not configurable.
///
/// # Examples
///
/// ```
/// use uri_pathfinder::{Classifiers, parse_uri_with};
///
/// let ascii = parse_uri_with("http://пример.рф/", &Classifiers::ascii());
/// assert!(!ascii.is_match());
///
/// let unicode = parse_uri_with("http://пример.рф/", &Classifiers::unicode());
/// assert_eq!(unicode.host(), Some("пример.рф"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Classifiers {
    /// Recognizer for `ALPHA`.
    pub alpha: Classifier,
    /// Recognizer for `DIGIT`.
    pub digit: Classifier,
}

impl Classifiers {
    /// ASCII letters and digits, as RFC 3986 and RFC 3966 define them.
    #[must_use]
    pub const fn ascii() -> Self {
        Self {
            alpha: ascii_alpha,
            digit: ascii_digit,
        }
    }

    /// Any Unicode letter counts as `ALPHA`; digits stay ASCII.
    #[must_use]
    pub const fn unicode() -> Self {
        Self {
            alpha: unicode_alpha,
            digit: ascii_digit,
        }
    }

    /// Replaces the `ALPHA` recognizer.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: Classifier) -> Self {
        self.alpha = alpha;
        self
    }

    /// Replaces the `DIGIT` recognizer.
    #[must_use]
    pub const fn with_digit(mut self, digit: Classifier) -> Self {
        self.digit = digit;
        self
    }
}

impl Default for Classifiers {
    fn default() -> Self {
        Self::ascii()
    }
}

/// Options for parsing telephone URIs.
#[derive(Debug, Clone, Copy)]
pub struct TelOptions {
    /// Character classifiers.
    pub classifiers: Classifiers,
    /// Enforce the RFC 3966 parameter order: `ext`/`isub` first, then
    /// `phone-context`, then generic parameters sorted by name.
    pub strict_ordering: bool,
    /// Maximum number of distinct parameter names in one parameter list.
    pub parameter_capacity: usize,
}

impl Default for TelOptions {
    fn default() -> Self {
        Self {
            classifiers: Classifiers::ascii(),
            strict_ordering: false,
            parameter_capacity: DEFAULT_PARAMETER_CAPACITY,
        }
    }
}

impl TelOptions {
    /// Creates options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the character classifiers.
    #[must_use]
    pub const fn with_classifiers(mut self, classifiers: Classifiers) -> Self {
        self.classifiers = classifiers;
        self
    }

    /// Enables or disables strict parameter ordering.
    #[must_use]
    pub const fn with_strict_ordering(mut self, strict: bool) -> Self {
        self.strict_ordering = strict;
        self
    }

    /// Sets the parameter-name capacity.
    #[must_use]
    pub const fn with_parameter_capacity(mut self, capacity: usize) -> Self {
        self.parameter_capacity = capacity;
        self
    }
}
