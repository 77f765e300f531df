//! Constants for URI and telephone URI parsing.

/// Literal prefix of every telephone URI.
pub const TEL_PREFIX: &str = "tel:";

/// Number of generic-parameter run slots in a telephone view.
pub const MAX_PARAMETER_RUNS: usize = 4;

/// Default number of distinct parameter names a telephone parameter list may hold.
pub const DEFAULT_PARAMETER_CAPACITY: usize = 1000;

/// Name of the extension parameter (`;ext=`).
pub const EXTENSION: &str = "ext";

/// Name of the ISDN subaddress parameter (`;isub=`).
pub const ISDN_SUBADDRESS: &str = "isub";

/// Name of the phone context parameter (`;phone-context=`).
pub const PHONE_CONTEXT: &str = "phone-context";
