//! Error types for YAML stringification.
//!
//! Every failure aborts the whole call: the stringifier never hands back a
//! partially written document.
//!
//! ## Error Categories
//!
//! - **Unresolvable values**: no [`Type`](crate::Type) in the active schema accepts a value
//! - **Configuration errors**: malformed type definitions, duplicate tags, unknown styles
//! - **Representer errors**: a type's `represent` function refused a value
//! - **Construct errors**: a type's `construct` function refused raw data
//! - **Recursion limit**: the value tree nests deeper than the configured limit
//!
//! ## Examples
//!
//! ```rust
//! use yaml_stringify::{stringify, Error, Value};
//!
//! let err = stringify(&Value::Undefined).unwrap_err();
//! assert!(matches!(err, Error::UnresolvableType { .. }));
//! assert!(err.to_string().contains("unacceptable kind of an object to dump"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while stringifying YAML.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// No type in the active schema accepts the value.
    #[error("unacceptable kind of an object to dump: {kind}")]
    UnresolvableType { kind: String },

    /// Malformed type definition, conflicting tags or an invalid style request.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A type's represent function failed on a specific value.
    #[error("cannot represent !<{tag}>: {message}")]
    Representer { tag: String, message: String },

    /// A type's construct function failed on raw data.
    #[error("cannot construct !<{tag}>: {message}")]
    Construct { tag: String, message: String },

    /// The value tree nests deeper than the configured recursion limit.
    #[error("recursion limit of {limit} exceeded")]
    RecursionLimitExceeded { limit: usize },

    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unresolvable-type error naming the kind of value that was rejected.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_stringify::Error;
    ///
    /// let err = Error::unresolvable("undefined");
    /// assert!(err.to_string().ends_with("undefined"));
    /// ```
    pub fn unresolvable(kind: &str) -> Self {
        Error::UnresolvableType {
            kind: kind.to_string(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration<T: fmt::Display>(msg: T) -> Self {
        Error::Configuration(msg.to_string())
    }

    /// Creates a representer error carrying the offending tag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_stringify::Error;
    ///
    /// let err = Error::representer("!point", "expected three coordinates");
    /// assert!(err.to_string().contains("!<!point>"));
    /// ```
    pub fn representer<T: fmt::Display>(tag: &str, msg: T) -> Self {
        Error::Representer {
            tag: tag.to_string(),
            message: msg.to_string(),
        }
    }

    /// Creates a construct error carrying the offending tag.
    pub fn construct<T: fmt::Display>(tag: &str, msg: T) -> Self {
        Error::Construct {
            tag: tag.to_string(),
            message: msg.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_is_constructed_by_a_helper() {
        let errors = [
            Error::unresolvable("function"),
            Error::configuration("bad kind"),
            Error::representer("!point", "short"),
            Error::construct("!point", "short"),
            Error::RecursionLimitExceeded { limit: 4 },
            Error::io("broken pipe"),
            <Error as serde::ser::Error>::custom("unsupported"),
        ];
        for err in &errors {
            // Exhaustive: a new variant must be reachable from this list.
            let named = match err {
                Error::UnresolvableType { .. }
                | Error::Configuration(_)
                | Error::Representer { .. }
                | Error::Construct { .. }
                | Error::RecursionLimitExceeded { .. }
                | Error::Io(_)
                | Error::Custom(_) => true,
            };
            assert!(named && !err.to_string().is_empty());
        }
        assert!(errors[6].to_string().ends_with("unsupported"));
    }
}
