//! Error types for descriptor registration, tree binding, and the XML text adapter.
//!
//! ## Error Categories
//!
//! - **Registration errors** ([`RegistrationError`]): a type descriptor was rejected while it
//!   was being built. These are reported once, when the type is first registered, and never
//!   during encode or decode of already-registered types.
//! - **Structural decode errors**: the document root does not carry the expected node name, or a
//!   required nested object is missing.
//! - **Syntax errors**: the XML text adapter could not read its input. These carry line and
//!   column information.
//!
//! Scalar text that fails to parse is *not* an error: the field falls back to its default value
//! and the coercion is recorded in a [`DecodeReport`](crate::DecodeReport).
//!
//! ## Examples
//!
//! ```rust
//! use intros_tree::{from_xml_str, Error};
//!
//! let result = from_xml_str("<Line name=\"L1\"><Point></Line>");
//! assert!(matches!(result, Err(Error::Syntax { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Reasons a type descriptor can be rejected at registration time.
///
/// Once a type fails to register, the failure is cached for the rest of the process and every
/// later attempt to encode or decode that type reports the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A field is declared with a fixed-size array type.
    #[error("field `{path}` of `{owner}` has array type `{type_name}`, arrays are not supported (use a Vec)")]
    UnsupportedArray {
        owner: String,
        path: String,
        type_name: &'static str,
    },

    /// A field type declared itself as unsupported.
    #[error("field `{path}` of `{owner}` has unsupported type `{type_name}`")]
    Unsupported {
        owner: String,
        path: String,
        type_name: &'static str,
    },

    /// A field path is malformed for the field's category.
    #[error("invalid path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    /// Two fields of one descriptor resolve to the same document slot.
    #[error("fields of `{owner}` collide on {slot}")]
    DuplicateSlot { owner: String, slot: String },

    /// The descriptor's node name is empty or contains a path separator.
    #[error("invalid node name `{0}`")]
    InvalidNodeName(String),

    /// A type asked for its own descriptor while that descriptor was being built.
    #[error("`{0}` requested its own descriptor during registration")]
    Reentrant(&'static str),
}

impl RegistrationError {
    pub(crate) fn invalid_path(path: &str, reason: &str) -> Self {
        RegistrationError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Represents all possible errors returned by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A type could not be registered.
    #[error("registration failed: {0}")]
    Registration(#[from] RegistrationError),

    /// The document has no top-level node named after the decoded type.
    #[error("expected root node `{expected}`, found {}", describe_found(.found))]
    RootMismatch {
        expected: String,
        found: Option<String>,
    },

    /// A required nested object is absent from the document.
    #[error("missing required `{type_name}` node at `{path}`")]
    MissingNode {
        path: String,
        type_name: String,
    },

    /// Syntax error in XML input, with detailed context
    #[error("Syntax error at line {line}, column {col}:\n{context}\n{msg}{suggestion}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
        context: String,
        suggestion: String,
    },

    /// Unexpected end of XML input
    #[error(
        "Unexpected end of input at line {line}, column {col}\n{context}\nExpected: {expected}"
    )]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
        context: String,
    },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intros_tree::Error;
    ///
    /// let err = Error::syntax(10, 5, "unexpected token");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: String::new(),
            suggestion: String::new(),
        }
    }

    /// Creates a syntax error with the offending source line and an optional suggestion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intros_tree::Error;
    ///
    /// let err = Error::syntax_with_context(
    ///     3,
    ///     12,
    ///     "mismatched closing tag",
    ///     "<Point x=\"1\"></Line>",
    ///     Some("close `Point` before `Line`"),
    /// );
    /// assert!(err.to_string().contains("Help:"));
    /// ```
    pub fn syntax_with_context(
        line: usize,
        col: usize,
        msg: &str,
        context: &str,
        suggestion: Option<&str>,
    ) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: context.to_string(),
            suggestion: suggestion
                .map(|s| format!("\nHelp: {}", s))
                .unwrap_or_default(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: &str, context: &str) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.to_string(),
            context: context.to_string(),
        }
    }

    /// Creates a root mismatch error.
    pub fn root_mismatch(expected: &str, found: Option<&str>) -> Self {
        Error::RootMismatch {
            expected: expected.to_string(),
            found: found.map(str::to_string),
        }
    }

    /// Creates a missing-node error for a required nested object.
    pub fn missing_node(path: &str, type_name: &str) -> Self {
        Error::MissingNode {
            path: path.to_string(),
            type_name: type_name.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use intros_tree::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reading or writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` if this error was raised while registering a type.
    #[must_use]
    pub const fn is_registration(&self) -> bool {
        matches!(self, Error::Registration(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

fn describe_found(found: &Option<String>) -> String {
    match found {
        Some(name) => format!("`{}`", name),
        None => "an empty document".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_mismatch_display() {
        let err = Error::root_mismatch("Line", Some("Polygon"));
        assert_eq!(err.to_string(), "expected root node `Line`, found `Polygon`");

        let err = Error::root_mismatch("Line", None);
        assert_eq!(
            err.to_string(),
            "expected root node `Line`, found an empty document"
        );
    }

    #[test]
    fn test_registration_error_wraps() {
        let err = RegistrationError::UnsupportedArray {
            owner: "Point".to_string(),
            path: "coords".to_string(),
            type_name: "[f64; 3]",
        };

        assert!(err.to_string().contains("`Point`"));
        assert!(Error::from(err).is_registration());
    }

    #[test]
    fn test_syntax_with_context() {
        let err = Error::syntax_with_context(2, 4, "bad", "<a", None);
        let text = err.to_string();
        assert!(text.contains("line 2, column 4"));
        assert!(!text.contains("Help:"));
    }
}
