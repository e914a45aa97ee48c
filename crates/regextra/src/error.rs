//! Error types for the regextra library.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

/// Main error type for the regextra library.
#[derive(Error, Debug)]
pub enum Error {
    /// The population target does not have the required shape.
    #[error("regextra: {0}")]
    Usage(#[from] UsageError),

    /// A matched value could not be written into its field.
    #[error("regextra: {0}")]
    Conversion(#[from] ConversionError),

    /// The pattern source could not be compiled.
    #[error("regextra: {0}")]
    Pattern(#[from] PatternError),
}

/// Caller-contract violations, detected before any matching takes place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    /// No target was supplied.
    #[error("{operation} requires a non-absent target, got none")]
    AbsentTarget { operation: &'static str },

    /// The target is not a registered record type.
    #[error("{operation} requires a reference to a registered record, got {found}")]
    NotARecord {
        operation: &'static str,
        found: String,
    },

    /// The target is not a collection of a registered record type.
    #[error("{operation} requires a reference to a Vec of registered records, got {found}")]
    NotACollection {
        operation: &'static str,
        found: String,
    },
}

/// A matched string that could not be converted into its field's declared kind.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to set field {field}: {reason}")]
pub struct ConversionError {
    /// Name of the field being written.
    pub field: String,
    /// The offending matched string.
    pub value: String,
    /// Why the conversion failed.
    pub reason: ConversionReason,
}

impl ConversionError {
    pub fn new(field: impl Into<String>, value: impl Into<String>, reason: ConversionReason) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            reason,
        }
    }
}

/// Cause of a [`ConversionError`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionReason {
    #[error("cannot convert {value:?} to int: {source}")]
    Signed {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("cannot convert {value:?} to uint: {source}")]
    Unsigned {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Unsigned fields reject an explicit sign, which `u64::from_str` would accept.
    #[error("cannot convert {value:?} to uint: invalid syntax")]
    UnsignedSyntax { value: String },

    #[error("cannot convert {value:?} to float: {source}")]
    Float {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("cannot convert {value:?} to bool: invalid syntax")]
    Bool { value: String },

    /// The value parsed, but does not fit the field's width.
    #[error("cannot convert {value:?} to {bits}-bit {kind}: value out of range")]
    OutOfRange {
        value: String,
        kind: &'static str,
        bits: u32,
    },

    #[error("unsupported field type: {0}")]
    Unsupported(&'static str),
}

/// Errors raised while compiling a [`Pattern`](crate::Pattern).
#[derive(Error, Debug, Clone)]
pub enum PatternError {
    /// The engine rejected the pattern.
    #[error("invalid pattern: {0}")]
    Compile(#[from] regex::Error),

    /// The duplicate-name rewrite produced a group table that disagrees with the engine.
    #[error("invalid pattern: could not resolve duplicate group names in {0:?}")]
    DuplicateNames(String),
}

/// Result type for the regextra library.
pub type Result<T> = std::result::Result<T, Error>;
