//! Named capture group extraction on top of the `regex` crate.
//!
//! This crate provides:
//! - Lookup of a single named group, or of all named groups, from the first match
//! - Patterns that may reuse a group name (`(?P<word>\w+) (?P<word>\w+)`)
//! - Population of typed records from a match, with per-field type conversion
//! - Population of a `Vec` of records, one per occurrence
//!
//! ```
//! use regextra::{Pattern, Record};
//!
//! #[derive(Debug, Default, Record)]
//! struct Person {
//!     pub name: String,
//!     #[regex = "years"]
//!     pub age: i32,
//! }
//!
//! let pattern = Pattern::new(r"(?P<name>\w+) is (?P<years>\d+)").unwrap();
//! let mut person = Person::default();
//! regextra::unmarshal(&pattern, "Alice is 30", &mut person).unwrap();
//! assert_eq!(person.name, "Alice");
//! assert_eq!(person.age, 30);
//! ```

pub mod config;
pub mod error;
pub mod groups;
pub mod pattern;
pub mod projector;
pub mod record;
pub mod registry;

pub use config::{PopulateConfig, SKIP_SENTINEL, SkipSentinel};
pub use error::{ConversionError, ConversionReason, Error, PatternError, Result, UsageError};
pub use groups::{all_named_groups, find_named, named_groups, subexp_map, subexp_value};
pub use pattern::{Pattern, Submatches};
pub use projector::{AllGroupValues, GroupValues, project_all, project_first};
pub use record::{FieldDescriptor, FieldKind, FieldValue, Record, Unmarshaler};
pub use registry::Registry;

/// Derive [`Record`] for a struct with named fields.
///
/// Only `pub` fields are populated. `#[regex = "group"]` reads the field
/// from another group; `#[regex(skip)]` marks it with [`SKIP_SENTINEL`].
#[cfg(feature = "derive")]
pub use regextra_derive::Record;

/// Populate `record` from the first occurrence of `pattern` in `text`.
///
/// No match is not an error: the record is left unchanged.
pub fn unmarshal<R: Record>(pattern: &Pattern, text: &str, record: &mut R) -> Result<()> {
    Unmarshaler::new().unmarshal(pattern, text, record)
}

/// Replace `records` with one record per occurrence of `pattern`, in match order.
///
/// No match empties `records`.
pub fn unmarshal_all<R: Record + Default>(pattern: &Pattern, text: &str, records: &mut Vec<R>) -> Result<()> {
    Unmarshaler::new().unmarshal_all(pattern, text, records)
}
