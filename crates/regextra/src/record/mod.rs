//! Target records and the populator that fills them.

mod descriptor;
mod populate;

pub use descriptor::{FieldDescriptor, FieldKind, FieldValue, Record};
pub use populate::{Unmarshaler, convert, parse_bool};
