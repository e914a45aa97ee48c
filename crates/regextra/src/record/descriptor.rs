//! Field descriptors: what a record exposes to the populator.

/// Declared kind of a record field.
///
/// Integer and float kinds carry the width of the Rust field so values can
/// be range-checked before they are narrowed. A finite value beyond the
/// range of `f32` is out of range for a 32-bit float; `inf` and `nan` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `String`, written verbatim.
    Text,
    /// `i8` through `i64` and `isize`. A width of 0 admits no value.
    Signed { bits: u32 },
    /// `u8` through `u64` and `usize`.
    Unsigned { bits: u32 },
    /// `f32` or `f64`.
    Float { bits: u32 },
    /// `bool`.
    Bool,
    /// Any other type. Carries the type as written, for diagnostics.
    Unsupported(&'static str),
}

impl FieldKind {
    /// Short name used in conversion messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Signed { .. } => "int",
            FieldKind::Unsigned { .. } => "uint",
            FieldKind::Float { .. } => "float",
            FieldKind::Bool => "bool",
            FieldKind::Unsupported(ty) => *ty,
        }
    }
}

/// One field of a record type, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name as declared (raw identifiers without `r#`).
    pub name: &'static str,
    /// Declared kind.
    pub kind: FieldKind,
    /// Source-group override from `#[regex = "..."]`, if any.
    pub tag: Option<&'static str>,
    /// Whether callers outside the type may write the field (`pub`).
    pub writable: bool,
}

impl FieldDescriptor {
    /// A writable field resolved by its own name.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            tag: None,
            writable: true,
        }
    }

    /// Set the source-group override.
    pub const fn with_tag(mut self, tag: &'static str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Mark the field as not externally writable.
    pub const fn private(mut self) -> Self {
        self.writable = false;
        self
    }
}

/// A converted value ready to be stored in a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// Already checked to fit the field's width.
    Signed(i64),
    /// Already checked to fit the field's width.
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

/// A structured value the populator can fill field by field.
///
/// Usually derived with `#[derive(Record)]`; a manual implementation lists
/// its fields in [`FIELDS`](Record::FIELDS) and stores values by index.
///
/// ```
/// use regextra::{FieldDescriptor, FieldKind, FieldValue, Record};
///
/// #[derive(Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Record for Point {
///     const FIELDS: &'static [FieldDescriptor] = &[
///         FieldDescriptor::new("x", FieldKind::Signed { bits: 32 }),
///         FieldDescriptor::new("y", FieldKind::Signed { bits: 32 }),
///     ];
///
///     fn set_field(&mut self, index: usize, value: FieldValue) {
///         match (index, value) {
///             (0, FieldValue::Signed(v)) => self.x = v as i32,
///             (1, FieldValue::Signed(v)) => self.y = v as i32,
///             _ => {}
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Every field of the type, in declaration order.
    const FIELDS: &'static [FieldDescriptor];

    /// Store `value` in the field at `index` of [`FIELDS`](Record::FIELDS).
    ///
    /// Only called for writable fields, with a value matching the field's kind.
    fn set_field(&mut self, index: usize, value: FieldValue);
}
