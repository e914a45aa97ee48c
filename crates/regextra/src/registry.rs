//! Type-erased population for targets only known at runtime.
//!
//! The generic [`unmarshal`](crate::unmarshal) functions cannot be handed the
//! wrong kind of target. A [`Registry`] accepts any `&mut dyn Any`, so it
//! checks the target's shape first and reports a [`UsageError`] before any
//! matching happens.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, UsageError};
use crate::pattern::Pattern;
use crate::record::{Record, Unmarshaler};

type Fill = fn(&Unmarshaler, &Pattern, &str, &mut dyn Any) -> Result<()>;

#[derive(Clone, Copy)]
struct Entry {
    type_name: &'static str,
    fill: Fill,
}

/// Record types registered for dynamic population.
///
/// ```
/// use std::any::Any;
/// use regextra::{Pattern, Registry};
///
/// #[derive(Debug, Default, regextra::Record)]
/// struct Person {
///     pub name: String,
///     pub age: u32,
/// }
///
/// let mut registry = Registry::new();
/// registry.register::<Person>();
///
/// let pattern = Pattern::new(r"(?P<name>\w+) is (?P<age>\d+)").unwrap();
/// let mut people: Vec<Person> = Vec::new();
/// let target: &mut dyn Any = &mut people;
/// registry.unmarshal_all(&pattern, "Alice is 30 and Bob is 25", Some(target)).unwrap();
/// assert_eq!(people.len(), 2);
/// ```
#[derive(Default)]
pub struct Registry {
    records: HashMap<TypeId, Entry>,
    collections: HashMap<TypeId, Entry>,
    unmarshaler: Unmarshaler,
}

impl Registry {
    /// Create an empty registry using default population settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry that populates with `unmarshaler`.
    pub fn with_unmarshaler(unmarshaler: Unmarshaler) -> Self {
        Self {
            unmarshaler,
            ..Self::default()
        }
    }

    /// Register `R` both as a record and as the element of a `Vec<R>` collection.
    pub fn register<R: Record + Default + 'static>(&mut self) -> &mut Self {
        let type_name = type_name::<R>();
        debug!(record = type_name, fields = R::FIELDS.len(), "registering record type");

        self.records.insert(
            TypeId::of::<R>(),
            Entry {
                type_name,
                fill: fill_one::<R>,
            },
        );
        self.collections.insert(
            TypeId::of::<Vec<R>>(),
            Entry {
                type_name,
                fill: fill_many::<R>,
            },
        );
        self
    }

    /// Whether `R` has been registered.
    pub fn is_registered<R: 'static>(&self) -> bool {
        self.records.contains_key(&TypeId::of::<R>())
    }

    /// Populate a registered record from the first occurrence of `pattern`.
    pub fn unmarshal(&self, pattern: &Pattern, text: &str, target: Option<&mut dyn Any>) -> Result<()> {
        const OPERATION: &str = "unmarshal";

        let target = target.ok_or(UsageError::AbsentTarget { operation: OPERATION })?;
        let id = Any::type_id(&*target);

        let Some(entry) = self.records.get(&id) else {
            return Err(UsageError::NotARecord {
                operation: OPERATION,
                found: self.describe(id),
            }
            .into());
        };

        (entry.fill)(&self.unmarshaler, pattern, text, target)
    }

    /// Replace a `Vec` of a registered record with one record per occurrence.
    pub fn unmarshal_all(&self, pattern: &Pattern, text: &str, target: Option<&mut dyn Any>) -> Result<()> {
        const OPERATION: &str = "unmarshal_all";

        let target = target.ok_or(UsageError::AbsentTarget { operation: OPERATION })?;
        let id = Any::type_id(&*target);

        let Some(entry) = self.collections.get(&id) else {
            return Err(UsageError::NotACollection {
                operation: OPERATION,
                found: self.describe(id),
            }
            .into());
        };

        (entry.fill)(&self.unmarshaler, pattern, text, target)
    }

    fn describe(&self, id: TypeId) -> String {
        if let Some(entry) = self.records.get(&id) {
            format!("record {}", entry.type_name)
        } else if let Some(entry) = self.collections.get(&id) {
            format!("Vec<{}>", entry.type_name)
        } else {
            "an unregistered type".to_string()
        }
    }
}

fn fill_one<R: Record + 'static>(
    unmarshaler: &Unmarshaler,
    pattern: &Pattern,
    text: &str,
    target: &mut dyn Any,
) -> Result<()> {
    let record = target.downcast_mut::<R>().ok_or_else(|| UsageError::NotARecord {
        operation: "unmarshal",
        found: "an unregistered type".to_string(),
    })?;
    unmarshaler.unmarshal(pattern, text, record)
}

fn fill_many<R: Record + Default + 'static>(
    unmarshaler: &Unmarshaler,
    pattern: &Pattern,
    text: &str,
    target: &mut dyn Any,
) -> Result<()> {
    let records = target
        .downcast_mut::<Vec<R>>()
        .ok_or_else(|| UsageError::NotACollection {
            operation: "unmarshal_all",
            found: "an unregistered type".to_string(),
        })?;
    unmarshaler.unmarshal_all(pattern, text, records)
}
