//! Field resolution, type coercion and multi-record population.

use tracing::{debug, trace};

use super::descriptor::{FieldDescriptor, FieldKind, FieldValue, Record};
use crate::config::{PopulateConfig, SKIP_SENTINEL, SkipSentinel};
use crate::error::{ConversionError, ConversionReason, Result};
use crate::pattern::Pattern;
use crate::projector::{GroupValues, project_first};

/// Record populator with a fixed [`PopulateConfig`].
///
/// The free functions [`unmarshal`](crate::unmarshal) and
/// [`unmarshal_all`](crate::unmarshal_all) use `Unmarshaler::new()`.
#[derive(Debug, Clone, Default)]
pub struct Unmarshaler {
    config: PopulateConfig,
}

impl Unmarshaler {
    /// Create a populator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a populator from an existing configuration.
    pub fn with_config(config: PopulateConfig) -> Self {
        Self { config }
    }

    /// Set the case-insensitive name fallback.
    pub fn with_case_insensitive(mut self, enabled: bool) -> Self {
        self.config.case_insensitive = enabled;
        self
    }

    /// Set how the `"-"` override is treated.
    pub fn with_skip_sentinel(mut self, sentinel: SkipSentinel) -> Self {
        self.config.skip_sentinel = sentinel;
        self
    }

    pub fn config(&self) -> &PopulateConfig {
        &self.config
    }

    /// Populate `record` from the first occurrence of `pattern` in `text`.
    ///
    /// No match leaves the record unchanged and is not an error.
    pub fn unmarshal<R: Record>(&self, pattern: &Pattern, text: &str, record: &mut R) -> Result<()> {
        let Some(submatches) = pattern.first_match(text) else {
            debug!(pattern = pattern.as_str(), "no match, record left unchanged");
            return Ok(());
        };

        let values = project_first(pattern.group_names(), Some(submatches.as_slice()));
        self.populate(record, &values)
    }

    /// Replace `records` with one freshly populated record per occurrence.
    ///
    /// On error `records` keeps its previous contents.
    pub fn unmarshal_all<R: Record + Default>(
        &self,
        pattern: &Pattern,
        text: &str,
        records: &mut Vec<R>,
    ) -> Result<()> {
        let occurrences = pattern.all_matches(text);
        debug!(
            pattern = pattern.as_str(),
            occurrences = occurrences.len(),
            "populating records"
        );

        let mut built = Vec::with_capacity(occurrences.len());
        for submatches in &occurrences {
            let values = project_first(pattern.group_names(), Some(submatches.as_slice()));
            let mut record = R::default();
            self.populate(&mut record, &values)?;
            built.push(record);
        }

        *records = built;
        Ok(())
    }

    /// Write every resolvable writable field of `record` from `values`.
    ///
    /// Stops at the first conversion error; fields written before it keep
    /// their new values.
    pub fn populate<R: Record>(&self, record: &mut R, values: &GroupValues) -> Result<()> {
        for (index, field) in R::FIELDS.iter().enumerate() {
            if !field.writable {
                trace!(field = field.name, "skipping unwritable field");
                continue;
            }

            let Some(raw) = self.resolve(field, values) else {
                trace!(field = field.name, "no group for field");
                continue;
            };

            let value = convert(field, raw)?;
            record.set_field(index, value);
        }
        Ok(())
    }

    /// Find the value for `field`: explicit override, then exact name, then
    /// case-insensitive name.
    fn resolve<'v>(&self, field: &FieldDescriptor, values: &'v GroupValues) -> Option<&'v str> {
        match field.tag {
            Some(SKIP_SENTINEL) if self.config.skip_sentinel == SkipSentinel::SkipField => {
                return None;
            }
            Some(tag) if !tag.is_empty() && tag != SKIP_SENTINEL => {
                // An override never falls back to the field name.
                return values.get(tag).map(String::as_str);
            }
            _ => {}
        }

        if let Some(value) = values.get(field.name) {
            return Some(value);
        }

        if !self.config.case_insensitive {
            return None;
        }

        // Keys colliding under case folding resolve to the smallest key.
        let folded = field.name.to_lowercase();
        values
            .iter()
            .filter(|(key, _)| key.to_lowercase() == folded)
            .min_by(|a, b| a.0.cmp(b.0))
            .map(|(_, value)| value.as_str())
    }
}

/// Convert `raw` into the declared kind of `field`.
pub fn convert(field: &FieldDescriptor, raw: &str) -> std::result::Result<FieldValue, ConversionError> {
    let fail = |reason| ConversionError::new(field.name, raw, reason);

    match field.kind {
        FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),

        FieldKind::Signed { bits } => {
            let value = raw.parse::<i64>().map_err(|source| {
                fail(ConversionReason::Signed {
                    value: raw.to_string(),
                    source,
                })
            })?;
            if !signed_fits(value, bits) {
                return Err(fail(out_of_range(raw, field.kind.name(), bits)));
            }
            Ok(FieldValue::Signed(value))
        }

        FieldKind::Unsigned { bits } => {
            if raw.starts_with(['+', '-']) {
                return Err(fail(ConversionReason::UnsignedSyntax {
                    value: raw.to_string(),
                }));
            }
            let value = raw.parse::<u64>().map_err(|source| {
                fail(ConversionReason::Unsigned {
                    value: raw.to_string(),
                    source,
                })
            })?;
            if bits < 64 && value >> bits != 0 {
                return Err(fail(out_of_range(raw, field.kind.name(), bits)));
            }
            Ok(FieldValue::Unsigned(value))
        }

        FieldKind::Float { bits } => {
            let value = raw.parse::<f64>().map_err(|source| {
                fail(ConversionReason::Float {
                    value: raw.to_string(),
                    source,
                })
            })?;
            if bits <= 32 && value.is_finite() && value.abs() > f64::from(f32::MAX) {
                return Err(fail(out_of_range(raw, field.kind.name(), bits)));
            }
            Ok(FieldValue::Float(value))
        }

        FieldKind::Bool => parse_bool(raw).map(FieldValue::Bool).ok_or_else(|| {
            fail(ConversionReason::Bool {
                value: raw.to_string(),
            })
        }),

        FieldKind::Unsupported(ty) => Err(fail(ConversionReason::Unsupported(ty))),
    }
}

/// Conventional boolean literals.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn signed_fits(value: i64, bits: u32) -> bool {
    if bits == 0 {
        return false;
    }
    if bits >= 64 {
        return true;
    }
    let max = (1i64 << (bits - 1)) - 1;
    let min = -(1i64 << (bits - 1));
    (min..=max).contains(&value)
}

fn out_of_range(raw: &str, kind: &'static str, bits: u32) -> ConversionReason {
    ConversionReason::OutOfRange {
        value: raw.to_string(),
        kind,
        bits,
    }
}
