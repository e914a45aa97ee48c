//! Configuration for record population.

use serde::{Deserialize, Serialize};

/// Reserved override value meaning "skip this field".
pub const SKIP_SENTINEL: &str = "-";

/// How the reserved `"-"` override is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipSentinel {
    /// Treat `"-"` as if no override were given; the field resolves by name.
    #[default]
    NoOverride,
    /// Never populate a field tagged `"-"`.
    SkipField,
}

/// Field-resolution settings used by [`Unmarshaler`](crate::Unmarshaler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulateConfig {
    /// Fall back to a case-insensitive name match when no exact key exists.
    pub case_insensitive: bool,

    /// Meaning of the `"-"` override.
    pub skip_sentinel: SkipSentinel,
}

impl Default for PopulateConfig {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            skip_sentinel: SkipSentinel::NoOverride,
        }
    }
}
