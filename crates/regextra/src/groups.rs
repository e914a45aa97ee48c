//! Flat named-group extraction from the first occurrence of a pattern.

use crate::pattern::Pattern;
use crate::projector::{AllGroupValues, GroupValues, project_all, project_first};

impl Pattern {
    /// Value of the group called `name` in the first occurrence.
    ///
    /// `None` when the pattern has no such group or `text` does not match.
    /// When several groups share the name, the leftmost one is used. A group
    /// that did not take part in the match yields `Some("")`.
    pub fn find_named<'t>(&self, text: &'t str, name: &str) -> Option<&'t str> {
        let index = self.group_index(name)?;
        let submatches = self.first_match(text)?;
        Some(submatches.get(index).copied().flatten().unwrap_or(""))
    }

    /// Named groups of the first occurrence; a repeated name keeps its last value.
    pub fn named_groups(&self, text: &str) -> GroupValues {
        let submatches = self.first_match(text);
        project_first(self.group_names(), submatches.as_deref())
    }

    /// Named groups of the first occurrence with every value of a repeated name.
    pub fn all_named_groups(&self, text: &str) -> AllGroupValues {
        let submatches = self.first_match(text);
        project_all(self.group_names(), submatches.as_deref())
    }
}

/// Value of the group called `name` in the first occurrence of `pattern`.
///
/// ```
/// let pattern = regextra::Pattern::new(r"(?P<name>\w+) (?P<age>\d+)").unwrap();
/// assert_eq!(regextra::find_named(&pattern, "Alice 30", "name"), Some("Alice"));
/// assert_eq!(regextra::find_named(&pattern, "Alice 30", "city"), None);
/// ```
pub fn find_named<'t>(pattern: &Pattern, text: &'t str, name: &str) -> Option<&'t str> {
    pattern.find_named(text, name)
}

/// Named groups of the first occurrence of `pattern`, empty on no match.
pub fn named_groups(pattern: &Pattern, text: &str) -> GroupValues {
    pattern.named_groups(text)
}

/// Every value of every named group in the first occurrence of `pattern`.
///
/// ```
/// let pattern = regextra::Pattern::new(r"(?P<word>\w+) (?P<word>\w+)").unwrap();
/// let groups = regextra::all_named_groups(&pattern, "hello world");
/// assert_eq!(groups["word"], ["hello", "world"]);
/// ```
pub fn all_named_groups(pattern: &Pattern, text: &str) -> AllGroupValues {
    pattern.all_named_groups(text)
}

/// Older name for [`find_named`].
pub fn subexp_value<'t>(pattern: &Pattern, text: &'t str, name: &str) -> Option<&'t str> {
    find_named(pattern, text, name)
}

/// Older name for [`named_groups`].
pub fn subexp_map(pattern: &Pattern, text: &str) -> GroupValues {
    named_groups(pattern, text)
}
