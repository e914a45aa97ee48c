//! Projection of raw submatches onto group names.

use std::collections::HashMap;

/// Group name to value, last occurrence of a repeated name wins.
pub type GroupValues = HashMap<String, String>;

/// Group name to every value carried by that name, left to right.
pub type AllGroupValues = HashMap<String, Vec<String>>;

/// Pair each named position (past position 0) with its submatch.
///
/// Positions missing from `submatches` or not taking part in the match
/// project as the empty string.
fn named_positions<'a>(
    names: &'a [Option<String>],
    submatches: &'a [Option<&'a str>],
) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    names.iter().enumerate().skip(1).filter_map(move |(i, name)| {
        let name = name.as_deref().filter(|n| !n.is_empty())?;
        let value = submatches.get(i).copied().flatten().unwrap_or("");
        Some((name, value))
    })
}

/// Build a last-value-wins mapping from one occurrence.
///
/// `None` means there was no match and yields an empty mapping.
pub fn project_first(names: &[Option<String>], submatches: Option<&[Option<&str>]>) -> GroupValues {
    let mut values = GroupValues::new();
    if let Some(submatches) = submatches {
        for (name, value) in named_positions(names, submatches) {
            values.insert(name.to_string(), value.to_string());
        }
    }
    values
}

/// Build an all-values mapping from one occurrence.
pub fn project_all(names: &[Option<String>], submatches: Option<&[Option<&str>]>) -> AllGroupValues {
    let mut values = AllGroupValues::new();
    if let Some(submatches) = submatches {
        for (name, value) in named_positions(names, submatches) {
            values
                .entry(name.to_string())
                .or_default()
                .push(value.to_string());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(names: &[&str]) -> Vec<Option<String>> {
        std::iter::once(None)
            .chain(names.iter().map(|n| (!n.is_empty()).then(|| n.to_string())))
            .collect()
    }

    #[test]
    fn test_project_first_last_wins() {
        let names = table(&["first", "second", "second"]);
        let submatches = [Some("one two again"), Some("one"), Some("two"), Some("again")];
        let values = project_first(&names, Some(&submatches[..]));

        assert_eq!(values.len(), 2);
        assert_eq!(values["first"], "one");
        assert_eq!(values["second"], "again");
    }

    #[test]
    fn test_project_all_keeps_order() {
        let names = table(&["word", "", "word"]);
        let submatches = [Some("a b c"), Some("a"), Some("b"), Some("c")];
        let values = project_all(&names, Some(&submatches[..]));

        assert_eq!(values.len(), 1);
        assert_eq!(values["word"], vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let names = table(&["name"]);
        assert!(project_first(&names, None).is_empty());
        assert!(project_all(&names, None).is_empty());
    }

    #[test]
    fn test_unnamed_groups_never_projected() {
        let mut names = table(&["", "x"]);
        names.push(Some(String::new()));
        let submatches = [Some("ab"), Some("a"), Some("b"), Some("")];
        let values = project_first(&names, Some(&submatches[..]));

        assert_eq!(values.keys().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn test_non_participating_group_is_empty_string() {
        let names = table(&["a", "b"]);
        let submatches = [Some("b"), None, Some("b")];
        let values = project_first(&names, Some(&submatches[..]));

        assert_eq!(values["a"], "");
        assert_eq!(values["b"], "b");
    }
}
