//! Compiled patterns with a positional group-name table.
//!
//! The `regex` crate refuses patterns that reuse a group name, which is the
//! one case [`all_named_groups`](crate::all_named_groups) exists for. A
//! [`Pattern`] compiles such sources by renaming the repeated groups to
//! private aliases and keeping the caller's names in its own table.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use tracing::debug;

use crate::error::PatternError;

/// Submatches of one occurrence, one entry per group position.
///
/// Position 0 is the whole match. Groups that did not take part in the
/// match are `None`.
pub type Submatches<'t> = Vec<Option<&'t str>>;

/// A compiled pattern together with the caller-facing name of every group.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
    names: Vec<Option<String>>,
}

impl Pattern {
    /// Compile `source`, accepting repeated group names.
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let first_error = match Regex::new(source) {
            Ok(regex) => return Ok(Self::from_parts(source.to_string(), regex, None)),
            Err(err) => err,
        };

        let Some(rewrite) = rename_duplicates(source) else {
            return Err(PatternError::Compile(first_error));
        };

        debug!(
            pattern = source,
            aliases = rewrite.aliases.len(),
            "renamed duplicate capture groups"
        );

        // Report errors against the caller's source, never the aliased one.
        let Ok(regex) = Regex::new(&rewrite.source) else {
            return Err(PatternError::Compile(first_error));
        };
        let pattern = Self::from_parts(source.to_string(), regex, Some(&rewrite.aliases));

        // Every alias must have landed on a real group.
        let resolved = rewrite
            .aliases
            .keys()
            .all(|alias| pattern.regex.capture_names().flatten().any(|n| n == alias));
        if !resolved {
            return Err(PatternError::DuplicateNames(source.to_string()));
        }

        Ok(pattern)
    }

    fn from_parts(source: String, regex: Regex, aliases: Option<&HashMap<String, String>>) -> Self {
        let names = regex
            .capture_names()
            .enumerate()
            .map(|(i, name)| {
                let name = name.filter(|n| i != 0 && !n.is_empty())?;
                let name = aliases
                    .and_then(|a| a.get(name))
                    .map_or(name, String::as_str);
                Some(name.to_string())
            })
            .collect();

        Self {
            source,
            regex,
            names,
        }
    }

    /// The source text this pattern was compiled from, before any aliasing.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The underlying compiled engine.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Group names in position order. Position 0 and unnamed groups are `None`.
    pub fn group_names(&self) -> &[Option<String>] {
        &self.names
    }

    /// Position of the leftmost group called `name`.
    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.as_deref() == Some(name))
    }

    /// Submatches of the leftmost occurrence in `text`.
    pub fn first_match<'t>(&self, text: &'t str) -> Option<Submatches<'t>> {
        self.regex.captures(text).map(|caps| {
            caps.iter()
                .map(|group| group.map(|m| m.as_str()))
                .collect()
        })
    }

    /// Submatches of every non-overlapping occurrence in `text`, left to right.
    pub fn all_matches<'t>(&self, text: &'t str) -> Vec<Submatches<'t>> {
        self.regex
            .captures_iter(text)
            .map(|caps| {
                caps.iter()
                    .map(|group| group.map(|m| m.as_str()))
                    .collect()
            })
            .collect()
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self::from_parts(regex.as_str().to_string(), regex, None)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Pattern {
    type Error = PatternError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// A pattern source with repeated group names replaced by aliases.
#[derive(Debug)]
struct Rewrite {
    source: String,
    /// alias -> original name
    aliases: HashMap<String, String>,
}

/// A named group found in a pattern source: byte range of the name itself.
#[derive(Debug, PartialEq)]
struct NameSpan {
    start: usize,
    end: usize,
}

/// Rename the second and later groups sharing a name.
///
/// Returns `None` when the source has no repeated names, in which case the
/// engine's original error stands.
fn rename_duplicates(source: &str) -> Option<Rewrite> {
    let spans = scan_group_names(source);
    let taken: HashSet<&str> = spans.iter().map(|s| &source[s.start..s.end]).collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut aliases = HashMap::new();
    let mut out = String::with_capacity(source.len() + 16);
    let mut last = 0;
    let mut counter = 0usize;

    for span in &spans {
        let name = &source[span.start..span.end];
        if seen.insert(name) {
            continue;
        }

        let alias = loop {
            counter += 1;
            let candidate = format!("__regextra{counter}_{name}");
            if !taken.contains(candidate.as_str()) {
                break candidate;
            }
        };

        out.push_str(&source[last..span.start]);
        out.push_str(&alias);
        last = span.end;
        aliases.insert(alias, name.to_string());
    }

    if aliases.is_empty() {
        return None;
    }

    out.push_str(&source[last..]);
    Some(Rewrite {
        source: out,
        aliases,
    })
}

/// Find the name of every `(?P<name>...)` and `(?<name>...)` group, skipping
/// escapes and character classes.
fn scan_group_names(source: &str) -> Vec<NameSpan> {
    let bytes = source.as_bytes();
    let mut spans = Vec::new();
    let mut class_depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' if class_depth == 0 => {
                class_depth = 1;
                i += 1;
                if bytes.get(i) == Some(&b'^') {
                    i += 1;
                }
                // A leading `]` is a literal.
                if bytes.get(i) == Some(&b']') {
                    i += 1;
                }
                continue;
            }
            b'[' => {
                if bytes.get(i + 1) == Some(&b':') {
                    // ASCII class such as `[:alpha:]`
                    if let Some(close) = source[i..].find(":]") {
                        i += close + 2;
                        continue;
                    }
                }
                class_depth += 1;
            }
            b']' if class_depth > 0 => class_depth -= 1,
            b'(' if class_depth == 0 => {
                let rest = &bytes[i + 1..];
                let open = if rest.starts_with(b"?P<") {
                    Some(i + 4)
                } else if rest.starts_with(b"?<") && !matches!(rest.get(2), Some(b'=' | b'!')) {
                    Some(i + 3)
                } else {
                    None
                };

                if let Some(start) = open {
                    if let Some(len) = source[start..].find('>') {
                        spans.push(NameSpan {
                            start,
                            end: start + len,
                        });
                        i = start + len + 1;
                        continue;
                    }
                }
            }
            _ => {}
        }
        i += 1;
    }

    spans
}
