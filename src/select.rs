//! Type selection
//!
//! Matches full type names against shell-style patterns, orders the matches
//! naturally (numeric runs compare as numbers, newest version first) and
//! groups them by namespace for the index table.

use std::cmp::Reverse;
use std::collections::HashMap;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use regex::Regex;

use crate::error::{DocsError, Result};
use crate::schema::DsdlType;

const MAX_SUGGESTIONS: usize = 3;

/// Shell-style pattern over full type names (e.g., "uavcan.node.*")
#[derive(Debug, Clone)]
pub struct TypePattern {
    glob: String,
    regex: Regex,
}

impl TypePattern {
    pub fn new(glob: impl Into<String>) -> Result<Self> {
        let glob = glob.into();
        let regex = Regex::new(&glob_to_regex(&glob))
            .map_err(|e| DocsError::InvalidPattern(format!("{}: {}", glob, e)))?;
        Ok(Self { glob, regex })
    }

    pub fn as_str(&self) -> &str {
        &self.glob
    }

    pub fn matches(&self, full_name: &str) -> bool {
        self.regex.is_match(full_name)
    }

    /// Whether the pattern selects a whole namespace rather than one type
    pub fn is_wildcard(&self) -> bool {
        self.glob.contains('*')
    }

    /// Pattern without leading and trailing dots and stars
    pub fn naked(&self) -> &str {
        self.glob.trim_matches(|c| c == '.' || c == '*')
    }

    /// Whether the naked pattern names a namespace below a root namespace
    pub fn is_nested_namespace(&self) -> bool {
        self.naked().contains('.')
    }
}

/// Translate a glob into an anchored regex
fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::from("^");
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                let mut j = i;
                if j < chars.len() && chars[j] == '!' {
                    j += 1;
                }
                if j < chars.len() && chars[j] == ']' {
                    j += 1;
                }
                while j < chars.len() && chars[j] != ']' {
                    j += 1;
                }
                if j >= chars.len() {
                    out.push_str(r"\[");
                    continue;
                }

                let mut body = &chars[i..j];
                i = j + 1;
                out.push('[');
                if body.first() == Some(&'!') {
                    out.push('^');
                    body = &body[1..];
                }
                for &ch in body {
                    if matches!(ch, '\\' | '[' | ']' | '&' | '~' | '^') {
                        out.push('\\');
                    }
                    out.push(ch);
                }
                out.push(']');
            }
            _ => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }

    out.push('$');
    out
}

/// Chunk of a full name for natural ordering
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum NameChunk {
    Text(String),
    Number(u64),
}

/// Split a name into alternating text and number chunks
///
/// Always starts and ends with a (possibly empty) text chunk.
pub fn natural_key(name: &str) -> Vec<NameChunk> {
    let mut chunks = Vec::new();
    let mut text = String::new();
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_ascii_digit() {
            text.push(c);
            continue;
        }
        let mut digits = String::from(c);
        while let Some(&d) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            digits.push(d);
            chars.next();
        }
        chunks.push(NameChunk::Text(std::mem::take(&mut text)));
        chunks.push(NameChunk::Number(digits.parse().unwrap_or(u64::MAX)));
    }

    chunks.push(NameChunk::Text(text));
    chunks
}

/// Sort by natural name order, newest version first
pub fn sort_naturally(types: &mut [&DsdlType]) {
    types.sort_by_cached_key(|t| (natural_key(&t.full_name), Reverse(t.version)));
}

/// All types matching `pattern`, naturally ordered
pub fn select<'a>(pattern: &TypePattern, types: &'a [DsdlType]) -> Result<Vec<&'a DsdlType>> {
    let mut matching: Vec<&DsdlType> = types.iter().filter(|t| pattern.matches(&t.full_name)).collect();
    if matching.is_empty() {
        return Err(DocsError::NoMatch {
            pattern: pattern.as_str().to_string(),
            suggestions: suggest(pattern.naked(), types),
        });
    }
    sort_naturally(&mut matching);
    Ok(matching)
}

/// Full names that fuzzily resemble `query`, best first
pub fn suggest(query: &str, types: &[DsdlType]) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }
    let matcher = SkimMatcherV2::default();
    let mut best: HashMap<&str, i64> = HashMap::new();
    for t in types {
        if let Some(score) = matcher.fuzzy_match(&t.full_name, query) {
            best.insert(&t.full_name, score);
        }
    }

    let mut ranked: Vec<(&str, i64)> = best.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(name, _)| name.to_string())
        .collect()
}

/// First non-deprecated type of a naturally ordered selection
pub fn latest_non_deprecated<'a>(
    pattern: &TypePattern,
    matching: &[&'a DsdlType],
) -> Result<&'a DsdlType> {
    matching
        .iter()
        .copied()
        .find(|t| !t.deprecated)
        .ok_or_else(|| DocsError::AllDeprecated {
            pattern: pattern.as_str().to_string(),
        })
}

/// All versions of one type, newest first
#[derive(Debug, Clone)]
pub struct TypeGroup<'a> {
    pub full_name: &'a str,
    pub versions: Vec<&'a DsdlType>,
}

impl TypeGroup<'_> {
    /// "service" or "message", taken from the newest version
    pub fn kind_name(&self) -> &'static str {
        self.versions.first().map_or("message", |t| t.kind_name())
    }
}

/// Types of one namespace
#[derive(Debug, Clone)]
pub struct NamespaceGroup<'a> {
    pub namespace: &'a str,
    pub types: Vec<TypeGroup<'a>>,
}

/// Group a naturally ordered selection by namespace and type name
///
/// Types with a fixed port ID come first; otherwise the input order is kept.
pub fn group_by_namespace<'a>(matching: &[&'a DsdlType]) -> Vec<NamespaceGroup<'a>> {
    let mut ordered = matching.to_vec();
    ordered.sort_by_key(|t| !t.has_fixed_port_id());

    let mut groups: Vec<NamespaceGroup<'a>> = Vec::new();
    for t in ordered {
        let namespace = t.namespace();
        let ns_index = match groups.iter().position(|g| g.namespace == namespace) {
            Some(index) => index,
            None => {
                groups.push(NamespaceGroup { namespace, types: Vec::new() });
                groups.len() - 1
            }
        };

        let type_groups = &mut groups[ns_index].types;
        match type_groups.iter().position(|g| g.full_name == t.full_name) {
            Some(index) => type_groups[index].versions.push(t),
            None => type_groups.push(TypeGroup {
                full_name: &t.full_name,
                versions: vec![t],
            }),
        }
    }

    for group in groups.iter_mut().flat_map(|g| g.types.iter_mut()) {
        group.versions.sort_by_key(|t| Reverse(t.version));
    }
    groups
}
