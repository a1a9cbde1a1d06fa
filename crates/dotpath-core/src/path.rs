use crate::error::PathError;
use regex::Regex;
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A regular expression that must match a whole key.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, PathError> {
        let invalid = |err| PathError::InvalidPattern {
            pattern: source.to_string(),
            source: err,
        };
        // Validate the bare source first so an unbalanced group cannot escape the anchors.
        Regex::new(source).map_err(invalid)?;
        let regex = Regex::new(&format!("^(?:{source})$")).map_err(invalid)?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Pattern(Pattern),
}

impl Segment {
    fn classify(raw: &str) -> Result<Self, PathError> {
        match wrapped_inner(raw) {
            Some(inner) => Ok(Segment::Pattern(Pattern::new(inner)?)),
            None => Ok(Segment::Literal(raw.to_string())),
        }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Literal(name) => write!(f, "{name}"),
            Segment::Pattern(pattern) => write!(f, "{{{}}}", pattern.as_str()),
        }
    }
}

/// A tokenized dot path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Tokenizes `input` in regex mode: `{...}` segments become patterns and
    /// dots inside braces do not split.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let segments = split_segments(input)
            .into_iter()
            .map(Segment::classify)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn has_patterns(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Pattern(_)))
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Path::parse(input)
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Splits on dots that are not inside a `{...}` block. A backslash keeps the
/// next brace from toggling the block; it never protects a dot outside one.
pub fn split_segments(input: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0usize;
    let mut inside = false;
    let mut escaped = false;

    for (position, c) in input.char_indices() {
        let after_backslash = std::mem::take(&mut escaped);
        match c {
            '\\' if !after_backslash => escaped = true,
            '{' | '}' if after_backslash => {}
            '{' => inside = true,
            '}' => inside = false,
            '.' if !inside => {
                segments.push(&input[start..position]);
                start = position + 1;
            }
            _ => {}
        }
    }
    segments.push(&input[start..]);
    segments
}

/// Wraps a key containing dots as `{k\.e\.y}` so it survives a regex-mode parse.
pub fn escape_key(key: &str) -> Cow<'_, str> {
    if key.contains('.') {
        Cow::Owned(format!("{{{}}}", key.replace('.', r"\.")))
    } else {
        Cow::Borrowed(key)
    }
}

/// Appends `key` to a concrete path string.
pub fn push_key(path: &mut String, key: &str) {
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(&escape_key(key));
}

/// Splits a concrete path back into the literal keys it names.
pub fn concrete_keys(path: &str) -> Vec<String> {
    split_segments(path)
        .into_iter()
        .map(|raw| match wrapped_inner(raw) {
            Some(inner) => inner.replace(r"\.", "."),
            None => raw.to_string(),
        })
        .collect()
}

fn wrapped_inner(raw: &str) -> Option<&str> {
    if raw.len() >= 2 && raw.starts_with('{') && raw.ends_with('}') {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

#[cfg(test)]
#[path = "path_test.rs"]
mod tests;
