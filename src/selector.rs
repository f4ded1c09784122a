//! Minimal selector matching used by drop-target accept rules.
//!
//! Supports tag names, `#id`, `.class`, compounds of those, and
//! comma-separated alternative lists. Combinators, attributes and
//! pseudo-classes are out of scope and rejected at parse time.

use std::collections::BTreeSet;
use std::fmt;

/// Errors raised while parsing a selector string.
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    /// The selector (or one comma-separated part of it) was empty.
    #[error("Selector {selector:?} contains an empty part")]
    Empty {
        /// The full selector text as given.
        selector: String,
    },
    /// The selector uses syntax this matcher does not implement.
    #[error("Unsupported {token:?} in selector {selector:?}")]
    Unsupported {
        /// The full selector text as given.
        selector: String,
        /// The offending character.
        token: char,
    },
    /// A `.` or `#` prefix was not followed by a name.
    #[error("Missing name after {prefix:?} in selector {selector:?}")]
    MissingName {
        /// The full selector text as given.
        selector: String,
        /// The prefix that lacked a name.
        prefix: char,
    },
}

/// One compound: every listed part must hold on the same node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Compound {
    fn matches(&self, tag: &str, id: Option<&str>, classes: &BTreeSet<String>) -> bool {
        if let Some(wanted) = &self.tag {
            if wanted != tag {
                return false;
            }
        }
        if let Some(wanted) = &self.id {
            if id != Some(wanted.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|class| classes.contains(class))
    }
}

/// A parsed selector: a node matches when any alternative compound matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    text: String,
    alternatives: Vec<Compound>,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let alternatives = input
            .split(',')
            .map(|part| parse_compound(input, part.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            text: input.to_string(),
            alternatives,
        })
    }

    /// Match against one node's tag, id and class set.
    pub(crate) fn matches(&self, tag: &str, id: Option<&str>, classes: &BTreeSet<String>) -> bool {
        self.alternatives
            .iter()
            .any(|compound| compound.matches(tag, id, classes))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn parse_compound(selector: &str, part: &str) -> Result<Compound, SelectorError> {
    if part.is_empty() {
        return Err(SelectorError::Empty {
            selector: selector.to_string(),
        });
    }
    if let Some(token) = part
        .chars()
        .find(|c| c.is_whitespace() || matches!(c, '>' | '+' | '~' | '[' | ']' | ':' | '('))
    {
        return Err(SelectorError::Unsupported {
            selector: selector.to_string(),
            token,
        });
    }

    let mut compound = Compound::default();
    let mut rest = part;
    if !rest.starts_with(['.', '#']) {
        let end = rest.find(['.', '#']).unwrap_or(rest.len());
        let tag = &rest[..end];
        if tag != "*" {
            compound.tag = Some(tag.to_string());
        }
        rest = &rest[end..];
    }
    while let Some(prefix) = rest.chars().next() {
        let body = &rest[prefix.len_utf8()..];
        let end = body.find(['.', '#']).unwrap_or(body.len());
        let name = &body[..end];
        if name.is_empty() {
            return Err(SelectorError::MissingName {
                selector: selector.to_string(),
                prefix,
            });
        }
        match prefix {
            '.' => compound.classes.push(name.to_string()),
            '#' => compound.id = Some(name.to_string()),
            _ => unreachable!("compound scanning stops on '.' and '#' only"),
        }
        rest = &body[end..];
    }
    Ok(compound)
}
