//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

use itertools::Itertools;

use crate::proto;

// gNMI string path parsing errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathError {
    EmptyElemName,
    MissingKeyValue(String),
    EmptyKeyName(String),
    UnterminatedKey(String),
    UnexpectedChar(String, char),
}

// ===== impl Path =====

impl proto::Path {
    // Returns the value of the given key in the first path element with the
    // given name.
    pub fn key(&self, elem: &str, key: &str) -> Option<&str> {
        self.elem
            .iter()
            .find(|pelem| pelem.name == elem && pelem.key.contains_key(key))
            .and_then(|pelem| pelem.key.get(key))
            .map(String::as_str)
    }

    // Concatenates a notification prefix and a relative update path.
    pub fn join(
        prefix: Option<&proto::Path>,
        path: proto::Path,
    ) -> proto::Path {
        let Some(prefix) = prefix else {
            return path;
        };

        let origin = if prefix.origin.is_empty() {
            path.origin
        } else {
            prefix.origin.clone()
        };
        let target = if prefix.target.is_empty() {
            path.target
        } else {
            prefix.target.clone()
        };
        let elem = prefix.elem.iter().cloned().chain(path.elem).collect();

        proto::Path {
            origin,
            elem,
            target,
        }
    }
}

impl FromStr for proto::Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars().peekable();
        let mut elem = vec![];

        loop {
            // Leading and repeated separators are ignored.
            while chars.next_if_eq(&'/').is_some() {}
            if chars.peek().is_none() {
                break;
            }
            elem.push(parse_elem(&mut chars)?);
        }

        Ok(proto::Path {
            origin: String::new(),
            elem,
            target: String::new(),
        })
    }
}

impl std::fmt::Display for proto::Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.elem.is_empty() {
            return write!(f, "/");
        }
        for pelem in &self.elem {
            write!(f, "/{}", pelem)?;
        }
        Ok(())
    }
}

// ===== impl PathElem =====

impl std::fmt::Display for proto::PathElem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for (key, value) in self.key.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            write!(f, "[{}={}]", key, escape_key_value(value))?;
        }
        Ok(())
    }
}

// ===== impl PathError =====

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::EmptyElemName => {
                write!(f, "path element with empty name")
            }
            PathError::MissingKeyValue(name) => {
                write!(f, "key without value in element '{}'", name)
            }
            PathError::EmptyKeyName(name) => {
                write!(f, "key with empty name in element '{}'", name)
            }
            PathError::UnterminatedKey(name) => {
                write!(f, "unterminated key in element '{}'", name)
            }
            PathError::UnexpectedChar(name, c) => {
                write!(
                    f,
                    "unexpected character '{}' after element '{}'",
                    c, name
                )
            }
        }
    }
}

impl std::error::Error for PathError {}

// ===== helper functions =====

fn parse_elem(
    chars: &mut Peekable<Chars<'_>>,
) -> Result<proto::PathElem, PathError> {
    let mut name = String::new();
    while let Some(c) = chars.next_if(|c| *c != '/' && *c != '[') {
        name.push(c);
    }
    if name.is_empty() {
        return Err(PathError::EmptyElemName);
    }

    let mut key = HashMap::new();
    while chars.next_if_eq(&'[').is_some() {
        // Key name, up to the '=' separator.
        let mut kname = String::new();
        loop {
            match chars.next() {
                Some('=') => break,
                Some(']') | None => {
                    return Err(PathError::MissingKeyValue(name));
                }
                Some(c) => kname.push(c),
            }
        }
        if kname.is_empty() {
            return Err(PathError::EmptyKeyName(name));
        }

        // Key value, up to the first unescaped ']'. Separators are allowed.
        let mut kvalue = String::new();
        loop {
            match chars.next() {
                Some('\\') => match chars.next() {
                    Some(c) => kvalue.push(c),
                    None => return Err(PathError::UnterminatedKey(name)),
                },
                Some(']') => break,
                Some(c) => kvalue.push(c),
                None => return Err(PathError::UnterminatedKey(name)),
            }
        }
        key.insert(kname, kvalue);
    }

    match chars.peek() {
        None | Some('/') => Ok(proto::PathElem { name, key }),
        Some(c) => Err(PathError::UnexpectedChar(name, *c)),
    }
}

fn escape_key_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
