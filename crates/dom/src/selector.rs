//! Compound selectors for item discovery.
//!
//! Only the subset needed to enumerate grid items and filter buttons is
//! supported: `*`, `tag`, `#id`, `.class` and `[attr]` / `[attr="value"]`,
//! optionally chained (`div.portfolio-item[data-id]`). Combinators are not.

use common::{MosaicError, MosaicResult};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// One simple selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
}

/// A sequence of simple selectors that must all match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundSelector {
    parts: Vec<SimpleSelector>,
}

impl CompoundSelector {
    pub fn parts(&self) -> &[SimpleSelector] {
        &self.parts
    }

    pub fn class(name: &str) -> Self {
        Self {
            parts: vec![SimpleSelector::Class(name.to_string())],
        }
    }
}

impl From<Vec<SimpleSelector>> for CompoundSelector {
    fn from(parts: Vec<SimpleSelector>) -> Self {
        Self { parts }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(input: &str) -> (&str, &str) {
    let end = input
        .char_indices()
        .find(|(_, c)| !is_ident_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    input.split_at(end)
}

impl FromStr for CompoundSelector {
    type Err = MosaicError;

    fn from_str(s: &str) -> MosaicResult<Self> {
        parse_compound(s.trim()).map_err(|err| {
            warn!(selector = s, %err, "rejected selector");
            err
        })
    }
}

fn parse_compound(input: &str) -> MosaicResult<CompoundSelector> {
    if input.is_empty() {
        return Err(MosaicError::selector("empty selector"));
    }
    if input.contains(char::is_whitespace) || input.contains(['>', '+', '~', ',']) {
        return Err(MosaicError::selector(format!(
            "combinators are not supported: {}",
            input
        )));
    }

    let mut parts = Vec::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        match c {
            '*' => {
                parts.push(SimpleSelector::Universal);
                rest = &rest[1..];
            }
            '.' | '#' => {
                let (ident, tail) = take_ident(&rest[1..]);
                if ident.is_empty() {
                    return Err(MosaicError::selector(format!(
                        "expected identifier after '{}' in {}",
                        c, input
                    )));
                }
                parts.push(if c == '.' {
                    SimpleSelector::Class(ident.to_string())
                } else {
                    SimpleSelector::Id(ident.to_string())
                });
                rest = tail;
            }
            '[' => {
                let close = rest.find(']').ok_or_else(|| {
                    MosaicError::selector(format!("unclosed attribute selector in {}", input))
                })?;
                let body = &rest[1..close];
                let (name, value) = match body.split_once('=') {
                    Some((name, value)) => {
                        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                        (name.trim(), Some(value.to_string()))
                    }
                    None => (body.trim(), None),
                };
                if name.is_empty() || !name.chars().all(is_ident_char) {
                    return Err(MosaicError::selector(format!(
                        "invalid attribute name in {}",
                        input
                    )));
                }
                parts.push(SimpleSelector::Attribute {
                    name: name.to_ascii_lowercase(),
                    value,
                });
                rest = &rest[close + 1..];
            }
            c if is_ident_char(c) => {
                if !parts.is_empty() {
                    return Err(MosaicError::selector(format!(
                        "type selector must come first in {}",
                        input
                    )));
                }
                let (ident, tail) = take_ident(rest);
                parts.push(SimpleSelector::Tag(ident.to_ascii_lowercase()));
                rest = tail;
            }
            other => {
                return Err(MosaicError::selector(format!(
                    "unexpected '{}' in {}",
                    other, input
                )));
            }
        }
    }

    Ok(CompoundSelector { parts })
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                SimpleSelector::Universal => f.write_str("*")?,
                SimpleSelector::Tag(tag) => f.write_str(tag)?,
                SimpleSelector::Id(id) => write!(f, "#{}", id)?,
                SimpleSelector::Class(class) => write!(f, ".{}", class)?,
                SimpleSelector::Attribute { name, value: None } => write!(f, "[{}]", name)?,
                SimpleSelector::Attribute {
                    name,
                    value: Some(v),
                } => write!(f, "[{}=\"{}\"]", name, v)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class() {
        let sel: CompoundSelector = ".portfolio-item".parse().unwrap();
        assert_eq!(
            sel.parts(),
            &[SimpleSelector::Class("portfolio-item".to_string())]
        );
    }

    #[test]
    fn test_parse_compound() {
        let sel: CompoundSelector = "div.card[data-filter=\".web\"]".parse().unwrap();
        assert_eq!(sel.parts().len(), 3);
        assert_eq!(sel.parts()[0], SimpleSelector::Tag("div".to_string()));
        assert_eq!(
            sel.parts()[2],
            SimpleSelector::Attribute {
                name: "data-filter".to_string(),
                value: Some(".web".to_string())
            }
        );
        assert_eq!(sel.to_string(), "div.card[data-filter=\".web\"]");
    }

    #[test]
    fn test_parse_rejects_combinators() {
        assert!(".grid .item".parse::<CompoundSelector>().is_err());
        assert!("a > b".parse::<CompoundSelector>().is_err());
        assert!("".parse::<CompoundSelector>().is_err());
        assert!(".".parse::<CompoundSelector>().is_err());
        assert!(".a div".parse::<CompoundSelector>().is_err());
        assert!("[unclosed".parse::<CompoundSelector>().is_err());
    }

    #[test]
    fn test_rejection_is_a_selector_error() {
        let err = " .grid .item ".parse::<CompoundSelector>().unwrap_err();
        assert!(matches!(err, MosaicError::Selector(_)));
        assert!(err.to_string().contains(".grid .item"));

        let err = "div#".parse::<CompoundSelector>().unwrap_err();
        assert!(matches!(err, MosaicError::Selector(_)));
    }
}
