//! Minimal structural layer over tag text.
//!
//! The rewriter and the SEO fixups patch ad hoc markup, not well-formed
//! documents, so there is no document tree here. Instead, regexes locate
//! individual tags and this module parses the located tag into an attribute
//! list, mutates it, and re-serializes — quoting and attribute order
//! survive, and fixups never corrupt each other's output by blind string
//! splicing inside a tag.

use regex::Regex;
use std::sync::LazyLock;

/// Matches a complete `<img …>` tag, self-closing or not.
pub static IMG_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<img\s[^>]+>").unwrap());

/// One parsed attribute. `value: None` is a boolean attribute (`disabled`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: Option<String>,
}

/// A parsed start tag: name, attributes in source order, closing style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub attrs: Vec<Attr>,
    pub self_closing: bool,
}

impl Tag {
    /// Parse a single start tag (`<img src="a.jpg" />`). Returns `None`
    /// when the text is not a plausible tag.
    pub fn parse(text: &str) -> Option<Tag> {
        let inner = text.strip_prefix('<')?.strip_suffix('>')?;
        let (inner, self_closing) = match inner.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (inner, false),
        };

        let name_end = inner
            .find(|c: char| c.is_whitespace())
            .unwrap_or(inner.len());
        let name = &inner[..name_end];
        if name.is_empty() || name.starts_with('/') || name.starts_with('!') {
            return None;
        }

        Some(Tag {
            name: name.to_string(),
            attrs: parse_attributes(&inner[name_end..]),
            self_closing,
        })
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .and_then(|a| a.value.as_deref())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs
            .iter()
            .any(|a| a.name.eq_ignore_ascii_case(name))
    }

    /// Set an attribute value, replacing an existing one in place or
    /// appending a new one at the end.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self
            .attrs
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            Some(attr) => attr.value = Some(value.to_string()),
            None => self.attrs.push(Attr {
                name: name.to_string(),
                value: Some(value.to_string()),
            }),
        }
    }

    /// Serialize back to tag text. Values are normalized to double quotes;
    /// contents are emitted verbatim (they came from the source document or
    /// from config, and were never entity-decoded).
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64);
        out.push('<');
        out.push_str(&self.name);
        for attr in &self.attrs {
            out.push(' ');
            out.push_str(&attr.name);
            if let Some(value) = &attr.value {
                out.push_str("=\"");
                out.push_str(value);
                out.push('"');
            }
        }
        if self.self_closing {
            out.push_str(" /");
        }
        out.push('>');
        out
    }
}

/// Parse HTML-style attributes from a string.
///
/// Input: `src="a.jpg" alt='x' width=250 disabled`
/// Output: four attrs, the last with no value.
pub fn parse_attributes(s: &str) -> Vec<Attr> {
    let mut attrs = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        // Attribute name
        let mut name = String::new();
        name.push(c);
        while let Some(&next) = chars.peek() {
            if next == '=' || next.is_whitespace() {
                break;
            }
            name.push(chars.next().unwrap());
        }

        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        if chars.peek() == Some(&'=') {
            chars.next();
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }

            let value = if chars.peek() == Some(&'"') || chars.peek() == Some(&'\'') {
                let quote = chars.next().unwrap();
                let mut val = String::new();
                for c in chars.by_ref() {
                    if c == quote {
                        break;
                    }
                    val.push(c);
                }
                val
            } else {
                let mut val = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    val.push(chars.next().unwrap());
                }
                val
            };

            attrs.push(Attr {
                name,
                value: Some(value),
            });
        } else {
            attrs.push(Attr { name, value: None });
        }
    }

    attrs
}
