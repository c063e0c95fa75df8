//! Parse key/value frontmatter from the head of a document.
//!
//! Hand-rolled (no serde_yaml): documents in the corpus only ever use
//! `key: value` lines and `[a, b, c]` inline lists. Malformed or partial
//! blocks never error; the whole input degrades to body text.

/// A frontmatter value: either a plain string or an inline list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    List(Vec<String>),
}

/// Ordered key/value mapping parsed from a frontmatter block.
/// Duplicate keys keep the last occurrence, like the JS objects the
/// corpus format grew out of.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, Value)>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Scalar value for `key`, or None if absent or a list.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(Value::Scalar(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// List value for `key`, or None if absent or a scalar.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.get(key) {
            Some(Value::List(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: String, value: Value) {
        if let Some(existing) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            existing.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }
}

/// Split a document into (frontmatter, body).
///
/// The block is only recognized when the document starts with a `---` line
/// and a later `---` line followed by a newline closes it; anything else
/// (including a missing trailing newline on the closing fence) means no
/// frontmatter and the entire input is the body. Tolerates CRLF.
pub fn parse(content: &str) -> (Option<Frontmatter>, String) {
    let rest = match content
        .strip_prefix("---\r\n")
        .or_else(|| content.strip_prefix("---\n"))
    {
        Some(rest) => rest,
        None => return (None, content.to_string()),
    };

    // Scan for the first closing fence: a line of exactly three dashes that
    // is terminated by a newline. The fence cannot be the first line after
    // the opening (the source format separates the fences with a newline,
    // so `---\n---\n` is not a frontmatter block).
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if offset > 0 && line.ends_with('\n') && line.trim_end_matches(['\n', '\r']) == "---" {
            let block = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(parse_block(block)), body.to_string());
        }
        offset += line.len();
    }

    (None, content.to_string())
}

/// Parse the lines between the fences into a `Frontmatter` mapping.
fn parse_block(block: &str) -> Frontmatter {
    let mut fm = Frontmatter::default();

    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        fm.insert(key.to_string(), parse_value(value.trim()));
    }

    fm
}

/// Classify a raw value: inline list, quoted scalar, or plain scalar.
fn parse_value(value: &str) -> Value {
    if value.starts_with('[') && value.ends_with(']') {
        Value::List(parse_inline_list(value))
    } else {
        Value::Scalar(unquote(value).to_string())
    }
}

/// Parse an inline list like `[foo, bar, "baz qux"]`.
/// Elements are trimmed, stripped of one layer of quotes, and empty
/// elements dropped.
fn parse_inline_list(value: &str) -> Vec<String> {
    let inner = &value[1..value.len() - 1];
    inner
        .split(',')
        .map(|item| unquote(item.trim()))
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect()
}

/// Remove one layer of matching surrounding single or double quotes.
fn unquote(s: &str) -> &str {
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"'))
            || (s.starts_with('\'') && s.ends_with('\'')))
    {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
