//! YAML frontmatter extraction.
//!
//! A frontmatter block opens with a `---` line at the very start of the
//! file and closes with a `---` (or `...`) line:
//!
//! ```text
//! ---
//! title: Install
//! weight: 20
//! tags: [setup, cli]
//! ---
//! # Install
//! ```
//!
//! Files without an opening fence have an empty frontmatter map.

use serde_json::{Map, Value};

use crate::error::IndexError;

/// Frontmatter map plus the body that follows it.
#[derive(Debug, Default, PartialEq)]
pub struct Frontmatter {
    /// Parsed fields, in document order.
    pub fields: Map<String, Value>,
    /// Source text after the closing fence.
    pub body: String,
}

impl Frontmatter {
    /// Split and parse frontmatter from raw file content.
    ///
    /// An empty block (or one that holds only a YAML null) yields an empty
    /// map. An unterminated fence is treated as body text.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Frontmatter`] if the block is not valid YAML or
    /// is not a mapping.
    pub fn parse(raw: &str) -> Result<Self, IndexError> {
        let content = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let Some((yaml, body)) = split_block(content) else {
            return Ok(Self {
                fields: Map::new(),
                body: content.to_owned(),
            });
        };

        if yaml.trim().is_empty() {
            return Ok(Self {
                fields: Map::new(),
                body: body.to_owned(),
            });
        }

        let value: Value = serde_yaml::from_str(yaml)
            .map_err(|e| IndexError::Frontmatter(format!("Invalid YAML: {e}")))?;

        let fields = match value {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(IndexError::Frontmatter(format!(
                    "expected a mapping, found {}",
                    kind_name(&other)
                )));
            }
        };

        Ok(Self {
            fields,
            body: body.to_owned(),
        })
    }
}

/// Split `---\n<yaml>\n---\n<body>` into its YAML and body parts.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        let marker = line.trim_end();
        if marker == "---" || marker == "..." {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    None
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
