//! Structured text encoders used for golden files.
//!
//! [`to_yaml`] lowers a value through `serde_yaml::Value` and writes block
//! style YAML with a caller-chosen indentation width. Scalars are rendered by
//! serde_yaml itself so quoting follows its rules; only the block layout is
//! done here, because serde_yaml has no indentation setting.

use std::cell::Cell;

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::limit::{DepthLimited, MAX_DEPTH};

/// Widths outside this range fall back to [`DEFAULT_INDENT`].
const INDENT_RANGE: std::ops::RangeInclusive<usize> = 2..=9;
pub const DEFAULT_INDENT: usize = 2;
/// Longest key YAML allows in implicit `key: value` form.
const MAX_IMPLICIT_KEY: usize = 1024;

/// Why a value could not be encoded.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("mapping keys must be scalars, found {0}")]
    ComplexKey(&'static str),
    #[error("value nests deeper than {0} levels; is it cyclic?")]
    TooDeep(usize),
}

/// Encodes `value` as YAML with `indent` spaces per nesting level.
///
/// Widths below 2 or above 9 are treated as 2. The output always ends with
/// a single `\n`.
pub fn to_yaml<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String, EncodeError> {
    let tripped = Cell::new(false);
    let value = serde_yaml::to_value(DepthLimited::new(value, &tripped))
        .map_err(|e| too_deep_or(&tripped, e.into()))?;
    let mut emitter = YamlEmitter {
        indent: effective_indent(indent),
        out: String::new(),
    };
    emitter.write_root(&value)?;
    Ok(emitter.out)
}

/// Encodes `value` as pretty-printed JSON followed by a newline.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, EncodeError> {
    let tripped = Cell::new(false);
    let mut out = serde_json::to_string_pretty(&DepthLimited::new(value, &tripped))
        .map_err(|e| too_deep_or(&tripped, e.into()))?;
    out.push('\n');
    Ok(out)
}

/// Clamps `indent` the way YAML emitters conventionally do.
pub fn effective_indent(indent: usize) -> usize {
    if INDENT_RANGE.contains(&indent) {
        indent
    } else {
        DEFAULT_INDENT
    }
}

fn too_deep_or(tripped: &Cell<bool>, err: EncodeError) -> EncodeError {
    if tripped.get() {
        EncodeError::TooDeep(MAX_DEPTH)
    } else {
        err
    }
}

struct YamlEmitter {
    indent: usize,
    out: String,
}

impl YamlEmitter {
    /// Width of a sequence item marker, `-` plus padding.
    fn dash_width(&self) -> usize {
        self.indent.max(2)
    }

    fn pad(&mut self, col: usize) {
        self.out.extend(std::iter::repeat(' ').take(col));
    }

    fn write_root(&mut self, value: &Value) -> Result<(), EncodeError> {
        match value {
            Value::Mapping(map) if !map.is_empty() => self.write_mapping(map, 0, false),
            Value::Sequence(seq) if !seq.is_empty() => self.write_sequence(seq, 0, false),
            Value::Tagged(tagged) => {
                self.out.push_str(&tagged.tag.to_string());
                self.write_after_marker(&tagged.value, 0)
            }
            scalar => {
                let text = render_scalar(scalar)?;
                self.out.push_str(&text);
                self.out.push('\n');
                Ok(())
            }
        }
    }

    /// Writes the remainder of a line that already holds `key:`, `-` or a tag,
    /// placing any block content at column `col`.
    fn write_after_marker(&mut self, value: &Value, col: usize) -> Result<(), EncodeError> {
        match value {
            Value::Mapping(map) if !map.is_empty() => {
                self.out.push('\n');
                self.write_mapping(map, col, false)
            }
            Value::Sequence(seq) if !seq.is_empty() => {
                self.out.push('\n');
                self.write_sequence(seq, col, false)
            }
            Value::Tagged(tagged) => {
                self.out.push(' ');
                self.out.push_str(&tagged.tag.to_string());
                self.write_after_marker(&tagged.value, col)
            }
            scalar => {
                let text = render_scalar(scalar)?;
                self.out.push(' ');
                self.out.push_str(&text);
                self.out.push('\n');
                Ok(())
            }
        }
    }

    fn write_mapping(
        &mut self,
        map: &Mapping,
        col: usize,
        first_inline: bool,
    ) -> Result<(), EncodeError> {
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 || !first_inline {
                self.pad(col);
            }
            let key = render_key(key)?;
            if key.chars().count() > MAX_IMPLICIT_KEY {
                self.out.push_str("? ");
                self.out.push_str(&key);
                self.out.push('\n');
                self.pad(col);
            } else {
                self.out.push_str(&key);
            }
            self.out.push(':');
            self.write_after_marker(value, col + self.indent)?;
        }
        Ok(())
    }

    fn write_sequence(
        &mut self,
        seq: &[Value],
        col: usize,
        first_inline: bool,
    ) -> Result<(), EncodeError> {
        let width = self.dash_width();
        for (i, item) in seq.iter().enumerate() {
            if i > 0 || !first_inline {
                self.pad(col);
            }
            let item_col = col + width;
            match item {
                Value::Mapping(map) if !map.is_empty() => {
                    self.out.push_str(&format!("{:<width$}", "-"));
                    self.write_mapping(map, item_col, true)?;
                }
                Value::Sequence(inner) if !inner.is_empty() => {
                    self.out.push_str(&format!("{:<width$}", "-"));
                    self.write_sequence(inner, item_col, true)?;
                }
                other => {
                    self.out.push('-');
                    self.write_after_marker(other, item_col)?;
                }
            }
        }
        Ok(())
    }
}

fn render_key(key: &Value) -> Result<String, EncodeError> {
    match key {
        Value::Sequence(_) => Err(EncodeError::ComplexKey("a sequence")),
        Value::Mapping(_) => Err(EncodeError::ComplexKey("a mapping")),
        Value::Tagged(_) => Err(EncodeError::ComplexKey("a tagged value")),
        scalar => render_scalar(scalar),
    }
}

fn render_scalar(value: &Value) -> Result<String, EncodeError> {
    match value {
        Value::Sequence(_) => Ok("[]".to_string()),
        Value::Mapping(_) => Ok("{}".to_string()),
        // Block scalars would depend on the surrounding indentation.
        Value::String(s) if s.contains(['\n', '\r']) => Ok(serde_json::to_string(s)?),
        _ => {
            let text = serde_yaml::to_string(value)?;
            Ok(text.trim_end_matches('\n').to_string())
        }
    }
}
