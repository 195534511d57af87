//! Literal-syntax codec for flattened tables.
//!
//! Older artifacts store list and record fields as literal text inside a
//! single cell: `['Asthma', 'COPD']`, `{'name': 'Jane Doe', 'phone': '...'}`.
//! Native JSON records never go through this module; it exists so flattened
//! rows can be written and read back.
//!
//! Decoding never fails. Already-structured input passes through untouched,
//! and text that does not parse degrades to a single-element list (for list
//! fields) or a scalar-wrapped record (for record fields).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Field shapes
// ============================================================================

/// A list-valued field as found in a record: structured or still encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListField {
    Items(Vec<String>),
    Encoded(String),
}

/// A record-valued field as found in a record: structured or still encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordField<T> {
    Record(T),
    Encoded(String),
}

/// Best-effort record built from a single unparseable cell.
pub trait ScalarFallback {
    fn from_scalar(raw: &str) -> Self;
}

// ============================================================================
// Literal values
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    List(Vec<Literal>),
    Dict(Vec<(Literal, Literal)>),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected '{ch}' at byte {pos}")]
    Unexpected { ch: char, pos: usize },
    #[error("trailing input at byte {0}")]
    TrailingInput(usize),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unknown name '{0}'")]
    UnknownName(String),
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),
}

impl Literal {
    /// Scalar text of a literal; nested values are re-encoded.
    pub fn into_text(self) -> String {
        match self {
            Literal::Str(s) => s,
            Literal::Int(n) => n.to_string(),
            Literal::Float(x) => x.to_string(),
            Literal::Bool(true) => "True".to_string(),
            Literal::Bool(false) => "False".to_string(),
            Literal::None => "None".to_string(),
            other => other.render(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        render_literal(self, &mut out);
        out
    }

    fn into_json(self) -> Value {
        match self {
            Literal::Str(s) => Value::String(s),
            Literal::Int(n) => Value::from(n),
            Literal::Float(x) => serde_json::Number::from_f64(x)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Literal::Bool(b) => Value::Bool(b),
            Literal::None => Value::Null,
            Literal::List(items) => Value::Array(items.into_iter().map(Literal::into_json).collect()),
            Literal::Dict(pairs) => Value::Object(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into_text(), v.into_json()))
                    .collect(),
            ),
        }
    }

    fn from_json(value: &Value) -> Literal {
        match value {
            Value::Null => Literal::None,
            Value::Bool(b) => Literal::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Literal::Int(i),
                None => Literal::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::String(s) => Literal::Str(s.clone()),
            Value::Array(items) => Literal::List(items.iter().map(Literal::from_json).collect()),
            Value::Object(map) => Literal::Dict(
                map.iter()
                    .map(|(k, v)| (Literal::Str(k.clone()), Literal::from_json(v)))
                    .collect(),
            ),
        }
    }
}

// ============================================================================
// Encoding
// ============================================================================

pub fn encode_list(items: &[String]) -> String {
    Literal::List(items.iter().cloned().map(Literal::Str).collect()).render()
}

/// Encode any serializable record as a literal dict.
pub fn encode_record<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_value(value)?;
    Ok(Literal::from_json(&json).render())
}

fn render_literal(lit: &Literal, out: &mut String) {
    match lit {
        Literal::Str(s) => quote_into(s, out),
        Literal::Int(n) => out.push_str(&n.to_string()),
        Literal::Float(x) => {
            let text = x.to_string();
            out.push_str(&text);
            if !text.contains(['.', 'e', 'E']) && x.is_finite() {
                out.push_str(".0");
            }
        }
        Literal::Bool(true) => out.push_str("True"),
        Literal::Bool(false) => out.push_str("False"),
        Literal::None => out.push_str("None"),
        Literal::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_literal(item, out);
            }
            out.push(']');
        }
        Literal::Dict(pairs) => {
            out.push('{');
            for (i, (k, v)) in pairs.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_literal(k, out);
                out.push_str(": ");
                render_literal(v, out);
            }
            out.push('}');
        }
    }
}

/// Quote like a literal repr: single quotes unless the text holds a single
/// quote and no double quote.
fn quote_into(s: &str, out: &mut String) {
    let delim = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    out.push(delim);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
}

// ============================================================================
// Parsing
// ============================================================================

/// Containers nested deeper than this are rejected instead of recursed into.
pub const MAX_DEPTH: usize = 64;

pub fn parse(src: &str) -> Result<Literal, LiteralError> {
    let mut parser = Parser { src, pos: 0, depth: 0 };
    parser.skip_ws();
    let value = parser.value()?;
    parser.skip_ws();
    if parser.pos < src.len() {
        return Err(LiteralError::TrailingInput(parser.pos));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn unexpected(&self, ch: char) -> LiteralError {
        LiteralError::Unexpected { ch, pos: self.pos }
    }

    fn value(&mut self) -> Result<Literal, LiteralError> {
        match self.peek().ok_or(LiteralError::UnexpectedEnd)? {
            '[' => self.nested(|p| p.sequence(']').map(Literal::List)),
            '(' => self.nested(|p| p.sequence(')').map(Literal::List)),
            '{' => self.nested(|p| p.dict()),
            '\'' | '"' => self.string().map(Literal::Str),
            c if c == '-' || c == '+' || c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.name(),
            c => Err(self.unexpected(c)),
        }
    }

    fn nested<F>(&mut self, inner: F) -> Result<Literal, LiteralError>
    where
        F: FnOnce(&mut Self) -> Result<Literal, LiteralError>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }

    fn sequence(&mut self, close: char) -> Result<Vec<Literal>, LiteralError> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(items);
            }
            items.push(self.value()?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(items),
                Some(c) => return Err(self.unexpected(c)),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn dict(&mut self) -> Result<Literal, LiteralError> {
        self.bump();
        let mut pairs = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Literal::Dict(pairs));
            }
            let key = self.value()?;
            self.skip_ws();
            match self.bump() {
                Some(':') => {}
                Some(c) => return Err(self.unexpected(c)),
                None => return Err(LiteralError::UnexpectedEnd),
            }
            self.skip_ws();
            let value = self.value()?;
            pairs.push((key, value));
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Literal::Dict(pairs)),
                Some(c) => return Err(self.unexpected(c)),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn string(&mut self) -> Result<String, LiteralError> {
        let delim = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
        let mut out = String::new();
        loop {
            match self.bump().ok_or(LiteralError::UnexpectedEnd)? {
                '\\' => match self.bump().ok_or(LiteralError::UnexpectedEnd)? {
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    '\\' => out.push('\\'),
                    '\'' => out.push('\''),
                    '"' => out.push('"'),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                },
                c if c == delim => return Ok(out),
                c => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_')) {
            self.bump();
        }
        let text = self.src[start..self.pos].replace('_', "");
        if let Ok(n) = text.parse::<i64>() {
            return Ok(Literal::Int(n));
        }
        text.parse::<f64>()
            .map(Literal::Float)
            .map_err(|_| LiteralError::InvalidNumber(text))
    }

    fn name(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "True" => Ok(Literal::Bool(true)),
            "False" => Ok(Literal::Bool(false)),
            "None" => Ok(Literal::None),
            other => Err(LiteralError::UnknownName(other.to_string())),
        }
    }
}

// ============================================================================
// Tolerant decoding
// ============================================================================

/// Decode a list field. Structured input is returned as-is.
pub fn decode_list(field: &ListField) -> Vec<String> {
    match field {
        ListField::Items(items) => items.clone(),
        ListField::Encoded(raw) => decode_list_text(raw),
    }
}

/// Decode literal list text. Blank text is an empty list; anything that is
/// not a literal list becomes a one-element list holding the raw text.
pub fn decode_list_text(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match parse(raw) {
        Ok(Literal::List(items)) => items.into_iter().map(Literal::into_text).collect(),
        Ok(_) => vec![raw.to_string()],
        Err(e) => {
            tracing::warn!("List field '{}' is not a literal list ({}), wrapping as one item", raw, e);
            vec![raw.to_string()]
        }
    }
}

/// Decode a record field. Structured input is returned as-is.
pub fn decode_record<T>(field: &RecordField<T>) -> T
where
    T: DeserializeOwned + ScalarFallback + Clone,
{
    match field {
        RecordField::Record(record) => record.clone(),
        RecordField::Encoded(raw) => decode_record_text(raw),
    }
}

/// Decode literal dict text into `T`, falling back to [`ScalarFallback`].
pub fn decode_record_text<T>(raw: &str) -> T
where
    T: DeserializeOwned + ScalarFallback,
{
    let parsed = parse(raw)
        .map_err(|e| e.to_string())
        .and_then(|lit| match lit {
            Literal::Dict(_) => serde_json::from_value::<T>(lit.into_json()).map_err(|e| e.to_string()),
            _ => Err("not a literal dict".to_string()),
        });
    match parsed {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!("Record field '{}' could not be decoded ({}), keeping it as a scalar", raw, e);
            T::from_scalar(raw)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
