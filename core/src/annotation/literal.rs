#![deny(missing_docs)]

//! # Literal Parser
//!
//! A restricted parser for the literal values written in
//! collection descriptions: numbers, `True`/`False`/`None`, quoted strings,
//! lists, tuples and dicts. Anything else (names, calls, operators, sets) is
//! rejected. Results are produced directly as JSON values.

use derive_more::Display;
use serde_json::{Map, Number, Value};

/// A literal failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("invalid literal at offset {offset}: {message}")]
pub struct LiteralError {
    /// Byte offset into the literal text.
    pub offset: usize,
    /// What went wrong.
    pub message: String,
}

impl std::error::Error for LiteralError {}

/// Parses a complete literal. Leading and trailing whitespace is ignored.
pub fn parse_literal(text: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser { src: text, pos: 0 };
    let value = parser.value()?;
    parser.skip_ws();
    if parser.pos < text.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
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

    fn expect(&mut self, expected: char) -> Result<(), LiteralError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.error("empty literal")),
            Some('[') => self.sequence('[', ']').map(Value::Array),
            Some('(') => self.parenthesised(),
            Some('{') => self.dict(),
            Some('\'') | Some('"') => self.strings(),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.word(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
        }
    }

    fn word(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        let src = self.src;
        let word = &src[start..self.pos];
        match word {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::Null),
            "r" | "R" | "u" | "U" if matches!(self.peek(), Some('\'') | Some('"')) => {
                let raw = word.eq_ignore_ascii_case("r");
                self.string(raw).map(Value::String)
            }
            _ => {
                self.pos = start;
                Err(self.error(format!("'{}' is not a literal", word)))
            }
        }
    }

    /// Adjacent string literals concatenate.
    fn strings(&mut self) -> Result<Value, LiteralError> {
        let mut out = self.string(false)?;
        loop {
            let checkpoint = self.pos;
            self.skip_ws();
            if matches!(self.peek(), Some('\'') | Some('"')) {
                out.push_str(&self.string(false)?);
            } else {
                self.pos = checkpoint;
                return Ok(out.into());
            }
        }
    }

    fn string(&mut self, raw: bool) -> Result<String, LiteralError> {
        let quote = match self.bump() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error("expected a quote")),
        };
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') if raw => {
                    out.push('\\');
                    if let Some(next) = self.bump() {
                        out.push(next);
                    }
                }
                Some('\\') => self.escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        let c = self
            .bump()
            .ok_or_else(|| self.error("unterminated escape"))?;
        match c {
            '\n' => {}
            '\\' | '\'' | '"' => out.push(c),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0'..='7' => out.push(self.octal_escape(c)?),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            'x' => out.push(self.hex_escape(2)?),
            'u' => out.push(self.hex_escape(4)?),
            'U' => out.push(self.hex_escape(8)?),
            'N' => return Err(self.error("named unicode escapes are not supported")),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    /// Up to three octal digits, the first already consumed.
    fn octal_escape(&mut self, first: char) -> Result<char, LiteralError> {
        let mut code = first.to_digit(8).unwrap_or_default();
        for _ in 0..2 {
            match self.peek().and_then(|c| c.to_digit(8)) {
                Some(digit) => {
                    code = code * 8 + digit;
                    self.bump();
                }
                None => break,
            }
        }
        char::from_u32(code).ok_or_else(|| self.error("escape is not a valid character"))
    }

    fn hex_escape(&mut self, digits: usize) -> Result<char, LiteralError> {
        let rest = self.rest();
        let hex = rest
            .get(..digits)
            .filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| self.error("truncated hex escape"))?;
        let code = u32::from_str_radix(hex, 16).map_err(|e| self.error(e.to_string()))?;
        self.pos += digits;
        char::from_u32(code).ok_or_else(|| self.error("escape is not a valid character"))
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let mut negative = false;
        while let Some(sign @ ('-' | '+')) = self.peek() {
            negative ^= sign == '-';
            self.bump();
            self.skip_ws();
        }
        let digits_start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '.' || c == '_')
        {
            let c = self.bump();
            // exponent sign
            if matches!(c, Some('e' | 'E'))
                && !self.src[digits_start..self.pos].starts_with("0x")
                && matches!(self.peek(), Some('-' | '+'))
            {
                self.bump();
            }
        }
        let src = self.src;
        let token = &src[digits_start..self.pos];
        let number = parse_number(token, negative).ok_or_else(|| LiteralError {
            offset: start,
            message: format!("'{}' is not a number", &src[start..self.pos]),
        })?;
        Ok(Value::Number(number))
    }

    fn parenthesised(&mut self) -> Result<Value, LiteralError> {
        self.expect('(')?;
        self.skip_ws();
        if self.peek() == Some(')') {
            self.bump();
            return Ok(Value::Array(Vec::new()));
        }
        let first = self.value()?;
        self.skip_ws();
        match self.bump() {
            // plain grouping
            Some(')') => Ok(first),
            Some(',') => {
                let mut items = vec![first];
                items.extend(self.items(')')?);
                Ok(Value::Array(items))
            }
            _ => Err(self.error("expected ',' or ')'")),
        }
    }

    fn sequence(&mut self, open: char, close: char) -> Result<Vec<Value>, LiteralError> {
        self.expect(open)?;
        self.items(close)
    }

    /// Comma separated values up to `close`, trailing comma allowed.
    fn items(&mut self, close: char) -> Result<Vec<Value>, LiteralError> {
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
                _ => return Err(self.error(format!("expected ',' or '{}'", close))),
            }
        }
    }

    fn dict(&mut self) -> Result<Value, LiteralError> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Object(map));
            }
            let key_offset = self.pos;
            let key = self.value()?;
            self.skip_ws();
            if self.peek() != Some(':') {
                return Err(self.error("expected ':' (sets are not supported)"));
            }
            self.bump();
            let value = self.value()?;
            let key = dict_key(key).ok_or_else(|| LiteralError {
                offset: key_offset,
                message: "dict keys must be scalars".to_string(),
            })?;
            map.insert(key, value);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Object(map)),
                _ => return Err(self.error("expected ',' or '}'")),
            }
        }
    }
}

/// Scalar keys are rendered the way a JSON encoder would.
fn dict_key(key: Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_number(token: &str, negative: bool) -> Option<Number> {
    if token.is_empty() || token.starts_with('_') || token.ends_with('_') || token.contains("__")
    {
        return None;
    }
    let token = token.replace('_', "");
    let lower = token.to_ascii_lowercase();
    let radix = match lower.get(..2) {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let magnitude = i128::from_str_radix(&lower[2..], radix).ok()?;
        return integer(if negative { -magnitude } else { magnitude });
    }
    if lower.chars().all(|c| c.is_ascii_digit()) {
        // leading zeros only on zero itself
        if lower.len() > 1 && lower.starts_with('0') && lower.chars().any(|c| c != '0') {
            return None;
        }
        let magnitude: i128 = lower.parse().ok()?;
        return integer(if negative { -magnitude } else { magnitude });
    }
    if !lower
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | '+' | '-'))
        || !lower.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }
    let float: f64 = lower.parse().ok()?;
    Number::from_f64(if negative { -float } else { float })
}

fn integer(value: i128) -> Option<Number> {
    if let Ok(v) = i64::try_from(value) {
        Some(Number::from(v))
    } else if let Ok(v) = u64::try_from(value) {
        Some(Number::from(v))
    } else {
        Number::from_f64(value as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(parse_literal("1").unwrap(), json!(1));
        assert_eq!(parse_literal(" -42 ").unwrap(), json!(-42));
        assert_eq!(parse_literal("2.5").unwrap(), json!(2.5));
        assert_eq!(parse_literal("1e3").unwrap(), json!(1000.0));
        assert_eq!(parse_literal("0x1F").unwrap(), json!(31));
        assert_eq!(parse_literal("1_000").unwrap(), json!(1000));
        assert_eq!(parse_literal("True").unwrap(), json!(true));
        assert_eq!(parse_literal("False").unwrap(), json!(false));
        assert_eq!(parse_literal("None").unwrap(), Value::Null);
    }

    #[test]
    fn test_strings() {
        assert_eq!(parse_literal("'abc'").unwrap(), json!("abc"));
        assert_eq!(parse_literal("\"a'b\"").unwrap(), json!("a'b"));
        assert_eq!(parse_literal(r"'a\nb'").unwrap(), json!("a\nb"));
        assert_eq!(parse_literal(r"r'a\nb'").unwrap(), json!("a\\nb"));
        assert_eq!(parse_literal("'a' 'b'").unwrap(), json!("ab"));
        assert_eq!(parse_literal(r"'é'").unwrap(), json!("é"));
    }

    #[test]
    fn test_octal_and_named_escapes() {
        assert_eq!(parse_literal(r"'a\012b'").unwrap(), json!("a\nb"));
        assert_eq!(parse_literal(r"'\0'").unwrap(), json!("\u{0}"));
        assert_eq!(parse_literal(r"'\1019'").unwrap(), json!("A9"));
        assert_eq!(parse_literal(r"'\7'").unwrap(), json!("\u{7}"));
        assert!(parse_literal(r"'\N{BULLET}'").is_err());
    }

    #[test]
    fn test_containers() {
        assert_eq!(parse_literal("['a','b']").unwrap(), json!(["a", "b"]));
        assert_eq!(parse_literal("[1, [2, 3],]").unwrap(), json!([1, [2, 3]]));
        assert_eq!(parse_literal("(1, 2)").unwrap(), json!([1, 2]));
        assert_eq!(parse_literal("(1,)").unwrap(), json!([1]));
        assert_eq!(parse_literal("(1)").unwrap(), json!(1));
        assert_eq!(parse_literal("()").unwrap(), json!([]));
        assert_eq!(
            parse_literal("{'min': 1, 'max': None, 2: True}").unwrap(),
            json!({"min": 1, "max": null, "2": true})
        );
        assert_eq!(parse_literal("{}").unwrap(), json!({}));
    }

    #[test]
    fn test_rejects_non_literals() {
        for text in [
            "",
            "valid",
            "true",
            "__import__('os')",
            "1 + 2",
            "[1, 2",
            "'open",
            "{1, 2}",
            "{[1]: 2}",
            "007",
            "1j",
            "f'x'",
            "'a' b",
        ] {
            assert!(parse_literal(text).is_err(), "{:?} should be rejected", text);
        }
    }

    #[test]
    fn test_error_offset() {
        let err = parse_literal("[1, x]").unwrap_err();
        assert_eq!(err.offset, 4);
        assert!(err.to_string().contains("not a literal"));
    }
}
