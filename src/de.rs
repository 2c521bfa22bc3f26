//! JSON deserialization.
//!
//! This module provides the [`Deserializer`] implementation that parses JSON text
//! into Rust data structures.
//!
//! ## Overview
//!
//! - **Single pass**: a byte-level lexer feeds an explicit state machine
//!   ([`DecodeState`]) with a stack of open containers. Nesting depth is limited
//!   only by memory; the decoder does not recurse.
//! - **Order preserving**: arrays decode into [`List`] and objects into
//!   [`OrderedMap`], in document order. A repeated key keeps its first position
//!   and takes the last value.
//! - **Strict**: trailing commas, leading zeros, raw control characters in
//!   strings, trailing characters and truncated input are all rejected. Errors
//!   carry the decoder state and byte offset, and nothing is returned on failure.
//!
//! ## Usage
//!
//! ```rust
//! use ordered_json::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str(r#"{"x": 1, "y": 2}"#).unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```
//!
//! ## Decoding into an existing container
//!
//! ```rust
//! use ordered_json::{OrderedMap, Value};
//!
//! let mut map: OrderedMap<String, Value> = OrderedMap::new();
//! map.set("z".to_string(), Value::Null);
//! map.decode_json(br#"{"a": 1, "z": 2}"#).unwrap();
//! assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec!["z", "a"]);
//!
//! let err = map.decode_json(b"[1, 2]").unwrap_err();
//! assert!(err.is_type_mismatch());
//! assert_eq!(map.len(), 2);
//! ```

use crate::value::Unpacked;
use crate::{descend, Error, List, OrderedMap, Result, Value, RECURSION_LIMIT};
use serde::de::{self, Deserializer as _, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::fmt;

/// Where the decoder is within the document.
///
/// Reported by [`Error::Syntax`] and [`Error::UnexpectedEof`] to say what the
/// decoder expected when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeState {
    /// Start of input, or after `,` inside an array.
    ExpectValue,
    /// Just after `[`.
    InArrayExpectValueOrClose,
    /// After an array element.
    InArrayExpectCommaOrClose,
    /// Just after `{`.
    InObjectExpectKeyOrClose,
    /// After `,` inside an object.
    InObjectExpectKey,
    /// After an object key.
    InObjectExpectColon,
    /// After `:`.
    InObjectExpectValue,
    /// After an object value.
    InObjectExpectCommaOrClose,
    /// The top-level value is complete.
    End,
}

impl fmt::Display for DecodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecodeState::ExpectValue => "expecting a value",
            DecodeState::InArrayExpectValueOrClose => "expecting an array element or ']'",
            DecodeState::InArrayExpectCommaOrClose => "expecting ',' or ']'",
            DecodeState::InObjectExpectKeyOrClose => "expecting an object key or '}'",
            DecodeState::InObjectExpectKey => "expecting an object key",
            DecodeState::InObjectExpectColon => "expecting ':'",
            DecodeState::InObjectExpectValue => "expecting an object value",
            DecodeState::InObjectExpectCommaOrClose => "expecting ',' or '}'",
            DecodeState::End => "expecting end of input",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    Null,
    True,
    False,
    String(String),
    Number(f64),
    Eof,
}

impl Token {
    fn describe(&self) -> &'static str {
        match self {
            Token::LeftBrace => "'{'",
            Token::RightBrace => "'}'",
            Token::LeftBracket => "'['",
            Token::RightBracket => "']'",
            Token::Colon => "':'",
            Token::Comma => "','",
            Token::Null => "null",
            Token::True => "true",
            Token::False => "false",
            Token::String(_) => "string",
            Token::Number(_) => "number",
            Token::Eof => "end of input",
        }
    }
}

#[derive(Debug)]
struct LexError {
    offset: usize,
    msg: String,
    eof: bool,
}

/// Splits input bytes into tokens.
struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a [u8]) -> Self {
        Lexer { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// An error at the current position. Running out of input is reported as EOF.
    fn error(&self, msg: impl Into<String>) -> LexError {
        LexError {
            offset: self.pos,
            msg: msg.into(),
            eof: self.pos >= self.input.len(),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// Returns the next token and the offset it starts at.
    fn next_token(&mut self) -> std::result::Result<(usize, Token), LexError> {
        self.skip_whitespace();
        let start = self.pos;
        let Some(byte) = self.peek() else {
            return Ok((start, Token::Eof));
        };

        let token = match byte {
            b'{' => self.single(Token::LeftBrace),
            b'}' => self.single(Token::RightBrace),
            b'[' => self.single(Token::LeftBracket),
            b']' => self.single(Token::RightBracket),
            b':' => self.single(Token::Colon),
            b',' => self.single(Token::Comma),
            b'"' => Token::String(self.read_string()?),
            b'-' | b'0'..=b'9' => Token::Number(self.read_number()?),
            b't' => {
                self.expect_literal(b"true")?;
                Token::True
            }
            b'f' => {
                self.expect_literal(b"false")?;
                Token::False
            }
            b'n' => {
                self.expect_literal(b"null")?;
                Token::Null
            }
            other if other.is_ascii_graphic() => {
                return Err(self.error(format!("unexpected character '{}'", other as char)));
            }
            other => return Err(self.error(format!("unexpected byte 0x{:02x}", other))),
        };
        Ok((start, token))
    }

    fn single(&mut self, token: Token) -> Token {
        self.pos += 1;
        token
    }

    fn expect_literal(&mut self, literal: &'static [u8]) -> std::result::Result<(), LexError> {
        let rest = &self.input[self.pos..];
        if rest.starts_with(literal) {
            self.pos += literal.len();
            Ok(())
        } else if literal.starts_with(rest) {
            self.pos = self.input.len();
            Err(self.error("truncated literal"))
        } else {
            Err(self.error(format!(
                "invalid literal, expected `{}`",
                String::from_utf8_lossy(literal)
            )))
        }
    }

    fn read_string(&mut self) -> std::result::Result<String, LexError> {
        let start = self.pos;
        self.pos += 1;
        let mut buf = Vec::new();

        loop {
            let run = self.pos;
            while let Some(b) = self.peek() {
                if b == b'"' || b == b'\\' || b < 0x20 {
                    break;
                }
                self.pos += 1;
            }
            buf.extend_from_slice(&self.input[run..self.pos]);

            match self.peek() {
                None => return Err(self.error("unterminated string")),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    self.read_escape(&mut buf)?;
                }
                Some(b) => {
                    return Err(self.error(format!("control character 0x{:02x} in string", b)));
                }
            }
        }

        String::from_utf8(buf).map_err(|_| LexError {
            offset: start,
            msg: "invalid UTF-8 in string".to_string(),
            eof: false,
        })
    }

    fn read_escape(&mut self, buf: &mut Vec<u8>) -> std::result::Result<(), LexError> {
        let Some(b) = self.peek() else {
            return Err(self.error("unterminated escape sequence"));
        };
        let unescaped = match b {
            b'"' => b'"',
            b'\\' => b'\\',
            b'/' => b'/',
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'u' => {
                self.pos += 1;
                let ch = self.read_unicode_escape()?;
                let mut utf8 = [0u8; 4];
                buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                return Ok(());
            }
            other => {
                return Err(self.error(format!(
                    "invalid escape sequence '\\{}'",
                    (other as char).escape_default()
                )));
            }
        };
        self.pos += 1;
        buf.push(unescaped);
        Ok(())
    }

    /// Reads the digits of a `\u` escape, pairing surrogates. A surrogate without
    /// its partner becomes U+FFFD and any following escape is read on its own.
    fn read_unicode_escape(&mut self) -> std::result::Result<char, LexError> {
        let code = self.read_hex4()?;
        match code {
            0xD800..=0xDBFF => {
                let resume = self.pos;
                if self.input[self.pos..].starts_with(b"\\u") {
                    self.pos += 2;
                    let low = self.read_hex4()?;
                    if (0xDC00..=0xDFFF).contains(&low) {
                        let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                        return Ok(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
                    }
                    self.pos = resume;
                }
                Ok(char::REPLACEMENT_CHARACTER)
            }
            0xDC00..=0xDFFF => Ok(char::REPLACEMENT_CHARACTER),
            _ => Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)),
        }
    }

    fn read_hex4(&mut self) -> std::result::Result<u32, LexError> {
        let mut code = 0u32;
        for _ in 0..4 {
            let Some(b) = self.peek() else {
                return Err(self.error("truncated unicode escape"));
            };
            let digit = match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                _ => return Err(self.error("invalid unicode escape")),
            };
            code = (code << 4) | u32::from(digit);
            self.pos += 1;
        }
        Ok(code)
    }

    fn skip_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.peek() {
            self.pos += 1;
        }
    }

    fn expect_digit(&mut self, msg: &str) -> std::result::Result<(), LexError> {
        match self.peek() {
            Some(b'0'..=b'9') => {
                self.skip_digits();
                Ok(())
            }
            _ => Err(self.error(msg)),
        }
    }

    /// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
    fn read_number(&mut self) -> std::result::Result<f64, LexError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }

        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if let Some(b'0'..=b'9') = self.peek() {
                    return Err(self.error("leading zeros are not allowed"));
                }
            }
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.error("expected digit after '-'")),
        }

        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.expect_digit("expected digit after decimal point")?;
        }

        if let Some(b'e' | b'E') = self.peek() {
            self.pos += 1;
            if let Some(b'+' | b'-') = self.peek() {
                self.pos += 1;
            }
            self.expect_digit("expected digit in exponent")?;
        }

        let text = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.error("invalid number"))?;
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(LexError {
                offset: start,
                msg: format!("number out of range: {}", text),
                eof: false,
            }),
        }
    }
}

/// An open container on the decoder's stack.
enum Frame {
    Array(List<Value>),
    Object {
        map: OrderedMap<String, Value>,
        key: Option<String>,
    },
}

/// A successfully decoded document.
struct Decoded {
    value: Value,
    /// Offset of the first byte of the top-level value.
    root_offset: usize,
}

/// The decode state machine.
struct Decoder<'a> {
    input: &'a [u8],
    lexer: Lexer<'a>,
    state: DecodeState,
    stack: Vec<Frame>,
    root: Option<Value>,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a [u8]) -> Self {
        Decoder {
            input,
            lexer: Lexer::new(input),
            state: DecodeState::ExpectValue,
            stack: Vec::new(),
            root: None,
        }
    }

    fn decode(mut self) -> Result<Decoded> {
        let mut root_offset = None;

        loop {
            let (offset, token) = match self.lexer.next_token() {
                Ok(next) => next,
                Err(err) if self.state == DecodeState::End => {
                    return Err(self.syntax_error(err.offset, "trailing characters after top-level value"));
                }
                Err(err) if err.eof => return Err(self.eof_error(err.offset)),
                Err(err) => return Err(self.syntax_error(err.offset, &err.msg)),
            };
            root_offset.get_or_insert(offset);

            match (self.state, token) {
                (DecodeState::End, Token::Eof) => break,
                (_, Token::Eof) => return Err(self.eof_error(offset)),
                (DecodeState::End, _) => {
                    return Err(self.syntax_error(offset, "trailing characters after top-level value"));
                }

                (
                    DecodeState::ExpectValue
                    | DecodeState::InArrayExpectValueOrClose
                    | DecodeState::InObjectExpectValue,
                    token,
                ) => self.value_token(offset, token)?,

                (DecodeState::InArrayExpectCommaOrClose, Token::Comma) => {
                    self.state = DecodeState::ExpectValue;
                }
                (DecodeState::InArrayExpectCommaOrClose, Token::RightBracket) => self.close(),
                (DecodeState::InArrayExpectCommaOrClose, token) => {
                    let msg = format!("expected ',' or ']' after array element, found {}", token.describe());
                    return Err(self.syntax_error(offset, &msg));
                }

                (DecodeState::InObjectExpectKeyOrClose, Token::RightBrace) => self.close(),
                (DecodeState::InObjectExpectKey, Token::RightBrace) => {
                    return Err(self.syntax_error(offset, "trailing comma in object"));
                }
                (
                    DecodeState::InObjectExpectKeyOrClose | DecodeState::InObjectExpectKey,
                    Token::String(key),
                ) => {
                    if let Some(Frame::Object { key: pending, .. }) = self.stack.last_mut() {
                        *pending = Some(key);
                    }
                    self.state = DecodeState::InObjectExpectColon;
                }
                (DecodeState::InObjectExpectKeyOrClose | DecodeState::InObjectExpectKey, token) => {
                    let msg = format!("object keys must be strings, found {}", token.describe());
                    return Err(self.syntax_error(offset, &msg));
                }

                (DecodeState::InObjectExpectColon, Token::Colon) => {
                    self.state = DecodeState::InObjectExpectValue;
                }
                (DecodeState::InObjectExpectColon, token) => {
                    let msg = format!("expected ':' after object key, found {}", token.describe());
                    return Err(self.syntax_error(offset, &msg));
                }

                (DecodeState::InObjectExpectCommaOrClose, Token::Comma) => {
                    self.state = DecodeState::InObjectExpectKey;
                }
                (DecodeState::InObjectExpectCommaOrClose, Token::RightBrace) => self.close(),
                (DecodeState::InObjectExpectCommaOrClose, token) => {
                    let msg = format!("expected ',' or '}}' after object value, found {}", token.describe());
                    return Err(self.syntax_error(offset, &msg));
                }
            }
        }

        let value = self.root.take().unwrap_or_default();
        tracing::trace!(bytes = self.input.len(), kind = value.type_name(), "decoded document");
        Ok(Decoded {
            value,
            root_offset: root_offset.unwrap_or(0),
        })
    }

    /// Handles a token in a state that expects a value.
    fn value_token(&mut self, offset: usize, token: Token) -> Result<()> {
        let value = match token {
            Token::LeftBracket => {
                self.stack.push(Frame::Array(List::new()));
                self.state = DecodeState::InArrayExpectValueOrClose;
                return Ok(());
            }
            Token::LeftBrace => {
                self.stack.push(Frame::Object {
                    map: OrderedMap::new(),
                    key: None,
                });
                self.state = DecodeState::InObjectExpectKeyOrClose;
                return Ok(());
            }
            Token::RightBracket if self.state == DecodeState::InArrayExpectValueOrClose => {
                self.close();
                return Ok(());
            }
            Token::Null => Value::Null,
            Token::True => Value::Bool(true),
            Token::False => Value::Bool(false),
            Token::Number(n) => Value::Number(n),
            Token::String(s) => Value::String(s),
            Token::RightBracket if self.state == DecodeState::ExpectValue && !self.stack.is_empty() => {
                return Err(self.syntax_error(offset, "trailing comma in array"));
            }
            other => {
                let msg = format!("expected a value, found {}", other.describe());
                return Err(self.syntax_error(offset, &msg));
            }
        };
        self.attach(value);
        Ok(())
    }

    /// Pops the innermost container and attaches it to its parent.
    fn close(&mut self) {
        let value = match self.stack.pop() {
            Some(Frame::Array(list)) => Value::Array(list),
            Some(Frame::Object { map, .. }) => Value::Object(map),
            None => return,
        };
        self.attach(value);
    }

    /// Stores a completed value and moves to the parent's comma-or-close state.
    fn attach(&mut self, value: Value) {
        match self.stack.last_mut() {
            None => {
                self.root = Some(value);
                self.state = DecodeState::End;
            }
            Some(Frame::Array(list)) => {
                list.push_back(value);
                self.state = DecodeState::InArrayExpectCommaOrClose;
            }
            Some(Frame::Object { map, key }) => {
                if let Some(key) = key.take() {
                    map.set(key, value);
                }
                self.state = DecodeState::InObjectExpectCommaOrClose;
            }
        }
    }

    fn syntax_error(&self, offset: usize, msg: &str) -> Error {
        let (line, col) = line_col(self.input, offset);
        tracing::debug!(offset, state = %self.state, "rejecting malformed input: {}", msg);
        Error::syntax(line, col, offset, self.state, msg)
    }

    fn eof_error(&self, offset: usize) -> Error {
        let (line, col) = line_col(self.input, offset);
        tracing::debug!(offset, state = %self.state, "rejecting truncated input");
        Error::unexpected_eof(line, col, offset, self.state)
    }
}

/// One-based line and column of a byte offset.
fn line_col(input: &[u8], offset: usize) -> (usize, usize) {
    let before = &input[..offset.min(input.len())];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let col = match before.iter().rposition(|&b| b == b'\n') {
        Some(newline) => offset - newline,
        None => offset + 1,
    };
    (line, col)
}

fn decode(input: &[u8]) -> Result<Decoded> {
    Decoder::new(input).decode()
}

fn type_mismatch(input: &[u8], decoded: &Decoded, expected: &str) -> Error {
    let (line, col) = line_col(input, decoded.root_offset);
    let found = decoded.value.type_name();
    tracing::debug!(expected, found, "rejecting document of the wrong shape");
    Error::type_mismatch(line, col, expected, found)
}

impl OrderedMap<String, Value> {
    /// Decodes a JSON object and merges it into this map.
    ///
    /// Keys already present keep their position and take the decoded value; new
    /// keys are appended in document order. Input whose top-level value is not an
    /// object fails with [`Error::TypeMismatch`]. On any error the map is left
    /// unchanged.
    pub fn decode_json(&mut self, input: &[u8]) -> Result<()> {
        let decoded = decode(input)?;
        if !decoded.value.is_object() {
            return Err(type_mismatch(input, &decoded, "object"));
        }
        if let Some(src) = decoded.value.into_object() {
            self.extend(src);
        }
        Ok(())
    }
}

impl List<Value> {
    /// Decodes a JSON array and appends its elements to this list.
    ///
    /// Input whose top-level value is not an array fails with
    /// [`Error::TypeMismatch`]. On any error the list is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::{List, Value};
    ///
    /// let mut list = List::new();
    /// list.push_back(Value::from(0));
    /// list.decode_json(b"[1, true]").unwrap();
    /// assert_eq!(list.to_string(), "[0,1,true]");
    /// assert!(list.decode_json(b"{}").unwrap_err().is_type_mismatch());
    /// ```
    pub fn decode_json(&mut self, input: &[u8]) -> Result<()> {
        let decoded = decode(input)?;
        if !decoded.value.is_array() {
            return Err(type_mismatch(input, &decoded, "array"));
        }
        if let Some(src) = decoded.value.into_array() {
            self.extend(src);
        }
        Ok(())
    }
}

/// The JSON deserializer.
///
/// Decodes the whole input into a [`Value`] and then drives the visitor from it.
/// Created via [`Deserializer::from_str`] or [`Deserializer::from_slice`].
pub struct Deserializer<'de> {
    input: &'de [u8],
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer {
            input: input.as_bytes(),
        }
    }

    /// Bytes that are not valid UTF-8 are rejected where they occur.
    pub fn from_slice(input: &'de [u8]) -> Self {
        Deserializer { input }
    }

    fn parse_value(&mut self) -> Result<Value> {
        decode(self.input).map(|decoded| decoded.value)
    }
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_value()?).deserialize_any(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_value()?).deserialize_option(visitor)
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_value()?).deserialize_newtype_struct(name, visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_value()?).deserialize_enum(name, variants, visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

/// Deserializes an instance of `T` from a [`Value`].
///
/// # Examples
///
/// ```rust
/// use ordered_json::{from_value, value};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, Debug, PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_value(value!({"x": 1, "y": -2})).unwrap();
/// assert_eq!(point, Point { x: 1, y: -2 });
/// ```
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

struct SeqDeserializer {
    iter: crate::list::IntoIter<Value>,
    remaining: usize,
}

impl SeqDeserializer {
    fn new(list: List<Value>, remaining: usize) -> Self {
        SeqDeserializer {
            iter: list.into_iter(),
            remaining,
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed
                .deserialize(ValueDeserializer::nested(value, self.remaining))
                .map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: crate::map::IntoIter<String, Value>,
    value: Option<Value>,
    remaining: usize,
}

impl MapDeserializer {
    fn new(map: OrderedMap<String, Value>, remaining: usize) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
            remaining,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(MapKeyDeserializer { key }).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::nested(value, self.remaining)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Object keys are always strings on the wire; this lets them deserialize into
/// integer and bool keys too, mirroring what the serializer accepts.
struct MapKeyDeserializer {
    key: String,
}

macro_rules! deserialize_parsed_key {
    ($($method:ident => $visit:ident,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.key.parse() {
                    Ok(parsed) => visitor.$visit(parsed),
                    Err(_) => visitor.visit_string(self.key),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for MapKeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.key)
    }

    deserialize_parsed_key! {
        deserialize_bool => visit_bool,
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_i128 => visit_i128,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
        deserialize_u128 => visit_u128,
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(self.key.into_deserializer())
    }

    forward_to_deserialize_any! {
        f32 f64 char str string bytes byte_buf option unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
    remaining: usize,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value, remaining: usize) -> Self {
        EnumDeserializer {
            variant,
            value: Some(value),
            remaining,
        }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        let visitor = VariantDeserializer {
            value: self.value,
            remaining: self.remaining,
        };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
    remaining: usize,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            _ => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::nested(value, self.remaining)),
            None => Err(Error::custom("expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value.map(Value::unpack) {
            Some(Unpacked::Array(list)) => {
                visitor.visit_seq(SeqDeserializer::new(list, descend(self.remaining)?))
            }
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value.map(Value::unpack) {
            Some(Unpacked::Object(map)) => {
                visitor.visit_map(MapDeserializer::new(map, descend(self.remaining)?))
            }
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}

/// 2^64, the first integer past `u64::MAX`.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

struct ValueDeserializer {
    value: Value,
    // nesting levels still allowed below this point
    remaining: usize,
}

impl ValueDeserializer {
    fn new(value: Value) -> Self {
        Self::nested(value, RECURSION_LIMIT)
    }

    fn nested(value: Value, remaining: usize) -> Self {
        ValueDeserializer { value, remaining }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value.unpack() {
            Unpacked::Null => visitor.visit_unit(),
            Unpacked::Bool(b) => visitor.visit_bool(b),
            Unpacked::Number(n) => {
                let negative_zero = n == 0.0 && n.is_sign_negative();
                if n.fract() != 0.0 || negative_zero {
                    visitor.visit_f64(n)
                } else if (0.0..U64_LIMIT).contains(&n) {
                    visitor.visit_u64(n as u64)
                } else if n < 0.0 && n >= i64::MIN as f64 {
                    visitor.visit_i64(n as i64)
                } else {
                    visitor.visit_f64(n)
                }
            }
            Unpacked::String(s) => visitor.visit_string(s),
            Unpacked::Array(list) => {
                visitor.visit_seq(SeqDeserializer::new(list, descend(self.remaining)?))
            }
            Unpacked::Object(map) => {
                visitor.visit_map(MapDeserializer::new(map, descend(self.remaining)?))
            }
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let found = self.value.type_name();
        match self.value.unpack() {
            Unpacked::String(s) => visitor.visit_enum(s.into_deserializer()),
            Unpacked::Object(map) => {
                let remaining = descend(self.remaining)?;
                let mut entries = map.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, value)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value, remaining))
                    }
                    _ => Err(Error::custom("expected an object with a single variant key")),
                }
            }
            _ => Err(Error::custom(format!("expected enum, found {}", found))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}
