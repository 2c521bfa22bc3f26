//! JSON serialization.
//!
//! This module provides the [`Serializer`] implementation that writes Rust data
//! structures as JSON text, and [`ValueSerializer`], which builds a [`Value`] instead.
//!
//! ## Overview
//!
//! - Sequences become arrays and maps become objects. Entries are written in the
//!   order the `Serialize` impl yields them, so [`List`](crate::List) and
//!   [`OrderedMap`] keep their order on the wire.
//! - Empty containers are written as `[]` and `{}` in every mode.
//! - Enums are externally tagged: `"Unit"`, `{"Newtype":1}`, `{"Tuple":[1,2]}`,
//!   `{"Struct":{"a":1}}`.
//! - NaN and the infinities are rejected with [`Error::NonFiniteNumber`].
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use ordered_json::{to_string, to_string_pretty};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let data = Data { x: 1, y: 2 };
//! assert_eq!(to_string(&data).unwrap(), r#"{"x":1,"y":2}"#);
//! assert_eq!(to_string_pretty(&data).unwrap(), "{\n  \"x\": 1,\n  \"y\": 2\n}");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use ordered_json::{EncodeOptions, Serializer};
//! use serde::Serialize;
//!
//! let mut serializer = Serializer::new(EncodeOptions::new());
//! vec![1, 2, 3].serialize(&mut serializer).unwrap();
//! assert_eq!(serializer.into_inner(), "[1,2,3]");
//! ```

use crate::{descend, EncodeOptions, Error, List, OrderedMap, Result, Value, RECURSION_LIMIT};
use serde::ser::{self, Impossible, Serialize};

const HEX: &[u8; 16] = b"0123456789abcdef";

/// The JSON serializer.
///
/// Writes into an in-memory `String`. Created via [`Serializer::new`] with
/// [`EncodeOptions`] selecting compact or indented layout.
pub struct Serializer {
    output: String,
    options: EncodeOptions,
    depth: usize,
}

impl Serializer {
    pub fn new(options: EncodeOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            depth: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Starts a new line at the current depth. No-op in compact mode.
    fn write_indent(&mut self) {
        if self.options.pretty {
            self.output.push('\n');
            self.output.push_str(&self.options.prefix);
            for _ in 0..self.options.indent * self.depth {
                self.output.push(' ');
            }
        }
    }

    fn begin(&mut self, open: char) -> Result<()> {
        if self.depth >= RECURSION_LIMIT {
            tracing::debug!(depth = self.depth, "refusing to nest deeper");
            return Err(Error::RecursionLimitExceeded(RECURSION_LIMIT));
        }
        self.output.push(open);
        self.depth += 1;
        Ok(())
    }

    fn end(&mut self, close: char, empty: bool) {
        self.depth -= 1;
        if !empty {
            self.write_indent();
        }
        self.output.push(close);
    }

    fn begin_element(&mut self, first: bool) {
        if !first {
            self.output.push(',');
        }
        self.write_indent();
    }

    fn write_colon(&mut self) {
        self.output.push(':');
        if self.options.pretty {
            self.output.push(' ');
        }
    }

    /// Opens `{"variant":` for the externally tagged enum forms.
    fn begin_variant(&mut self, variant: &str) -> Result<()> {
        self.begin('{')?;
        self.begin_element(true);
        write_quoted(&mut self.output, variant, self.options.escape_html);
        self.write_colon();
        Ok(())
    }

    fn write_float(&mut self, v: f64, text: impl FnOnce() -> String) -> Result<()> {
        if !v.is_finite() {
            tracing::debug!(value = %v, "rejecting non-finite number");
            return Err(Error::NonFiniteNumber(v));
        }
        self.output.push_str(&text());
        Ok(())
    }
}

/// Exponent notation outside the range where plain digits stay readable.
fn use_exponent(abs: f64) -> bool {
    abs != 0.0 && !(1e-6..1e21).contains(&abs)
}

/// Writes `s` as a quoted JSON string.
pub(crate) fn write_quoted(out: &mut String, s: &str, escape_html: bool) {
    out.push('"');
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        let short = match ch {
            '"' => Some("\\\""),
            '\\' => Some("\\\\"),
            '\n' => Some("\\n"),
            '\r' => Some("\\r"),
            '\t' => Some("\\t"),
            '\x08' => Some("\\b"),
            '\x0c' => Some("\\f"),
            _ => None,
        };
        let code = ch as u32;
        let needs_unicode = code < 0x20
            || code == 0x2028
            || code == 0x2029
            || (escape_html && matches!(ch, '<' | '>' | '&'));
        if short.is_none() && !needs_unicode {
            continue;
        }
        out.push_str(&s[start..i]);
        match short {
            Some(escape) => out.push_str(escape),
            None => {
                out.push_str("\\u");
                for shift in [12, 8, 4, 0] {
                    out.push(HEX[((code >> shift) & 0xf) as usize] as char);
                }
            }
        }
        start = i + ch.len_utf8();
    }
    out.push_str(&s[start..]);
    out.push('"');
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Compound<'a>;
    type SerializeTupleStruct = Compound<'a>;
    type SerializeTupleVariant = Compound<'a>;
    type SerializeMap = Compound<'a>;
    type SerializeStruct = Compound<'a>;
    type SerializeStructVariant = Compound<'a>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.output.push_str(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.write_float(v as f64, || {
            if use_exponent(v.abs() as f64) {
                format!("{:e}", v)
            } else {
                v.to_string()
            }
        })
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.write_float(v, || {
            if use_exponent(v.abs()) {
                format!("{:e}", v)
            } else {
                v.to_string()
            }
        })
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        let mut buf = [0u8; 4];
        self.serialize_str(v.encode_utf8(&mut buf))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        write_quoted(&mut self.output, v, self.options.escape_html);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        use ser::SerializeSeq;
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for byte in v {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.output.push_str("null");
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        self.begin_variant(variant)?;
        value.serialize(&mut *self)?;
        self.end('}', false);
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.begin('[')?;
        Ok(Compound::new(self, false))
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.begin_variant(variant)?;
        self.begin('[')?;
        Ok(Compound::new(self, true))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.begin('{')?;
        Ok(Compound::new(self, false))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.begin_variant(variant)?;
        self.begin('{')?;
        Ok(Compound::new(self, true))
    }
}

/// State for an open array or object.
///
/// `in_variant` is set for the tuple and struct enum forms, whose body sits inside
/// an extra `{"Variant": ...}` wrapper that `end` also closes.
pub struct Compound<'a> {
    ser: &'a mut Serializer,
    first: bool,
    in_variant: bool,
}

impl<'a> Compound<'a> {
    fn new(ser: &'a mut Serializer, in_variant: bool) -> Self {
        Compound {
            ser,
            first: true,
            in_variant,
        }
    }

    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.begin_element(self.first);
        self.first = false;
        value.serialize(&mut *self.ser)
    }

    fn key(&mut self, key: &str) {
        self.ser.begin_element(self.first);
        self.first = false;
        write_quoted(&mut self.ser.output, key, self.ser.options.escape_html);
        self.ser.write_colon();
    }

    fn finish(self, close: char) -> Result<()> {
        self.ser.end(close, self.first);
        if self.in_variant {
            self.ser.end('}', false);
        }
        Ok(())
    }
}

impl ser::SerializeSeq for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish(']')
    }
}

impl ser::SerializeTuple for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish(']')
    }
}

impl ser::SerializeTupleStruct for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish(']')
    }
}

impl ser::SerializeTupleVariant for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish(']')
    }
}

impl ser::SerializeMap for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = key.serialize(MapKeySerializer)?;
        self.key(&key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish('}')
    }
}

impl ser::SerializeStruct for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key(key);
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish('}')
    }
}

impl ser::SerializeStructVariant for Compound<'_> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key(key);
        value.serialize(&mut *self.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish('}')
    }
}

/// Turns a map key into the string written on the wire.
///
/// Strings and chars pass through; integers and bools are stringified. Anything
/// else fails with [`Error::KeyMustBeString`].
pub struct MapKeySerializer;

impl ser::Serializer for MapKeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        Err(Error::KeyMustBeString)
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        Err(Error::KeyMustBeString)
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(Error::KeyMustBeString)
    }

    fn serialize_none(self) -> Result<String> {
        Err(Error::KeyMustBeString)
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::KeyMustBeString)
    }

    fn serialize_unit(self) -> Result<String> {
        Err(Error::KeyMustBeString)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(Error::KeyMustBeString)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::KeyMustBeString)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::KeyMustBeString)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Error::KeyMustBeString)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Error::KeyMustBeString)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::KeyMustBeString)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::KeyMustBeString)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(Error::KeyMustBeString)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::KeyMustBeString)
    }
}

/// Serializer whose output is a [`Value`]. Backs [`to_value`](crate::to_value).
pub struct ValueSerializer {
    // nesting levels still allowed below this point
    remaining: usize,
}

impl ValueSerializer {
    pub fn new() -> Self {
        ValueSerializer {
            remaining: RECURSION_LIMIT,
        }
    }
}

impl Default for ValueSerializer {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SerializeVec {
    list: List<Value>,
    remaining: usize,
}

pub struct SerializeMap {
    map: OrderedMap<String, Value>,
    current_key: Option<String>,
    remaining: usize,
}

/// Body of a tuple or struct variant, wrapped as `{variant: body}` on `end`.
pub struct SerializeVariant<B> {
    variant: &'static str,
    body: B,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVariant<SerializeVec>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeVariant<SerializeMap>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        if v.is_finite() {
            Ok(Value::Number(v))
        } else {
            tracing::debug!(value = %v, "rejecting non-finite number");
            Err(Error::NonFiniteNumber(v))
        }
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(v.iter().map(|&b| Value::from(b)).collect())
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let remaining = descend(self.remaining)?;
        Ok(tagged(variant, nested(value, remaining)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        SerializeVec::new(len, self.remaining)
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        SerializeVec::new(Some(len), self.remaining)
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        SerializeVec::new(Some(len), self.remaining)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeVariant {
            variant,
            body: SerializeVec::new(Some(len), descend(self.remaining)?)?,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        SerializeMap::new(len, self.remaining)
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        SerializeMap::new(Some(len), self.remaining)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeVariant {
            variant,
            body: SerializeMap::new(Some(len), descend(self.remaining)?)?,
        })
    }
}

fn tagged(variant: &str, value: Value) -> Value {
    let mut map = OrderedMap::with_capacity(1);
    map.set(variant.to_string(), value);
    Value::Object(map)
}

impl SerializeVec {
    fn new(len: Option<usize>, remaining: usize) -> Result<Self> {
        Ok(SerializeVec {
            list: List::with_capacity(len.unwrap_or(0)),
            remaining: descend(remaining)?,
        })
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.list.push_back(nested(value, self.remaining)?);
        Ok(())
    }
}

impl SerializeMap {
    fn new(len: Option<usize>, remaining: usize) -> Result<Self> {
        Ok(SerializeMap {
            map: OrderedMap::with_capacity(len.unwrap_or(0)),
            current_key: None,
            remaining: descend(remaining)?,
        })
    }

    fn field<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.set(key.to_string(), nested(value, self.remaining)?);
        Ok(())
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.list))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.list))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.list))
    }
}

impl ser::SerializeTupleVariant for SerializeVariant<SerializeVec> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.body.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, Value::Array(self.body.list)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(key.serialize(MapKeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.set(key, nested(value, self.remaining)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeVariant<SerializeMap> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.body.field(key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, Value::Object(self.body.map)))
    }
}

fn nested<T: Serialize + ?Sized>(value: &T, remaining: usize) -> Result<Value> {
    value.serialize(ValueSerializer { remaining })
}
