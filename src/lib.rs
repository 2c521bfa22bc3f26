//! # ordered_json
//!
//! Insertion-ordered containers and a JSON codec that keeps their order.
//!
//! ## What is in the box?
//!
//! - **[`List`]**: a doubly linked list with O(1) insert, remove and move by handle.
//!   Handles ([`ItemId`]) are validated on every use, so a handle from another list
//!   or to a removed node is a harmless no-op.
//! - **[`OrderedMap`]**: a hash index over a [`List`] of entries. Iteration follows
//!   first insertion; updating a key keeps its place, removing and re-inserting it
//!   moves it to the back.
//! - **[`Value`]**: a closed tree of `null`, booleans, numbers, strings, arrays
//!   ([`List<Value>`]) and objects ([`OrderedMap<String, Value>`]).
//! - **A JSON codec**: a Serde [`Serializer`] that writes compact or indented text and
//!   a [`Deserializer`] driven by an explicit state machine ([`DecodeState`]).
//!   Object keys come out in the order they went in.
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ordered_json = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Ordered maps
//!
//! ```rust
//! use ordered_json::OrderedMap;
//!
//! let mut m = OrderedMap::new();
//! m.set("a", 1);
//! m.set("b", 2);
//! m.set("a", 3);
//! assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
//! assert_eq!(m.get("a"), Some(&3));
//!
//! m.remove("a");
//! m.set("a", 4);
//! assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec!["b", "a"]);
//! assert_eq!(m.to_string(), r#"{"b":2,"a":4}"#);
//! ```
//!
//! ### Serde structs
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use ordered_json::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let json = to_string(&user).unwrap();
//! assert_eq!(json, r#"{"id":123,"name":"Alice","active":true}"#);
//!
//! let user_back: User = from_str(&json).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Dynamic values
//!
//! ```rust
//! use ordered_json::{from_str, Value};
//!
//! let v: Value = from_str(r#"{"a": 3, "b": [3, 4, true]}"#).unwrap();
//! let obj = v.as_object().unwrap();
//! assert_eq!(obj.keys().cloned().collect::<Vec<_>>(), vec!["a", "b"]);
//! assert_eq!(v["b"][2], Value::Bool(true));
//! assert_eq!(format!("{:#}", v["b"]), "[\n  3,\n  4,\n  true\n]");
//! ```
//!
//! ## Errors
//!
//! Decoding stops at the first problem and returns an [`Error`] naming the
//! [`DecodeState`] and byte offset. Nothing partial is ever returned:
//!
//! ```rust
//! use ordered_json::{from_str, DecodeState, Value};
//!
//! let err = from_str::<Value>(r#"{"a": 3, "b": [}"#).unwrap_err();
//! assert!(err.is_syntax());
//! assert_eq!(err.state(), Some(DecodeState::InArrayExpectValueOrClose));
//! assert_eq!(err.offset(), Some(15));
//! ```
//!
//! Encoding fails only on non-finite numbers and on map keys that cannot be
//! written as strings.
//!
//! ## Performance Characteristics
//!
//! - **Containers**: O(1) amortized insert, lookup, remove and move
//! - **Serialization**: O(n), written straight into one output buffer
//! - **Deserialization**: O(n), single pass, no recursion while parsing
//! - **Handles**: O(1) validation of ownership and liveness
//!
//! ## Safety Guarantees
//!
//! - `unsafe` is confined to the mutable list iterator
//! - Stale or foreign handles never panic
//! - Proper error propagation with `Result` types
//! - The decoder keeps its own frame stack and [`Value`] drops iteratively, so
//!   [`List::decode_json`] and [`OrderedMap::decode_json`] accept any nesting depth
//!   memory allows
//! - The serde entry points (`to_*`, `from_*`, [`to_value`], [`from_value`]) stop
//!   at [`RECURSION_LIMIT`] nested levels with [`Error::RecursionLimitExceeded`]
//!
//! ## Wire format
//!
//! See the [`format`] module for the accepted grammar and the exact layout of
//! indented output.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`ordered_map.rs`** - insertion order, updates, merges with `copy_from`
//! - **`round_trip.rs`** - encode, decode and decode into an existing map
//!
//! Run one with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod format;
pub mod list;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::{from_value, DecodeState, Deserializer};
pub use error::{Error, Result};
pub use list::{ItemId, ItemRef, List};
pub use map::{EntryRef, OrderedMap};
pub use options::EncodeOptions;
pub use ser::{Serializer, ValueSerializer};
pub use value::Value;

use serde::{Deserialize, Serialize};
use std::io;

/// Deepest nesting of arrays and objects the serde entry points accept.
///
/// Serde visits values recursively, so [`to_string`], [`to_value`], [`from_str`]
/// and friends stop here with [`Error::RecursionLimitExceeded`] instead of
/// exhausting the stack. [`List::decode_json`] and [`OrderedMap::decode_json`] do
/// not recurse and have no limit.
pub const RECURSION_LIMIT: usize = 128;

/// Spends one level of the nesting budget.
pub(crate) fn descend(remaining: usize) -> Result<usize> {
    remaining.checked_sub(1).ok_or_else(|| {
        tracing::debug!(limit = RECURSION_LIMIT, "nesting exceeds the recursion limit");
        Error::RecursionLimitExceeded(RECURSION_LIMIT)
    })
}

/// Serialize any `T: Serialize` to a compact JSON string.
///
/// # Examples
///
/// ```rust
/// use ordered_json::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), r#"{"x":1,"y":2}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the value contains a non-finite float or a map key that
/// cannot be written as a string.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, EncodeOptions::default())
}

/// Serialize any `T: Serialize` to an indented JSON string.
///
/// Uses two spaces per nesting level. Decoding the result gives the same value as
/// decoding the compact form.
///
/// # Examples
///
/// ```rust
/// use ordered_json::to_string_pretty;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string_pretty(&point).unwrap(), "{\n  \"x\": 1,\n  \"y\": 2\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, EncodeOptions::pretty())
}

/// Serialize any `T: Serialize` to a JSON string with custom options.
///
/// # Examples
///
/// ```rust
/// use ordered_json::{to_string_with_options, EncodeOptions};
///
/// let options = EncodeOptions::pretty().with_indent(1).with_prefix("#");
/// let json = to_string_with_options(&vec![1, 2], options).unwrap();
/// assert_eq!(json, "[\n# 1,\n# 2\n#]");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serialize any `T: Serialize` to a compact JSON byte vector.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string(value).map(String::into_bytes)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// Struct fields and map entries keep their order.
///
/// # Examples
///
/// ```rust
/// use ordered_json::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// assert_eq!(value["y"], Value::Number(2.0));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer::new())
}

/// Serialize any `T: Serialize` as compact JSON into a writer.
///
/// # Examples
///
/// ```rust
/// use ordered_json::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &[true, false]).unwrap();
/// assert_eq!(buffer, b"[true,false]");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails. Nothing
/// is written when serialization fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, EncodeOptions::default())
}

/// Serialize any `T: Serialize` into a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let json = to_string_with_options(value, options)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of JSON text.
///
/// # Examples
///
/// ```rust
/// use ordered_json::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str(r#"{"x": 1, "y": 2}"#).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid JSON or cannot be deserialized to
/// type `T`. Syntax errors include line, column and byte offset.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_str(s);
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from an I/O stream of JSON.
///
/// # Examples
///
/// ```rust
/// use ordered_json::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let cursor = Cursor::new(br#"{"x": 1, "y": 2}"#);
/// let point: Point = from_reader(cursor).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid JSON,
/// or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    from_slice(&bytes)
}

/// Deserialize an instance of type `T` from bytes of JSON text.
///
/// # Examples
///
/// ```rust
/// use ordered_json::from_slice;
///
/// let numbers: Vec<u8> = from_slice(b"[1, 2, 3]").unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// assert!(from_slice::<Vec<u8>>(b"[1, 2, \xff]").is_err());
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid JSON, or cannot be
/// deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
