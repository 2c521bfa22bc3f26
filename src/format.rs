//! Wire format
//!
//! This module documents the JSON text this crate reads and writes.
//!
//! # Grammar
//!
//! ```text
//! value   = ws ( object / array / string / number / "true" / "false" / "null" ) ws
//! object  = "{" ws "}" / "{" member *( "," member ) "}"
//! member  = ws string ws ":" value
//! array   = "[" ws "]" / "[" value *( "," value ) "]"
//! number  = [ "-" ] ( "0" / digit1-9 *digit ) [ "." 1*digit ] [ ( "e" / "E" ) [ "+" / "-" ] 1*digit ]
//! ws      = *( " " / "\t" / "\n" / "\r" )
//! ```
//!
//! A document is exactly one `value`. Anything after it other than whitespace is
//! rejected, and so is an empty document.
//!
//! ## Strings
//!
//! Strings are double-quoted UTF-8. The escapes `\"`, `\\`, `\/`, `\b`, `\f`,
//! `\n`, `\r`, `\t` and `\uXXXX` are accepted. A high surrogate followed by a
//! low surrogate escape forms one character; an unpaired surrogate decodes to
//! U+FFFD. Raw control characters (below U+0020) must be escaped.
//!
//! The encoder writes the short escapes where one exists and `\u00XX` for the
//! remaining control characters. U+2028 and U+2029 are always escaped. With
//! [`EncodeOptions::with_escape_html`](crate::EncodeOptions::with_escape_html),
//! `<`, `>` and `&` are escaped too.
//!
//! ## Numbers
//!
//! Numbers decode to `f64`. A literal whose magnitude overflows `f64` is rejected
//! rather than turned into infinity.
//!
//! Integers from Rust types are written exactly. Floats are written in their
//! shortest round-trip form, switching to exponent notation below `1e-6` and from
//! `1e21` up. `NaN` and the infinities cannot be written and fail with
//! [`Error::NonFiniteNumber`](crate::Error::NonFiniteNumber).
//!
//! ```rust
//! use ordered_json::to_string;
//!
//! assert_eq!(to_string(&[1.5, 100.0, 1e21]).unwrap(), "[1.5,100,1e21]");
//! assert!(to_string(&f64::INFINITY).is_err());
//! ```
//!
//! ## Objects
//!
//! Members are written in container order: insertion order for
//! [`OrderedMap`](crate::OrderedMap), declaration order for structs. When a key
//! occurs twice in a document, the later value wins and the key keeps its first
//! position.
//!
//! ```rust
//! use ordered_json::{from_str, Value};
//!
//! let v: Value = from_str(r#"{"b": 1, "a": 2, "b": 3}"#).unwrap();
//! assert_eq!(v.to_string(), r#"{"b":3,"a":2}"#);
//! ```
//!
//! Map keys that are integers or booleans are written as strings. Any other
//! non-string key fails with [`Error::KeyMustBeString`](crate::Error::KeyMustBeString).
//!
//! ## Enums
//!
//! Unit variants are written as their name. Every other variant is an object
//! with a single member named after the variant.
//!
//! ```text
//! "Idle"
//! {"Move":{"x":1,"y":2}}
//! {"Resize":[640,480]}
//! ```
//!
//! # Layout
//!
//! Compact output has no whitespace at all. Indented output
//! ([`EncodeOptions::pretty`](crate::EncodeOptions::pretty)) starts a new line
//! after `[`, `{` and each `,`, and before the closing bracket. Every new line
//! begins with the configured prefix and then `indent` spaces per nesting level.
//! A key is followed by `": "`. Empty containers stay `[]` and `{}`.
//!
//! ```text
//! {
//!   "as": "AS15169",
//!   "ranges": [
//!     "8.8.8.0/24"
//!   ],
//!   "empty": {}
//! }
//! ```
//!
//! Both layouts decode to the same value.
//!
//! # Errors
//!
//! Decoding stops at the first problem. The error names the
//! [`DecodeState`](crate::DecodeState) the decoder was in and the byte offset, line
//! and column of the offending token. Input that ends before the top-level value is complete reports
//! [`Error::UnexpectedEof`](crate::Error::UnexpectedEof); everything else is
//! [`Error::Syntax`](crate::Error::Syntax).
//!
//! | Input                 | State                         | Kind   |
//! |-----------------------|-------------------------------|--------|
//! | empty                 | `ExpectValue`                 | eof    |
//! | `[`                   | `InArrayExpectValueOrClose`   | eof    |
//! | `[1,]`                | `ExpectValue`                 | syntax |
//! | `{"a" 1}`             | `InObjectExpectColon`         | syntax |
//! | `{"a":1,}`            | `InObjectExpectKey`           | syntax |
//! | `{}3`                 | `End`                         | syntax |
//! | `[] tru`              | `End`                         | syntax |

// This module contains only documentation; no implementation code
