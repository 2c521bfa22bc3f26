//! Configuration options for encoding.
//!
//! [`EncodeOptions`] controls the layout of the emitted text. Compact and indented
//! output decode to the same value; only whitespace differs.
//!
//! ## Examples
//!
//! ```rust
//! use ordered_json::{to_string_with_options, EncodeOptions};
//!
//! let options = EncodeOptions::pretty().with_indent(4);
//! let json = to_string_with_options(&vec![1, 2], options).unwrap();
//! assert_eq!(json, "[\n    1,\n    2\n]");
//!
//! let options = EncodeOptions::new().with_escape_html(true);
//! let json = to_string_with_options("<b>", options).unwrap();
//! assert_eq!(json, r#""\u003cb\u003e""#);
//! ```

/// Configuration options for encoding.
///
/// # Examples
///
/// ```rust
/// use ordered_json::EncodeOptions;
///
/// // Default compact options
/// let options = EncodeOptions::new();
/// assert!(!options.pretty);
///
/// // Indented with a prefix in front of every new line
/// let options = EncodeOptions::pretty().with_prefix("// ").with_indent(4);
/// assert_eq!(options.prefix, "// ");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    pub indent: usize,
    pub prefix: String,
    pub escape_html: bool,
    pub pretty: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 2,
            prefix: String::new(),
            escape_html: false,
            pretty: false,
        }
    }
}

impl EncodeOptions {
    /// Creates default options (compact, 2-space indent, no prefix, no HTML escaping).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordered_json::EncodeOptions;
    ///
    /// let options = EncodeOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert!(!options.escape_html);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented output.
    #[must_use]
    pub fn pretty() -> Self {
        EncodeOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Only affects indented output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the text written at the start of every line after the first.
    ///
    /// Only affects indented output.
    #[must_use]
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Escapes `<`, `>` and `&` inside strings as `\u003c`, `\u003e` and `\u0026`.
    #[must_use]
    pub fn with_escape_html(mut self, escape_html: bool) -> Self {
        self.escape_html = escape_html;
        self
    }

    /// Switches between compact and indented output.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
