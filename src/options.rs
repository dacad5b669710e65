/// Options shared by every parsing entry point.
///
/// ```rust
/// use set_cookie_parser::ParseOptions;
///
/// let options = ParseOptions::new().decode_values(false).map(true);
/// assert!(!options.decode_values);
/// assert!(options.map);
/// assert!(!options.silent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Percent-decode cookie values. Defaults to `true`.
    pub decode_values: bool,
    /// Return a name-keyed map instead of a list. When two cookies share a
    /// name, the last one wins. Defaults to `false`.
    pub map: bool,
    /// Do not warn when a request `Cookie` header is handed to the response
    /// adapter. Defaults to `false`.
    pub silent: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            decode_values: true,
            map: false,
            silent: false,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode_values(mut self, decode_values: bool) -> Self {
        self.decode_values = decode_values;
        self
    }

    pub fn map(mut self, map: bool) -> Self {
        self.map = map;
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }
}
