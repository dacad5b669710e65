use std::fmt::{Display, Formatter};

/// A non-fatal anomaly found while parsing. The parse went on with a best
/// effort fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The cookie value could not be percent-decoded and was kept as is
    UndecodableValue { value: String, reason: String },
    /// An attribute segment without a key, e.g. `=foo`, was skipped
    MalformedAttribute { part: String },
    /// A request `Cookie` header was handed to the response adapter
    RequestCookieHeader,
    /// A header value was not valid utf-8 and was skipped
    NonUtf8Header { name: String },
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UndecodableValue { value, reason } => write!(
                f,
                "unable to decode cookie value '{}' ({}), set decode_values to false to disable decoding",
                value, reason
            ),
            Warning::MalformedAttribute { part } => write!(f, "invalid set-cookie value part: {}", part),
            Warning::RequestCookieHeader => f.write_str(
                "a Cookie header was found, the parser is meant for Set-Cookie headers of responses, not Cookie headers of requests; set silent to true to suppress this warning",
            ),
            Warning::NonUtf8Header { name } => write!(f, "skipping non utf-8 value of header {}", name),
        }
    }
}

/// A parsed value along with the warnings raised while producing it
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Parsed<T> {
    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Parsed<U> {
        Parsed {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Collects warnings, logging each one as it comes in
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        match &warning {
            Warning::UndecodableValue { .. } => error!("{}", warning),
            _ => warn!("{}", warning),
        }
        self.warnings.push(warning);
    }

    pub fn extend(&mut self, warnings: Vec<Warning>) {
        self.warnings.extend(warnings);
    }

    pub fn finish<T>(self, value: T) -> Parsed<T> {
        Parsed {
            value,
            warnings: self.warnings,
        }
    }
}
