use crate::{
    cookie::Cookie,
    diagnostics::{Diagnostics, Parsed, Warning},
    error::ParseError,
    options::ParseOptions,
    parser::parse_cookie_with_warnings,
    split::split_cookies_iter,
};
use http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap,
};
use std::collections::HashMap;

/// Parsed cookies, shaped by [`ParseOptions::map`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cookies {
    /// Every cookie in the order it was received, duplicated names included
    List(Vec<Cookie>),
    /// Cookies keyed by name; the last cookie of a given name wins
    Map(HashMap<String, Cookie>),
}

impl Cookies {
    fn empty(options: &ParseOptions) -> Self {
        if options.map {
            Cookies::Map(HashMap::new())
        } else {
            Cookies::List(Vec::new())
        }
    }

    fn from_cookies<I: IntoIterator<Item = Cookie>>(cookies: I, options: &ParseOptions) -> Self {
        if options.map {
            Cookies::Map(cookies.into_iter().map(|c| (c.name.clone(), c)).collect())
        } else {
            Cookies::List(cookies.into_iter().collect())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Cookies::List(list) => list.len(),
            Cookies::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the cookie named `name`, the last one received if there are several
    pub fn get(&self, name: &str) -> Option<&Cookie> {
        match self {
            Cookies::List(list) => list.iter().rev().find(|c| c.name == name),
            Cookies::Map(map) => map.get(name),
        }
    }

    /// Iterate over the cookies. Map iteration order is unspecified.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Cookie> + '_> {
        match self {
            Cookies::List(list) => Box::new(list.iter()),
            Cookies::Map(map) => Box::new(map.values()),
        }
    }

    pub fn into_list(self) -> Vec<Cookie> {
        match self {
            Cookies::List(list) => list,
            Cookies::Map(map) => map.into_values().collect(),
        }
    }

    pub fn into_map(self) -> HashMap<String, Cookie> {
        match self {
            Cookies::List(list) => list.into_iter().map(|c| (c.name.clone(), c)).collect(),
            Cookies::Map(map) => map,
        }
    }
}

/// Anything exposing response headers as name/value pairs.
///
/// `None` means there is no header collection at all, which is not an error:
/// the adapter then returns an empty result. A `None` value marks a header
/// value that is not valid utf-8.
pub trait ResponseLike {
    fn header_entries(&self) -> Option<Vec<(&str, Option<&str>)>>;
}

fn header_map_entries(headers: &HeaderMap) -> Vec<(&str, Option<&str>)> {
    headers
        .iter()
        .map(|(name, value)| (name.as_str(), std::str::from_utf8(value.as_bytes()).ok()))
        .collect()
}

impl ResponseLike for HeaderMap {
    fn header_entries(&self) -> Option<Vec<(&str, Option<&str>)>> {
        Some(header_map_entries(self))
    }
}

impl<B> ResponseLike for http::Response<B> {
    fn header_entries(&self) -> Option<Vec<(&str, Option<&str>)>> {
        Some(header_map_entries(self.headers()))
    }
}

impl ResponseLike for http::response::Parts {
    fn header_entries(&self) -> Option<Vec<(&str, Option<&str>)>> {
        Some(header_map_entries(&self.headers))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> ResponseLike for [(K, V)] {
    fn header_entries(&self) -> Option<Vec<(&str, Option<&str>)>> {
        Some(self.iter().map(|(k, v)| (k.as_ref(), Some(v.as_ref()))).collect())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> ResponseLike for Vec<(K, V)> {
    fn header_entries(&self) -> Option<Vec<(&str, Option<&str>)>> {
        self.as_slice().header_entries()
    }
}

impl<R: ResponseLike + ?Sized> ResponseLike for &R {
    fn header_entries(&self) -> Option<Vec<(&str, Option<&str>)>> {
        (**self).header_entries()
    }
}

impl<R: ResponseLike> ResponseLike for Option<R> {
    fn header_entries(&self) -> Option<Vec<(&str, Option<&str>)>> {
        self.as_ref().and_then(|response| response.header_entries())
    }
}

fn parse_all<'a, I>(values: I, options: &ParseOptions, diagnostics: &mut Diagnostics) -> Result<Cookies, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut cookies = Vec::new();
    for value in values.into_iter().filter(|v| !v.trim().is_empty()) {
        let parsed = parse_cookie_with_warnings(value, options)?;
        diagnostics.extend(parsed.warnings);
        cookies.push(parsed.value);
    }

    Ok(Cookies::from_cookies(cookies, options))
}

/// Parse every `Set-Cookie` header of a response, collecting the non-fatal
/// warnings.
pub fn parse_cookies_from_response_with_warnings<R: ResponseLike + ?Sized>(
    response: &R,
    options: &ParseOptions,
) -> Result<Parsed<Cookies>, ParseError> {
    let mut diagnostics = Diagnostics::new();

    let entries = match response.header_entries() {
        Some(entries) => entries,
        None => {
            debug!("Response has no headers, no cookie to parse");
            return Ok(diagnostics.finish(Cookies::empty(options)));
        }
    };

    let mut set_cookie_values = Vec::new();
    let mut request_cookie_seen = false;
    for (name, value) in entries {
        if name.eq_ignore_ascii_case(SET_COOKIE.as_str()) {
            match value {
                Some(value) if !value.is_empty() => set_cookie_values.push(value),
                Some(_) => {}
                None => diagnostics.push(Warning::NonUtf8Header { name: name.to_string() }),
            }
        } else if name.eq_ignore_ascii_case(COOKIE.as_str()) {
            request_cookie_seen = true;
        }
    }

    if request_cookie_seen && !options.silent {
        diagnostics.push(Warning::RequestCookieHeader);
    }

    let cookies = parse_all(set_cookie_values, options, &mut diagnostics)?;
    Ok(diagnostics.finish(cookies))
}

/// Parse every `Set-Cookie` header of a response.
///
/// ```rust
/// use set_cookie_parser::{parse_cookies_from_response, ParseOptions};
///
/// let response = http::Response::builder()
///     .header("set-cookie", "NAME=VALUE;")
///     .header("set-cookie", "FOO=BAR;")
///     .body(())
///     .unwrap();
///
/// let cookies = parse_cookies_from_response(&response, &ParseOptions::default()).unwrap();
/// assert_eq!(cookies.len(), 2);
///
/// let cookies = parse_cookies_from_response(&response, &ParseOptions::new().map(true)).unwrap();
/// assert_eq!(cookies.get("FOO").map(|c| c.value.as_str()), Some("BAR"));
/// ```
pub fn parse_cookies_from_response<R: ResponseLike + ?Sized>(response: &R, options: &ParseOptions) -> Result<Cookies, ParseError> {
    parse_cookies_from_response_with_warnings(response, options).map(Parsed::into_inner)
}

/// Split a comma-joined `Set-Cookie` header and parse every cookie in it,
/// collecting the non-fatal warnings.
pub fn parse_set_cookie_header_with_warnings(header: &str, options: &ParseOptions) -> Result<Parsed<Cookies>, ParseError> {
    let mut diagnostics = Diagnostics::new();
    let cookies = parse_all(split_cookies_iter(header), options, &mut diagnostics)?;
    Ok(diagnostics.finish(cookies))
}

/// Split a comma-joined `Set-Cookie` header and parse every cookie in it.
///
/// ```rust
/// use set_cookie_parser::{parse_set_cookie_header, ParseOptions};
///
/// let cookies = parse_set_cookie_header("a=1; Expires=Tue, 18 Jul 2023 10:32:54 GMT, b=2", &ParseOptions::default()).unwrap();
/// let names: Vec<_> = cookies.iter().map(|c| c.name.as_str()).collect();
/// assert_eq!(names, vec!["a", "b"]);
/// ```
pub fn parse_set_cookie_header(header: &str, options: &ParseOptions) -> Result<Cookies, ParseError> {
    parse_set_cookie_header_with_warnings(header, options).map(Parsed::into_inner)
}
