//! ### Parse `Set-Cookie` headers into structured cookies
//! Made for HTTP clients that need to look at the cookies a server sent back
//! without going through a cookie jar.
//!
//! Parsing is lenient, the way browsers are: an undecodable value, an
//! `Expires` date that cannot be read or a malformed attribute do not fail
//! the parse. They are logged through the [`log`](https://docs.rs/log) facade
//! and collected as [`Warning`]s by the `*_with_warnings` variants. Only a
//! blank value or a cookie without a name is an error.
//!
//! ## From a response
//! ```rust
//! use set_cookie_parser::prelude::*;
//!
//! let response = http::Response::builder()
//!     .header("set-cookie", "session=abc%20def; Path=/; HttpOnly")
//!     .header("set-cookie", "theme=dark; Max-Age=3600")
//!     .body(())
//!     .unwrap();
//!
//! let cookies = parse_cookies_from_response(&response, &ParseOptions::default()).unwrap();
//! let session = cookies.get("session").unwrap();
//! assert_eq!(session.value, "abc def");
//! assert!(session.http_only);
//! assert_eq!(cookies.get("theme").unwrap().max_age, Some(MaxAge::Seconds(3600)));
//! ```
//!
//! ## From a comma-joined header
//! ```rust
//! use set_cookie_parser::prelude::*;
//!
//! let joined = "a=1; Expires=Tue, 18 Jul 2023 10:32:54 GMT, b=2";
//! assert_eq!(split_cookies_string(joined), vec!["a=1; Expires=Tue, 18 Jul 2023 10:32:54 GMT", "b=2"]);
//! ```

#[macro_use]
extern crate log;

/// The parsed cookie record
pub mod cookie;
///
pub mod date;
/// Warnings raised by lenient parsing
pub mod diagnostics;
/// Error definitions
pub mod error;
/// Parsing options
pub mod options;
/// Parsing of a single `Set-Cookie` value
pub mod parser;
/// Extraction of the cookies of a response
pub mod response;
///
pub mod split;
///
pub mod utils;

pub use crate::cookie::{Cookie, Expires, MaxAge};
pub use crate::diagnostics::{Parsed, Warning};
pub use crate::error::{DecodeError, ParseError};
pub use crate::options::ParseOptions;
pub use crate::parser::{parse_cookie_from_string, parse_cookie_with_warnings};
pub use crate::response::{
    parse_cookies_from_response, parse_cookies_from_response_with_warnings, parse_set_cookie_header, parse_set_cookie_header_with_warnings, Cookies,
    ResponseLike,
};
pub use crate::split::{split_cookies_iter, split_cookies_string, SplitCookies, SplitCookiesIter};

///
pub use http;

/// Contains everything needed to parse cookies
///
/// ```rust
/// use set_cookie_parser::prelude::*;
///
/// let cookie: Cookie = "NAME=VALUE".parse().unwrap();
/// ```
pub mod prelude {
    ///
    pub use crate::cookie::Cookie;
    ///
    pub use crate::cookie::Expires;
    ///
    pub use crate::cookie::MaxAge;
    ///
    pub use crate::diagnostics::Parsed;
    ///
    pub use crate::diagnostics::Warning;
    ///
    pub use crate::error::ParseError;
    ///
    pub use crate::options::ParseOptions;
    ///
    pub use crate::parser::parse_cookie_from_string;
    ///
    pub use crate::parser::parse_cookie_with_warnings;
    ///
    pub use crate::response::parse_cookies_from_response;
    ///
    pub use crate::response::parse_set_cookie_header;
    ///
    pub use crate::response::Cookies;
    ///
    pub use crate::response::ResponseLike;
    ///
    pub use crate::split::split_cookies_string;
    ///
    pub use crate::split::SplitCookies;
}
