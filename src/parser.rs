use crate::{
    cookie::Cookie,
    diagnostics::{Diagnostics, Parsed, Warning},
    error::ParseError,
    options::ParseOptions,
    utils::decode_value,
};
use std::str::FromStr;

fn is_non_blank(part: &&str) -> bool {
    !part.trim().is_empty()
}

/// Split a segment on its first `=`. A segment without `=` has an empty
/// right side.
fn split_pair(part: &str) -> (&str, &str) {
    part.split_once('=').unwrap_or((part, ""))
}

/// Parse a single `Set-Cookie` value, collecting the non-fatal warnings.
///
/// The value is split on `;`, blank segments are dropped. The first segment
/// is the `name=value` pair, everything after its first `=` is the value.
/// Every other segment is an attribute; keys are matched case-insensitively.
/// An attribute whose key is empty once leading whitespace is trimmed (` =x`)
/// is skipped and reported as [`Warning::MalformedAttribute`].
pub fn parse_cookie_with_warnings(set_cookie_value: &str, options: &ParseOptions) -> Result<Parsed<Cookie>, ParseError> {
    let mut parts = set_cookie_value.split(';').filter(is_non_blank);

    let name_value = parts.next().ok_or_else(|| ParseError::Empty(set_cookie_value.to_string()))?;
    let (name, raw_value) = split_pair(name_value);
    if name.is_empty() {
        return Err(ParseError::MissingName(set_cookie_value.to_string()));
    }

    let mut diagnostics = Diagnostics::new();

    let value = if options.decode_values {
        match decode_value(raw_value) {
            Ok(decoded) => decoded.into_owned(),
            Err(e) => {
                diagnostics.push(Warning::UndecodableValue {
                    value: raw_value.to_string(),
                    reason: e.to_string(),
                });
                raw_value.to_string()
            }
        }
    } else {
        raw_value.to_string()
    };

    let mut cookie = Cookie::new(name, value);

    for part in parts {
        let (key, value) = split_pair(part);
        let key = key.trim_start();
        if key.is_empty() {
            diagnostics.push(Warning::MalformedAttribute { part: part.to_string() });
            continue;
        }

        cookie.set_attribute(&key.to_ascii_lowercase(), value);
    }

    Ok(diagnostics.finish(cookie))
}

/// Parse a single `Set-Cookie` value.
///
/// ```rust
/// use set_cookie_parser::{parse_cookie_from_string, ParseOptions};
///
/// let cookie = parse_cookie_from_string("NAME=VALUE; Path=/; Expires=Tue, 18 Jul 2023 10:32:54 GMT;", &ParseOptions::default()).unwrap();
/// assert_eq!(cookie.name, "NAME");
/// assert_eq!(cookie.value, "VALUE");
/// assert_eq!(cookie.path.as_deref(), Some("/"));
/// assert!(cookie.expires.unwrap().is_valid());
/// ```
pub fn parse_cookie_from_string(set_cookie_value: &str, options: &ParseOptions) -> Result<Cookie, ParseError> {
    parse_cookie_with_warnings(set_cookie_value, options).map(Parsed::into_inner)
}

impl FromStr for Cookie {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cookie_from_string(s, &ParseOptions::default())
    }
}

#[cfg(test)]
mod t {
    use super::*;
    use crate::cookie::{Expires, MaxAge};
    use time::macros::datetime;

    fn parse(s: &str) -> Cookie {
        parse_cookie_from_string(s, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn name_value_only() {
        assert_eq!(parse("NAME=VALUE"), Cookie::new("NAME", "VALUE"));
        assert_eq!(parse("NAME=VALUE;"), Cookie::new("NAME", "VALUE"));
    }

    #[test]
    fn single_cookie() {
        let mut expected = Cookie::new("NAME", "VALUE");
        expected.path = Some("/".to_owned());
        expected.expires = Some(Expires::Date(datetime!(2023-07-18 10:32:54 UTC)));

        assert_eq!(parse("NAME=VALUE; Path=/; Expires=Tue, 18 Jul 2023 10:32:54 GMT;"), expected);
    }

    #[test]
    fn value_keeps_extra_equal_signs() {
        assert_eq!(parse("token=a=b==").value, "a=b==");
    }

    #[test]
    fn no_equal_sign_means_empty_value() {
        assert_eq!(parse("lonely"), Cookie::new("lonely", ""));
    }

    #[test]
    fn empty_value() {
        assert_eq!(parse("NAME="), Cookie::new("NAME", ""));
    }

    #[test]
    fn decodes_value() {
        assert_eq!(parse("NAME=hello%20world").value, "hello world");
    }

    #[test]
    fn decoding_can_be_disabled() {
        let options = ParseOptions::new().decode_values(false);
        let cookie = parse_cookie_from_string("NAME=hello%20world", &options).unwrap();
        assert_eq!(cookie.value, "hello%20world");
    }

    #[test]
    fn undecodable_value_is_kept() {
        let parsed = parse_cookie_with_warnings("NAME=100%; Path=/", &ParseOptions::default()).unwrap();
        assert_eq!(parsed.value.value, "100%");
        assert_eq!(parsed.value.path.as_deref(), Some("/"));
        assert_eq!(parsed.warnings.len(), 1);
        assert!(matches!(&parsed.warnings[0], Warning::UndecodableValue { value, .. } if value == "100%"));
    }

    #[test]
    fn all_known_attributes() {
        let cookie = parse("id=a3fWa; Expires=Wed, 21 Oct 2015 07:28:00 GMT; Max-Age=2592000; Secure; HttpOnly; SameSite=Strict; Path=/docs; Domain=mozilla.org");

        assert_eq!(cookie.name, "id");
        assert_eq!(cookie.value, "a3fWa");
        assert_eq!(cookie.expires, Some(Expires::Date(datetime!(2015-10-21 07:28:00 UTC))));
        assert_eq!(cookie.max_age, Some(MaxAge::Seconds(2592000)));
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.same_site.as_deref(), Some("Strict"));
        assert_eq!(cookie.path.as_deref(), Some("/docs"));
        assert_eq!(cookie.domain.as_deref(), Some("mozilla.org"));
        assert!(cookie.extensions.is_empty());
    }

    #[test]
    fn keys_are_case_insensitive() {
        let cookie = parse("a=b; PATH=/x; sEcUrE; max-AGE=-1; HTTPONLY");
        assert_eq!(cookie.path.as_deref(), Some("/x"));
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.max_age, Some(MaxAge::Seconds(-1)));
    }

    #[test]
    fn secure_value_is_ignored() {
        assert!(parse("a=b; Secure=false").secure);
    }

    #[test]
    fn unknown_attribute_is_kept() {
        let cookie = parse("a=b; Foo=Bar; Partitioned");
        assert_eq!(cookie.extension("foo"), Some("Bar"));
        assert_eq!(cookie.extension("partitioned"), Some(""));
    }

    #[test]
    fn attribute_values_are_not_trimmed() {
        assert_eq!(parse("a=b; Path= /x ").path.as_deref(), Some(" /x "));
    }

    #[test]
    fn invalid_markers() {
        let cookie = parse("a=b; Expires=never; Max-Age=soon");
        assert_eq!(cookie.expires, Some(Expires::Invalid("never".to_owned())));
        assert_eq!(cookie.max_age, Some(MaxAge::Invalid("soon".to_owned())));
    }

    #[test]
    fn last_attribute_wins() {
        assert_eq!(parse("a=b; Path=/one; Path=/two").path.as_deref(), Some("/two"));
    }

    #[test]
    fn malformed_attribute_is_skipped() {
        let parsed = parse_cookie_with_warnings("a=b; =oops; Path=/", &ParseOptions::default()).unwrap();
        assert_eq!(parsed.value.path.as_deref(), Some("/"));
        assert!(parsed.value.extensions.is_empty());
        assert_eq!(parsed.warnings, vec![Warning::MalformedAttribute { part: " =oops".to_owned() }]);
    }

    #[test]
    fn blank_key_after_trim_is_malformed() {
        let parsed = parse_cookie_with_warnings("a=b;\t =x;=y", &ParseOptions::default()).unwrap();
        assert_eq!(parsed.value, Cookie::new("a", "b"));
        assert_eq!(
            parsed.warnings,
            vec![Warning::MalformedAttribute { part: "\t =x".to_owned() }, Warning::MalformedAttribute { part: "=y".to_owned() }]
        );
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(parse_cookie_from_string("", &ParseOptions::default()), Err(ParseError::Empty("".to_owned())));
        assert_eq!(parse_cookie_from_string(" ; ;", &ParseOptions::default()), Err(ParseError::Empty(" ; ;".to_owned())));
    }

    #[test]
    fn missing_name_fails() {
        assert_eq!(parse_cookie_from_string("=VALUE; Path=/", &ParseOptions::default()), Err(ParseError::MissingName("=VALUE; Path=/".to_owned())));
    }

    #[test]
    fn from_str() {
        let cookie: Cookie = "NAME=VALUE; Secure".parse().unwrap();
        assert_eq!(cookie.name, "NAME");
        assert!(cookie.secure);
    }
}
