use crate::{date::date_from_cookie_str, utils::parse_leading_int};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Value of an `Expires` attribute.
///
/// A date that cannot be parsed is not an error, it is kept as
/// [`Expires::Invalid`] with its raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expires {
    Date(#[cfg_attr(feature = "serde", serde(with = "time::serde::rfc2822"))] OffsetDateTime),
    Invalid(String),
}

impl Expires {
    pub fn parse(raw: &str) -> Self {
        match date_from_cookie_str(raw) {
            Ok(date) => Expires::Date(date),
            Err(e) => {
                debug!("Cannot parse expires date '{}': {}", raw, e);
                Expires::Invalid(raw.to_string())
            }
        }
    }

    pub fn date(&self) -> Option<OffsetDateTime> {
        match self {
            Expires::Date(date) => Some(*date),
            Expires::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Expires::Date(_))
    }
}

/// Value of a `Max-Age` attribute, in seconds.
///
/// Parsing is lenient: `"10abc"` is 10 seconds, and text without leading
/// digits is kept as [`MaxAge::Invalid`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaxAge {
    Seconds(i64),
    Invalid(String),
}

impl MaxAge {
    pub fn parse(raw: &str) -> Self {
        match parse_leading_int(raw) {
            Some(seconds) => MaxAge::Seconds(seconds),
            None => {
                debug!("Cannot parse max-age '{}'", raw);
                MaxAge::Invalid(raw.to_string())
            }
        }
    }

    pub fn seconds(&self) -> Option<i64> {
        match self {
            MaxAge::Seconds(seconds) => Some(*seconds),
            MaxAge::Invalid(_) => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, MaxAge::Seconds(_))
    }
}

/// A cookie as sent by a server in a `Set-Cookie` header.
///
/// Known attributes have their own field, any other attribute lands in
/// [`extensions`](#structfield.extensions) under its lowercased name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub expires: Option<Expires>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub max_age: Option<MaxAge>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub secure: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub http_only: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub same_site: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub path: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub domain: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "BTreeMap::is_empty"))]
    pub extensions: BTreeMap<String, String>,
}

impl Cookie {
    /// A cookie with only a name and a value, no attribute set
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Cookie {
            name: name.into(),
            value: value.into(),
            expires: None,
            max_age: None,
            secure: false,
            http_only: false,
            same_site: None,
            path: None,
            domain: None,
            extensions: BTreeMap::new(),
        }
    }

    /// Get an attribute that has no field of its own, `key` must be lowercase
    pub fn extension(&self, key: &str) -> Option<&str> {
        self.extensions.get(key).map(String::as_str)
    }

    /// Store an attribute under its lowercased key. Known attributes get
    /// their typed field, anything else goes to the extensions.
    pub(crate) fn set_attribute(&mut self, key: &str, value: &str) {
        match key {
            "expires" => self.expires = Some(Expires::parse(value)),
            "max-age" => self.max_age = Some(MaxAge::parse(value)),
            "secure" => self.secure = true,
            "httponly" => self.http_only = true,
            "samesite" => self.same_site = Some(value.to_string()),
            "path" => self.path = Some(value.to_string()),
            "domain" => self.domain = Some(value.to_string()),
            _ => {
                self.extensions.insert(key.to_string(), value.to_string());
            }
        }
    }
}

fn same_site_from_str(same_site: &str) -> Option<cookie::SameSite> {
    if same_site.eq_ignore_ascii_case("strict") {
        Some(cookie::SameSite::Strict)
    } else if same_site.eq_ignore_ascii_case("lax") {
        Some(cookie::SameSite::Lax)
    } else if same_site.eq_ignore_ascii_case("none") {
        Some(cookie::SameSite::None)
    } else {
        None
    }
}

impl From<&Cookie> for cookie::Cookie<'static> {
    fn from(c: &Cookie) -> Self {
        let mut builder = cookie::Cookie::build((c.name.clone(), c.value.clone()))
            .secure(c.secure)
            .http_only(c.http_only);

        if let Some(path) = &c.path {
            builder = builder.path(path.clone());
        }

        if let Some(domain) = &c.domain {
            builder = builder.domain(domain.clone());
        }

        if let Some(same_site) = c.same_site.as_deref().and_then(same_site_from_str) {
            builder = builder.same_site(same_site);
        }

        if let Some(date) = c.expires.as_ref().and_then(Expires::date) {
            builder = builder.expires(date);
        }

        if let Some(seconds) = c.max_age.as_ref().and_then(MaxAge::seconds) {
            builder = builder.max_age(time::Duration::seconds(seconds));
        }

        builder.build()
    }
}

impl From<Cookie> for cookie::Cookie<'static> {
    fn from(c: Cookie) -> Self {
        cookie::Cookie::from(&c)
    }
}

#[cfg(test)]
mod t {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn new_has_no_attribute() {
        let c = Cookie::new("NAME", "VALUE");
        assert_eq!(c.name, "NAME");
        assert_eq!(c.value, "VALUE");
        assert!(c.expires.is_none());
        assert!(c.max_age.is_none());
        assert!(!c.secure);
        assert!(!c.http_only);
        assert!(c.same_site.is_none());
        assert!(c.path.is_none());
        assert!(c.domain.is_none());
        assert!(c.extensions.is_empty());
    }

    #[test]
    fn expires() {
        let valid = Expires::parse("Tue, 18 Jul 2023 10:32:54 GMT");
        assert!(valid.is_valid());
        assert_eq!(valid.date(), Some(datetime!(2023-07-18 10:32:54 UTC)));

        let invalid = Expires::parse("not a date");
        assert!(!invalid.is_valid());
        assert_eq!(invalid, Expires::Invalid("not a date".to_owned()));
    }

    #[test]
    fn max_age() {
        assert_eq!(MaxAge::parse("-1").seconds(), Some(-1));
        assert_eq!(MaxAge::parse("60s").seconds(), Some(60));
        assert_eq!(MaxAge::parse("soon"), MaxAge::Invalid("soon".to_owned()));
        assert!(!MaxAge::parse("").is_valid());
    }

    #[test]
    fn attributes_dispatch() {
        let mut c = Cookie::new("a", "b");
        c.set_attribute("secure", "ignored");
        c.set_attribute("httponly", "");
        c.set_attribute("samesite", "Lax");
        c.set_attribute("path", "/");
        c.set_attribute("domain", "example.com");
        c.set_attribute("max-age", "3600");
        c.set_attribute("priority", "High");

        assert!(c.secure);
        assert!(c.http_only);
        assert_eq!(c.same_site.as_deref(), Some("Lax"));
        assert_eq!(c.path.as_deref(), Some("/"));
        assert_eq!(c.domain.as_deref(), Some("example.com"));
        assert_eq!(c.max_age, Some(MaxAge::Seconds(3600)));
        assert_eq!(c.extension("priority"), Some("High"));
    }

    mod into_cookie_crate {
        use super::*;

        #[test]
        fn all_attributes() {
            let mut c = Cookie::new("session", "abc");
            c.path = Some("/".to_owned());
            c.domain = Some("example.com".to_owned());
            c.secure = true;
            c.http_only = true;
            c.same_site = Some("strict".to_owned());
            c.expires = Some(Expires::Date(datetime!(2023-07-18 10:32:54 UTC)));
            c.max_age = Some(MaxAge::Seconds(60));

            let converted = cookie::Cookie::from(&c);
            assert_eq!(converted.name(), "session");
            assert_eq!(converted.value(), "abc");
            assert_eq!(converted.path(), Some("/"));
            assert_eq!(converted.domain(), Some("example.com"));
            assert_eq!(converted.secure(), Some(true));
            assert_eq!(converted.http_only(), Some(true));
            assert_eq!(converted.same_site(), Some(cookie::SameSite::Strict));
            assert_eq!(converted.expires_datetime(), Some(datetime!(2023-07-18 10:32:54 UTC)));
            assert_eq!(converted.max_age(), Some(time::Duration::seconds(60)));
        }

        #[test]
        fn invalid_markers_are_dropped() {
            let mut c = Cookie::new("a", "b");
            c.same_site = Some("whatever".to_owned());
            c.expires = Some(Expires::Invalid("never".to_owned()));
            c.max_age = Some(MaxAge::Invalid("soon".to_owned()));

            let converted: cookie::Cookie<'static> = c.into();
            assert_eq!(converted.same_site(), None);
            assert_eq!(converted.expires(), None);
            assert_eq!(converted.max_age(), None);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialize_skips_unset_attributes() {
        let mut c = Cookie::new("NAME", "VALUE");
        c.path = Some("/".to_owned());
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "NAME", "value": "VALUE", "secure": false, "http_only": false, "path": "/" })
        );
    }
}
