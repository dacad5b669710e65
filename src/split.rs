//! Splitting of comma-joined `Set-Cookie` field values.
//!
//! HTTP allows repeated header fields to be folded into one, comma separated
//! ([RFC7230, section 3.2.2](https://tools.ietf.org/html/rfc7230#section-3.2.2)).
//! `Set-Cookie` is the documented exception because its `Expires` attribute
//! contains a comma, yet some clients fold it anyway. A comma is only taken
//! as a cookie separator when the text following it, up to the next `=`,
//! `;` or `,`, ends on `=`, i.e. when it starts a new `name=value` pair.

/// Whitespace as understood by the folding clients: the Unicode `White_Space`
/// set without `U+0085`, plus the byte order mark `U+FEFF`.
#[inline]
fn is_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

#[inline]
fn is_special(b: u8) -> bool {
    matches!(b, b'=' | b';' | b',')
}

/// Lazy iterator over the cookie-values of a possibly comma-joined
/// `Set-Cookie` header. Every item borrows from the input and keeps its
/// original inner whitespace.
#[derive(Debug, Clone)]
pub struct SplitCookiesIter<'a> {
    input: &'a str,
    pos: usize,
    start: usize,
    finished: bool,
}

impl<'a> SplitCookiesIter<'a> {
    pub fn new(input: &'a str) -> Self {
        SplitCookiesIter {
            input,
            pos: 0,
            start: 0,
            finished: input.is_empty(),
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    /// Advance past whitespace, returns the next character if input is left
    fn skip_whitespace(&mut self) -> Option<char> {
        while let Some(c) = self.input[self.pos..].chars().next() {
            if !is_whitespace(c) {
                return Some(c);
            }
            self.pos += c.len_utf8();
        }
        None
    }
}

impl<'a> Iterator for SplitCookiesIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let bytes = self.bytes();
        while let Some(c) = self.skip_whitespace() {
            if c != ',' {
                self.pos += c.len_utf8();
                continue;
            }

            let comma = self.pos;
            self.pos += 1;
            self.skip_whitespace();
            let next_start = self.pos;

            while self.pos < bytes.len() && !is_special(bytes[self.pos]) {
                self.pos += 1;
            }

            if self.pos < bytes.len() && bytes[self.pos] == b'=' {
                // `next_start` follows whole characters, so it is a char boundary
                let segment = &self.input[self.start..comma];
                trace!("cookie separator found at byte {}", comma);
                self.pos = next_start;
                self.start = next_start;
                return Some(segment);
            }

            // comma inside an attribute value or before another attribute
            self.pos = comma + 1;
        }

        self.finished = true;
        Some(&self.input[self.start..])
    }
}

impl std::iter::FusedIterator for SplitCookiesIter<'_> {}

/// Iterate over the cookie-values of a possibly comma-joined header value
pub fn split_cookies_iter(input: &str) -> SplitCookiesIter<'_> {
    SplitCookiesIter::new(input)
}

/// Split a possibly comma-joined `Set-Cookie` header value into individual
/// cookie-values.
///
/// ```rust
/// use set_cookie_parser::split_cookies_string;
///
/// let joined = "a=1; Expires=Tue, 18 Jul 2023 10:32:54 GMT, b=2";
/// assert_eq!(split_cookies_string(joined), vec!["a=1; Expires=Tue, 18 Jul 2023 10:32:54 GMT", "b=2"]);
/// ```
pub fn split_cookies_string(input: &str) -> Vec<&str> {
    SplitCookiesIter::new(input).collect()
}

/// Types that can hand out individual cookie-values.
///
/// Strings are split with [`split_cookies_string`], collections are taken as
/// already split and passed through, and `None` yields nothing.
pub trait SplitCookies {
    fn split_cookies(&self) -> Vec<&str>;
}

impl SplitCookies for str {
    fn split_cookies(&self) -> Vec<&str> {
        split_cookies_string(self)
    }
}

impl SplitCookies for String {
    fn split_cookies(&self) -> Vec<&str> {
        split_cookies_string(self.as_str())
    }
}

impl<S: AsRef<str>> SplitCookies for [S] {
    fn split_cookies(&self) -> Vec<&str> {
        self.iter().map(AsRef::as_ref).collect()
    }
}

impl<S: AsRef<str>> SplitCookies for Vec<S> {
    fn split_cookies(&self) -> Vec<&str> {
        self.as_slice().split_cookies()
    }
}

impl<T: SplitCookies + ?Sized> SplitCookies for &T {
    fn split_cookies(&self) -> Vec<&str> {
        (**self).split_cookies()
    }
}

impl<T: SplitCookies> SplitCookies for Option<T> {
    fn split_cookies(&self) -> Vec<&str> {
        match self {
            Some(inner) => inner.split_cookies(),
            None => {
                debug!("No set-cookie value to split");
                Vec::new()
            }
        }
    }
}
