use std::borrow::Cow;
use time::{
    error::{Parse, ParseFromDescription},
    format_description::{
        well_known::{Rfc2822, Rfc3339},
        FormatItem,
    },
    macros::format_description,
    parsing::Parsed,
    OffsetDateTime, PrimitiveDateTime,
};

const NETSCAPE_COOKIE_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[weekday repr:short], [day]-[month repr:short]-[year] [hour]:[minute]:[second] GMT");
const NETSCAPE_COOKIE_DATE_FORMAT_LONG_WEEKDAY: &[FormatItem<'static>] =
    format_description!("[weekday], [day]-[month repr:short]-[year] [hour]:[minute]:[second] GMT");
const ASCTIME_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second] [year]");
const RFC850_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[weekday], [day]-[month repr:short]-[year repr:last_two] [hour]:[minute]:[second] GMT");
const RFC850_DATE_FORMAT_SHORT_WEEKDAY: &[FormatItem<'static>] =
    format_description!("[weekday repr:short], [day]-[month repr:short]-[year repr:last_two] [hour]:[minute]:[second] GMT");

/// Parse a date carrying a two-digit year. 70 to 99 are 19xx, 00 to 69 are
/// 20xx ([RFC6265, section 5.1.1](https://tools.ietf.org/html/rfc6265#section-5.1.1)).
fn parse_two_digit_year(date: &str, format: &[FormatItem<'_>]) -> Result<OffsetDateTime, Parse> {
    let mut parsed = Parsed::new();
    let remaining = parsed.parse_items(date.as_bytes(), format)?;
    if !remaining.is_empty() {
        return Err(ParseFromDescription::UnexpectedTrailingCharacters.into());
    }

    if let Some(last_two) = parsed.year_last_two() {
        let century = if last_two >= 70 { 1900 } else { 2000 };
        parsed
            .set_year(century + i32::from(last_two))
            .ok_or(ParseFromDescription::InvalidComponent("year"))?;
    }

    Ok(PrimitiveDateTime::try_from(parsed)?.assume_utc())
}

/// Parse the date of an `Expires` attribute.
///
/// Accepts the IMF-fixdate / RFC 2822 form servers are supposed to send
/// (`Tue, 18 Jul 2023 10:32:54 GMT`), the dashed form of the original
/// Netscape cookie draft (`Tue, 18-Jul-2023 10:32:54 GMT`), RFC 850 with its
/// two-digit year (`Tuesday, 18-Jul-23 10:32:54 GMT`), asctime
/// (`Tue Jul 18 10:32:54 2023`) and RFC 3339. A `UTC` zone is read as `GMT`.
/// Surrounding whitespace is ignored.
pub fn date_from_cookie_str(date: &str) -> Result<OffsetDateTime, Parse> {
    let date = date.trim();
    let date = match date.strip_suffix(" UTC") {
        Some(head) => Cow::Owned(format!("{} GMT", head)),
        None => Cow::Borrowed(date),
    };
    let date = date.as_ref();

    OffsetDateTime::parse(date, &Rfc2822)
        .or_else(|_| PrimitiveDateTime::parse(date, &NETSCAPE_COOKIE_DATE_FORMAT).map(PrimitiveDateTime::assume_utc))
        .or_else(|_| PrimitiveDateTime::parse(date, &NETSCAPE_COOKIE_DATE_FORMAT_LONG_WEEKDAY).map(PrimitiveDateTime::assume_utc))
        .or_else(|_| parse_two_digit_year(date, RFC850_DATE_FORMAT_SHORT_WEEKDAY))
        .or_else(|_| parse_two_digit_year(date, RFC850_DATE_FORMAT))
        .or_else(|_| PrimitiveDateTime::parse(date, &ASCTIME_DATE_FORMAT).map(PrimitiveDateTime::assume_utc))
        .or_else(|_| OffsetDateTime::parse(date, &Rfc3339))
}
