use std::ops::Index;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses a draft date. The time part is optional, so both `2024-01-01`
/// and `2024-01-01 18:30:00.000` are accepted.
pub fn parse_date(buf: &str) -> Result<NaiveDateTime, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r"(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T](\d{1,2}):(\d{2}):(\d{2})(\.\d{1,3})?)?"
        ).unwrap();
    }

    let Some(caps) = DATE_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);

    // We are using the regex approach to make it more flexible
    let y: i32 = to_i32(caps.index(1))?;
    let m: u32 = to_u32(caps.index(2))?;
    let d: u32 = to_u32(caps.index(3))?;

    let time = match caps.get(4) {
        Some(h) => {
            let h: u32 = to_u32(h.as_str())?;
            let mn: u32 = to_u32(caps.index(5))?;
            let s: u32 = to_u32(caps.index(6))?;
            NaiveTime::from_hms_opt(h, mn, s)
        }
        None => NaiveTime::from_hms_opt(0, 0, 0),
    };

    let date = NaiveDate::from_ymd_opt(y, m, d);
    match (date, time) {
        (Some(date), Some(time)) => Ok(NaiveDateTime::new(date, time)),
        _ => Err(format!("Date {} is out of calendar range", buf)),
    }
}

/// Long human readable form shown on rendered pages, e.g. "January 1, 2024".
pub fn format_display_date(date_time: &NaiveDateTime) -> String {
    date_time.format("%B %-d, %Y").to_string()
}

/// RFC 822 form used by the feed's pubDate and lastBuildDate. Dates are
/// treated as UTC.
pub fn format_rfc822(date_time: &NaiveDateTime) -> String {
    Utc.from_utc_datetime(date_time).to_rfc2822()
}

/// Derives a URL-safe identifier from a title: lowercase ASCII words joined
/// by single hyphens. Whitespace, underscores and hyphen runs collapse into
/// one hyphen; everything else outside [a-z0-9] is dropped. The result is
/// empty when nothing survives.
pub fn slugify(text: &str) -> String {
    let text = unidecode::unidecode(text);

    let kept: String = text
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-' || c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut pending_sep = false;
    for c in kept.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }

    slug
}
