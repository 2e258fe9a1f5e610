//! Text formatting helpers shared by every template: month labels, date
//! ranges, and condensed profile links.

use chrono::NaiveDate;
use url::Url;

pub const PRESENT: &str = "Present";

/// Formats a `YYYY-MM` month as `Mon YYYY`. Malformed input yields `""`.
pub fn format_month_year(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_default()
}

/// `Start - End`, with `Present` replacing the end when `is_current`.
///
/// Missing halves collapse: a lone start renders on its own, as does a lone end.
pub fn format_date_range(start: &str, end: &str, is_current: bool) -> String {
    let start = format_month_year(start);
    let end = if is_current {
        PRESENT.to_string()
    } else {
        format_month_year(end)
    };

    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} - {end}"),
        (false, true) => start,
        (true, false) => end,
        (true, true) => String::new(),
    }
}

/// Condenses a profile URL into `host/path?query` with scheme and `www.` removed.
///
/// Inputs that do not parse as absolute URLs (e.g. `linkedin.com/in/jane`) are
/// cleaned up textually instead.
pub fn display_social_url(raw: &str) -> String {
    let raw = raw.trim();
    match Url::parse(raw) {
        Ok(url) if url.host_str().is_some() => {
            let host = url.host_str().unwrap_or_default();
            let host = host.strip_prefix("www.").unwrap_or(host);
            let path = url.path().trim_end_matches('/');
            let mut out = format!("{host}{path}");
            if let Some(query) = url.query() {
                out.push('?');
                out.push_str(query);
            }
            out
        }
        _ => strip_scheme_and_www(raw),
    }
}

fn strip_scheme_and_www(raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    let mut rest = raw;
    for scheme in ["https://", "http://"] {
        if lower.starts_with(scheme) {
            rest = &raw[scheme.len()..];
            break;
        }
    }
    if rest.to_ascii_lowercase().starts_with("www.") {
        rest = &rest[4..];
    }
    rest.trim_end_matches('/').to_string()
}

/// Link target for a profile value; bare hosts get `https://`.
///
/// Anything that is not http(s) or mailto is refused so user input can never
/// become a script URL.
pub fn social_href(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) => match url.scheme() {
            "http" | "https" | "mailto" => Some(url.to_string()),
            _ => None,
        },
        Err(_) => Url::parse(&format!("https://{raw}"))
            .ok()
            .map(|u| u.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_year() {
        assert_eq!(format_month_year("2022-01"), "Jan 2022");
        assert_eq!(format_month_year("1999-12"), "Dec 1999");
    }

    #[test]
    fn test_malformed_month_is_empty() {
        assert_eq!(format_month_year(""), "");
        assert_eq!(format_month_year("2022-13"), "");
        assert_eq!(format_month_year("January"), "");
    }

    #[test]
    fn test_current_range_shows_present() {
        assert_eq!(format_date_range("2022-01", "", true), "Jan 2022 - Present");
        // end date is ignored while current
        assert_eq!(
            format_date_range("2022-01", "2023-03", true),
            "Jan 2022 - Present"
        );
    }

    #[test]
    fn test_closed_and_partial_ranges() {
        assert_eq!(
            format_date_range("2019-09", "2021-06", false),
            "Sep 2019 - Jun 2021"
        );
        assert_eq!(format_date_range("2019-09", "", false), "Sep 2019");
        assert_eq!(format_date_range("", "2021-06", false), "Jun 2021");
        assert_eq!(format_date_range("bad", "worse", false), "");
    }

    #[test]
    fn test_social_display_strips_www_and_scheme_keeps_query() {
        assert_eq!(
            display_social_url("https://www.linkedin.com/in/jane?utm=1"),
            "linkedin.com/in/jane?utm=1"
        );
    }

    #[test]
    fn test_social_display_root_path() {
        assert_eq!(display_social_url("https://janedoe.dev/"), "janedoe.dev");
        assert_eq!(
            display_social_url("http://github.com/jane/"),
            "github.com/jane"
        );
    }

    #[test]
    fn test_social_display_fallback_without_scheme() {
        assert_eq!(
            display_social_url("www.github.com/jane"),
            "github.com/jane"
        );
        assert_eq!(display_social_url("t.me/jane"), "t.me/jane");
        assert_eq!(display_social_url("https://"), "");
    }

    #[test]
    fn test_social_href() {
        assert_eq!(
            social_href("github.com/jane").as_deref(),
            Some("https://github.com/jane")
        );
        assert_eq!(social_href("javascript:alert(1)"), None);
        assert_eq!(social_href(""), None);
    }
}
