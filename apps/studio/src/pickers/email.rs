//! Email domain autocomplete for the personal-info step.

pub const MAX_SUGGESTIONS: usize = 5;

pub const COMMON_EMAIL_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "icloud.com",
    "protonmail.com",
    "aol.com",
    "live.com",
    "mail.com",
    "gmx.com",
    "zoho.com",
    "yandex.com",
];

/// Completions for a partially typed address.
///
/// Nothing is suggested until the input contains `@`, or once the typed
/// domain already matches a known domain exactly.
pub fn suggest(input: &str) -> Vec<String> {
    let input = input.trim();
    let Some((local, domain)) = input.split_once('@') else {
        return Vec::new();
    };
    if local.is_empty() || domain.contains('@') {
        return Vec::new();
    }

    let typed = domain.to_ascii_lowercase();
    if COMMON_EMAIL_DOMAINS.contains(&typed.as_str()) {
        return Vec::new();
    }

    COMMON_EMAIL_DOMAINS
        .iter()
        .filter(|d| d.starts_with(&typed))
        .take(MAX_SUGGESTIONS)
        .map(|d| format!("{local}@{d}"))
        .collect()
}
