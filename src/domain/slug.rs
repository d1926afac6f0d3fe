use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALPHANUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Turn a human-readable title into a URL-safe slug: lowercase, runs of
/// non-alphanumeric characters collapsed to a single hyphen, leading and
/// trailing hyphens stripped. Total function; an empty title yields an empty
/// slug, which callers accept as-is.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_ALPHANUMERIC
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
