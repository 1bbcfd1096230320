//! Small string helpers shared across domain modules.

/// Builds a URL-friendly slug from a title: lowercase ASCII alphanumerics
/// with runs of everything else collapsed to single hyphens.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Splits a comma-separated field (tags, technologies) into trimmed,
/// non-empty entries. An empty field yields an empty list.
pub fn split_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Truncates to at most `max` characters, appending "..." when shortened.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Hard truncation used for captured request metadata (user agent, referer).
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Cheap shape check for submitted email addresses. Full RFC validation is
/// not the goal; this rejects the obviously malformed.
pub fn looks_like_email(value: &str) -> bool {
    let Some(at) = value.find('@') else {
        return false;
    };
    let (local, domain) = value.split_at(at);
    let domain = &domain[1..];
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hybrid Solar-Biomass Mango Drier"), "hybrid-solar-biomass-mango-drier");
        assert_eq!(slugify("  Data Science & Analytics  "), "data-science-analytics");
        assert_eq!(slugify("already-slugged"), "already-slugged");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_split_comma_list() {
        assert_eq!(
            split_comma_list("renewable energy, climate , Kenya"),
            vec!["renewable energy", "climate", "Kenya"]
        );
        assert!(split_comma_list("").is_empty());
        assert!(split_comma_list(" , ,").is_empty());
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 200), "short");
        let long = "x".repeat(250);
        let cut = truncate_with_ellipsis(&long, 200);
        assert_eq!(cut.len(), 203);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_looks_like_email() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("not-an-email"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("a b@c.co"));
    }
}
