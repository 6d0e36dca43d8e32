//! URL slug generation.

/// Maximum slug length stored for posts and categories.
pub const MAX_SLUG_LEN: usize = 50;

/// Path segments that follow a post id in non-detail routes.
pub const RESERVED: [&str; 2] = ["edit", "delete"];

/// Whether `slug` would make a detail URL collide with another route.
pub fn is_reserved(slug: &str) -> bool {
    RESERVED.contains(&slug)
}

/// Turn a human-readable name into a lowercase, hyphen-separated slug.
///
/// Non-ASCII letters are transliterated ("Café" becomes "cafe"), every run of
/// other characters becomes a single hyphen. The result is capped at
/// [`MAX_SLUG_LEN`] and never starts or ends with `-`.
pub fn slugify(input: &str) -> String {
    let mut slug = ::slug::slugify(input);
    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

/// The `n`th candidate for a slug that is already taken: `base`, `base-2`, ...
pub fn candidate(base: &str, n: u32) -> String {
    if n <= 1 {
        return base.to_string();
    }
    let suffix = format!("-{n}");
    let keep = MAX_SLUG_LEN.saturating_sub(suffix.len());
    let trimmed = if base.len() > keep { &base[..keep] } else { base };
    format!("{}{}", trimmed.trim_end_matches('-'), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Getting Started with Django", "getting-started-with-django")]
    #[case("  Python   List -- Comprehensions ", "python-list-comprehensions")]
    #[case("Latest AI Technology Trends 2024!", "latest-ai-technology-trends-2024")]
    #[case("snake_case stays", "snake-case-stays")]
    #[case("Café con Leche", "cafe-con-leche")]
    #[case("Über Straße", "uber-strasse")]
    #[case("!!!", "")]
    fn test_slugify(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[test]
    fn test_slugify_caps_length() {
        let slug = slugify(&"word ".repeat(40));
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_route_segments_are_reserved() {
        assert!(is_reserved("edit"));
        assert!(is_reserved("delete"));
        assert!(!is_reserved("edit-2"));
        assert!(!is_reserved("editing"));
    }

    #[test]
    fn test_candidate_suffixes() {
        assert_eq!(candidate("intro", 1), "intro");
        assert_eq!(candidate("intro", 3), "intro-3");

        let long = "a".repeat(MAX_SLUG_LEN);
        let suffixed = candidate(&long, 12);
        assert_eq!(suffixed.len(), MAX_SLUG_LEN);
        assert!(suffixed.ends_with("-12"));
    }
}
