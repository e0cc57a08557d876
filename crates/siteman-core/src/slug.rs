// crates/siteman-core/src/slug.rs - Title to filename slug conversion
//
// Slugs end up both in filenames and in published URLs, so they are restricted
// to lowercase ASCII alphanumerics joined by single dashes.
//
// EXAMPLES:
// "My Title!!"          -> "my-title"
// "Crème Brûlée, 2024"  -> "creme-brulee-2024"
// "!!!"                 -> ""

use regex::Regex;
use std::sync::LazyLock;

static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static slug pattern is valid"));

/// Convert a human title into a filesystem- and URL-safe token
///
/// ALGORITHM:
/// 1. Transliterate to ASCII (diacritics stripped, other scripts approximated)
/// 2. Lowercase everything
/// 3. Collapse every run of non-alphanumerics into a single `-`
/// 4. Strip leading and trailing `-`
///
/// Never fails. An empty result is the caller's problem: `new` rejects it as
/// an invalid argument.
pub fn slugify(title: &str) -> String {
    let ascii = unidecode::unidecode(title).to_lowercase();
    SEPARATOR_RUN
        .replace_all(&ascii, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic_titles() {
        assert_eq!(slugify("My Title!!"), "my-title");
        assert_eq!(slugify("  Hello,   World  "), "hello-world");
        assert_eq!(slugify("Rust 2024 edition"), "rust-2024-edition");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
    }

    #[test]
    fn test_diacritics_are_transliterated() {
        assert_eq!(slugify("Crème Brûlée"), "creme-brulee");
        assert_eq!(slugify("Ångström über café"), "angstrom-uber-cafe");
    }

    #[test]
    fn test_symbol_only_input_is_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(" -- // -- "), "");
    }

    proptest! {
        #[test]
        fn prop_slug_is_lowercase_alnum_with_single_dashes(title in any::<String>()) {
            let slug = slugify(&title);
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }

        #[test]
        fn prop_slugify_is_idempotent(title in "[ -~]{0,40}") {
            let once = slugify(&title);
            prop_assert_eq!(slugify(&once), once);
        }
    }
}
