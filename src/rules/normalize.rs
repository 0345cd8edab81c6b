//! Text normalization for lookups and keyword search.
//!
//! `normalize_text` lowercases, trims and strips diacritics by decomposing to
//! NFKD and dropping combining marks, so `"  FunCafé "` becomes `"funcafe"`.
//! Compatibility decomposition can produce spaces or capitals (`¨` → `" \u{308}"`,
//! `ᴬ` → `"A"`), so the result is trimmed and lowercased once more.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lowercase, trim and remove diacritics.
pub fn normalize_text(s: &str) -> String {
    let stripped: String = s
        .trim()
        .to_lowercase()
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    stripped.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_case_whitespace_and_accents() {
        assert_eq!(normalize_text("  FunCafé "), "funcafe");
        assert_eq!(normalize_text("INSTALAÇÃO"), "instalacao");
        assert_eq!(normalize_text("Máquina e Equipamento"), "maquina e equipamento");
    }

    #[test]
    fn decomposition_output_is_trimmed_and_lowercased() {
        assert_eq!(normalize_text("a\u{A8}"), "a");
        assert_eq!(normalize_text("\u{1D2C}bc"), "abc");
        assert_eq!(normalize_text("\u{A8}trator"), "trator");
    }

    #[test]
    fn empty_and_ascii_are_stable() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("   "), "");
        assert_eq!(normalize_text("abc+"), "abc+");
    }

    proptest! {
        #[test]
        fn normalizing_twice_is_a_no_op(s in "[a-zA-Z\u{A8}\u{C0}-\u{FF}\u{1D2C}-\u{1D3A}0-9 +-]{0,40}") {
            let once = normalize_text(&s);
            prop_assert_eq!(normalize_text(&once), once);
        }

        #[test]
        fn normalized_ascii_lowercase_is_unchanged(s in "[a-z0-9+ -]{0,30}") {
            let trimmed = s.trim().to_string();
            prop_assert_eq!(normalize_text(&trimmed), trimmed);
        }
    }
}
