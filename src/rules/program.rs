//! Fixed program table.
//!
//! Some credit programs only finance one purpose; for those the program code
//! alone decides the label. Programs listed with `None` ("either") finance
//! both and behave exactly like unknown programs.

use crate::domain::Label;
use crate::rules::normalize_text;

/// Known programs, keyed by normalized code.
pub const PROGRAM_RULES: [(&str, Option<Label>); 13] = [
    ("abc+", Some(Label::Investment)),
    ("ftra", Some(Label::Cost)),
    ("funcafe", None),
    ("inovagro", Some(Label::Investment)),
    ("moderagro", Some(Label::Investment)),
    ("moderfrota", Some(Label::Investment)),
    ("no program", None),
    ("procab-agro", Some(Label::Cost)),
    ("prodecoop", Some(Label::Investment)),
    ("proirriga", Some(Label::Investment)),
    ("pronaf", None),
    ("pronamp", None),
    // Appears in the data, program not identified.
    ("14", None),
];

/// Forced label for a program code, if the table pins one.
///
/// The code is normalized before lookup.
pub fn forced_label(program: &str) -> Option<Label> {
    let key = normalize_text(program);
    PROGRAM_RULES
        .iter()
        .find(|(code, _)| *code == key)
        .and_then(|(_, label)| *label)
}

/// Whether the program appears in the table at all.
pub fn is_known_program(program: &str) -> bool {
    let key = normalize_text(program);
    PROGRAM_RULES.iter().any(|(code, _)| *code == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_programs_resolve() {
        assert_eq!(forced_label("abc+"), Some(Label::Investment));
        assert_eq!(forced_label("FTRA"), Some(Label::Cost));
        assert_eq!(forced_label(" Procab-Agro "), Some(Label::Cost));
        assert_eq!(forced_label("MODERFROTA"), Some(Label::Investment));
    }

    #[test]
    fn either_and_unknown_programs_fall_through() {
        assert_eq!(forced_label("pronaf"), None);
        assert_eq!(forced_label("FUNCAFÉ"), None);
        assert_eq!(forced_label("14"), None);
        assert_eq!(forced_label("missing"), None);
        assert_eq!(forced_label("not-a-program"), None);

        assert!(is_known_program("Funcafé"));
        assert!(!is_known_program("not-a-program"));
    }

    #[test]
    fn table_keys_are_normalized_and_unique() {
        for (i, (code, _)) in PROGRAM_RULES.iter().enumerate() {
            assert_eq!(normalize_text(code), *code);
            assert!(PROGRAM_RULES[i + 1..].iter().all(|(other, _)| other != code));
        }
    }
}
