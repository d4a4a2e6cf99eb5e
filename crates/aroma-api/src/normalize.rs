//! Text normalization for accent-insensitive matching.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Normalize text for comparison: strip diacritics, lowercase, collapse whitespace.
///
/// Decomposes to NFD and drops combining marks, so "ansiédade" and "ansiedade"
/// compare equal. Portuguese input makes this a functional requirement, not a
/// nicety.
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics() {
        assert_eq!(normalize("ansiédade"), "ansiedade");
        assert_eq!(normalize("café"), "cafe");
        assert_eq!(normalize("coração"), "coracao");
    }

    #[test]
    fn lowercases() {
        assert_eq!(normalize("ANSIEDADE"), "ansiedade");
        assert_eq!(normalize("Insônia"), "insonia");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  dor   de \t cabeça "), "dor de cabeca");
    }

    #[test]
    fn plain_ascii_is_untouched() {
        assert_eq!(normalize("lavanda"), "lavanda");
    }
}
