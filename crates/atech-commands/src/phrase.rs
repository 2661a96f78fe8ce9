//! Phrase Normalization
//!
//! Matching is case-insensitive and whitespace-normalized: Unicode
//! lowercasing, leading/trailing whitespace trimmed, internal runs collapsed
//! to a single ASCII space. Diacritics are preserved ("załóż" stays distinct
//! from "zaloz"); locale filtering carries the language distinction.

/// Normalize an utterance or registered phrase for exact matching
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(normalize("  Book   Appointment "), "book appointment");
        assert_eq!(normalize("Book\tAppointment\n"), "book appointment");
    }

    #[test]
    fn test_diacritics_preserved() {
        assert_eq!(normalize("Załóż Konto"), "załóż konto");
        assert_ne!(normalize("załóż"), normalize("zaloz"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize("   "), "");
    }
}
