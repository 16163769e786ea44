//! Coptic to Latin transliteration
//!
//! Renderers optionally show a Latin reading next to each Coptic form. The
//! mapping is letter by letter; characters outside the Coptic alphabet
//! (punctuation, combining strokes, Latin text) pass through unchanged.

/// Returns the Latin rendering of a lowercase Coptic letter.
fn latin_for(letter: char) -> Option<&'static str> {
    let latin = match letter {
        'ⲁ' => "a",
        'ⲃ' => "b",
        'ⲅ' => "g",
        'ⲇ' => "d",
        'ⲉ' => "e",
        'ⲍ' => "z",
        'ⲏ' => "h",
        'ⲑ' => "th",
        'ⲓ' => "i",
        'ⲕ' => "k",
        'ⲗ' => "l",
        'ⲙ' => "m",
        'ⲛ' => "n",
        'ⲝ' => "x",
        'ⲟ' => "o",
        'ⲡ' => "p",
        'ⲣ' => "r",
        'ⲥ' => "s",
        'ⲧ' => "t",
        'ⲩ' => "u",
        'ⲫ' => "f",
        'ⲭ' => "ch",
        'ⲯ' => "ps",
        'ⲱ' => "w",
        'ϣ' => "sh",
        'ϥ' => "f",
        'ϧ' => "q",
        'ϩ' => "h",
        'ϫ' => "j",
        'ϭ' => "c",
        'ϯ' => "ti",
        _ => return None,
    };
    Some(latin)
}

/// Transliterates Coptic text into Latin letters.
///
/// Capital Coptic letters produce a capitalized Latin rendering.
///
/// # Examples
///
/// ```
/// use coptree_core::translit::transliterate;
///
/// assert_eq!(transliterate("ⲁⲛⲟⲕ ⲡⲉ"), "anok pe");
/// assert_eq!(transliterate("ⲡⲛⲟⲩⲧⲉ"), "pnoute");
/// assert_eq!(transliterate("Ϣⲏⲣⲉ"), "Shhre");
/// ```
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let mut lower = ch.to_lowercase();
        let mapped = match (lower.next(), lower.next()) {
            (Some(single), None) => latin_for(single),
            _ => None,
        };
        match mapped {
            Some(latin) if ch.is_uppercase() => {
                let mut letters = latin.chars();
                if let Some(first) = letters.next() {
                    out.extend(first.to_uppercase());
                    out.push_str(letters.as_str());
                }
            }
            Some(latin) => out.push_str(latin),
            None => out.push(ch),
        }
    }
    out
}

/// Returns `true` if the text contains at least one Coptic letter.
pub fn contains_coptic(text: &str) -> bool {
    text.chars()
        .flat_map(char::to_lowercase)
        .any(|c| latin_for(c).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transliterate_basic_words() {
        assert_eq!(transliterate("ⲁⲛⲟⲕ"), "anok");
        assert_eq!(transliterate("ⲡⲉ"), "pe");
        assert_eq!(transliterate("ⲛⲟⲩⲧⲉ"), "noute");
    }

    #[test]
    fn test_transliterate_digraph_letters() {
        assert_eq!(transliterate("ϣ"), "sh");
        assert_eq!(transliterate("ⲑ"), "th");
        assert_eq!(transliterate("ϯ"), "ti");
        assert_eq!(transliterate("ⲯⲩⲭⲏ"), "psuchh");
    }

    #[test]
    fn test_transliterate_uppercase() {
        assert_eq!(transliterate("Ⲁⲛⲟⲕ"), "Anok");
        assert_eq!(transliterate("Ⲑ"), "Th");
    }

    #[test]
    fn test_transliterate_passes_through_unknown() {
        assert_eq!(transliterate("ⲁ. b!"), "a. b!");
        assert_eq!(transliterate(""), "");
    }

    #[test]
    fn test_contains_coptic() {
        assert!(contains_coptic("abc ⲁ"));
        assert!(contains_coptic("Ϣ"));
        assert!(!contains_coptic("anok pe"));
    }
}
