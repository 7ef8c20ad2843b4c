//! Character predicates over the Devanagari block, at the granularity the
//! matcher needs: combining marks, vowel signs, and the vowel-bucket fold.
//! Everything else (consonants, numerals, avagraha) passes through untouched.

/// The five combining-mark classes removed by mark stripping: candrabindu
/// (both forms), anusvara, visarga, nukta, virama.
pub fn is_combining_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0900}' | '\u{0901}' | '\u{0902}' | '\u{0903}' | '\u{093C}' | '\u{094D}'
    )
}

/// A dependent vowel sign (matra).
pub fn is_matra(c: char) -> bool {
    matches!(
        c,
        '\u{093A}'..='\u{093B}'
            | '\u{093E}'..='\u{094C}'
            | '\u{094E}'..='\u{094F}'
            | '\u{0955}'..='\u{0957}'
            | '\u{0962}'..='\u{0963}'
    )
}

/// Fold an independent vowel or matra into its 7-symbol bucket
/// `{A,I,U,E,O,R,L}`. Returns `None` for anything that is not a vowel.
///
/// The bucket symbol is the ASCII letter itself; the folded forms are index
/// key material only and are never shown to a user.
pub fn vowel_bucket(c: char) -> Option<char> {
    let bucket = match c {
        // A: अ आ ऍ ऑ and their signs
        'अ' | 'आ' | 'ऍ' | 'ऑ' | 'ा' | 'ॉ' | 'ॅ' => 'A',
        // I: इ ई ि ी
        'इ' | 'ई' | 'ि' | 'ी' => 'I',
        // U: उ ऊ ु ू
        'उ' | 'ऊ' | 'ु' | 'ू' => 'U',
        // E: ए ऐ ऎ े ै ॆ
        'ए' | 'ऐ' | 'ऎ' | 'े' | 'ै' | 'ॆ' => 'E',
        // O: ओ औ ऒ ो ौ ॊ
        'ओ' | 'औ' | 'ऒ' | 'ो' | 'ौ' | 'ॊ' => 'O',
        // R: vocalic r, both lengths
        'ऋ' | 'ॠ' | 'ृ' | 'ॄ' => 'R',
        // L: vocalic l, both lengths
        'ऌ' | 'ॡ' | 'ॢ' | 'ॣ' => 'L',
        _ => return None,
    };
    Some(bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combining_marks() {
        for c in ['ँ', 'ं', 'ः', '़', '्'] {
            assert!(is_combining_mark(c), "expected mark: {c}");
        }
        assert!(is_combining_mark('\u{0900}'));
        assert!(!is_combining_mark('क'));
        assert!(!is_combining_mark('ा'));
    }

    #[test]
    fn matras_are_not_marks() {
        for m in ['ा', 'ि', 'ी', 'ु', 'ू', 'ृ', 'े', 'ै', 'ो', 'ौ'] {
            assert!(is_matra(m), "expected matra: {m}");
            assert!(!is_combining_mark(m));
        }
    }

    #[test]
    fn bucket_pairs_vowel_and_sign() {
        assert_eq!(vowel_bucket('आ'), Some('A'));
        assert_eq!(vowel_bucket('ा'), Some('A'));
        assert_eq!(vowel_bucket('इ'), Some('I'));
        assert_eq!(vowel_bucket('ी'), Some('I'));
        assert_eq!(vowel_bucket('उ'), Some('U'));
        assert_eq!(vowel_bucket('ू'), Some('U'));
        assert_eq!(vowel_bucket('ए'), Some('E'));
        assert_eq!(vowel_bucket('ै'), Some('E'));
        assert_eq!(vowel_bucket('ओ'), Some('O'));
        assert_eq!(vowel_bucket('ौ'), Some('O'));
        assert_eq!(vowel_bucket('ऋ'), Some('R'));
        assert_eq!(vowel_bucket('ॢ'), Some('L'));
        assert_eq!(vowel_bucket('क'), None);
        assert_eq!(vowel_bucket('x'), None);
    }
}
