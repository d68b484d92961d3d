//! Value alphabets for the supported square bases.

/// Character set for each supported base, indexed by value.
pub fn alphabet(base: usize) -> Option<&'static str> {
    match base {
        4 => Some("1234"),
        9 => Some("123456789"),
        16 => Some("0123456789abcdef"),
        25 => Some("abcdefghijklmnopqrstuvwxy"),
        36 => Some("abcdefghijklmnopqrstuvwxyz0123456789"),
        49 => Some("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvw"),
        64 => Some("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/"),
        _ => None,
    }
}

pub fn is_supported(base: usize) -> bool {
    alphabet(base).is_some()
}

/// The character rendering `value` in a grid of the given base.
///
/// Panics when the base is unsupported or the value is out of range; both
/// are caller errors.
pub fn value_to_char(base: usize, value: u8) -> char {
    let letters = alphabet(base).unwrap_or_else(|| panic!("unsupported base {base}"));
    letters.as_bytes()[value as usize] as char
}

/// The value denoted by `ch`, or `None` when `ch` is not in the base's
/// alphabet.
pub fn char_to_value(base: usize, ch: char) -> Option<u8> {
    alphabet(base)?.find(ch).map(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabets_match_their_base() {
        for base in [4, 9, 16, 25, 36, 49, 64] {
            assert_eq!(alphabet(base).unwrap().len(), base, "base {base}");
        }
        assert!(alphabet(10).is_none());
        assert!(!is_supported(81));
    }

    #[test]
    fn char_value_roundtrip() {
        for base in [4usize, 9, 16, 25, 36, 49, 64] {
            for value in 0..base as u8 {
                let ch = value_to_char(base, value);
                assert_eq!(char_to_value(base, ch), Some(value));
            }
        }
    }

    #[test]
    fn invalid_characters_rejected() {
        assert_eq!(char_to_value(4, '5'), None);
        assert_eq!(char_to_value(9, '0'), None);
        assert_eq!(char_to_value(16, 'g'), None);
    }
}
