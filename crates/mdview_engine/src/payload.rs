use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

/// Standard alphabet, canonical padding, lenient about non-zero trailing bits.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Normalize a base64 parameter before decoding.
///
/// Steps, in order: trim, spaces back to `+` (form decoding turned them into
/// spaces), URL-safe alphabet to standard, drop CR/LF/tab, pad with `=` to a
/// multiple of four.
pub fn normalize_base64(raw: &str) -> String {
    let mut normalized: String = raw
        .trim()
        .chars()
        .map(|c| if c == ' ' { '+' } else { c })
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
        .collect();
    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }
    normalized
}

/// Normalize then decode to raw bytes. Text decoding is a separate step.
pub fn decode_base64(raw: &str) -> Result<Vec<u8>, DecodeError> {
    let normalized = normalize_base64(raw);
    Ok(PAYLOAD_ENGINE.decode(normalized.as_bytes())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_input_is_unchanged() {
        for input in ["SGVsbG8=", "SGk=", "YWJj", "", "+/+/"] {
            assert_eq!(normalize_base64(input), input);
            assert_eq!(normalize_base64(&normalize_base64(input)), input);
        }
    }

    #[test]
    fn spaces_become_plus() {
        assert_eq!(normalize_base64("ab c d e"), "ab+c+d+e");
        // Seven characters after conversion, so one pad is appended.
        assert_eq!(normalize_base64("a b c d"), "a+b+c+d=");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_not_converted() {
        assert_eq!(normalize_base64("  SGk=  "), "SGk=");
    }

    #[test]
    fn url_safe_alphabet_is_mapped() {
        assert_eq!(normalize_base64("-_-_"), "+/+/");
    }

    #[test]
    fn embedded_line_breaks_are_removed() {
        assert_eq!(normalize_base64("SGVs\r\nbG8\t="), "SGVsbG8=");
    }

    #[test]
    fn missing_padding_is_added() {
        assert_eq!(normalize_base64("SGVsbG8"), "SGVsbG8=");
        assert_eq!(normalize_base64("SGk"), "SGk=");
        assert_eq!(normalize_base64("SG"), "SG==");
    }

    #[test]
    fn decodes_hello() {
        assert_eq!(decode_base64("SGVsbG8=").unwrap(), b"Hello");
        assert_eq!(decode_base64("SGVsbG8").unwrap(), b"Hello");
    }

    #[test]
    fn decodes_url_safe_payload_with_plus_turned_space() {
        // "??>" encodes to "Pz8+" in the standard alphabet.
        assert_eq!(decode_base64("Pz8-").unwrap(), b"??>");
        assert_eq!(decode_base64("Pz8 Pz8_").unwrap(), b"??>???");
    }

    #[test]
    fn malformed_alphabet_is_an_error() {
        assert!(matches!(decode_base64("SGV*bG8="), Err(DecodeError::Base64(_))));
    }

    #[test]
    fn impossible_length_is_an_error() {
        assert!(decode_base64("SGVsb").is_err());
    }
}
