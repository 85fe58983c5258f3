use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use engine_logging::{engine_debug, engine_warn};

/// Legacy encodings tried after strict UTF-8, in order.
pub const DEFAULT_FALLBACK_ENCODINGS: [&str; 2] = ["GBK", "GB18030"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding_label: String,
}

/// One attempt at turning bytes into text. `None` passes to the next attempt.
pub trait DecodeStrategy: Send + Sync {
    fn label(&self) -> &str;
    fn decode(&self, bytes: &[u8]) -> Option<String>;
}

/// UTF-8 that rejects any malformed sequence. A leading BOM is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictUtf8;

impl DecodeStrategy for StrictUtf8 {
    fn label(&self) -> &str {
        "UTF-8"
    }

    fn decode(&self, bytes: &[u8]) -> Option<String> {
        UTF_8
            .decode_without_bom_handling_and_without_replacement(strip_utf8_bom(bytes))
            .map(Cow::into_owned)
    }
}

/// A legacy encoding that substitutes U+FFFD for malformed input instead of failing.
#[derive(Debug, Clone, Copy)]
pub struct Permissive {
    encoding: &'static Encoding,
}

impl Permissive {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(Self::new)
    }
}

impl DecodeStrategy for Permissive {
    fn label(&self) -> &str {
        self.encoding.name()
    }

    fn decode(&self, bytes: &[u8]) -> Option<String> {
        let (text, had_errors) = self.encoding.decode_without_bom_handling(bytes);
        if had_errors {
            engine_debug!("{} decode substituted malformed sequences", self.encoding.name());
        }
        Some(text.into_owned())
    }
}

/// Last resort: lossy UTF-8 over the raw bytes. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct Latin1Widening;

impl DecodeStrategy for Latin1Widening {
    fn label(&self) -> &str {
        "latin1-widening"
    }

    fn decode(&self, bytes: &[u8]) -> Option<String> {
        Some(widen_and_rebuild(bytes))
    }
}

// Widening bytes to U+0000..U+00FF code units and narrowing them back is the
// identity, so only the lossy rebuild remains.
fn widen_and_rebuild(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn strip_utf8_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

/// Ordered decode attempts; the first strategy that yields text wins.
pub struct CharsetChain {
    strategies: Vec<Box<dyn DecodeStrategy>>,
}

impl Default for CharsetChain {
    fn default() -> Self {
        Self::from_labels(&DEFAULT_FALLBACK_ENCODINGS)
    }
}

impl CharsetChain {
    /// Strict UTF-8, then one permissive strategy per known label, then
    /// [`Latin1Widening`]. Unknown labels are skipped.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut strategies: Vec<Box<dyn DecodeStrategy>> = vec![Box::new(StrictUtf8)];
        for label in labels {
            match Permissive::for_label(label.as_ref()) {
                Some(strategy) => strategies.push(Box::new(strategy)),
                None => engine_warn!("Unknown fallback encoding label {:?}; skipped", label.as_ref()),
            }
        }
        strategies.push(Box::new(Latin1Widening));
        Self { strategies }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.label()).collect()
    }

    pub fn decode(&self, bytes: &[u8]) -> DecodedText {
        for strategy in &self.strategies {
            if let Some(text) = strategy.decode(bytes) {
                engine_debug!("Decoded {} bytes as {}", bytes.len(), strategy.label());
                return DecodedText {
                    text,
                    encoding_label: strategy.label().to_string(),
                };
            }
        }
        DecodedText {
            text: widen_and_rebuild(bytes),
            encoding_label: Latin1Widening.label().to_string(),
        }
    }
}

/// Decode an HTTP response body: `Content-Type` charset when it names a known
/// encoding, otherwise UTF-8 with BOM sniffing and replacement.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(extract_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        engine_warn!("Response body had malformed {} sequences", used.name());
    }
    text.into_owned()
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim().trim_matches(['"', '\''].as_ref()).to_string())
        })
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // "你好" in GBK; not valid UTF-8.
    const GBK_NIHAO: &[u8] = b"\xC4\xE3\xBA\xC3";

    #[test]
    fn valid_utf8_is_returned_verbatim() {
        let chain = CharsetChain::default();
        for text in ["", "Hello", "# 标题\n\n正文 — ok", "emoji 🚀"] {
            let decoded = chain.decode(text.as_bytes());
            assert_eq!(decoded.text, text);
            assert_eq!(decoded.encoding_label, "UTF-8");
        }
    }

    #[test]
    fn leading_bom_is_dropped_from_utf8_text() {
        let decoded = CharsetChain::default().decode("\u{FEFF}# Hi".as_bytes());
        assert_eq!(decoded.text, "# Hi");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn invalid_utf8_falls_back_to_gbk() {
        let decoded = CharsetChain::default().decode(GBK_NIHAO);
        assert_eq!(decoded.text, "你好");
        assert_eq!(decoded.encoding_label, "GBK");
    }

    #[test]
    fn strict_utf8_rejects_malformed_bytes() {
        assert_eq!(StrictUtf8.decode(GBK_NIHAO), None);
        assert_eq!(StrictUtf8.decode(b"\xEF\xBB\xBFhi").as_deref(), Some("hi"));
    }

    #[test]
    fn unknown_labels_are_skipped() {
        let chain = CharsetChain::from_labels(&["no-such-encoding", "gb18030"]);
        assert_eq!(chain.labels(), vec!["UTF-8", "gb18030", "latin1-widening"]);
    }

    #[test]
    fn chain_without_legacy_encodings_uses_widening() {
        let chain = CharsetChain::from_labels::<&str>(&[]);
        let decoded = chain.decode(b"caf\xe9 ok");
        assert_eq!(decoded.encoding_label, "latin1-widening");
        assert!(decoded.text.starts_with("caf"));
        assert!(decoded.text.ends_with(" ok"));
    }

    #[test]
    fn widening_never_fails_on_malformed_text() {
        let text = Latin1Widening.decode(b"abc\xff\xfe def").unwrap();
        assert!(text.starts_with("abc"));
        assert!(text.ends_with(" def"));
    }

    #[test]
    fn widening_replaces_each_malformed_byte() {
        let text = Latin1Widening.decode(b"caf\xe9").unwrap();
        assert_eq!(text, "caf\u{FFFD}");
    }

    #[test]
    fn body_uses_content_type_charset() {
        assert_eq!(decode_body(b"caf\xe9", Some("text/plain; charset=ISO-8859-1")), "café");
        assert_eq!(decode_body(GBK_NIHAO, Some("text/markdown; Charset=\"gbk\"")), "你好");
    }

    #[test]
    fn body_defaults_to_utf8() {
        assert_eq!(decode_body("héllo".as_bytes(), Some("text/markdown")), "héllo");
        assert_eq!(decode_body(b"\xEF\xBB\xBFhello", None), "hello");
    }
}
