//! Response-body decoding honoring the server's declared charset.
//!
//! The oldest portals serve ISO-8859-1 (and say so); decoding their bodies
//! as UTF-8 mangles every accented character. The declared label always
//! wins over the UTF-8 default.

use encoding_rs::Encoding;

/// Decode a response body using the charset declared in its Content-Type,
/// falling back to lossy UTF-8 when no (known) charset was declared.
pub fn decode_body(body: &[u8], declared_charset: Option<&str>) -> String {
    if let Some(label) = declared_charset {
        if let Some(encoding) = Encoding::for_label(label.trim().as_bytes()) {
            let (text, _, _) = encoding.decode(body);
            return text.into_owned();
        }
    }
    String::from_utf8_lossy(body).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_declared_charset_decodes_accents() {
        // "género" in ISO-8859-1: é is the single byte 0xE9
        let body = b"identidad de g\xe9nero";
        let text = decode_body(body, Some("iso-8859-1"));
        assert_eq!(text, "identidad de género");
        assert!(!text.contains('\u{FFFD}'));
    }

    #[test]
    fn windows_1252_label_is_accepted() {
        let body = b"T\xedtulo";
        assert_eq!(decode_body(body, Some("windows-1252")), "Título");
    }

    #[test]
    fn utf8_body_without_charset_passes_through() {
        let body = "orientación sexual".as_bytes();
        assert_eq!(decode_body(body, None), "orientación sexual");
    }

    #[test]
    fn unknown_label_falls_back_to_utf8() {
        let body = "unión civil".as_bytes();
        assert_eq!(decode_body(body, Some("x-no-such-charset")), "unión civil");
    }
}
