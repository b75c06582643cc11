//! Reversible text obfuscation for archive files.
//!
//! `pack` percent-encodes the text (URI-component rules), XORs the bytes with
//! a repeating 8-byte key and base64-encodes the result. This only deters
//! casual editing of exported files; it is not encryption and offers no
//! confidentiality or integrity. The key and byte layout must stay
//! bit-exact so archives written by earlier releases keep loading.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// The repeating XOR key ("Temporal").
pub const CIPHER_KEY: [u8; 8] = [0x54, 0x65, 0x6D, 0x70, 0x6F, 0x72, 0x61, 0x6C];

/// Bytes left unescaped by URI-component encoding.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Standard alphabet; padding optional on decode.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn scramble(bytes: &mut [u8]) {
    for (i, b) in bytes.iter_mut().enumerate() {
        *b ^= CIPHER_KEY[i % CIPHER_KEY.len()];
    }
}

/// Obfuscate `text` for an archive file.
pub fn pack(text: &str) -> String {
    let mut bytes = utf8_percent_encode(text, URI_COMPONENT)
        .to_string()
        .into_bytes();
    scramble(&mut bytes);
    BASE64.encode(bytes)
}

/// Percent-decode with URI-component strictness: every `%` must start a
/// two-digit hex escape and the result must be valid UTF-8.
fn decode_uri_component(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    percent_decode_str(s)
        .decode_utf8()
        .ok()
        .map(|cow| cow.into_owned())
}

/// Reverse [`pack`].
///
/// Whitespace anywhere in the input is ignored. The percent-decoded reading
/// is tried first, then the raw one used by an older variant. Returns an
/// empty string when neither yields text.
pub fn unpack(input: &str) -> String {
    let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return String::new();
    }
    let Ok(mut bytes) = BASE64.decode(cleaned.as_bytes()) else {
        return String::new();
    };
    scramble(&mut bytes);
    let text = String::from_utf8_lossy(&bytes);

    if let Some(decoded) = decode_uri_component(&text).filter(|d| !d.is_empty()) {
        return decoded;
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_unicode_and_json() {
        for text in [
            "hello",
            r#"{"version":15,"registry":[],"slots":{}}"#,
            "Stone Age «ÿ» 🔥 100%",
            "spaces and\nnewlines\t",
        ] {
            assert_eq!(unpack(&pack(text)), text);
        }
    }

    #[test]
    fn encodes_like_uri_component() {
        // "a b" -> "a%20b" before scrambling.
        let mut expected = b"a%20b".to_vec();
        scramble(&mut expected);
        assert_eq!(pack("a b"), BASE64.encode(expected));

        let mut kept = b"-_.!~*'()".to_vec();
        scramble(&mut kept);
        assert_eq!(pack("-_.!~*'()"), BASE64.encode(kept));
    }

    #[test]
    fn tolerates_whitespace_in_input() {
        let packed = pack(r#"{"a":1}"#);
        let (head, tail) = packed.split_at(4);
        let noisy = format!("  {head}\n\r\n{tail}  \n");
        assert_eq!(unpack(&noisy), r#"{"a":1}"#);
    }

    #[test]
    fn falls_back_to_raw_variant() {
        // Raw text with a stray '%' is not valid percent-encoding.
        let raw = r#"{"progress":"50%"}"#;
        let mut bytes = raw.as_bytes().to_vec();
        scramble(&mut bytes);
        let legacy = BASE64.encode(bytes);
        assert_eq!(unpack(&legacy), raw);
    }

    #[test]
    fn garbage_yields_empty_string() {
        assert_eq!(unpack(""), "");
        assert_eq!(unpack("   \n"), "");
        assert_eq!(unpack("not base64 at all!!"), "");
    }

    #[test]
    fn strict_uri_decoding() {
        assert_eq!(decode_uri_component("a%20b").as_deref(), Some("a b"));
        assert_eq!(decode_uri_component("100%"), None);
        assert_eq!(decode_uri_component("%zz"), None);
        assert_eq!(decode_uri_component("%FF"), None);
    }
}
