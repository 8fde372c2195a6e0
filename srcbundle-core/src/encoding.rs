//! Encoding detection and lossy decoding of candidate files.
//!
//! Detection is layered: a byte order mark wins outright, valid UTF-8 is taken as
//! UTF-8, and anything else goes to `chardetng`'s statistical guesser. Decoding
//! never fails on malformed input; bad sequences become U+FFFD.

use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::contract::{DecodedText, Detection, EncodingDetector};

/// Label used whenever detection has nothing confident to offer.
pub const DEFAULT_ENCODING_LABEL: &str = "utf-8";

const GUESS_CONFIDENT: f32 = 0.6;
const GUESS_UNSURE: f32 = 0.1;

/// Default detector: BOM sniffing, UTF-8 validation, then `chardetng`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SniffingDetector;

impl SniffingDetector {
    pub fn new() -> Self {
        Self
    }
}

impl EncodingDetector for SniffingDetector {
    fn detect(&self, bytes: &[u8]) -> Detection {
        if bytes.is_empty() {
            return Detection::unknown();
        }
        if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
            return Detection::certain(encoding);
        }
        if bytes.is_ascii() {
            return Detection::certain(UTF_8);
        }
        if std::str::from_utf8(bytes).is_ok() {
            return Detection {
                encoding: Some(UTF_8),
                confidence: 0.99,
            };
        }

        let mut guesser = chardetng::EncodingDetector::new();
        guesser.feed(bytes, true);
        let (encoding, confident) = guesser.guess_assess(None, true);
        Detection {
            encoding: Some(encoding),
            confidence: if confident { GUESS_CONFIDENT } else { GUESS_UNSURE },
        }
    }
}

/// Picks the encoding to decode with, falling back to UTF-8 when detection
/// produced nothing or is less confident than `min_confidence`.
pub fn resolve_encoding(detection: Detection, min_confidence: f32) -> &'static Encoding {
    match detection.encoding {
        Some(encoding) if detection.confidence >= min_confidence => encoding,
        _ => default_encoding(),
    }
}

fn default_encoding() -> &'static Encoding {
    Encoding::for_label(DEFAULT_ENCODING_LABEL.as_bytes()).unwrap_or(UTF_8)
}

/// Reads the file and reports the encoding it would be decoded with.
pub fn detect_encoding<D: EncodingDetector + ?Sized>(
    path: &Path,
    detector: &D,
    min_confidence: f32,
) -> io::Result<&'static Encoding> {
    let bytes = fs::read(path)?;
    Ok(resolve_encoding(detector.detect(&bytes), min_confidence))
}

/// Decodes bytes with `encoding`, replacing malformed sequences.
/// A byte order mark overrides `encoding` and is stripped.
pub fn decode_lossy(bytes: &[u8], encoding: &'static Encoding) -> (String, &'static Encoding, bool) {
    let (text, used, had_errors) = encoding.decode(bytes);
    (text.into_owned(), used, had_errors)
}

/// Reads, detects and decodes one file. Only I/O errors fail.
pub fn read_text<D: EncodingDetector + ?Sized>(
    path: &Path,
    detector: &D,
    min_confidence: f32,
) -> io::Result<DecodedText> {
    let bytes = fs::read(path)?;
    let detection = detector.detect(&bytes);
    let encoding = resolve_encoding(detection, min_confidence);
    let (text, used, had_replacements) = decode_lossy(&bytes, encoding);

    debug!(
        path = %path.display(),
        detected = detection.encoding.map(|e| e.name()).unwrap_or("none"),
        confidence = detection.confidence,
        encoding = used.name(),
        had_replacements,
        "Decoded file"
    );

    Ok(DecodedText {
        path: path.to_path_buf(),
        encoding: used.name(),
        text,
        had_replacements,
    })
}
