//! Kani proof harnesses for the two parsers.
//!
//! # Usage
//!
//! Kani is not a Cargo dependency. Install and run with:
//!
//! ```bash
//! cargo install --locked kani-verifier
//! cargo kani setup
//! cargo kani --features kani
//! ```
//!
//! This module is only compiled when using Kani (`#[cfg(kani)]`).

use crate::cursor::Cursor;
use crate::rfc3986::dec_octet;
use crate::{FieldError, Marker, UriField, parse_telephone, parse_uri};

/// Characters that exercise every branch of the URI grammar.
const URI_CHARS: &[u8] = b"a1:/?#[]@%.-+;=F";

/// Characters that exercise every branch of the telephone grammar.
const TEL_CHARS: &[u8] = b"tel:+1;=-.xa*";

/// Generate a string of up to `max` characters drawn from `alphabet`
fn arbitrary_text(alphabet: &[u8], max: usize) -> String {
    let len: usize = kani::any();
    let len = len % (max + 1);
    (0..len)
        .map(|_| {
            let idx: usize = kani::any();
            alphabet[idx % alphabet.len()] as char
        })
        .collect()
}

/// Proof: URI parsing never panics and a matched view ends at the input end
#[kani::proof]
#[kani::unwind(8)]
fn proof_parse_uri_total() {
    let text = arbitrary_text(URI_CHARS, 6);
    let uri = parse_uri(&text);
    if uri.is_match() {
        assert_eq!(uri.marker(Marker::End), Some(text.len()));
        assert!(uri.scheme().is_some());
        assert!(uri.path().is_some());
    }
}

/// Proof: markers of a matched URI are non-decreasing in input order
#[kani::proof]
#[kani::unwind(8)]
fn proof_markers_ordered() {
    let text = arbitrary_text(URI_CHARS, 6);
    let uri = parse_uri(&text);
    let mut last = 0;
    for marker in Marker::ALL {
        if let Some(position) = uri.marker(marker) {
            assert!(position >= last);
            last = position;
        }
    }
}

/// Proof: a too-small buffer reports exactly the field length
#[kani::proof]
#[kani::unwind(8)]
fn proof_length_and_copy_agree() {
    let text = arbitrary_text(URI_CHARS, 5);
    let uri = parse_uri(&text);
    let mut empty: [u8; 0] = [];
    match uri.get(UriField::Path, &mut empty) {
        Err(FieldError::BufferTooSmall { required }) => {
            assert_eq!(required, uri.len(UriField::Path));
        }
        Err(FieldError::Absent) => assert!(!uri.is_match()),
        Ok(_) => unreachable!("an empty buffer cannot hold a terminator"),
    }
}

/// Proof: telephone parsing never panics and respects the context rule
#[kani::proof]
#[kani::unwind(8)]
fn proof_parse_telephone_total() {
    let text = arbitrary_text(TEL_CHARS, 6);
    let tel = parse_telephone(&text);
    if tel.is_match() {
        assert!(text.starts_with("tel:"));
        assert_eq!(tel.local_number().is_some(), tel.phone_context().is_some());
    }
}

/// Proof: a three-digit dec-octet only matches in full when it is at most 255
#[kani::proof]
fn proof_dec_octet_range() {
    let digits: [u8; 3] = [
        b'0' + kani::any::<u8>() % 10,
        b'0' + kani::any::<u8>() % 10,
        b'0' + kani::any::<u8>() % 10,
    ];
    let text = String::from_utf8(digits.to_vec()).unwrap_or_default();
    let mut cursor = Cursor::new(&text);
    assert!(dec_octet(&mut cursor).is_some());

    let value = u32::from(digits[0] - b'0') * 100
        + u32::from(digits[1] - b'0') * 10
        + u32::from(digits[2] - b'0');
    let full = cursor.is_at_end();
    assert_eq!(full, digits[0] != b'0' && value <= 255);
}
