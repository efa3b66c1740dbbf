//! Base64 decoding of token segments
//!
//! Token segments use the URL-safe alphabet without padding. They are
//! mapped back onto the standard alphabet (`-` → `+`, `_` → `/`) and padded
//! with `=` to a multiple of four before decoding, so segments that were
//! stored with standard characters or with padding decode the same way.
//! Non-zero bits left over in the last character are ignored.

use crate::error::{Result, SessionError};
use base64::{
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode a token segment to bytes, rejecting output larger than `max_size`
pub(crate) fn decode_segment(segment: &str, max_size: usize) -> Result<Vec<u8>> {
    let mut normalized: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();

    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }

    let bytes = SEGMENT_ENGINE
        .decode(normalized.as_bytes())
        .map_err(|e| SessionError::InvalidBase64(format!("segment decode failed: {e}")))?;

    if bytes.len() > max_size {
        return Err(SessionError::InvalidBase64(format!(
            "Decoded size exceeds limit: {} bytes (max: {})",
            bytes.len(),
            max_size
        )));
    }

    Ok(bytes)
}
