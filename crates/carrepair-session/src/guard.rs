//! Local inspection of a stored bearer token.
//!
//! The guard answers "is this token locally decodable and not expired". It
//! never verifies the signature: the result is an expiry hint for the
//! client, never an authorization decision.
//!
//! Each check walks the same sequence:
//!
//! ```text
//! RawCheck → SegmentSplit → Base64Decode → ClaimParse → ExpiryCheck
//!    ↓            ↓              ↓              ↓             ↓
//! NotLoggedIn  Corrupted     Corrupted      Corrupted   Expired | Valid
//! ```

use crate::base64url;
use crate::limits::{MAX_DECODED_PAYLOAD_SIZE, MAX_TOKEN_LENGTH, MIN_TOKEN_LENGTH};
use serde_json::{Map, Value};
use std::fmt;

/// Decoded payload claims
pub type Claims = Map<String, Value>;

/// Characters whose presence marks a stored token (or its payload) as garbage
const FORBIDDEN_CHARS: [char; 2] = ['\u{0}', '\u{FF}'];
const FORBIDDEN_BYTES: [u8; 2] = [0x00, 0xFF];

/// Why a token was classified as corrupted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CorruptionReason {
    TooShort,
    TooLong,
    MissingSeparator,
    ForbiddenByte,
    MissingPayload,
    InvalidBase64,
    NotJson,
    InvalidUtf8,
    InvalidJson,
    InvalidExpiry,
}

impl CorruptionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorruptionReason::TooShort => "too_short",
            CorruptionReason::TooLong => "too_long",
            CorruptionReason::MissingSeparator => "missing_separator",
            CorruptionReason::ForbiddenByte => "forbidden_byte",
            CorruptionReason::MissingPayload => "missing_payload",
            CorruptionReason::InvalidBase64 => "invalid_base64",
            CorruptionReason::NotJson => "not_json",
            CorruptionReason::InvalidUtf8 => "invalid_utf8",
            CorruptionReason::InvalidJson => "invalid_json",
            CorruptionReason::InvalidExpiry => "invalid_exp",
        }
    }
}

impl fmt::Display for CorruptionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a token check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// No token stored
    NotLoggedIn,
    /// Token present but undecodable; the stored session must be purged
    Corrupted(CorruptionReason),
    /// `exp` is in the past; handled like corruption
    Expired,
    /// Decodable and not expired
    Valid,
}

impl TokenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenStatus::NotLoggedIn => "NOT_LOGGED_IN",
            TokenStatus::Corrupted(_) => "CORRUPTED",
            TokenStatus::Expired => "EXPIRED",
            TokenStatus::Valid => "VALID",
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, TokenStatus::Valid)
    }

    /// Statuses that require clearing the stored session
    pub fn requires_purge(&self) -> bool {
        matches!(self, TokenStatus::Corrupted(_) | TokenStatus::Expired)
    }

    pub fn corruption_reason(&self) -> Option<CorruptionReason> {
        match self {
            TokenStatus::Corrupted(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenStatus::Corrupted(reason) => write!(f, "CORRUPTED ({})", reason),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Check a token against the current clock
pub fn inspect(token: Option<&str>) -> TokenStatus {
    inspect_at(token, now_millis())
}

/// Check a token against `now_ms`
pub fn inspect_at(token: Option<&str>, now_ms: i64) -> TokenStatus {
    inspect_with_leeway(token, now_ms, 0)
}

/// Check a token against `now_ms`, accepting it until `exp + leeway_seconds`
pub fn inspect_with_leeway(token: Option<&str>, now_ms: i64, leeway_seconds: u64) -> TokenStatus {
    let Some(token) = token else {
        return TokenStatus::NotLoggedIn;
    };

    let status = match decode(token).and_then(|claims| expiration(&claims)) {
        Err(reason) => TokenStatus::Corrupted(reason),
        Ok(None) => TokenStatus::Valid,
        Ok(Some(exp)) => {
            let deadline_ms = (exp + leeway_seconds as f64) * 1000.0;
            if now_ms as f64 > deadline_ms {
                TokenStatus::Expired
            } else {
                TokenStatus::Valid
            }
        }
    };

    tracing::debug!(status = %status, "token inspected");
    status
}

/// True when the token passes every structural check (expiry not considered)
pub fn is_token_structurally_valid(token: &str) -> bool {
    decode(token).and_then(|claims| expiration(&claims)).is_ok()
}

/// Decode the payload claims, `None` for any structural failure
pub fn decode_claims(token: &str) -> Option<Claims> {
    decode(token).ok()
}

/// True when the token cannot be used: corrupted or past its `exp`
pub fn is_expired_or_corrupted(token: &str) -> bool {
    is_expired_or_corrupted_at(token, now_millis())
}

pub fn is_expired_or_corrupted_at(token: &str, now_ms: i64) -> bool {
    inspect_at(Some(token), now_ms).requires_purge()
}

/// The `exp` claim in seconds; `None` if the token carries no expiry
pub fn expiration(claims: &Claims) -> Result<Option<f64>, CorruptionReason> {
    match claims.get("exp") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or(CorruptionReason::InvalidExpiry),
        Some(_) => Err(CorruptionReason::InvalidExpiry),
    }
}

fn decode(token: &str) -> Result<Claims, CorruptionReason> {
    raw_check(token)?;

    let payload = token.split('.').nth(1).ok_or(CorruptionReason::MissingPayload)?;

    let bytes = base64url::decode_segment(payload, MAX_DECODED_PAYLOAD_SIZE)
        .map_err(|_| CorruptionReason::InvalidBase64)?;

    if bytes.first() != Some(&b'{') {
        return Err(CorruptionReason::NotJson);
    }
    if bytes.iter().any(|b| FORBIDDEN_BYTES.contains(b)) {
        return Err(CorruptionReason::ForbiddenByte);
    }

    let text = String::from_utf8(bytes).map_err(|_| CorruptionReason::InvalidUtf8)?;

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(claims)) => Ok(claims),
        Ok(_) | Err(_) => Err(CorruptionReason::InvalidJson),
    }
}

fn raw_check(token: &str) -> Result<(), CorruptionReason> {
    if token.len() < MIN_TOKEN_LENGTH {
        return Err(CorruptionReason::TooShort);
    }
    if token.len() > MAX_TOKEN_LENGTH {
        return Err(CorruptionReason::TooLong);
    }
    if !token.contains('.') {
        return Err(CorruptionReason::MissingSeparator);
    }
    if token.chars().any(|c| FORBIDDEN_CHARS.contains(&c)) {
        return Err(CorruptionReason::ForbiddenByte);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
    // {"exp":4102444800,"sub":"42"}
    const FUTURE_PAYLOAD: &str = "eyJleHAiOjQxMDI0NDQ4MDAsInN1YiI6IjQyIn0";
    // {"exp":1000000000}
    const PAST_PAYLOAD: &str = "eyJleHAiOjEwMDAwMDAwMDB9";

    // 2024-01-01T00:00:00Z
    const NOW_MS: i64 = 1_704_067_200_000;

    fn token(payload: &str) -> String {
        format!("{}.{}.signature", HEADER, payload)
    }

    #[test]
    fn test_absent_token() {
        assert_eq!(inspect_at(None, NOW_MS), TokenStatus::NotLoggedIn);
    }

    #[test]
    fn test_valid_token() {
        assert_eq!(inspect_at(Some(token(FUTURE_PAYLOAD).as_str()), NOW_MS), TokenStatus::Valid);
        assert!(is_token_structurally_valid(&token(FUTURE_PAYLOAD)));
    }

    #[test]
    fn test_expired_token() {
        let t = token(PAST_PAYLOAD);
        assert_eq!(inspect_at(Some(t.as_str()), NOW_MS), TokenStatus::Expired);
        assert!(is_expired_or_corrupted_at(&t, NOW_MS));
        // Structure is fine, only the clock rejects it
        assert!(is_token_structurally_valid(&t));
    }

    #[test]
    fn test_expiry_boundary() {
        // exp = 1_000_000_000 s; equal instant is still valid
        let t = token(PAST_PAYLOAD);
        assert_eq!(inspect_at(Some(t.as_str()), 1_000_000_000_000), TokenStatus::Valid);
        assert_eq!(inspect_at(Some(t.as_str()), 1_000_000_000_001), TokenStatus::Expired);
    }

    #[test]
    fn test_leeway() {
        let t = token(PAST_PAYLOAD);
        let now = 1_000_000_030_000;
        assert_eq!(inspect_with_leeway(Some(t.as_str()), now, 0), TokenStatus::Expired);
        assert_eq!(inspect_with_leeway(Some(t.as_str()), now, 60), TokenStatus::Valid);
    }

    #[test]
    fn test_raw_checks() {
        assert_eq!(
            inspect_at(Some("a.b"), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::TooShort)
        );
        assert_eq!(
            inspect_at(Some(""), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::TooShort)
        );
        assert_eq!(
            inspect_at(Some("not-a-real-token"), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::MissingSeparator)
        );
        let nul = format!("{}\0", token(FUTURE_PAYLOAD));
        assert_eq!(
            inspect_at(Some(nul.as_str()), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::ForbiddenByte)
        );
        let ff = format!("ÿ{}", token(FUTURE_PAYLOAD));
        assert_eq!(
            inspect_at(Some(ff.as_str()), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::ForbiddenByte)
        );
    }

    #[test]
    fn test_oversized_token() {
        let huge = format!("{}.{}", HEADER, "A".repeat(MAX_TOKEN_LENGTH));
        assert_eq!(
            inspect_at(Some(huge.as_str()), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::TooLong)
        );
    }

    #[test]
    fn test_two_segment_token_is_still_decoded() {
        let t = format!("{}.{}", HEADER, FUTURE_PAYLOAD);
        assert_eq!(inspect_at(Some(t.as_str()), NOW_MS), TokenStatus::Valid);
    }

    #[test]
    fn test_empty_payload() {
        let t = format!("{}..sig", HEADER);
        assert_eq!(
            inspect_at(Some(t.as_str()), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::NotJson)
        );
    }

    #[test]
    fn test_invalid_base64() {
        assert_eq!(
            inspect_at(Some(token("e!!!").as_str()), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::InvalidBase64)
        );
        assert_eq!(
            inspect_at(Some(token("eyJle").as_str()), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::InvalidBase64)
        );
    }

    #[test]
    fn test_payload_not_object() {
        // [1,2,3]
        assert_eq!(
            inspect_at(Some(token("WzEsMiwzXQ").as_str()), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::NotJson)
        );
        // {not json
        assert_eq!(
            inspect_at(Some(token("e25vdCBqc29u").as_str()), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::InvalidJson)
        );
    }

    #[test]
    fn test_forbidden_bytes_in_payload() {
        // {"exp":4102444800,"n":"\0"}
        assert_eq!(
            inspect_at(Some(token("eyJleHAiOjQxMDI0NDQ4MDAsIm4iOiIAIn0").as_str()), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::ForbiddenByte)
        );
        // {"n":"\xFF\xFE"}
        assert_eq!(
            inspect_at(Some(token("eyJuIjoi__4ifQ").as_str()), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::ForbiddenByte)
        );
    }

    #[test]
    fn test_exp_claim_variants() {
        // {"sub":"42"}: no expiry claim
        assert_eq!(inspect_at(Some(token("eyJzdWIiOiI0MiJ9").as_str()), NOW_MS), TokenStatus::Valid);
        // {"exp":"soon"}
        assert_eq!(
            inspect_at(Some(token("eyJleHAiOiJzb29uIn0").as_str()), NOW_MS),
            TokenStatus::Corrupted(CorruptionReason::InvalidExpiry)
        );
    }

    #[test]
    fn test_decode_claims() {
        let claims = decode_claims(&token(FUTURE_PAYLOAD)).unwrap();
        assert_eq!(claims.get("sub").and_then(Value::as_str), Some("42"));
        assert_eq!(expiration(&claims), Ok(Some(4_102_444_800.0)));
        assert!(decode_claims("not-a-real-token").is_none());
    }

    #[test]
    fn test_structural_validity() {
        assert!(is_token_structurally_valid(&token(FUTURE_PAYLOAD)));
        // expiry is not a structural concern
        assert!(is_token_structurally_valid(&token(PAST_PAYLOAD)));
        assert!(!is_token_structurally_valid("not-a-real-token"));
        assert!(!is_token_structurally_valid(""));
        assert!(!is_token_structurally_valid(&token("bm90IGpzb24")));
    }

    #[test]
    fn test_expired_or_corrupted_against_clock() {
        assert!(!is_expired_or_corrupted(&token(FUTURE_PAYLOAD)));
        assert!(is_expired_or_corrupted(&token(PAST_PAYLOAD)));
        assert!(is_expired_or_corrupted("not-a-real-token"));
    }

    #[test]
    fn test_noncanonical_payload_encoding_is_valid() {
        assert_eq!(inspect_at(Some(token("eyJhIjoxfQ").as_str()), NOW_MS), TokenStatus::Valid);
        assert_eq!(inspect_at(Some(token("eyJhIjoxfR").as_str()), NOW_MS), TokenStatus::Valid);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(TokenStatus::Valid.to_string(), "VALID");
        assert_eq!(
            TokenStatus::Corrupted(CorruptionReason::NotJson).to_string(),
            "CORRUPTED (not_json)"
        );
        assert!(TokenStatus::Expired.requires_purge());
        assert!(!TokenStatus::NotLoggedIn.requires_purge());
    }
}
