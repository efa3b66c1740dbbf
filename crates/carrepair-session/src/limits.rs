//! Size limits applied before any decoding

/// Anything shorter cannot hold three segments with a JSON payload
pub(crate) const MIN_TOKEN_LENGTH: usize = 10;

/// Maximum length for a stored token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for the decoded payload JSON (48KB, 3/4 of the token limit)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 48 * 1024;
