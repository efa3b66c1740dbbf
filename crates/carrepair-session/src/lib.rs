//! CarRepair Session: local token guard and persisted auth session
//!
//! Decodes the payload of the stored bearer token (without verifying the
//! signature) to tell whether it is still usable, and purges the stored
//! session whenever it is corrupted or expired. Callers only ever see a
//! boolean "logged in" answer; decode failures never escape this crate.
//!
//! # Example
//!
//! ```ignore
//! use carrepair_session::{AuthSession, MemoryStore};
//!
//! let session = AuthSession::with_defaults(MemoryStore::new());
//! if let Some(header) = session.authorization_header().await {
//!     request.header("Authorization", header);
//! } else {
//!     // please log in again
//! }
//! ```

mod base64url;
mod limits;

pub mod error;
pub mod guard;
pub mod session;
pub mod storage;

pub use error::{Result, SessionError};
pub use guard::{
    decode_claims, expiration, inspect, inspect_at, inspect_with_leeway, is_expired_or_corrupted,
    is_expired_or_corrupted_at, is_token_structurally_valid, Claims, CorruptionReason,
    TokenStatus,
};
pub use session::{AuthSession, NewSession, UserProfile};
pub use storage::{clear_stored_session, MemoryStore, SessionStore};
