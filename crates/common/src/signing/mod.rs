//! HMAC-SHA256 signing for API requests and playback URLs.
//!
//! Two independent schemes share the same primitive:
//!  - [`message`]: the `(msg, sig)` pair attached to every API call. `msg` is
//!    base64(zlib(json(body + `_owner` + `_timestamp`))) and `sig` is the hex
//!    HMAC of the base64 text itself.
//!  - [`playback`]: a query string in a fixed parameter order with the hex
//!    HMAC of everything before it appended as the final `sig` parameter.

pub mod message;
pub mod playback;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::SignError;

pub use message::{MessageSigner, SignedMessage};
pub use playback::{verify_playback_query, PlaybackClaims, PlaybackSigner, PLAYBACK_TTL_SECS};

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 of `data` under `key`.
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> Result<String, SignError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| SignError::Encoding(format!("invalid HMAC key: {}", e)))?;
    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a hex signature against `data` in constant time.
pub fn verify_hmac_sha256_hex(key: &[u8], data: &[u8], signature: &str) -> Result<(), SignError> {
    let expected = hex::decode(signature).map_err(|_| SignError::SignatureMismatch)?;
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| SignError::Encoding(format!("invalid HMAC key: {}", e)))?;
    mac.update(data);
    mac.verify_slice(&expected)
        .map_err(|_| SignError::SignatureMismatch)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_hmac_matches_rfc4231_case_2() {
        let sig = hmac_sha256_hex(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(
            sig,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_verify_round_trip_and_mismatch() {
        let sig = hmac_sha256_hex(b"k", b"payload").unwrap();
        assert!(verify_hmac_sha256_hex(b"k", b"payload", &sig).is_ok());
        assert!(matches!(
            verify_hmac_sha256_hex(b"k", b"payloae", &sig),
            Err(SignError::SignatureMismatch)
        ));
        assert!(matches!(
            verify_hmac_sha256_hex(b"other", b"payload", &sig),
            Err(SignError::SignatureMismatch)
        ));
        assert!(matches!(
            verify_hmac_sha256_hex(b"k", b"payload", "not-hex"),
            Err(SignError::SignatureMismatch)
        ));
    }
}
