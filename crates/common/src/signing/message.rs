use std::io::{Read, Write};
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::clock::{Clock, SystemClock};
use crate::credentials::{self, CredentialProvider};
use crate::error::SignError;

use super::{hmac_sha256_hex, verify_hmac_sha256_hex};

/// Reserved body field carrying the account owner id.
pub const OWNER_FIELD: &str = "_owner";
/// Reserved body field carrying the signing time in Unix seconds.
pub const TIMESTAMP_FIELD: &str = "_timestamp";

/// The authenticated envelope sent as the `msg` and `sig` query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMessage {
    /// base64 of the zlib-compressed JSON body
    pub msg: String,
    /// hex HMAC-SHA256 over the bytes of `msg`
    pub sig: String,
}

impl SignedMessage {
    /// Check `sig` against `msg` under `secret_key`.
    pub fn verify(&self, secret_key: &[u8]) -> Result<(), SignError> {
        verify_hmac_sha256_hex(secret_key, self.msg.as_bytes(), &self.sig)
    }

    /// Undo the base64 and zlib layers and parse the signed JSON object.
    pub fn decode(&self) -> Result<Map<String, Value>, SignError> {
        let compressed = STANDARD
            .decode(self.msg.as_bytes())
            .map_err(|e| SignError::Malformed(format!("msg is not base64: {}", e)))?;
        let mut json = String::new();
        ZlibDecoder::new(compressed.as_slice())
            .read_to_string(&mut json)
            .map_err(|e| SignError::Malformed(format!("msg does not inflate: {}", e)))?;
        serde_json::from_str(&json)
            .map_err(|e| SignError::Malformed(format!("msg is not a JSON object: {}", e)))
    }
}

/// Builds [`SignedMessage`]s for API requests.
///
/// Cheap to clone; the credentials and clock are shared behind `Arc`s.
#[derive(Clone)]
pub struct MessageSigner {
    credentials: Arc<dyn CredentialProvider>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for MessageSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageSigner").finish_non_exhaustive()
    }
}

impl MessageSigner {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            credentials,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sign a copy of `body` with the owner id and current timestamp injected.
    ///
    /// `body` must serialize to a JSON object. The reserved `_owner` and
    /// `_timestamp` keys always take the signer's values, replacing whatever
    /// the caller put there.
    pub fn sign<T: Serialize + ?Sized>(&self, body: &T) -> Result<SignedMessage, SignError> {
        let (owner_id, secret_key) = credentials::require(self.credentials.as_ref())?;

        let mut fields = match serde_json::to_value(body)? {
            Value::Object(fields) => fields,
            Value::Null => Map::new(),
            other => {
                return Err(SignError::Encoding(format!(
                    "request body must be a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let timestamp = self.clock.now();
        fields.insert(OWNER_FIELD.to_string(), Value::from(owner_id));
        fields.insert(TIMESTAMP_FIELD.to_string(), Value::from(timestamp));

        let json = serde_json::to_vec(&fields)?;
        let msg = STANDARD.encode(deflate(&json)?);
        let sig = hmac_sha256_hex(secret_key, msg.as_bytes())?;

        tracing::debug!(
            timestamp,
            json_len = json.len(),
            msg_len = msg.len(),
            "signed request message"
        );

        Ok(SignedMessage { msg, sig })
    }

    /// Sign an empty body: identity and freshness only.
    pub fn sign_empty(&self) -> Result<SignedMessage, SignError> {
        self.sign(&Map::new())
    }
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, SignError> {
    let compression_failed = |e: std::io::Error| SignError::Encoding(format!("compression failed: {}", e));
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data).map_err(compression_failed)?;
    encoder.finish().map_err(compression_failed)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::clock::FixedClock;
    use crate::credentials::Credentials;

    fn signer(owner: &str, secret: &str, now: i64) -> MessageSigner {
        MessageSigner::new(Arc::new(Credentials::new(owner, secret)))
            .with_clock(Arc::new(FixedClock(now)))
    }

    #[test]
    fn test_sign_injects_owner_and_timestamp() {
        let signed = signer("abc123", "k", 1_000_000_000)
            .sign(&json!({"desc": "Test"}))
            .unwrap();

        let decoded = signed.decode().unwrap();
        assert_eq!(
            serde_json::to_string(&decoded).unwrap(),
            r#"{"desc":"Test","_owner":"abc123","_timestamp":1000000000}"#
        );
        assert_eq!(signed.sig, hmac_sha256_hex(b"k", signed.msg.as_bytes()).unwrap());
    }

    #[test]
    fn test_sign_overwrites_reserved_fields() {
        let body = json!({"_owner": "mallory", "_timestamp": 1, "name": "x"});
        let signed = signer("abc123", "k", 42).sign(&body).unwrap();

        let decoded = signed.decode().unwrap();
        assert_eq!(decoded["_owner"], "abc123");
        assert_eq!(decoded["_timestamp"], 42);
        assert_eq!(decoded["name"], "x");
        // caller's value is untouched
        assert_eq!(body["_owner"], "mallory");
    }

    #[test]
    fn test_sign_accepts_typed_bodies() {
        let mut body = BTreeMap::new();
        body.insert("repeat", -1);
        let signed = signer("abc123", "k", 7).sign(&body).unwrap();
        assert_eq!(signed.decode().unwrap()["repeat"], -1);
    }

    #[test]
    fn test_sign_rejects_non_object_bodies() {
        let signer = signer("abc123", "k", 7);
        assert!(matches!(signer.sign(&json!([1, 2])), Err(SignError::Encoding(_))));
        assert!(matches!(signer.sign("text"), Err(SignError::Encoding(_))));
    }

    #[test]
    fn test_sign_rejects_unserializable_bodies() {
        let mut body = BTreeMap::new();
        body.insert(vec![1u8], "tuple keys are not JSON");
        assert!(matches!(
            signer("abc123", "k", 7).sign(&body),
            Err(SignError::Encoding(_))
        ));
    }

    #[test]
    fn test_sign_requires_credentials() {
        assert!(matches!(
            signer("", "k", 7).sign_empty(),
            Err(SignError::MissingCredentials(_))
        ));
        assert!(matches!(
            signer("abc123", "", 7).sign_empty(),
            Err(SignError::MissingCredentials(_))
        ));
    }

    #[test]
    fn test_msg_is_plain_base64() {
        let signed = signer("abc123", "k", 7)
            .sign(&json!({"desc": "a longer description to compress"}))
            .unwrap();
        assert!(!signed.msg.chars().any(char::is_whitespace));
        assert_eq!(signed.sig.len(), 64);
        // zlib header for the best compression level
        let raw = STANDARD.decode(&signed.msg).unwrap();
        assert_eq!(&raw[..2], &[0x78, 0xda]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let bad = SignedMessage {
            msg: "!!!".into(),
            sig: String::new(),
        };
        assert!(matches!(bad.decode(), Err(SignError::Malformed(_))));

        let not_zlib = SignedMessage {
            msg: STANDARD.encode(b"plain"),
            sig: String::new(),
        };
        assert!(matches!(not_zlib.decode(), Err(SignError::Malformed(_))));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let rendered = format!("{:?}", signer("abc123", "super-secret", 7));
        assert!(!rendered.contains("abc123"));
        assert!(!rendered.contains("super-secret"));
    }
}
