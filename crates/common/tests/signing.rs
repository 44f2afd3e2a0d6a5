//! End-to-end properties of the request and playback signers.

use std::sync::Arc;
use std::thread;

use serde_json::json;

use common::prelude::*;
use common::signing::hmac_sha256_hex;

const NOW: i64 = 1_000_000_000;

fn credentials() -> Arc<Credentials> {
    Arc::new(Credentials::new("abc123", "k"))
}

#[test]
fn test_resigning_later_changes_msg_and_sig() {
    let body = json!({"desc": "Test"});
    let first = MessageSigner::new(credentials())
        .with_clock(Arc::new(FixedClock(NOW)))
        .sign(&body)
        .unwrap();
    let second = MessageSigner::new(credentials())
        .with_clock(Arc::new(FixedClock(NOW + 1)))
        .sign(&body)
        .unwrap();

    assert_ne!(first.msg, second.msg);
    assert_ne!(first.sig, second.sig);
    assert_eq!(first.decode().unwrap()["_timestamp"], NOW);
    assert_eq!(second.decode().unwrap()["_timestamp"], NOW + 1);
}

#[test]
fn test_single_byte_tamper_breaks_signature() {
    let signed = MessageSigner::new(credentials())
        .with_clock(Arc::new(FixedClock(NOW)))
        .sign(&json!({"desc": "Test", "repeat": -1}))
        .unwrap();
    assert!(signed.verify(b"k").is_ok());

    let bytes = signed.msg.as_bytes();
    for i in 0..bytes.len() {
        let mut tampered = bytes.to_vec();
        tampered[i] = if tampered[i] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();

        let resigned = hmac_sha256_hex(b"k", tampered.as_bytes()).unwrap();
        assert_ne!(resigned, signed.sig, "byte {} did not change the sig", i);

        let forged = SignedMessage {
            msg: tampered,
            sig: signed.sig.clone(),
        };
        assert!(matches!(forged.verify(b"k"), Err(SignError::SignatureMismatch)));
    }
}

#[test]
fn test_playback_urls_differ_only_by_nonce() {
    let base = PlaybackSigner::new(credentials()).with_clock(Arc::new(FixedClock(NOW)));
    let a = base
        .clone()
        .with_nonce(Arc::new(FixedNonce(1)))
        .sign_playback_url("https://cdn.example/playlist", "m3u8", "pl123", "abc123", None)
        .unwrap();
    let b = base
        .with_nonce(Arc::new(FixedNonce(2)))
        .sign_playback_url("https://cdn.example/playlist", "m3u8", "pl123", "abc123", None)
        .unwrap();

    let claims_a = verify_playback_query(&a, b"k").unwrap();
    let claims_b = verify_playback_query(&b, b"k").unwrap();
    assert_eq!(claims_a.exp, NOW + PLAYBACK_TTL_SECS);
    assert_eq!(claims_a.exp, claims_b.exp);
    assert_ne!(claims_a.rn, claims_b.rn);

    let strip = |url: &str| {
        let (head, _) = url.rsplit_once("&sig=").unwrap();
        head.replace(&format!("rn={}", claims_a.rn), "rn=?")
            .replace(&format!("rn={}", claims_b.rn), "rn=?")
    };
    assert_eq!(strip(&a), strip(&b));
    assert_ne!(a, b);
}

#[test]
fn test_stripped_sig_matches_recomputed_hmac() {
    let url = PlaybackSigner::new(credentials())
        .sign_playback_url("https://cdn.example/playlist", "mpd", "pl123", "abc123", Some("beta"))
        .unwrap();

    let (_, query) = url.split_once('?').unwrap();
    let (signed, sig) = query.rsplit_once("&sig=").unwrap();
    assert_eq!(hmac_sha256_hex(b"k", signed.as_bytes()).unwrap(), sig);
}

#[test]
fn test_literal_playback_example() {
    let url = PlaybackSigner::new(credentials())
        .with_clock(Arc::new(FixedClock(NOW)))
        .with_nonce(Arc::new(FixedNonce(42)))
        .sign_playback_url("https://cdn.example/playlist", "m3u8", "pl123", "abc123", None)
        .unwrap();

    let query = "tc=1&exp=1000000600&rn=42&ct=p&cid=pl123&oid=abc123&test=1&ad=";
    let sig = hmac_sha256_hex(b"k", query.as_bytes()).unwrap();
    assert!(url.ends_with(&format!("?{}&sig={}", query, sig)));
}

#[test]
fn test_missing_credentials_never_sign() {
    for creds in [
        Credentials::new("", "k"),
        Credentials::new("abc123", ""),
        Credentials::new("", ""),
    ] {
        let signer = MessageSigner::new(Arc::new(creds));
        for _ in 0..10 {
            assert!(matches!(
                signer.sign(&json!({"desc": "Test"})),
                Err(SignError::MissingCredentials(_))
            ));
        }
    }
}

#[test]
fn test_signers_are_shareable_across_threads() {
    let signer = MessageSigner::new(credentials());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let signer = signer.clone();
            thread::spawn(move || signer.sign(&json!({ "n": i })).unwrap())
        })
        .collect();

    for handle in handles {
        let signed = handle.join().unwrap();
        assert!(signed.verify(b"k").is_ok());
    }
}
