use std::sync::Arc;

use url::form_urlencoded;

use crate::clock::{Clock, NonceSource, SystemClock, ThreadRngNonce};
use crate::credentials::CredentialProvider;
use crate::error::SignError;

use super::{hmac_sha256_hex, verify_hmac_sha256_hex};

/// How long a signed playback URL stays valid, in seconds.
pub const PLAYBACK_TTL_SECS: i64 = 600;
/// Token-check algorithm version (`tc`).
pub const TOKEN_CHECK_VERSION: &str = "1";
/// Content type marker for playlists (`ct`).
pub const PLAYLIST_CONTENT_TYPE: &str = "p";

const SIG_PARAM: &str = "&sig=";

/// Builds signed, time-limited playback URLs.
#[derive(Clone)]
pub struct PlaybackSigner {
    credentials: Arc<dyn CredentialProvider>,
    clock: Arc<dyn Clock>,
    nonce: Arc<dyn NonceSource>,
}

impl std::fmt::Debug for PlaybackSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackSigner").finish_non_exhaustive()
    }
}

impl PlaybackSigner {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            credentials,
            clock: Arc::new(SystemClock),
            nonce: Arc::new(ThreadRngNonce),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_nonce(mut self, nonce: Arc<dyn NonceSource>) -> Self {
        self.nonce = nonce;
        self
    }

    /// Build `{base_prefix}/{content_id}.{file_suffix}?{query}&sig={hex}`.
    pub fn sign_playback_url(
        &self,
        base_prefix: &str,
        file_suffix: &str,
        content_id: &str,
        owner_id: &str,
        ad_config: Option<&str>,
    ) -> Result<String, SignError> {
        let query = self.sign_query(content_id, owner_id, ad_config)?;
        let url = format!(
            "{}/{}.{}?{}",
            base_prefix.trim_end_matches('/'),
            content_id,
            file_suffix,
            query
        );
        tracing::debug!(content_id, file_suffix, "signed playback url");
        Ok(url)
    }

    /// The signed query string alone, `sig` last.
    pub fn sign_query(
        &self,
        content_id: &str,
        owner_id: &str,
        ad_config: Option<&str>,
    ) -> Result<String, SignError> {
        if content_id.is_empty() {
            return Err(SignError::Format("content id"));
        }
        if owner_id.is_empty() {
            return Err(SignError::Format("owner id"));
        }
        let secret_key = self.credentials.secret_key();
        if secret_key.is_empty() {
            return Err(SignError::MissingCredentials("secret key"));
        }

        let exp = self.clock.now() + PLAYBACK_TTL_SECS;
        let rn = self.nonce.next_nonce();

        // the parameter order is part of the signed bytes
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("tc", TOKEN_CHECK_VERSION)
            .append_pair("exp", &exp.to_string())
            .append_pair("rn", &rn.to_string())
            .append_pair("ct", PLAYLIST_CONTENT_TYPE)
            .append_pair("cid", content_id)
            .append_pair("oid", owner_id)
            .append_pair("test", "1")
            .append_pair("ad", ad_config.unwrap_or_default())
            .finish();

        let sig = hmac_sha256_hex(secret_key, query.as_bytes())?;
        Ok(format!("{}{}{}", query, SIG_PARAM, sig))
    }
}

/// Parameters recovered from a verified playback query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackClaims {
    pub exp: i64,
    pub rn: u32,
    pub cid: String,
    pub oid: String,
    pub ad: String,
}

impl PlaybackClaims {
    pub fn is_expired(&self, now: i64) -> bool {
        now > self.exp
    }
}

/// Verify a playback query string (or full URL) signed by [`PlaybackSigner`].
///
/// The trailing `&sig=` token is stripped and the HMAC is recomputed over the
/// remaining bytes exactly as they appear.
pub fn verify_playback_query(query: &str, secret_key: &[u8]) -> Result<PlaybackClaims, SignError> {
    let query = query.split_once('?').map_or(query, |(_, q)| q);
    let (signed, sig) = query
        .rsplit_once(SIG_PARAM)
        .ok_or_else(|| SignError::Malformed("query has no trailing sig".into()))?;

    verify_hmac_sha256_hex(secret_key, signed.as_bytes(), sig)?;

    let mut exp = None;
    let mut rn = None;
    let mut cid = None;
    let mut oid = None;
    let mut ad = String::new();
    for (key, value) in form_urlencoded::parse(signed.as_bytes()) {
        match key.as_ref() {
            "exp" => exp = value.parse::<i64>().ok(),
            "rn" => rn = value.parse::<u32>().ok(),
            "cid" => cid = Some(value.into_owned()),
            "oid" => oid = Some(value.into_owned()),
            "ad" => ad = value.into_owned(),
            _ => {}
        }
    }

    let missing = |name: &str| SignError::Malformed(format!("missing or invalid {}", name));
    Ok(PlaybackClaims {
        exp: exp.ok_or_else(|| missing("exp"))?,
        rn: rn.ok_or_else(|| missing("rn"))?,
        cid: cid.ok_or_else(|| missing("cid"))?,
        oid: oid.ok_or_else(|| missing("oid"))?,
        ad,
    })
}
