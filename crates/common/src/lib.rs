/**
 * Injectable time and nonce sources.
 */
pub mod clock;
/**
 * Owner id + secret key providers shared by
 *  both signers.
 */
pub mod credentials;
pub mod error;
/**
 * Request payload shaping for the linear
 *  playlist API.
 */
pub mod playlist;
/**
 * HMAC-SHA256 request envelopes and
 *  playback URL signatures.
 */
pub mod signing;

pub mod prelude {
    pub use crate::clock::{Clock, FixedClock, FixedNonce, NonceSource, SystemClock, ThreadRngNonce};
    pub use crate::credentials::{CredentialProvider, Credentials};
    pub use crate::error::SignError;
    pub use crate::playlist::{PlaylistEntry, PlaylistPayload};
    pub use crate::signing::{
        verify_playback_query, MessageSigner, PlaybackClaims, PlaybackSigner, SignedMessage,
        PLAYBACK_TTL_SECS,
    };
}
