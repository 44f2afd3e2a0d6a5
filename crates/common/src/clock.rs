//! Time and randomness used by the signers, behind traits so tests can pin
//! them to fixed values.

use time::OffsetDateTime;

/// Source of the current Unix time in whole seconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        OffsetDateTime::now_utc().unix_timestamp()
    }
}

/// A clock stuck at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Source of the anti-replay nonce placed in playback URLs.
pub trait NonceSource: Send + Sync {
    fn next_nonce(&self) -> u32;
}

/// Nonces drawn from the thread-local RNG, covering the full `u32` range.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngNonce;

impl NonceSource for ThreadRngNonce {
    fn next_nonce(&self) -> u32 {
        rand::random::<u32>()
    }
}

/// Always returns the same nonce.
#[derive(Debug, Clone, Copy)]
pub struct FixedNonce(pub u32);

impl NonceSource for FixedNonce {
    fn next_nonce(&self) -> u32 {
        self.0
    }
}
