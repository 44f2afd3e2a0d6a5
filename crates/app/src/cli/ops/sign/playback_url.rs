use clap::Args;

use common::credentials;
use common::error::SignError;
use linear_playlist::state::{Settings, StateError};

use crate::cli::op::playback_signer;

/// Print a signed playback URL for a playlist
#[derive(Args, Debug, Clone)]
pub struct PlaybackUrl {
    /// Playlist (content) id
    pub id: String,

    /// File suffix selecting the container format (m3u8 or mpd)
    #[arg(long, default_value = "m3u8")]
    pub suffix: String,

    /// Override the configured playback prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Override the configured ad configuration
    #[arg(long)]
    pub ad: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SignUrlError {
    #[error("config error: {0}")]
    State(#[from] StateError),
    #[error("signing failed: {0}")]
    Sign(#[from] SignError),
}

impl PlaybackUrl {
    /// Sign with already resolved settings.
    ///
    /// The owner id comes from the credential store here, so an empty one is
    /// a missing credential rather than a bad argument.
    pub fn sign_with(&self, settings: &Settings) -> Result<String, SignUrlError> {
        let (owner_id, _) = credentials::require(&settings.credentials)?;
        let prefix = self.prefix.as_deref().unwrap_or(&settings.playback_prefix);
        let ad = self.ad.as_deref().or(settings.ad_config.as_deref());

        Ok(playback_signer(settings).sign_playback_url(
            prefix,
            &self.suffix,
            &self.id,
            owner_id,
            ad,
        )?)
    }
}

#[async_trait::async_trait]
impl crate::cli::op::Op for PlaybackUrl {
    type Error = SignUrlError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let settings = ctx.settings()?;
        self.sign_with(&settings)
    }
}
