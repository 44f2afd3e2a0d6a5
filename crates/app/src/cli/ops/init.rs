use clap::Args;
use url::Url;

use common::credentials::{OWNER_ID_ENV, SECRET_KEY_ENV};
use linear_playlist::state::{
    AppConfig, AppState, StateError, DEFAULT_API_HOST, DEFAULT_PLAYBACK_PREFIX,
};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// Account owner id (from the account settings page)
    #[arg(long, env = OWNER_ID_ENV)]
    pub owner_id: String,

    /// API secret key (from the playback tokens page)
    #[arg(long, env = SECRET_KEY_ENV, hide_env_values = true)]
    pub secret_key: String,

    /// Base URL of the playlist API
    #[arg(long, default_value = DEFAULT_API_HOST)]
    pub api_host: Url,

    /// Prefix for signed playback URLs
    #[arg(long, default_value = DEFAULT_PLAYBACK_PREFIX)]
    pub playback_prefix: String,

    /// Ad configuration appended as `ad` to playback URLs
    #[arg(long)]
    pub ad_config: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let config = AppConfig {
            owner_id: self.owner_id.clone(),
            api_host: self.api_host.clone(),
            playback_prefix: self.playback_prefix.clone(),
            ad_config: self.ad_config.clone(),
        };

        let state = AppState::init(ctx.config_path.clone(), config, &self.secret_key)?;

        let output = format!(
            "Initialized lpl directory at: {}\n\
             - Config: {}\n\
             - Secret key: {}\n\
             - Owner id: {}\n\
             - API host: {}\n\
             - Playback prefix: {}",
            state.lpl_dir.display(),
            state.config_path.display(),
            state.secret_path.display(),
            state.config.owner_id,
            state.config.api_host,
            state.config.playback_prefix,
        );

        Ok(output)
    }
}
