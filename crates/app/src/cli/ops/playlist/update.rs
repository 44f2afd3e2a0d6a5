use clap::Args;

use linear_playlist::api::client::ApiError;
use linear_playlist::api::v4::linear_playlist::{PlaylistObject, UpdateRequest};
use linear_playlist::state::StateError;

use super::PayloadArgs;

#[derive(Args, Debug, Clone)]
pub struct Update {
    /// Playlist id
    pub id: String,

    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Debug, thiserror::Error)]
pub enum PlaylistUpdateError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("config error: {0}")]
    State(#[from] StateError),
    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
    #[error("nothing to update: pass at least one playlist field")]
    NothingToUpdate,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Update {
    type Error = PlaylistUpdateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let payload = self.payload.to_payload();
        if payload.is_empty() {
            return Err(PlaylistUpdateError::NothingToUpdate);
        }

        let settings = ctx.settings()?;
        let client = ctx.client(&settings)?;

        let response: PlaylistObject = client
            .call(UpdateRequest {
                id: self.id.clone(),
                payload,
            })
            .await?;
        tracing::info!(id = %response.id, "updated playlist");

        Ok(format!(
            "Updated playlist:\n{}",
            serde_json::to_string_pretty(&response)?
        ))
    }
}
