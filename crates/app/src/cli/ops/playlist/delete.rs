use clap::Args;

use linear_playlist::api::client::ApiError;
use linear_playlist::api::v4::linear_playlist::DeleteRequest;
use linear_playlist::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Delete {
    /// Playlist id
    pub id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PlaylistDeleteError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("config error: {0}")]
    State(#[from] StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Delete {
    type Error = PlaylistDeleteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let settings = ctx.settings()?;
        let client = ctx.client(&settings)?;

        client
            .call(DeleteRequest {
                id: self.id.clone(),
            })
            .await?;
        tracing::info!(id = %self.id, "deleted playlist");

        Ok(format!("Deleted playlist {}", self.id))
    }
}
