use clap::Args;

use linear_playlist::api::client::ApiError;
use linear_playlist::api::v4::linear_playlist::ReadRequest;
use linear_playlist::state::StateError;

#[derive(Args, Debug, Clone)]
pub struct Read {
    /// Playlist id (omit to list every playlist)
    pub id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PlaylistReadError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("config error: {0}")]
    State(#[from] StateError),
    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Read {
    type Error = PlaylistReadError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let settings = ctx.settings()?;
        let client = ctx.client(&settings)?;

        let response = client
            .call(ReadRequest {
                id: self.id.clone(),
            })
            .await?;

        Ok(serde_json::to_string_pretty(&response)?)
    }
}
