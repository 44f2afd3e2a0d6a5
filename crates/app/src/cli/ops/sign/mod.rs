use clap::{Args, Subcommand};

pub mod message;
pub mod playback_url;

use crate::cli::op::Op;

crate::command_enum! {
    (Message, message::Message),
    (Url, playback_url::PlaybackUrl),
}

// Rename the generated Command to SignCommand for clarity
pub type SignCommand = Command;

/// Sign locally without calling the API
#[derive(Args, Debug, Clone)]
pub struct Sign {
    #[command(subcommand)]
    pub command: SignCommand,
}

#[async_trait::async_trait]
impl Op for Sign {
    type Error = OpError;
    type Output = OpOutput;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        self.command.execute(ctx).await
    }
}
